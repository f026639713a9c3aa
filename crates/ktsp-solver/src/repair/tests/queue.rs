use super::*;

fn swap(first: (usize, usize), cost: f64) -> CandidateSwap {
    CandidateSwap {
        first: Edge::new(first.0, first.1),
        second: Edge::new(9, 8),
        flipped: false,
        cost,
    }
}

#[test]
fn test_queue_pops_cheapest_first() {
    let mut queue = CandidateQueue::new();
    queue.push(swap((1, 0), 3.0));
    queue.push(swap((2, 0), 1.0));
    queue.push(swap((3, 0), 2.0));

    assert_eq!(queue.peek().map(|s| s.cost), Some(1.0));
    let costs: Vec<f64> = std::iter::from_fn(|| queue.pop()).map(|s| s.cost).collect();
    assert_eq!(costs, vec![1.0, 2.0, 3.0]);
    assert!(queue.is_empty());
    assert_eq!(queue.pushed(), 3);
}

#[test]
fn test_queue_ties_keep_insertion_order() {
    let mut queue = CandidateQueue::new();
    queue.push(swap((1, 0), 2.0));
    queue.push(swap((2, 0), 1.0));
    queue.push(swap((3, 0), 2.0));
    queue.push(swap((4, 0), 1.0));

    let firsts: Vec<Edge> = std::iter::from_fn(|| queue.pop()).map(|s| s.first).collect();
    assert_eq!(
        firsts,
        vec![
            Edge::new(2, 0),
            Edge::new(4, 0),
            Edge::new(1, 0),
            Edge::new(3, 0)
        ]
    );
}

#[test]
fn test_reconnection_orientations() {
    let costs = ring_costs(5);
    let straight = CandidateSwap::priced(Edge::new(1, 2), Edge::new(3, 4), false, &costs).unwrap();

    assert_eq!(straight.reconnection(), [(2, 4), (1, 3)]);
    assert_eq!(straight.cost, 4.0);
    assert_eq!(straight.flip().reconnection(), [(2, 3), (1, 4)]);
    assert_eq!(straight.flip().new_edges(), [Edge::new(3, 2), Edge::new(4, 1)]);

    let flipped = CandidateSwap::priced(Edge::new(1, 2), Edge::new(3, 4), true, &costs).unwrap();
    assert_eq!(flipped.cost, 3.0);
}

#[test]
fn test_pair_key_is_unordered() {
    let a = CandidateSwap {
        first: Edge::new(1, 0),
        second: Edge::new(3, 2),
        flipped: false,
        cost: 0.0,
    };
    let b = CandidateSwap {
        first: Edge::new(3, 2),
        second: Edge::new(1, 0),
        flipped: true,
        cost: 5.0,
    };
    assert_eq!(a.pair_key(), b.pair_key());
}
