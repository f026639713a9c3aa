//! Colorful console output for heuristic progress.
//!
//! Provides a `tracing` layer that formats the `ktsp_solver` events with
//! colors. Initialized on first use when the `console` feature is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times; only the first call has effect. Does nothing
/// if another global subscriber is already set.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "ktsp_solver=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(KtspConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that prints heuristic events with colors.
pub struct KtspConsoleLayer;

impl<S: Subscriber> Layer<S> for KtspConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("ktsp_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    tours: Option<u64>,
    vertices: Option<u64>,
    orders: Option<u64>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    duration_ms: Option<u64>,
    feasible: Option<bool>,
    cost: Option<f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    gap: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "strategy" => self.strategy = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "tours" => self.tours = Some(value),
            "vertices" => self.vertices = Some(value),
            "orders" => self.orders = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "cost" => self.cost = Some(value),
            "lower_bound" => self.lower_bound = Some(value),
            "upper_bound" => self.upper_bound = Some(value),
            "gap" => self.gap = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "heuristic_start" => format_heuristic_start(v),
        "heuristic_end" => format_heuristic_end(v),
        "subgradient_start" => format_subgradient_start(),
        "subgradient_iteration" => format_iteration(v),
        "subgradient_end" => format_subgradient_end(v),
        _ => String::new(),
    }
}

fn format_heuristic_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} repairing {} tours over {} vertices, strategy ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Repair]".bright_cyan(),
        v.tours.unwrap_or(0).bright_yellow(),
        v.vertices.unwrap_or(0).bright_yellow(),
        v.strategy.as_deref().unwrap_or("unknown").white().bold()
    )
}

fn format_heuristic_end(v: &EventVisitor) -> String {
    let feasible = v.feasible.unwrap_or(false);
    let status = if feasible {
        "DISJOINT TOURS FOUND".bright_green().bold().to_string()
    } else {
        "NO FEASIBLE ORDER".bright_red().bold().to_string()
    };
    let cost = match v.cost {
        Some(c) if feasible => format!("{c:.3}"),
        _ => "N/A".to_string(),
    };

    format!(
        "{} {} {} {}: orders tried ({}), time spent ({}), total cost ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Repair]".bright_cyan(),
        status,
        v.orders.unwrap_or(0).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        cost.bright_magenta()
    )
}

fn format_subgradient_start() -> String {
    format!(
        "{} {} {} subgradient loop started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Subgradient]".bright_cyan(),
    )
}

fn format_iteration(v: &EventVisitor) -> String {
    format!(
        "    {} Iter {:>5} | lb {} | ub {} | gap {}",
        "->".bright_blue(),
        v.iteration.unwrap_or(0).white(),
        format_bound(v.lower_bound),
        format_bound(v.upper_bound),
        format_gap(v.gap)
    )
}

fn format_subgradient_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} subgradient loop ended after {} iterations: lb {}, ub {}, gap {}, time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Subgradient]".bright_cyan(),
        v.iterations.unwrap_or(0).white(),
        format_bound(v.lower_bound),
        format_bound(v.upper_bound),
        format_gap(v.gap),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_bound(bound: Option<f64>) -> String {
    match bound {
        Some(b) if b.is_finite() => format!("{b:.3}").bright_yellow().to_string(),
        _ => "N/A".white().to_string(),
    }
}

fn format_gap(gap: Option<f64>) -> String {
    match gap {
        Some(g) if g.is_finite() => {
            let text = format!("{:.4}%", g * 100.0);
            if g <= 1e-5 {
                text.bright_green().to_string()
            } else {
                text.yellow().to_string()
            }
        }
        _ => "N/A".white().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
