//! Per-request aggregation and table rendering.
mod aggregate;
mod table;

#[cfg(test)]
mod tests;

pub use aggregate::{Metrics, aggregate, round_to_millis};
pub use table::{format_duration, render_table};
