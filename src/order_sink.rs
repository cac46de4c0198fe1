//! Order delivery
//!
//! The engine hands a finished [`Order`] back to its caller and stops there.
//! Whatever carries the order onward (a file, a queue, an HTTP endpoint)
//! implements [`OrderSink`].

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::submission::Order;

/// Destination for submitted orders
pub trait OrderSink {
    /// Deliver one order. Failure does not affect the session that produced it.
    fn deliver(&mut self, order: &Order) -> Result<()>;
}

/// Writes each order as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    delivered: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            delivered: 0,
        }
    }

    /// Number of orders written so far
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OrderSink for JsonLinesSink<W> {
    fn deliver(&mut self, order: &Order) -> Result<()> {
        serde_json::to_writer(&mut self.writer, order).context("Failed to serialize order")?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .context("Failed to write order")?;

        self.delivered += 1;
        debug!(total = order.total(), delivered = self.delivered, "order delivered");
        Ok(())
    }
}

/// Keeps orders in memory; handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub orders: Vec<Order>,
}

impl OrderSink for MemorySink {
    fn deliver(&mut self, order: &Order) -> Result<()> {
        self.orders.push(order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::TaxRate;
    use crate::state::ConfigurationState;
    use crate::submission;
    use crate::validation::ContactFields;

    fn order() -> Order {
        let mut state = ConfigurationState::new();
        let id = state.units[0].id;
        state.toggle_selectable(id, "motion", true).unwrap();
        submission::submit(
            &state,
            &ContactFields::new("Asha", "a@b.com", "9876543210"),
            TaxRate::GST,
        )
        .unwrap()
    }

    #[test]
    fn test_json_lines_one_order_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.deliver(&order()).unwrap();
        sink.deliver(&order()).unwrap();
        assert_eq!(sink.delivered(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["subtotal"], 1200);
        assert_eq!(parsed["tax"], 216);
        assert_eq!(parsed["total"], 1416);
        assert_eq!(parsed["basic_info"]["contact_email"], "a@b.com");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        let order = order();
        sink.deliver(&order).unwrap();
        assert_eq!(sink.orders, vec![order]);
    }
}
