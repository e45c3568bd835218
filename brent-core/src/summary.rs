//! Textual summary blocks shown under the chart.

use crate::domain::{ChangePoint, PriceChangeAroundEvent};

/// One labelled line of a summary block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

pub fn change_point_block(cp: &ChangePoint) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new("Change Point", cp.date.clone()),
        SummaryLine::new("Mean Price Before", format!("${:.2}", cp.mean_before)),
        SummaryLine::new("Mean Price After", format!("${:.2}", cp.mean_after)),
        SummaryLine::new("Percentage Change", format!("{:.2}%", cp.percent_change)),
    ]
}

pub fn price_change_block(pc: &PriceChangeAroundEvent) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new("Event", format!("{} ({})", pc.event, pc.date)),
        SummaryLine::new(
            "Average Price Change (±5 days)",
            format!("{:.2}%", pc.avg_price_change),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_point_two_decimals() {
        let cp = ChangePoint {
            date: "2005-02-24".into(),
            mean_before: 21.444,
            mean_after: 75.5,
            percent_change: 252.486,
            index: Some(4521),
        };
        let lines: Vec<String> = change_point_block(&cp).iter().map(|l| l.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Change Point: 2005-02-24",
                "Mean Price Before: $21.44",
                "Mean Price After: $75.50",
                "Percentage Change: 252.49%",
            ]
        );
    }

    #[test]
    fn price_change_block_format() {
        let pc = PriceChangeAroundEvent {
            date: "2020-03-09".into(),
            event: "Price war".into(),
            avg_price_change: -4.0,
        };
        let lines = price_change_block(&pc);
        assert_eq!(lines[0].value, "Price war (2020-03-09)");
        assert_eq!(lines[1].value, "-4.00%");
    }
}
