//! Rendering demo results as text or JSON.

use clap::ValueEnum;
use serde::Serialize;

use crate::account::Customer;
use crate::demos::{CasePair, DeferredRuns, Household, RemainderGroup};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable lines.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// The result of one subcommand.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Customers(Vec<Customer>),
    Deferred(DeferredRuns),
    Names(Vec<String>),
    Words(Vec<CasePair>),
    Numbers(Vec<i64>),
    Remainders(Vec<RemainderGroup>),
    Households(Vec<Household>),
    Score { name: String, score: u32 },
}

impl Report {
    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Json => serde_json::to_string_pretty(self),
            Format::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let lines: Vec<String> = match self {
            Report::Customers(customers) => customers
                .iter()
                .map(|c| format!("{}, {}", c.name, c.address))
                .collect(),
            Report::Deferred(runs) => {
                let mut lines = vec!["First try:".to_string()];
                lines.extend(runs.first.iter().map(i64::to_string));
                lines.push("Second try:".to_string());
                lines.extend(runs.second.iter().map(i64::to_string));
                lines
            }
            Report::Names(names) => names.clone(),
            Report::Words(pairs) => pairs
                .iter()
                .map(|p| format!("Uppercase: {}, Lowercase: {}", p.upper, p.lower))
                .collect(),
            Report::Numbers(numbers) => numbers.iter().map(i64::to_string).collect(),
            Report::Remainders(groups) => groups
                .iter()
                .map(|g| {
                    format!(
                        "Numbers with a remainder of {}: {}",
                        g.remainder,
                        join(&g.numbers)
                    )
                })
                .collect(),
            Report::Households(households) => households
                .iter()
                .map(|h| format!("{}: {}", h.name, h.addresses.join("; ")))
                .collect(),
            Report::Score { name, score } => vec![format!("{name}'s score: {score}")],
        };
        lines.join("\n")
    }
}

fn join(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_text_lists_both_runs() {
        let report = Report::Deferred(DeferredRuns {
            first: vec![0, 2],
            second: vec![2, 4],
        });
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "First try:\n0\n2\nSecond try:\n2\n4"
        );
    }

    #[test]
    fn remainder_text() {
        let report = Report::Remainders(vec![RemainderGroup {
            remainder: 0,
            numbers: vec![5, 0],
        }]);
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "Numbers with a remainder of 0: 5, 0"
        );
    }

    #[test]
    fn household_text_joins_addresses() {
        let report = Report::Households(vec![
            Household {
                name: "Peter".into(),
                addresses: vec!["1 Wilco Way".into(), "2 Wilco Way".into()],
            },
            Household {
                name: "Roger".into(),
                addresses: vec!["1 Wilco Way".into()],
            },
        ]);
        assert_eq!(
            report.render(Format::Text).unwrap(),
            "Peter: 1 Wilco Way; 2 Wilco Way\nRoger: 1 Wilco Way"
        );
    }

    #[test]
    fn empty_result_renders_nothing() {
        assert_eq!(Report::Names(Vec::new()).render(Format::Text).unwrap(), "");
    }

    #[test]
    fn score_json() {
        let report = Report::Score {
            name: "Bob".into(),
            score: 40,
        };
        let json: serde_json::Value =
            serde_json::from_str(&report.render(Format::Json).unwrap()).unwrap();
        assert_eq!(json["name"], "Bob");
        assert_eq!(json["score"], 40);
    }

    #[test]
    fn customers_json_is_an_array() {
        let report = Report::Customers(vec![Customer {
            name: "Roger".into(),
            address: "1 Wilco Way".into(),
        }]);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(Format::Json).unwrap()).unwrap();
        assert_eq!(json[0]["address"], "1 Wilco Way");
    }
}
