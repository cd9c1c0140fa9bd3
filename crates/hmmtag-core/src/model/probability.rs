//! # Probability Estimation
//!
//! Turns a [`CountTable`] into a row-normalized table of natural-log
//! probabilities. Only observed outcomes are stored; every miss goes through
//! [`lookup`], which returns the caller's floor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::counts::CountTable;
use crate::error::{HmmError, Result};

/// `ln(1e-20)`, the score of any event absent from training.
pub const OOV_FLOOR: f64 = -46.051_701_859_880_914;

/// Immutable context → outcome → log-probability mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl ProbabilityTable {
    /// Normalize every row of `counts`.
    ///
    /// `name` only labels errors and log events.
    ///
    /// # Errors
    ///
    /// Returns `HmmError::ZeroMassContext` for a row whose counts sum to zero.
    pub fn estimate(counts: &CountTable, name: &'static str) -> Result<Self> {
        let mut rows = HashMap::with_capacity(counts.len());

        for (context, row) in counts.rows() {
            let total: u64 = row.values().sum();
            if total == 0 {
                return Err(HmmError::ZeroMassContext {
                    table: name,
                    context: context.to_string(),
                });
            }

            let total = total as f64;
            let probs: HashMap<String, f64> = row
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(outcome, &count)| (outcome.clone(), (count as f64 / total).ln()))
                .collect();
            rows.insert(context.to_string(), probs);
        }

        debug!(table = name, contexts = rows.len(), "estimated probability table");
        Ok(Self { rows })
    }

    /// Stored log-probability, `None` when the pair was never observed.
    pub fn get(&self, context: &str, outcome: &str) -> Option<f64> {
        self.rows.get(context).and_then(|row| row.get(outcome)).copied()
    }

    pub fn row(&self, context: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(context)
    }

    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Returns `true` if `outcome` appears under any context.
    pub fn has_outcome(&self, outcome: &str) -> bool {
        self.rows.values().any(|row| row.contains_key(outcome))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Log-probability of `outcome` under `context`, or `floor` on a miss.
#[inline]
pub fn lookup(table: &ProbabilityTable, context: &str, outcome: &str, floor: f64) -> f64 {
    table.get(context, outcome).unwrap_or(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &[(&str, u64)])]) -> CountTable {
        CountTable::from_rows(
            rows.iter()
                .map(|(ctx, row)| {
                    let row = row.iter().map(|(o, c)| (o.to_string(), *c)).collect();
                    (ctx.to_string(), row)
                })
                .collect(),
        )
    }

    #[test]
    fn floor_matches_definition() {
        assert!((OOV_FLOOR - 1e-20f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn rows_are_normalized_in_log_space() {
        let counts = table(&[("NN", &[("dog", 3), ("cat", 1)])]);
        let probs = ProbabilityTable::estimate(&counts, "emission").unwrap();

        assert!((probs.get("NN", "dog").unwrap() - 0.75f64.ln()).abs() < 1e-12);
        assert!((probs.get("NN", "cat").unwrap() - 0.25f64.ln()).abs() < 1e-12);

        let mass: f64 = probs.row("NN").unwrap().values().map(|lp| lp.exp()).sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_mass_row_is_reported() {
        let counts = table(&[("DT", &[("the", 2)]), ("VBZ", &[("runs", 0)])]);
        let err = ProbabilityTable::estimate(&counts, "emission").unwrap_err();
        match err {
            HmmError::ZeroMassContext { table, context } => {
                assert_eq!(table, "emission");
                assert_eq!(context, "VBZ");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_row_is_reported() {
        let counts = table(&[("JJ", &[])]);
        assert!(ProbabilityTable::estimate(&counts, "transition").is_err());
    }

    #[test]
    fn zero_count_outcomes_are_not_materialized() {
        let counts = table(&[("NN", &[("dog", 2), ("cat", 0)])]);
        let probs = ProbabilityTable::estimate(&counts, "emission").unwrap();
        assert_eq!(probs.get("NN", "cat"), None);
        assert_eq!(probs.get("NN", "dog"), Some(0.0));
    }

    #[test]
    fn lookup_falls_back_to_floor() {
        let counts = table(&[("NN", &[("dog", 1)])]);
        let probs = ProbabilityTable::estimate(&counts, "emission").unwrap();

        assert_eq!(lookup(&probs, "NN", "dog", OOV_FLOOR), 0.0);
        assert_eq!(lookup(&probs, "NN", "cat", OOV_FLOOR), OOV_FLOOR);
        assert_eq!(lookup(&probs, "JJ", "dog", OOV_FLOOR), OOV_FLOOR);
        assert_eq!(lookup(&probs, "JJ", "dog", -1.0), -1.0);
        assert!(probs.has_outcome("dog"));
        assert!(!probs.has_outcome("cat"));
    }
}
