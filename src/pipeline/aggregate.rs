//! Group-wise attrition rates

use std::collections::HashMap;
use std::fmt;

use polars::prelude::*;
use serde::Serialize;

use super::error::{DashboardError, Result};
use super::values::{column_to_f64_vec, column_to_string_vec, ValueKind};

/// How the grouping column is interpreted and ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Numeric levels (e.g. satisfaction 1-4), ordered ascending
    Ordinal,
    /// Text labels, kept in first-seen order
    Categorical,
}

impl GroupKind {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            GroupKind::Ordinal => ValueKind::Numeric,
            GroupKind::Categorical => ValueKind::Text,
        }
    }
}

/// A distinct value of the grouping column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Level(f64),
    Label(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Level(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            GroupKey::Level(v) => write!(f, "{}", v),
            GroupKey::Label(s) => f.write_str(s),
        }
    }
}

/// Attrition rate of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub key: GroupKey,
    /// Mean of the flag, a fraction in [0, 1]
    pub rate: f64,
    /// Rows that contributed to the mean
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group_column: String,
    pub kind: GroupKind,
    pub groups: Vec<GroupRate>,
}

/// Result of [`rate_by_group`]
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    Computed(GroupSummary),
    /// No row has both a group value and a flag value
    NoData,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, flag: f64) {
        self.sum += flag;
        self.count += 1;
    }

    fn rate(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Mean flag value per distinct value of `group_column`.
///
/// Rows where either column is missing are skipped. Ordinal groups come back
/// sorted by level; categorical groups keep the order in which they first
/// appear in the frame.
pub fn rate_by_group(
    df: &DataFrame,
    group_column: &str,
    flag_column: &str,
    kind: GroupKind,
) -> Result<RateOutcome> {
    let group_col = df
        .column(group_column)
        .map_err(|_| DashboardError::ColumnNotFound(group_column.to_string()))?;
    let flag_col = df
        .column(flag_column)
        .map_err(|_| DashboardError::ColumnNotFound(flag_column.to_string()))?;

    let flags = column_to_f64_vec(flag_col)?;

    let groups = match kind {
        GroupKind::Ordinal => ordinal_rates(&column_to_f64_vec(group_col)?, &flags),
        GroupKind::Categorical => categorical_rates(&column_to_string_vec(group_col)?, &flags),
    };

    if groups.is_empty() {
        return Ok(RateOutcome::NoData);
    }

    Ok(RateOutcome::Computed(GroupSummary {
        group_column: group_column.to_string(),
        kind,
        groups,
    }))
}

fn ordinal_rates(levels: &[Option<f64>], flags: &[Option<f64>]) -> Vec<GroupRate> {
    // Keyed by bit pattern; -0.0 is folded into 0.0 first
    let mut stats: HashMap<u64, (f64, Accumulator)> = HashMap::new();

    for (level, flag) in levels.iter().zip(flags.iter()) {
        if let (Some(level), Some(flag)) = (level, flag) {
            let level = if *level == 0.0 { 0.0 } else { *level };
            stats
                .entry(level.to_bits())
                .or_insert_with(|| (level, Accumulator::default()))
                .1
                .add(*flag);
        }
    }

    let mut groups: Vec<GroupRate> = stats
        .into_values()
        .map(|(level, acc)| GroupRate {
            key: GroupKey::Level(level),
            rate: acc.rate(),
            count: acc.count,
        })
        .collect();

    groups.sort_by(|a, b| match (&a.key, &b.key) {
        (GroupKey::Level(x), GroupKey::Level(y)) => {
            x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal)
        }
        _ => std::cmp::Ordering::Equal,
    });

    groups
}

fn categorical_rates(labels: &[Option<String>], flags: &[Option<f64>]) -> Vec<GroupRate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<(&str, Accumulator)> = Vec::new();

    for (label, flag) in labels.iter().zip(flags.iter()) {
        if let (Some(label), Some(flag)) = (label, flag) {
            let slot = *index.entry(label.as_str()).or_insert_with(|| {
                stats.push((label.as_str(), Accumulator::default()));
                stats.len() - 1
            });
            stats[slot].1.add(*flag);
        }
    }

    stats
        .into_iter()
        .map(|(label, acc)| GroupRate {
            key: GroupKey::Label(label.to_string()),
            rate: acc.rate(),
            count: acc.count,
        })
        .collect()
}
