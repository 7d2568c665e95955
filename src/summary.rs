//! Scalar KPIs derived from projected series and raw snapshots.
//!
//! Ratios with a zero denominator resolve locally (0 or `None`) and never error.

use serde::{Deserialize, Serialize};

use crate::model::HomeSnapshot;
use crate::projection::ProjectedSeries;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_actual: f64,
    pub total_target: f64,
    pub percent_of_target: f64,
}

pub fn summarize(series: &ProjectedSeries) -> Summary {
    let total_actual: f64 = series.actual.iter().sum();
    let total_target: f64 = series.target.iter().sum();
    Summary {
        total_actual,
        total_target,
        percent_of_target: percent_of_target(total_actual, total_target),
    }
}

/// `actual / target * 100`, or 0 when there is no target.
pub fn percent_of_target(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

/// Signed, unclamped change from `previous` to `current` in percent.
/// `None` when there is no previous value to compare against.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

/// `value / total * 100`, or 0 for an empty total.
pub fn share_of_total(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        value / total * 100.0
    }
}

/// Presentation class of a change. Zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiFormat {
    Currency,
    Count,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub title: String,
    pub value: f64,
    pub format: KpiFormat,
    /// Percent change versus the previous period; 0 when undefined
    pub change: f64,
    pub trend: Trend,
}

impl KpiCard {
    pub fn new(title: &str, value: f64, previous: f64, format: KpiFormat) -> Self {
        let change = percent_change(value, previous).unwrap_or(0.0);
        Self::with_change(title, value, change, format)
    }

    pub fn with_change(title: &str, value: f64, change: f64, format: KpiFormat) -> Self {
        Self { title: title.to_string(), value, format, change, trend: Trend::of(change) }
    }
}

/// The three headline cards of the Home context.
pub fn home_kpis(snapshot: &HomeSnapshot) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Total Revenue", snapshot.total_revenue, snapshot.previous_revenue, KpiFormat::Currency),
        KpiCard::new(
            "Total Customers",
            snapshot.total_customers as f64,
            snapshot.previous_customers as f64,
            KpiFormat::Count,
        ),
        KpiCard::new(
            "Total Products",
            snapshot.total_products as f64,
            snapshot.previous_products as f64,
            KpiFormat::Count,
        ),
    ]
}

/// One slice of a distribution chart with its share of the whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub label: String,
    pub value: f64,
    pub percent: f64,
}

pub fn distribution(slices: &[(&str, f64)]) -> Vec<Share> {
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    slices
        .iter()
        .map(|(label, value)| Share {
            label: label.to_string(),
            value: *value,
            percent: share_of_total(*value, total),
        })
        .collect()
}
