use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ParseSelectorError;

/// One period of a revenue series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: String,
    pub revenue: f64,
    pub transactions: Option<u64>,
    pub customers: Option<u64>,
}

impl PeriodRecord {
    pub fn revenue_only(period: &str, revenue: f64) -> Self {
        Self { period: period.to_string(), revenue, transactions: None, customers: None }
    }
}

/// Chronologically ordered periods; insertion order is time order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesDataset {
    pub periods: Vec<PeriodRecord>,
}

impl SalesDataset {
    pub fn new(periods: Vec<PeriodRecord>) -> Self {
        Self { periods }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.periods.iter().map(|p| p.period.clone()).collect()
    }

    pub fn total_revenue(&self) -> f64 {
        self.periods.iter().map(|p| p.revenue).sum()
    }

    pub fn total_transactions(&self) -> u64 {
        self.periods.iter().filter_map(|p| p.transactions).sum()
    }

    pub fn total_customers(&self) -> u64 {
        self.periods.iter().filter_map(|p| p.customers).sum()
    }
}

/// Bucket size of a Reports sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Daily, Granularity::Weekly, Granularity::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl FromStr for Granularity {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(ParseSelectorError::new("granularity", other)),
        }
    }
}

/// Home page time range filter. Choosing one triggers a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Daily => "daily",
            TimeRange::Weekly => "weekly",
            TimeRange::Monthly => "monthly",
            TimeRange::Quarterly => "quarterly",
            TimeRange::Yearly => "yearly",
        }
    }
}

impl FromStr for TimeRange {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(TimeRange::Daily),
            "weekly" => Ok(TimeRange::Weekly),
            "monthly" => Ok(TimeRange::Monthly),
            "quarterly" => Ok(TimeRange::Quarterly),
            "yearly" => Ok(TimeRange::Yearly),
            other => Err(ParseSelectorError::new("time range", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: u32,
    pub name: String,
    pub sales: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRep {
    pub id: u32,
    pub name: String,
    pub sales: u64,
    pub revenue: f64,
    pub avatar: String,
}

/// Everything the Home context renders: KPI totals with their prior-period values,
/// the monthly revenue series and the two leaderboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSnapshot {
    pub total_revenue: f64,
    pub previous_revenue: f64,
    pub total_customers: u64,
    pub previous_customers: u64,
    pub total_products: u64,
    pub previous_products: u64,
    pub revenue_by_month: SalesDataset,
    pub top_products: Vec<TopProduct>,
    pub top_reps: Vec<TopRep>,
}
