use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::sales::{Granularity, SalesDataset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub sales: u64,
    pub revenue: f64,
    /// Period-over-period growth, one decimal place
    pub growth_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRecord {
    pub id: u32,
    pub name: String,
    pub avatar: String,
    pub quota: f64,
    pub actual: f64,
    pub deals: u64,
    pub avg_deal_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub segment: String,
    pub count: u64,
    pub revenue: f64,
    pub avg_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionRecord {
    pub source: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionPoint {
    pub month: String,
    pub rate: f64,
}

/// Backing data of the Reports context. Each granularity is an independent series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsDataset {
    pub sales_over_time: BTreeMap<Granularity, SalesDataset>,
    pub products: Vec<ProductRecord>,
    pub reps: Vec<RepRecord>,
    pub acquisition: Vec<AcquisitionRecord>,
    pub retention: Vec<RetentionPoint>,
    pub segments: Vec<SegmentRecord>,
}

impl ReportsDataset {
    pub fn sales(&self, granularity: Granularity) -> Option<&SalesDataset> {
        self.sales_over_time.get(&granularity)
    }
}
