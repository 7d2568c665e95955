//! Table rows and chart series of the four report tabs.
//!
//! Growth and the raw measures are passed through untouched; only the derived
//! columns (shares, attainment, average order) are computed here, and they are
//! rebuilt from the current collection on every call.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{
    AcquisitionRecord, Granularity, ParseSelectorError, ProductRecord, RepRecord, ReportsDataset, RetentionPoint,
    SalesDataset, SegmentRecord,
};
use crate::summary::{percent_of_target, share_of_total, Share};

/// Number of products charted in the growth panel.
pub const GROWTH_LEADERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sales,
    Products,
    Reps,
    Customers,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [ReportKind::Sales, ReportKind::Products, ReportKind::Reps, ReportKind::Customers];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Sales => "Sales Summary",
            ReportKind::Products => "Product Performance",
            ReportKind::Reps => "Rep Performance",
            ReportKind::Customers => "Customer Analytics",
        }
    }
}

impl FromStr for ReportKind {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sales" => Ok(ReportKind::Sales),
            "products" => Ok(ReportKind::Products),
            "reps" => Ok(ReportKind::Reps),
            "customers" => Ok(ReportKind::Customers),
            other => Err(ParseSelectorError::new("report", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRow {
    pub period: String,
    pub revenue: f64,
    pub transactions: u64,
    pub customers: u64,
    pub avg_order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub share_of_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepRow {
    #[serde(flatten)]
    pub record: RepRecord,
    pub attainment: f64,
    pub met_quota: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    #[serde(flatten)]
    pub record: SegmentRecord,
    pub share_of_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "report", rename_all = "lowercase")]
pub enum ReportView {
    Sales {
        granularity: Granularity,
        rows: Vec<SalesRow>,
        totals: SalesRow,
    },
    Products {
        rows: Vec<ProductRow>,
        categories: Vec<Share>,
        growth_leaders: Vec<(String, f64)>,
    },
    Reps {
        rows: Vec<RepRow>,
    },
    Customers {
        acquisition: Vec<AcquisitionRecord>,
        retention: Vec<RetentionPoint>,
        segments: Vec<SegmentRow>,
    },
}

/// Average order value, 0 for a period without transactions.
pub fn avg_order(revenue: f64, transactions: u64) -> f64 {
    if transactions == 0 {
        0.0
    } else {
        revenue / transactions as f64
    }
}

pub fn sales_rows(dataset: &SalesDataset) -> Vec<SalesRow> {
    dataset
        .periods
        .iter()
        .map(|p| {
            let transactions = p.transactions.unwrap_or(0);
            SalesRow {
                period: p.period.clone(),
                revenue: p.revenue,
                transactions,
                customers: p.customers.unwrap_or(0),
                avg_order: avg_order(p.revenue, transactions),
            }
        })
        .collect()
}

/// Footer row: the whole series summed, average order over all transactions.
pub fn sales_totals(dataset: &SalesDataset) -> SalesRow {
    let (revenue, transactions) = (dataset.total_revenue(), dataset.total_transactions());
    SalesRow {
        period: "Total".to_string(),
        revenue,
        transactions,
        customers: dataset.total_customers(),
        avg_order: avg_order(revenue, transactions),
    }
}

pub fn product_rows(products: &[ProductRecord]) -> Vec<ProductRow> {
    let total: f64 = products.iter().map(|p| p.revenue).sum();
    products
        .iter()
        .map(|p| ProductRow { record: p.clone(), share_of_revenue: share_of_total(p.revenue, total) })
        .collect()
}

pub fn rep_rows(reps: &[RepRecord]) -> Vec<RepRow> {
    reps.iter()
        .map(|r| {
            let attainment = percent_of_target(r.actual, r.quota);
            RepRow { record: r.clone(), attainment, met_quota: attainment >= 100.0 }
        })
        .collect()
}

pub fn segment_rows(segments: &[SegmentRecord]) -> Vec<SegmentRow> {
    let total: f64 = segments.iter().map(|s| s.revenue).sum();
    segments
        .iter()
        .map(|s| SegmentRow { record: s.clone(), share_of_revenue: share_of_total(s.revenue, total) })
        .collect()
}

/// Revenue per category in first-seen order.
pub fn category_breakdown(products: &[ProductRecord]) -> Vec<Share> {
    let mut sums: Vec<(&str, f64)> = Vec::new();
    for p in products {
        match sums.iter_mut().find(|(c, _)| *c == p.category) {
            Some((_, sum)) => *sum += p.revenue,
            None => sums.push((p.category.as_str(), p.revenue)),
        }
    }
    crate::summary::distribution(&sums)
}

pub fn growth_leaders(products: &[ProductRecord], n: usize) -> Vec<(String, f64)> {
    products.iter().take(n).map(|p| (p.name.clone(), p.growth_percent)).collect()
}

/// Build the view of one report tab. The sales tab reads the series of `granularity`.
pub fn build_report(kind: ReportKind, dataset: &ReportsDataset, granularity: Granularity) -> ReportView {
    match kind {
        ReportKind::Sales => {
            let series = dataset.sales(granularity);
            ReportView::Sales {
                granularity,
                rows: series.map(sales_rows).unwrap_or_default(),
                totals: series.map(sales_totals).unwrap_or_else(|| sales_totals(&SalesDataset::default())),
            }
        }
        ReportKind::Products => ReportView::Products {
            rows: product_rows(&dataset.products),
            categories: category_breakdown(&dataset.products),
            growth_leaders: growth_leaders(&dataset.products, GROWTH_LEADERS),
        },
        ReportKind::Reps => ReportView::Reps { rows: rep_rows(&dataset.reps) },
        ReportKind::Customers => ReportView::Customers {
            acquisition: dataset.acquisition.clone(),
            retention: dataset.retention.clone(),
            segments: segment_rows(&dataset.segments),
        },
    }
}
