//! Data model shared by every dashboard context.
//!
//! Records here are plain row-shaped values. Identity fields (ids, names, labels)
//! never change after seeding; only measure fields are rewritten by a refresh.

pub mod activity;
pub mod report;
pub mod sales;
pub mod team;

use std::fmt;

pub use activity::{Activity, ActivityKind};
pub use report::{AcquisitionRecord, ProductRecord, RepRecord, ReportsDataset, RetentionPoint, SegmentRecord};
pub use sales::{Granularity, HomeSnapshot, PeriodRecord, SalesDataset, TimeRange, TopProduct, TopRep};
pub use team::{FormError, TeamEntity, TeamForm, TeamId};

/// Text from the presentation layer that names no member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSelectorError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseSelectorError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

impl fmt::Display for ParseSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseSelectorError {}
