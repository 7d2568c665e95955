//! Filter/projection of a base revenue series by region and product share.
//!
//! Each concrete dimension value carries a fixed multiplicative share of the whole.
//! Shares of one dimension are independent; they are not a normalized partition.
//! The projected target is always 120% of the projected actual.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logging::{log_projection, v_str, ProfileScope};
use crate::model::{ParseSelectorError, SalesDataset};

/// Headroom applied to actual revenue to derive the target line.
pub const TARGET_HEADROOM: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    All,
    North,
    South,
    East,
    West,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::All, Region::North, Region::South, Region::East, Region::West];

    pub fn weight(&self) -> f64 {
        match self {
            Region::All => 1.0,
            Region::North => 0.4,
            Region::South => 0.3,
            Region::East => 0.2,
            Region::West => 0.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::All => "all",
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
        }
    }
}

impl FromStr for Region {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseSelectorError::new("region", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    All,
    Subscription,
    Services,
    Hardware,
}

impl Product {
    pub const ALL: [Product; 4] = [Product::All, Product::Subscription, Product::Services, Product::Hardware];

    pub fn weight(&self) -> f64 {
        match self {
            Product::All => 1.0,
            Product::Subscription => 0.5,
            Product::Services => 0.3,
            Product::Hardware => 0.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::All => "all",
            Product::Subscription => "subscription",
            Product::Services => "services",
            Product::Hardware => "hardware",
        }
    }
}

impl FromStr for Product {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseSelectorError::new("product", s))
    }
}

/// Active dimension selectors of the revenue analysis panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    pub region: Region,
    pub product: Product,
}

impl Default for Selectors {
    fn default() -> Self {
        Self { region: Region::All, product: Product::All }
    }
}

impl Selectors {
    pub fn new(region: Region, product: Product) -> Self {
        Self { region, product }
    }
}

/// Chart-ready (labels, actual, target) triple. All three have equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedSeries {
    pub labels: Vec<String>,
    pub actual: Vec<f64>,
    pub target: Vec<f64>,
}

impl ProjectedSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Derive the weighted series for `selectors`. Total and pure.
pub fn project(base: &SalesDataset, selectors: Selectors) -> ProjectedSeries {
    let _scope = ProfileScope::with_context(
        "project",
        &[("region", v_str(selectors.region.as_str())), ("product", v_str(selectors.product.as_str()))],
    );
    let (region, product) = (selectors.region.weight(), selectors.product.weight());
    let mut labels = Vec::with_capacity(base.len());
    let mut actual = Vec::with_capacity(base.len());
    let mut target = Vec::with_capacity(base.len());
    for period in &base.periods {
        // revenue × region × product, left to right
        let value = period.revenue * region * product;
        labels.push(period.period.clone());
        actual.push(value);
        target.push(value * TARGET_HEADROOM);
    }
    log_projection(
        selectors.region.as_str(),
        selectors.product.as_str(),
        labels.len(),
        actual.iter().sum(),
    );
    ProjectedSeries { labels, actual, target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PeriodRecord;

    fn base() -> SalesDataset {
        SalesDataset::new(vec![
            PeriodRecord::revenue_only("Jan", 42000.0),
            PeriodRecord::revenue_only("Feb", 38000.0),
            PeriodRecord::revenue_only("Mar", 45000.0),
        ])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_north_all_scenario() {
        let s = project(&base(), Selectors::new(Region::North, Product::All));
        assert_eq!(s.labels, vec!["Jan", "Feb", "Mar"]);
        for (got, want) in s.actual.iter().zip([16800.0, 15200.0, 18000.0]) {
            assert!(close(*got, want), "actual {} != {}", got, want);
        }
        for (got, want) in s.target.iter().zip([20160.0, 18240.0, 21600.0]) {
            assert!(close(*got, want), "target {} != {}", got, want);
        }
    }

    #[test]
    fn test_every_selector_pair_preserves_length_and_headroom() {
        let base = base();
        for region in Region::ALL {
            for product in Product::ALL {
                let s = project(&base, Selectors::new(region, product));
                assert_eq!(s.labels.len(), base.len());
                assert_eq!(s.actual.len(), base.len());
                assert_eq!(s.target.len(), base.len());
                for (a, t) in s.actual.iter().zip(&s.target) {
                    assert_eq!(*t, *a * TARGET_HEADROOM);
                    assert!(*a >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_weights_are_the_fixed_shares() {
        assert_eq!(Region::All.weight(), 1.0);
        assert_eq!(Region::West.weight(), 0.1);
        assert_eq!(Product::Subscription.weight(), 0.5);
        assert_eq!(Product::Hardware.weight(), 0.2);
    }

    #[test]
    fn test_actual_applies_region_then_product() {
        let revenues = [1000.0, 38000.0, 45001.0, 123457.0];
        let base = SalesDataset::new(revenues.iter().map(|r| PeriodRecord::revenue_only("P", *r)).collect());
        for region in Region::ALL {
            for product in Product::ALL {
                let s = project(&base, Selectors::new(region, product));
                for (got, rev) in s.actual.iter().zip(revenues) {
                    assert_eq!(*got, rev * region.weight() * product.weight());
                }
            }
        }
    }

    #[test]
    fn test_unknown_selector_text_is_rejected() {
        assert_eq!("east".parse::<Region>().unwrap(), Region::East);
        assert!("central".parse::<Region>().is_err());
        assert!("All".parse::<Product>().is_err());
    }

    #[test]
    fn test_empty_base_projects_empty_series() {
        let s = project(&SalesDataset::default(), Selectors::default());
        assert!(s.is_empty());
        assert!(s.target.is_empty());
    }
}
