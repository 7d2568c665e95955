//! Simulated data-source refresh.
//!
//! A refresh rebuilds a snapshot with every measure field multiplied by its own
//! factor drawn uniformly from `[0.95, 1.05]` and rounded. Identity fields (ids,
//! names, labels, categories, avatars) are copied as-is. The input is never
//! touched; callers swap the returned value in whole.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::time::sleep;

use crate::model::{
    AcquisitionRecord, HomeSnapshot, PeriodRecord, ProductRecord, RepRecord, ReportsDataset, SalesDataset,
    SegmentRecord, TopProduct, TopRep,
};

pub const FLUCTUATION_LOW: f64 = 0.95;
pub const FLUCTUATION_HIGH: f64 = 1.05;

pub fn fluctuation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(FLUCTUATION_LOW..=FLUCTUATION_HIGH)
}

/// Measure in whole units (currency or count).
pub fn fluctuate<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    (value * fluctuation(rng)).round()
}

pub fn fluctuate_count<R: Rng + ?Sized>(value: u64, rng: &mut R) -> u64 {
    (value as f64 * fluctuation(rng)).round() as u64
}

/// Percent-like measure kept at one decimal place.
pub fn fluctuate_tenths<R: Rng + ?Sized>(value: f64, rng: &mut R) -> f64 {
    (value * fluctuation(rng) * 10.0).round() / 10.0
}

/// Produce a perturbed copy of `self`.
pub trait Perturb: Sized {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;
}

impl<T: Perturb> Perturb for Vec<T> {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        self.iter().map(|item| item.perturbed(rng)).collect()
    }
}

impl Perturb for PeriodRecord {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            period: self.period.clone(),
            revenue: fluctuate(self.revenue, rng),
            transactions: self.transactions.map(|v| fluctuate_count(v, rng)),
            customers: self.customers.map(|v| fluctuate_count(v, rng)),
        }
    }
}

impl Perturb for SalesDataset {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self { periods: self.periods.perturbed(rng) }
    }
}

impl Perturb for TopProduct {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            sales: fluctuate_count(self.sales, rng),
            revenue: fluctuate(self.revenue, rng),
        }
    }
}

impl Perturb for TopRep {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            sales: fluctuate_count(self.sales, rng),
            revenue: fluctuate(self.revenue, rng),
            avatar: self.avatar.clone(),
        }
    }
}

impl Perturb for HomeSnapshot {
    // previous_* are last period's closed figures and stay fixed
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            total_revenue: fluctuate(self.total_revenue, rng),
            previous_revenue: self.previous_revenue,
            total_customers: fluctuate_count(self.total_customers, rng),
            previous_customers: self.previous_customers,
            total_products: fluctuate_count(self.total_products, rng),
            previous_products: self.previous_products,
            revenue_by_month: self.revenue_by_month.perturbed(rng),
            top_products: self.top_products.perturbed(rng),
            top_reps: self.top_reps.perturbed(rng),
        }
    }
}

impl Perturb for ProductRecord {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            sales: fluctuate_count(self.sales, rng),
            revenue: fluctuate(self.revenue, rng),
            growth_percent: fluctuate_tenths(self.growth_percent, rng),
        }
    }
}

impl Perturb for RepRecord {
    // quota is a plan figure, not a measure
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            quota: self.quota,
            actual: fluctuate(self.actual, rng),
            deals: fluctuate_count(self.deals, rng),
            avg_deal_size: fluctuate(self.avg_deal_size, rng),
        }
    }
}

impl Perturb for SegmentRecord {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            segment: self.segment.clone(),
            count: fluctuate_count(self.count, rng),
            revenue: fluctuate(self.revenue, rng),
            avg_value: fluctuate(self.avg_value, rng),
        }
    }
}

impl Perturb for AcquisitionRecord {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            source: self.source.clone(),
            count: fluctuate_count(self.count, rng),
            percentage: fluctuate(self.percentage, rng),
        }
    }
}

impl Perturb for ReportsDataset {
    fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            sales_over_time: self
                .sales_over_time
                .iter()
                .map(|(granularity, series)| (*granularity, series.perturbed(rng)))
                .collect(),
            products: self.products.perturbed(rng),
            reps: self.reps.perturbed(rng),
            acquisition: self.acquisition.perturbed(rng),
            retention: self.retention.clone(),
            segments: self.segments.perturbed(rng),
        }
    }
}

/// One refresh: a wholly new snapshot derived from `current`.
pub fn refresh<T: Perturb, R: Rng + ?Sized>(current: &T, rng: &mut R) -> T {
    current.perturbed(rng)
}

/// Refresh that only becomes visible after the simulated round trip.
pub async fn refresh_after<T: Perturb, R: Rng + ?Sized>(latency: Duration, current: &T, rng: &mut R) -> T {
    let next = current.perturbed(rng);
    sleep(latency).await;
    next
}

/// Hex SHA-256 of the snapshot's JSON form.
pub fn snapshot_digest<T: Serialize>(snapshot: &T) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(snapshot)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn within(old: f64, new: f64) -> bool {
        new >= (old * FLUCTUATION_LOW).round() && new <= (old * FLUCTUATION_HIGH).round()
    }

    fn dataset() -> SalesDataset {
        SalesDataset::new(vec![
            PeriodRecord { period: "Week 1".into(), revenue: 42000.0, transactions: Some(700), customers: Some(400) },
            PeriodRecord { period: "Week 2".into(), revenue: 38000.0, transactions: Some(650), customers: None },
        ])
    }

    #[test]
    fn test_refresh_keeps_labels_and_length() {
        let mut rng = StdRng::seed_from_u64(11);
        let before = dataset();
        let after = refresh(&before, &mut rng);
        assert_eq!(after.len(), before.len());
        assert_eq!(after.labels(), before.labels());
        assert_eq!(after.periods[1].customers, None);
        // input untouched
        assert_eq!(before, dataset());
    }

    #[test]
    fn test_refreshed_measures_stay_in_band_and_whole() {
        let mut rng = StdRng::seed_from_u64(3);
        let before = dataset();
        for _ in 0..50 {
            let after = refresh(&before, &mut rng);
            for (old, new) in before.periods.iter().zip(&after.periods) {
                assert!(within(old.revenue, new.revenue), "{} -> {}", old.revenue, new.revenue);
                assert_eq!(new.revenue, new.revenue.round());
                let (ot, nt) = (old.transactions.unwrap(), new.transactions.unwrap());
                assert!(within(ot as f64, nt as f64));
            }
        }
    }

    #[test]
    fn test_same_seed_same_refresh() {
        let before = dataset();
        let a = refresh(&before, &mut StdRng::seed_from_u64(42));
        let b = refresh(&before, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rep_quota_is_not_perturbed() {
        let rep = RepRecord {
            id: 4,
            name: "David Rodriguez".into(),
            avatar: "a.jpg".into(),
            quota: 100000.0,
            actual: 96500.0,
            deals: 31,
            avg_deal_size: 3113.0,
        };
        let next = rep.perturbed(&mut StdRng::seed_from_u64(9));
        assert_eq!(next.quota, 100000.0);
        assert_eq!(next.name, rep.name);
        assert!(within(rep.actual, next.actual));
    }

    #[test]
    fn test_growth_keeps_one_decimal() {
        let p = ProductRecord {
            id: 1,
            name: "Premium Subscription".into(),
            category: "Subscription".into(),
            sales: 1245,
            revenue: 124500.0,
            growth_percent: 15.2,
        };
        let next = p.perturbed(&mut StdRng::seed_from_u64(5));
        assert!(next.growth_percent >= 14.4 && next.growth_percent <= 16.0);
        assert!(((next.growth_percent * 10.0).round() - next.growth_percent * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = dataset();
        let mut b = dataset();
        assert_eq!(snapshot_digest(&a).unwrap(), snapshot_digest(&b).unwrap());
        b.periods[0].revenue += 1.0;
        assert_ne!(snapshot_digest(&a).unwrap(), snapshot_digest(&b).unwrap());
        assert_eq!(snapshot_digest(&a).unwrap().len(), 64);
    }

    #[test]
    fn test_digest_reports_unserializable_snapshot() {
        // JSON object keys must be strings
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8, 2], 3u8);
        assert!(snapshot_digest(&bad).is_err());
    }

    #[tokio::test]
    async fn test_refresh_after_waits_then_returns_new_snapshot() {
        let mut rng = StdRng::seed_from_u64(1);
        let before = dataset();
        let started = std::time::Instant::now();
        let after = refresh_after(Duration::from_millis(20), &before, &mut rng).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(after.labels(), before.labels());
    }
}
