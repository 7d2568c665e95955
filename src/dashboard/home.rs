use serde::{Deserialize, Serialize};

use super::{LiveDataset, RefreshError, RefreshTicket};
use crate::model::{HomeSnapshot, TimeRange};
use crate::projection::{project, Product, ProjectedSeries, Region, Selectors};
use crate::summary::{home_kpis, summarize, KpiCard, Summary};

/// How the revenue panel draws its series. Does not affect the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// Everything the revenue analysis panel renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePanel {
    pub selectors: Selectors,
    pub chart: ChartKind,
    pub series: ProjectedSeries,
    pub summary: Summary,
}

#[derive(Debug, Clone)]
pub struct HomeDashboard {
    data: LiveDataset<HomeSnapshot>,
    selectors: Selectors,
    time_range: TimeRange,
    chart: ChartKind,
}

impl HomeDashboard {
    pub fn new(snapshot: HomeSnapshot, selectors: Selectors) -> Self {
        Self {
            data: LiveDataset::new("home", snapshot),
            selectors,
            time_range: TimeRange::Monthly,
            chart: ChartKind::Bar,
        }
    }

    pub fn snapshot(&self) -> &HomeSnapshot {
        self.data.current()
    }

    pub fn data_mut(&mut self) -> &mut LiveDataset<HomeSnapshot> {
        &mut self.data
    }

    pub fn is_refreshing(&self) -> bool {
        self.data.is_refreshing()
    }

    pub fn selectors(&self) -> Selectors {
        self.selectors
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn set_region(&mut self, region: Region) {
        self.selectors.region = region;
    }

    pub fn set_product(&mut self, product: Product) {
        self.selectors.product = product;
    }

    pub fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
    }

    /// Start a refresh for `range`. The range is only recorded once the refresh is accepted.
    pub fn select_time_range(&mut self, range: TimeRange) -> Result<RefreshTicket, RefreshError> {
        let ticket = self.data.begin_refresh()?;
        self.time_range = range;
        Ok(ticket)
    }

    /// Projected series for the current snapshot and selectors; recomputed on every call.
    pub fn series(&self) -> ProjectedSeries {
        project(&self.snapshot().revenue_by_month, self.selectors)
    }

    pub fn revenue_panel(&self) -> RevenuePanel {
        let series = self.series();
        let summary = summarize(&series);
        RevenuePanel { selectors: self.selectors, chart: self.chart, series, summary }
    }

    pub fn kpis(&self) -> Vec<KpiCard> {
        home_kpis(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::refresh;
    use crate::seed;
    use crate::summary::Trend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_selector_change_is_reflected_immediately() {
        let mut home = HomeDashboard::new(seed::home_snapshot(), Selectors::default());
        let all = home.revenue_panel().summary.total_actual;
        home.set_region(Region::North);
        home.set_product(Product::Subscription);
        let filtered = home.revenue_panel();
        assert!((filtered.summary.total_actual - all * 0.2).abs() < 1e-6);
        assert_eq!(filtered.series.len(), 12);
    }

    #[test]
    fn test_refresh_feeds_through_to_series() {
        let mut home = HomeDashboard::new(seed::home_snapshot(), Selectors::new(Region::East, Product::All));
        let mut rng = StdRng::seed_from_u64(21);
        let next = refresh(home.snapshot(), &mut rng);
        let ticket = home.select_time_range(TimeRange::Weekly).unwrap();
        assert!(home.is_refreshing());
        home.data_mut().complete_refresh(ticket, next.clone()).unwrap();
        assert_eq!(home.time_range(), TimeRange::Weekly);
        let expected = next.revenue_by_month.periods[0].revenue * 0.2;
        assert!((home.series().actual[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_kpis_from_seed() {
        let home = HomeDashboard::new(seed::home_snapshot(), Selectors::default());
        let cards = home.kpis();
        assert_eq!(cards.len(), 3);
        assert!((cards[0].change - (124580.0 - 98450.0) / 98450.0 * 100.0).abs() < 1e-9);
        assert_eq!(cards[0].trend, Trend::Up);
        assert_eq!(cards[2].trend, Trend::Down);
    }
}
