use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Activity, ParseSelectorError};
use crate::seed;
use crate::summary::{KpiCard, Share};

/// Look-back window picked in the analytics header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "all")]
    All,
}

impl Window {
    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Week => "7d",
            Window::Month => "30d",
            Window::Quarter => "90d",
            Window::All => "all",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(Window::Week),
            "30d" => Ok(Window::Month),
            "90d" => Ok(Window::Quarter),
            "all" => Ok(Window::All),
            _ => Err(ParseSelectorError::new("window", s)),
        }
    }
}

/// This year against last year, month by month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub current: Vec<f64>,
    pub previous: Vec<f64>,
}

impl TrendSeries {
    /// Per-month difference, current minus previous.
    pub fn deltas(&self) -> Vec<f64> {
        self.current.iter().zip(&self.previous).map(|(c, p)| c - p).collect()
    }
}

/// One line of the activity feed as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRow {
    pub id: u32,
    pub kind: &'static str,
    pub title: String,
    pub time: String,
    pub detail: String,
}

impl From<&Activity> for FeedRow {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            kind: activity.tag(),
            title: activity.title.clone(),
            time: activity.time.clone(),
            detail: activity.detail(),
        }
    }
}

/// Everything the analytics page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsOverview {
    pub window: Window,
    pub cards: Vec<KpiCard>,
    pub feed: Vec<FeedRow>,
    pub activity_volume: f64,
    pub regions: Vec<Share>,
    pub top_region: Option<String>,
    pub trend: TrendSeries,
    pub trend_deltas: Vec<f64>,
}

/// Read-only analytics page. The window is a header choice with no effect on
/// the figures shown.
#[derive(Debug, Clone)]
pub struct AnalyticsDashboard {
    cards: Vec<KpiCard>,
    activities: Vec<Activity>,
    regions: Vec<Share>,
    trend: TrendSeries,
    window: Window,
}

impl AnalyticsDashboard {
    pub fn new(cards: Vec<KpiCard>, activities: Vec<Activity>, regions: Vec<Share>, trend: TrendSeries) -> Self {
        Self { cards, activities, regions, trend, window: Window::Week }
    }

    pub fn seeded() -> Self {
        let (current, previous) = seed::sales_trend();
        Self::new(
            seed::analytics_cards(),
            seed::recent_activities(),
            seed::region_distribution(),
            TrendSeries { current, previous },
        )
    }

    pub fn cards(&self) -> &[KpiCard] {
        &self.cards
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn regions(&self) -> &[Share] {
        &self.regions
    }

    pub fn trend(&self) -> &TrendSeries {
        &self.trend
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn select_window(&mut self, window: Window) {
        self.window = window;
    }

    /// Sum of sale and payment amounts in the feed.
    pub fn activity_volume(&self) -> f64 {
        self.activities.iter().filter_map(Activity::amount).sum()
    }

    pub fn top_region(&self) -> Option<&Share> {
        self.regions.iter().max_by(|a, b| a.value.total_cmp(&b.value))
    }

    pub fn overview(&self) -> AnalyticsOverview {
        AnalyticsOverview {
            window: self.window,
            cards: self.cards.clone(),
            feed: self.activities.iter().map(FeedRow::from).collect(),
            activity_volume: self.activity_volume(),
            regions: self.regions.clone(),
            top_region: self.top_region().map(|s| s.label.clone()),
            trend: self.trend.clone(),
            trend_deltas: self.trend.deltas(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::Trend;

    #[test]
    fn test_cards_classify_change_sign() {
        let analytics = AnalyticsDashboard::seeded();
        let trends: Vec<Trend> = analytics.cards().iter().map(|c| c.trend).collect();
        assert_eq!(trends, vec![Trend::Up, Trend::Up, Trend::Down, Trend::Up]);
    }

    #[test]
    fn test_region_shares_sum_to_hundred() {
        let analytics = AnalyticsDashboard::seeded();
        let total: f64 = analytics.regions().iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(analytics.top_region().unwrap().label, "Europe");
    }

    #[test]
    fn test_activity_volume_counts_money_rows_only() {
        let analytics = AnalyticsDashboard::seeded();
        assert!((analytics.activity_volume() - 4230.0).abs() < 1e-9);
    }

    #[test]
    fn test_overview_renders_feed_and_leaders() {
        let mut analytics = AnalyticsDashboard::seeded();
        analytics.select_window(Window::Month);
        let view = analytics.overview();
        assert_eq!(view.window, Window::Month);
        assert_eq!(view.feed.len(), 5);
        assert_eq!(view.feed[0].kind, "sale");
        assert_eq!(view.feed[0].detail, "$1430.00");
        assert_eq!(view.feed[4].kind, "marketing");
        assert_eq!(view.feed[4].detail, "Summer Sale 2023");
        assert_eq!(view.top_region.as_deref(), Some("Europe"));
        assert_eq!(view.trend_deltas.len(), 12);
        assert_eq!(view.trend_deltas[5], 57.0);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["window"], "30d");
    }

    #[test]
    fn test_window_parse_and_select() {
        let mut analytics = AnalyticsDashboard::seeded();
        assert_eq!(analytics.window(), Window::Week);
        analytics.select_window("90D".parse().unwrap());
        assert_eq!(analytics.window(), Window::Quarter);
        assert!("365d".parse::<Window>().is_err());
        assert_eq!(analytics.trend().deltas()[0], 20.0);
    }
}
