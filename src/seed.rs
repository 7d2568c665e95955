//! Built-in fixture data for each dashboard context.
//!
//! Home, Teams and Analytics start from fixed figures. The Reports sales series
//! are generated from fixed ranges with the caller's random source, relative to
//! `today`.

use std::collections::BTreeMap;

use chrono::{Days, Months, NaiveDate, TimeZone, Utc};
use rand::Rng;

use crate::model::{
    AcquisitionRecord, Activity, ActivityKind, Granularity, HomeSnapshot, PeriodRecord, ProductRecord, RepRecord,
    ReportsDataset, RetentionPoint, SalesDataset, SegmentRecord, TeamEntity, TopProduct, TopRep,
};
use crate::summary::{distribution, KpiCard, KpiFormat, Share};

const AVATAR_SARAH: &str = "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100";
const AVATAR_MICHAEL: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100";
const AVATAR_JESSICA: &str = "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=100";
const AVATAR_DAVID: &str = "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100";
const AVATAR_EMILY: &str = "https://images.unsplash.com/photo-1573497019940-1c28c88b4f3e?w=100";
const AVATAR_ROBERT: &str = "https://images.unsplash.com/photo-1542178243-bc20204b769f?w=100";

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

pub fn home_snapshot() -> HomeSnapshot {
    let monthly = [42000.0, 38000.0, 45000.0, 40000.0, 50000.0, 55000.0, 48000.0, 52000.0, 58000.0, 62000.0, 68000.0, 72000.0];
    HomeSnapshot {
        total_revenue: 124580.0,
        previous_revenue: 98450.0,
        total_customers: 1842,
        previous_customers: 1650,
        total_products: 68,
        previous_products: 72,
        revenue_by_month: SalesDataset::new(
            MONTHS.iter().zip(monthly).map(|(m, r)| PeriodRecord::revenue_only(m, r)).collect(),
        ),
        top_products: vec![
            top_product(1, "Premium Subscription", 245, 24500.0),
            top_product(2, "Business Plan", 187, 28050.0),
            top_product(3, "Enterprise Solution", 124, 37200.0),
            top_product(4, "Starter Package", 312, 15600.0),
            top_product(5, "Add-on Services", 89, 8900.0),
        ],
        top_reps: vec![
            top_rep(1, "Sarah Johnson", 42, 63000.0, AVATAR_SARAH),
            top_rep(2, "Michael Chen", 38, 57000.0, AVATAR_MICHAEL),
            top_rep(3, "Jessica Williams", 35, 52500.0, AVATAR_JESSICA),
            top_rep(4, "David Rodriguez", 31, 46500.0, AVATAR_DAVID),
        ],
    }
}

fn top_product(id: u32, name: &str, sales: u64, revenue: f64) -> TopProduct {
    TopProduct { id, name: name.to_string(), sales, revenue }
}

fn top_rep(id: u32, name: &str, sales: u64, revenue: f64, avatar: &str) -> TopRep {
    TopRep { id, name: name.to_string(), sales, revenue, avatar: avatar.to_string() }
}

pub fn teams() -> Vec<TeamEntity> {
    let team = |id, name: &str, description: &str, members, leader: &str, (y, m, d), performance| TeamEntity {
        id,
        name: name.to_string(),
        description: description.to_string(),
        leader: leader.to_string(),
        members,
        created_at: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap_or_default(),
        performance,
    };
    vec![
        team(1, "Sales Development", "Responsible for outbound prospecting and lead qualification", 8, "Emma Thompson", (2023, 1, 15), 92),
        team(2, "Account Executives", "Closing deals and managing key customer relationships", 12, "Michael Chen", (2023, 2, 10), 88),
        team(3, "Customer Success", "Ensuring customer satisfaction and handling renewals", 6, "Sarah Johnson", (2023, 3, 22), 95),
        team(4, "Marketing", "Lead generation and brand awareness campaigns", 5, "David Wilson", (2023, 4, 5), 84),
        team(5, "Product Specialists", "Product demonstrations and technical sales support", 7, "Jessica Martinez", (2023, 5, 18), 91),
    ]
}

/// Sales series of one granularity, ending at `today`.
pub fn sales_series<R: Rng + ?Sized>(granularity: Granularity, today: NaiveDate, rng: &mut R) -> SalesDataset {
    let mut record = |period: String, revenue: (u64, u64), transactions: (u64, u64), customers: (u64, u64)| PeriodRecord {
        period,
        revenue: (revenue.0 + rng.gen_range(0..revenue.1)) as f64,
        transactions: Some(transactions.0 + rng.gen_range(0..transactions.1)),
        customers: Some(customers.0 + rng.gen_range(0..customers.1)),
    };
    let periods = match granularity {
        Granularity::Daily => (0..30u64)
            .map(|i| {
                let day = today.checked_sub_days(Days::new(29 - i)).unwrap_or(today);
                record(day.format("%Y-%m-%d").to_string(), (5000, 8000), (80, 120), (50, 100))
            })
            .collect(),
        Granularity::Weekly => (0..12)
            .map(|i| record(format!("Week {}", i + 1), (30000, 40000), (500, 700), (300, 500)))
            .collect(),
        Granularity::Monthly => (0..12u32)
            .map(|i| {
                let month = today.checked_sub_months(Months::new(11 - i)).unwrap_or(today);
                record(month.format("%b %Y").to_string(), (120000, 180000), (2000, 3000), (1200, 1800))
            })
            .collect(),
    };
    SalesDataset::new(periods)
}

pub fn reports_dataset<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> ReportsDataset {
    let sales_over_time: BTreeMap<Granularity, SalesDataset> =
        Granularity::ALL.iter().map(|g| (*g, sales_series(*g, today, rng))).collect();
    ReportsDataset {
        sales_over_time,
        products: vec![
            product(1, "Premium Subscription", "Subscription", 1245, 124500.0, 15.2),
            product(2, "Business Plan", "Subscription", 987, 148050.0, 8.7),
            product(3, "Enterprise Solution", "Enterprise", 624, 187200.0, 22.4),
            product(4, "Starter Package", "Starter", 1312, 65600.0, -5.8),
            product(5, "Add-on Services", "Services", 489, 48900.0, 12.3),
            product(6, "Consulting Hours", "Services", 356, 71200.0, 18.6),
            product(7, "Data Migration", "Services", 215, 43000.0, 4.2),
            product(8, "Training", "Training", 432, 34560.0, -2.1),
        ],
        reps: vec![
            rep(1, "Sarah Johnson", AVATAR_SARAH, 120000.0, 163000.0, 42, 3881.0),
            rep(2, "Michael Chen", AVATAR_MICHAEL, 120000.0, 137000.0, 38, 3605.0),
            rep(3, "Jessica Williams", AVATAR_JESSICA, 100000.0, 112500.0, 35, 3214.0),
            rep(4, "David Rodriguez", AVATAR_DAVID, 100000.0, 96500.0, 31, 3113.0),
            rep(5, "Emily Wang", AVATAR_EMILY, 80000.0, 98200.0, 29, 3386.0),
            rep(6, "Robert Kim", AVATAR_ROBERT, 80000.0, 75400.0, 24, 3142.0),
        ],
        acquisition: [
            ("Organic Search", 1245, 32.0),
            ("Direct", 875, 22.0),
            ("Referral", 654, 17.0),
            ("Social Media", 498, 13.0),
            ("Email", 387, 10.0),
            ("Other", 245, 6.0),
        ]
        .into_iter()
        .map(|(source, count, percentage)| AcquisitionRecord { source: source.to_string(), count, percentage })
        .collect(),
        retention: MONTHS
            .iter()
            .zip([94.2, 93.8, 95.1, 94.5, 93.2, 94.8, 95.3, 94.7, 95.8, 96.2, 96.5, 96.8])
            .map(|(month, rate)| RetentionPoint { month: month.to_string(), rate })
            .collect(),
        segments: [
            ("Enterprise", 245, 735000.0, 3000.0),
            ("Mid-Market", 587, 1174000.0, 2000.0),
            ("Small Business", 1432, 1718400.0, 1200.0),
            ("Startup", 873, 698400.0, 800.0),
        ]
        .into_iter()
        .map(|(segment, count, revenue, avg_value)| SegmentRecord { segment: segment.to_string(), count, revenue, avg_value })
        .collect(),
    }
}

fn product(id: u32, name: &str, category: &str, sales: u64, revenue: f64, growth_percent: f64) -> ProductRecord {
    ProductRecord { id, name: name.to_string(), category: category.to_string(), sales, revenue, growth_percent }
}

fn rep(id: u32, name: &str, avatar: &str, quota: f64, actual: f64, deals: u64, avg_deal_size: f64) -> RepRecord {
    RepRecord { id, name: name.to_string(), avatar: avatar.to_string(), quota, actual, deals, avg_deal_size }
}

// =============================================================================
// Analytics
// =============================================================================

pub fn analytics_cards() -> Vec<KpiCard> {
    vec![
        KpiCard::with_change("Total Revenue", 48234.0, 12.5, KpiFormat::Currency),
        KpiCard::with_change("Total Orders", 1234.0, 8.2, KpiFormat::Count),
        KpiCard::with_change("New Customers", 432.0, -3.8, KpiFormat::Count),
        KpiCard::with_change("Conversion Rate", 3.42, 2.1, KpiFormat::Percent),
    ]
}

/// Monthly sales index for the current and previous year.
pub fn sales_trend() -> (Vec<f64>, Vec<f64>) {
    (
        vec![31.0, 40.0, 28.0, 51.0, 42.0, 109.0, 100.0, 120.0, 80.0, 95.0, 110.0, 140.0],
        vec![11.0, 32.0, 45.0, 32.0, 34.0, 52.0, 41.0, 80.0, 96.0, 140.0, 30.0, 100.0],
    )
}

pub fn region_distribution() -> Vec<Share> {
    distribution(&[
        ("North America", 44.0),
        ("Europe", 55.0),
        ("Asia", 30.0),
        ("South America", 22.0),
        ("Africa", 16.0),
    ])
}

pub fn recent_activities() -> Vec<Activity> {
    let row = |id, title: &str, time: &str, kind| Activity { id, title: title.to_string(), time: time.to_string(), kind };
    vec![
        row(1, "New sale order #1234", "2 hours ago", ActivityKind::Sale { amount: 1430.0 }),
        row(2, "New customer registered", "3 hours ago", ActivityKind::Customer { user: "Emily Davis".into() }),
        row(3, "Payment received #4321", "5 hours ago", ActivityKind::Payment { amount: 2800.0 }),
        row(4, "Product restock completed", "1 day ago", ActivityKind::Inventory { product: "Widget XL Pro".into() }),
        row(5, "Marketing campaign launched", "2 days ago", ActivityKind::Marketing { campaign: "Summer Sale 2023".into() }),
    ]
}
