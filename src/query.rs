//! Search and ordering over entity collections.
//!
//! A query is filter-then-sort. The search term matches case-insensitively
//! against a fixed set of text fields per entity; the sort comparator dispatches
//! on the semantic type of the key. Descending order negates the comparator and
//! the sort is stable, so equal keys keep their prior relative order.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::logging::log_query;
use crate::model::{AcquisitionRecord, ParseSelectorError, ProductRecord, RepRecord, SegmentRecord, TeamEntity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Value a record exposes for one sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Number(f64),
    Instant(DateTime<Utc>),
    Text(&'a str),
}

pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

pub trait Sortable {
    type Key: Copy + KeyName;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_>;
}

pub trait KeyName {
    fn key_name(&self) -> &'static str;
}

/// Base letters only: decomposed, accents stripped, lowercased.
fn collation_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

/// Case-insensitive text ordering. Accents only break ties between otherwise
/// equal base letters, so "Éclair" sorts with the e's.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (SortValue::Instant(x), SortValue::Instant(y)) => x.cmp(&y),
        (SortValue::Text(x), SortValue::Text(y)) => compare_text(x, y),
        // A key always yields one kind of value; mixed pairs do not occur.
        _ => Ordering::Equal,
    }
}

/// Empty term matches everything; otherwise any search field must contain it.
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields().iter().any(|field| field.to_lowercase().contains(&needle))
}

pub fn sort_and_filter<'a, T>(items: &'a [T], term: &str, key: T::Key, order: SortOrder) -> Vec<&'a T>
where
    T: Searchable + Sortable,
{
    let mut out: Vec<&T> = items.iter().filter(|item| matches_search(*item, term)).collect();
    out.sort_by(|a, b| order.apply(compare_values(a.sort_value(key), b.sort_value(key))));
    log_query(term, key.key_name(), order.as_str(), out.len(), items.len());
    out
}

/// Search and sort parameters of one list view. Either can change without
/// disturbing the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery<K> {
    pub search: String,
    pub sort_key: K,
    pub order: SortOrder,
}

impl<K: Copy + PartialEq> ListQuery<K> {
    pub fn new(sort_key: K) -> Self {
        Self { search: String::new(), sort_key, order: SortOrder::Asc }
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Header click: the active key flips direction, another key starts ascending.
    pub fn click_header(&mut self, key: K) {
        if self.sort_key == key {
            self.order = self.order.toggled();
        } else {
            self.sort_key = key;
            self.order = SortOrder::Asc;
        }
    }

    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Searchable + Sortable<Key = K>,
        K: KeyName,
    {
        sort_and_filter(items, &self.search, self.sort_key, self.order)
    }
}

// =============================================================================
// Teams
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamSortKey {
    Name,
    Description,
    Leader,
    Members,
    Performance,
    CreatedAt,
}

impl KeyName for TeamSortKey {
    fn key_name(&self) -> &'static str {
        match self {
            TeamSortKey::Name => "name",
            TeamSortKey::Description => "description",
            TeamSortKey::Leader => "leader",
            TeamSortKey::Members => "members",
            TeamSortKey::Performance => "performance",
            TeamSortKey::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for TeamSortKey {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(TeamSortKey::Name),
            "description" => Ok(TeamSortKey::Description),
            "leader" => Ok(TeamSortKey::Leader),
            "members" => Ok(TeamSortKey::Members),
            "performance" => Ok(TeamSortKey::Performance),
            "createdAt" | "created_at" => Ok(TeamSortKey::CreatedAt),
            other => Err(ParseSelectorError::new("team sort key", other)),
        }
    }
}

impl Searchable for TeamEntity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.leader.as_str()]
    }
}

impl Sortable for TeamEntity {
    type Key = TeamSortKey;

    fn sort_value(&self, key: TeamSortKey) -> SortValue<'_> {
        match key {
            TeamSortKey::Name => SortValue::Text(&self.name),
            TeamSortKey::Description => SortValue::Text(&self.description),
            TeamSortKey::Leader => SortValue::Text(&self.leader),
            TeamSortKey::Members => SortValue::Number(self.members as f64),
            TeamSortKey::Performance => SortValue::Number(self.performance as f64),
            TeamSortKey::CreatedAt => SortValue::Instant(self.created_at),
        }
    }
}

// =============================================================================
// Report rows
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSortKey {
    Name,
    Category,
    Sales,
    Revenue,
    Growth,
}

impl KeyName for ProductSortKey {
    fn key_name(&self) -> &'static str {
        match self {
            ProductSortKey::Name => "name",
            ProductSortKey::Category => "category",
            ProductSortKey::Sales => "sales",
            ProductSortKey::Revenue => "revenue",
            ProductSortKey::Growth => "growth",
        }
    }
}

impl Searchable for ProductRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

impl Sortable for ProductRecord {
    type Key = ProductSortKey;

    fn sort_value(&self, key: ProductSortKey) -> SortValue<'_> {
        match key {
            ProductSortKey::Name => SortValue::Text(&self.name),
            ProductSortKey::Category => SortValue::Text(&self.category),
            ProductSortKey::Sales => SortValue::Number(self.sales as f64),
            ProductSortKey::Revenue => SortValue::Number(self.revenue),
            ProductSortKey::Growth => SortValue::Number(self.growth_percent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepSortKey {
    Name,
    Quota,
    Actual,
    Deals,
    AvgDealSize,
}

impl KeyName for RepSortKey {
    fn key_name(&self) -> &'static str {
        match self {
            RepSortKey::Name => "name",
            RepSortKey::Quota => "quota",
            RepSortKey::Actual => "actual",
            RepSortKey::Deals => "deals",
            RepSortKey::AvgDealSize => "avgDealSize",
        }
    }
}

impl Searchable for RepRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Sortable for RepRecord {
    type Key = RepSortKey;

    fn sort_value(&self, key: RepSortKey) -> SortValue<'_> {
        match key {
            RepSortKey::Name => SortValue::Text(&self.name),
            RepSortKey::Quota => SortValue::Number(self.quota),
            RepSortKey::Actual => SortValue::Number(self.actual),
            RepSortKey::Deals => SortValue::Number(self.deals as f64),
            RepSortKey::AvgDealSize => SortValue::Number(self.avg_deal_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentSortKey {
    Segment,
    Count,
    Revenue,
    AvgValue,
}

impl KeyName for SegmentSortKey {
    fn key_name(&self) -> &'static str {
        match self {
            SegmentSortKey::Segment => "segment",
            SegmentSortKey::Count => "count",
            SegmentSortKey::Revenue => "revenue",
            SegmentSortKey::AvgValue => "avgValue",
        }
    }
}

impl Searchable for SegmentRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.segment.as_str()]
    }
}

impl Sortable for SegmentRecord {
    type Key = SegmentSortKey;

    fn sort_value(&self, key: SegmentSortKey) -> SortValue<'_> {
        match key {
            SegmentSortKey::Segment => SortValue::Text(&self.segment),
            SegmentSortKey::Count => SortValue::Number(self.count as f64),
            SegmentSortKey::Revenue => SortValue::Number(self.revenue),
            SegmentSortKey::AvgValue => SortValue::Number(self.avg_value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionSortKey {
    Source,
    Count,
    Percentage,
}

impl KeyName for AcquisitionSortKey {
    fn key_name(&self) -> &'static str {
        match self {
            AcquisitionSortKey::Source => "source",
            AcquisitionSortKey::Count => "count",
            AcquisitionSortKey::Percentage => "percentage",
        }
    }
}

impl Searchable for AcquisitionRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.source.as_str()]
    }
}

impl Sortable for AcquisitionRecord {
    type Key = AcquisitionSortKey;

    fn sort_value(&self, key: AcquisitionSortKey) -> SortValue<'_> {
        match key {
            AcquisitionSortKey::Source => SortValue::Text(&self.source),
            AcquisitionSortKey::Count => SortValue::Number(self.count as f64),
            AcquisitionSortKey::Percentage => SortValue::Number(self.percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn team(id: u32, name: &str, leader: &str, members: u32, performance: u8, day: u32) -> TeamEntity {
        TeamEntity {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            leader: leader.to_string(),
            members,
            created_at: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
            performance,
        }
    }

    fn roster() -> Vec<TeamEntity> {
        vec![
            team(1, "marketing", "Emma", 8, 92, 15),
            team(2, "Account Executives", "Michael", 12, 88, 10),
            team(3, "Customer Success", "Sarah", 8, 95, 22),
            team(4, "Brand", "David", 5, 88, 5),
        ]
    }

    fn ids(items: &[&TeamEntity]) -> Vec<u32> {
        items.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let teams = roster();
        assert_eq!(ids(&sort_and_filter(&teams, "SARAH", TeamSortKey::Name, SortOrder::Asc)), vec![3]);
        assert_eq!(ids(&sort_and_filter(&teams, "executives desc", TeamSortKey::Name, SortOrder::Asc)), vec![2]);
        assert_eq!(sort_and_filter(&teams, "", TeamSortKey::Name, SortOrder::Asc).len(), 4);
        assert!(sort_and_filter(&teams, "zzz", TeamSortKey::Name, SortOrder::Asc).is_empty());
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let teams = roster();
        let asc = sort_and_filter(&teams, "", TeamSortKey::Name, SortOrder::Asc);
        assert_eq!(ids(&asc), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_accented_text_sorts_with_base_letter() {
        assert_eq!(compare_text("Éclair Team", "Zeta Team"), Ordering::Less);
        assert_eq!(compare_text("Éclair", "eclair"), Ordering::Greater);
        assert_eq!(compare_text("Ångström", "Beta"), Ordering::Less);
        let teams = vec![
            team(1, "Sales Development", "Emma", 8, 92, 15),
            team(2, "Zeta Accounts", "Ben", 4, 80, 16),
            team(3, "Élite Partners", "Zoë", 3, 85, 17),
            team(4, "Customer Success", "Sarah", 6, 95, 18),
        ];
        let ids: Vec<u32> = sort_and_filter(&teams, "", TeamSortKey::Name, SortOrder::Asc).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_numeric_desc_keeps_tie_order() {
        let teams = roster();
        let asc = sort_and_filter(&teams, "", TeamSortKey::Members, SortOrder::Asc);
        let desc = sort_and_filter(&teams, "", TeamSortKey::Members, SortOrder::Desc);
        // 1 and 3 tie on members; both directions keep 1 before 3
        assert_eq!(ids(&asc), vec![4, 1, 3, 2]);
        assert_eq!(ids(&desc), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let teams = roster();
        let a = ids(&sort_and_filter(&teams, "e", TeamSortKey::Performance, SortOrder::Desc));
        let b = ids(&sort_and_filter(&teams, "e", TeamSortKey::Performance, SortOrder::Desc));
        assert_eq!(a, b);
    }

    #[test]
    fn test_date_sort_compares_instants() {
        let teams = roster();
        let asc = sort_and_filter(&teams, "", TeamSortKey::CreatedAt, SortOrder::Asc);
        assert_eq!(ids(&asc), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_header_click_toggles_or_resets() {
        let mut q = ListQuery::new(TeamSortKey::Name);
        q.click_header(TeamSortKey::Name);
        assert_eq!(q.order, SortOrder::Desc);
        q.click_header(TeamSortKey::Members);
        assert_eq!(q.sort_key, TeamSortKey::Members);
        assert_eq!(q.order, SortOrder::Asc);
        q.set_search("brand");
        assert_eq!(q.sort_key, TeamSortKey::Members);
        assert_eq!(ids(&q.apply(&roster())), vec![4]);
    }

    #[test]
    fn test_product_rows_sort_by_revenue() {
        let products = vec![
            ProductRecord { id: 1, name: "Starter".into(), category: "Starter".into(), sales: 1312, revenue: 65600.0, growth_percent: -5.8 },
            ProductRecord { id: 2, name: "Enterprise".into(), category: "Enterprise".into(), sales: 624, revenue: 187200.0, growth_percent: 22.4 },
        ];
        let top = sort_and_filter(&products, "", ProductSortKey::Revenue, SortOrder::Desc);
        assert_eq!(top[0].id, 2);
        let growth = sort_and_filter(&products, "", ProductSortKey::Growth, SortOrder::Asc);
        assert_eq!(growth[0].id, 1);
    }

    #[test]
    fn test_team_sort_key_parse() {
        assert_eq!("createdAt".parse::<TeamSortKey>().unwrap(), TeamSortKey::CreatedAt);
        assert!("avatar".parse::<TeamSortKey>().is_err());
    }
}
