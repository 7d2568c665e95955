use super::{LiveDataset, RefreshError};
use crate::model::{Granularity, ProductRecord, ReportsDataset};
use crate::query::{ListQuery, ProductSortKey};
use crate::reports::{build_report, ReportKind, ReportView};

#[derive(Debug, Clone)]
pub struct ReportsDashboard {
    data: LiveDataset<ReportsDataset>,
    kind: ReportKind,
    granularity: Granularity,
    products: ListQuery<ProductSortKey>,
}

impl ReportsDashboard {
    pub fn new(dataset: ReportsDataset) -> Self {
        Self {
            data: LiveDataset::new("reports", dataset),
            kind: ReportKind::Sales,
            granularity: Granularity::Monthly,
            products: ListQuery::new(ProductSortKey::Revenue),
        }
    }

    pub fn dataset(&self) -> &ReportsDataset {
        self.data.current()
    }

    pub fn data_mut(&mut self) -> &mut LiveDataset<ReportsDataset> {
        &mut self.data
    }

    pub fn is_refreshing(&self) -> bool {
        self.data.is_refreshing()
    }

    pub fn select_report(&mut self, kind: ReportKind) {
        self.kind = kind;
    }

    pub fn select_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn product_query_mut(&mut self) -> &mut ListQuery<ProductSortKey> {
        &mut self.products
    }

    /// Rows of the active tab, derived from the current snapshot.
    pub fn view(&self) -> ReportView {
        build_report(self.kind, self.dataset(), self.granularity)
    }

    /// Product table after the search box and header sort.
    pub fn product_list(&self) -> Vec<&ProductRecord> {
        self.products.apply(&self.dataset().products)
    }

    pub fn refresh_now<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RefreshError> {
        self.data.refresh_now(rng)
    }
}
