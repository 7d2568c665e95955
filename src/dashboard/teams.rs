use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::model::{FormError, TeamEntity, TeamForm, TeamId};
use crate::query::{ListQuery, TeamSortKey};
use crate::store::{StoreError, TeamStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamsError {
    Form(FormError),
    Store(StoreError),
}

impl fmt::Display for TeamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamsError::Form(err) => write!(f, "invalid team form: {}", err),
            TeamsError::Store(err) => write!(f, "team store: {}", err),
        }
    }
}

impl std::error::Error for TeamsError {}

impl From<FormError> for TeamsError {
    fn from(err: FormError) -> Self {
        TeamsError::Form(err)
    }
}

impl From<StoreError> for TeamsError {
    fn from(err: StoreError) -> Self {
        TeamsError::Store(err)
    }
}

/// Team management page: the roster plus its list-view parameters.
#[derive(Debug, Clone)]
pub struct TeamsDashboard {
    store: TeamStore,
    query: ListQuery<TeamSortKey>,
}

impl TeamsDashboard {
    pub fn new(teams: Vec<TeamEntity>) -> Self {
        Self { store: TeamStore::new(teams), query: ListQuery::new(TeamSortKey::Name) }
    }

    pub fn store(&self) -> &TeamStore {
        &self.store
    }

    pub fn query(&self) -> &ListQuery<TeamSortKey> {
        &self.query
    }

    pub fn search(&mut self, term: &str) {
        self.query.set_search(term);
    }

    pub fn sort_by(&mut self, key: TeamSortKey) {
        self.query.click_header(key);
    }

    /// Roster as displayed: filtered by the search box, then sorted.
    pub fn visible(&self) -> Vec<&TeamEntity> {
        self.query.apply(self.store.teams())
    }

    /// Prefill for the edit modal.
    pub fn edit_form(&self, id: TeamId) -> Result<TeamForm, TeamsError> {
        self.store
            .get(id)
            .map(TeamForm::from_team)
            .ok_or(TeamsError::Store(StoreError::UnknownTeam { id }))
    }

    pub fn submit_create<R: Rng + ?Sized>(
        &mut self,
        form: TeamForm,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<TeamEntity, TeamsError> {
        form.validate()?;
        Ok(self.store.create(form, now, rng))
    }

    pub fn submit_update(&mut self, id: TeamId, form: TeamForm) -> Result<TeamEntity, TeamsError> {
        form.validate()?;
        Ok(self.store.update(id, form)?)
    }

    pub fn confirm_delete(&mut self, id: TeamId) -> Result<TeamEntity, TeamsError> {
        Ok(self.store.delete(id)?)
    }
}
