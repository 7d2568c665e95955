//! In-memory team collection and its CRUD surface.
//!
//! The store assumes validated forms. Operations on an unknown id are caller
//! bugs: they are reported as `StoreError` and leave the collection unchanged.
//! Ids are issued from a high-water mark, so a deleted id is never handed out
//! again, not even when it was the largest one.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::logging::{log_precondition_failure, log_team_mutation};
use crate::model::{TeamEntity, TeamForm, TeamId};

/// Inclusive range of the score a new team starts with.
pub const INITIAL_PERFORMANCE: std::ops::RangeInclusive<u8> = 80..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    UnknownTeam { id: TeamId },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownTeam { id } => write!(f, "no team with id {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStore {
    teams: Vec<TeamEntity>,
    /// Largest id ever present in this store
    high_water: TeamId,
}

impl TeamStore {
    pub fn new(teams: Vec<TeamEntity>) -> Self {
        let high_water = teams.iter().map(|t| t.id).max().unwrap_or(0);
        Self { teams, high_water }
    }

    pub fn teams(&self) -> &[TeamEntity] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get(&self, id: TeamId) -> Option<&TeamEntity> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// `max(id) + 1`, or 1 for a store that never held a team.
    pub fn next_id(&self) -> TeamId {
        self.high_water + 1
    }

    pub fn create<R: Rng + ?Sized>(&mut self, form: TeamForm, now: DateTime<Utc>, rng: &mut R) -> TeamEntity {
        let team = TeamEntity {
            id: self.next_id(),
            name: form.name,
            description: form.description,
            leader: form.leader,
            members: form.members,
            created_at: now,
            performance: rng.gen_range(INITIAL_PERFORMANCE),
        };
        self.high_water = team.id;
        self.teams.push(team.clone());
        log_team_mutation("create", team.id, self.teams.len());
        team
    }

    pub fn update(&mut self, id: TeamId, form: TeamForm) -> Result<TeamEntity, StoreError> {
        let Some(pos) = self.teams.iter().position(|t| t.id == id) else {
            return Err(self.reject("update", id));
        };
        let team = &mut self.teams[pos];
        team.apply_form(form);
        let updated = team.clone();
        log_team_mutation("update", id, self.teams.len());
        Ok(updated)
    }

    pub fn delete(&mut self, id: TeamId) -> Result<TeamEntity, StoreError> {
        let Some(pos) = self.teams.iter().position(|t| t.id == id) else {
            return Err(self.reject("delete", id));
        };
        let removed = self.teams.remove(pos);
        log_team_mutation("delete", id, self.teams.len());
        Ok(removed)
    }

    fn reject(&self, op: &str, id: TeamId) -> StoreError {
        let err = StoreError::UnknownTeam { id };
        log_precondition_failure(op, &err.to_string());
        err
    }
}
