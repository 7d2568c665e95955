use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TeamId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntity {
    pub id: TeamId,
    pub name: String,
    pub description: String,
    pub leader: String,
    pub members: u32,
    pub created_at: DateTime<Utc>,
    /// 0..=100
    pub performance: u8,
}

impl TeamEntity {
    /// Overwrites the user-editable fields. Identity, creation time and score stay.
    pub fn apply_form(&mut self, form: TeamForm) {
        self.name = form.name;
        self.description = form.description;
        self.leader = form.leader;
        self.members = form.members;
    }
}

/// Create/edit payload as submitted by the team modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamForm {
    pub name: String,
    pub description: String,
    pub leader: String,
    pub members: u32,
}

impl Default for TeamForm {
    fn default() -> Self {
        Self { name: String::new(), description: String::new(), leader: String::new(), members: 1 }
    }
}

impl TeamForm {
    pub fn from_team(team: &TeamEntity) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            leader: team.leader.clone(),
            members: team.members,
        }
    }

    /// Gate in front of the store; the store itself trusts its input.
    pub fn validate(&self) -> Result<(), FormError> {
        for (field, value) in [("name", &self.name), ("description", &self.description), ("leader", &self.leader)] {
            if value.trim().is_empty() {
                return Err(FormError::EmptyField(field));
            }
        }
        if self.members == 0 {
            return Err(FormError::NoMembers);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    EmptyField(&'static str),
    NoMembers,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::EmptyField(field) => write!(f, "{} is required", field),
            FormError::NoMembers => write!(f, "a team needs at least one member"),
        }
    }
}

impl std::error::Error for FormError {}
