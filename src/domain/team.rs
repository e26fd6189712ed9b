// Copyright 2025 Cowboy AI, LLC.

//! Teams

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{OrganizationId, OrganizationScoped, UserId};
use crate::entity::{DomainEntity, EntityId};

/// Team identity
pub type TeamId = EntityId<Team>;

/// Grouping of users within one organization
///
/// ## Invariants
/// - every member belongs to `organization_id`
/// - `leader`, if set, is in `members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team identity; assigned by the store on insert
    pub id: TeamId,
    /// Display name
    pub name: String,
    /// Owning organization
    pub organization_id: OrganizationId,
    /// Optional team leader
    pub leader: Option<UserId>,
    /// Member users
    pub members: BTreeSet<UserId>,
}

impl Team {
    /// Create an unsaved, empty team
    pub fn new(name: impl Into<String>, organization_id: OrganizationId) -> Self {
        Self {
            id: TeamId::UNASSIGNED,
            name: name.into(),
            organization_id,
            leader: None,
            members: BTreeSet::new(),
        }
    }

    /// Whether the user is a member
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// Add a member; returns false if already present
    pub fn add_member(&mut self, user_id: UserId) -> bool {
        self.members.insert(user_id)
    }

    /// Remove a member, dropping leadership if the member led the team
    pub fn remove_member(&mut self, user_id: UserId) -> bool {
        if self.leader == Some(user_id) {
            self.leader = None;
        }
        self.members.remove(&user_id)
    }

    /// Whether the user leads this team
    pub fn is_led_by(&self, user_id: UserId) -> bool {
        self.leader == Some(user_id)
    }
}

impl DomainEntity for Team {
    const ENTITY_TYPE: &'static str = "Team";

    fn id(&self) -> TeamId {
        self.id
    }

    fn set_id(&mut self, id: TeamId) {
        self.id = id;
    }
}

impl OrganizationScoped for Team {
    fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
