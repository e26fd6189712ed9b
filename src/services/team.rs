// Copyright 2025 Cowboy AI, LLC.

//! Team management and membership

use std::sync::Arc;
use tracing::info;

use super::{contains_ignore_case, required_name, ServiceContext};
use crate::authorization::{Caller, Operation};
use crate::config::DomainConfig;
use crate::domain::{Criteria, CriteriaId, Role, Team, TeamId, User, UserId};
use crate::errors::{DomainError, DomainResult, ViolationKind};
use crate::store::{delete, insert, list, load, save, EntityStore};

/// Team operations for managers
pub struct TeamService<S: EntityStore + ?Sized> {
    context: ServiceContext<S>,
}

impl<S: EntityStore + ?Sized> TeamService<S> {
    /// Create the service over `store`
    pub fn new(store: Arc<S>, config: DomainConfig) -> Self {
        Self::from_context(ServiceContext::new(store, config))
    }

    pub(super) fn from_context(context: ServiceContext<S>) -> Self {
        Self { context }
    }

    /// Load a team of the caller's organization
    pub async fn get_team(&self, caller: &Caller, team_id: TeamId) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageTeam)?;
        let team: Team = load(self.context.store(), team_id).await?;
        gate.check_authentication(team.organization_id)?;
        Ok(team)
    }

    /// All teams of the caller's organization
    pub async fn list_teams(&self, caller: &Caller) -> DomainResult<Vec<Team>> {
        self.context.gate(caller).authorize(Operation::SearchTeams, caller.organization_id)?;
        list(self.context.store(), caller.organization_id).await
    }

    /// Create an empty team in the caller's organization
    pub async fn create_team(&self, caller: &Caller, name: &str) -> DomainResult<Team> {
        self.context.gate(caller).authorize(Operation::ManageTeam, caller.organization_id)?;
        let name = required_name(name, "Team name")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let team = insert(self.context.store(), Team::new(name, caller.organization_id)).await?;
        info!(team_id = %team.id, organization_id = %team.organization_id, "team created");
        Ok(team)
    }

    /// Rename a team
    pub async fn rename_team(&self, caller: &Caller, team_id: TeamId, name: &str) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageTeam)?;
        let name = required_name(name, "Team name")?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut team: Team = load(self.context.store(), team_id).await?;
        gate.check_authentication(team.organization_id)?;
        team.name = name;

        let team = save(self.context.store(), team).await?;
        info!(team_id = %team.id, "team renamed");
        Ok(team)
    }

    /// Delete a team, releasing its members
    ///
    /// Members leave the team; a leader holding the team leader role is
    /// demoted to employee.
    pub async fn remove_team(&self, caller: &Caller, team_id: TeamId) -> DomainResult<()> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageTeam)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let team: Team = load(self.context.store(), team_id).await?;
        gate.check_authentication(team.organization_id)?;

        // Resolve every member before releasing any of them.
        let mut members = Vec::with_capacity(team.members.len());
        for &member_id in &team.members {
            let member: User = load(self.context.store(), member_id).await?;
            members.push(member);
        }
        for mut member in members {
            member.team_id = None;
            if team.is_led_by(member.id) && member.role == Role::TeamLeader {
                member.role = Role::Employee;
            }
            save(self.context.store(), member).await?;
        }
        delete(self.context.store(), team.id).await?;
        info!(team_id = %team.id, released = team.members.len(), "team removed");
        Ok(())
    }

    /// Add a user to a team
    ///
    /// A user already in another team of the organization moves over.
    pub async fn assign_employee(
        &self,
        caller: &Caller,
        team_id: TeamId,
        user_id: UserId,
    ) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageTeamMembers)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut team: Team = load(self.context.store(), team_id).await?;
        let mut user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(team.organization_id)?;
        gate.check_authentication(user.organization_id)?;

        let validator = self.context.validator();
        validator.team_and_user_same_organization(team_id, user_id).await?;
        validator.user_is_not_team_member(team_id, user_id).await?;

        if let Some(previous_id) = user.team_id {
            let mut previous: Team = load(self.context.store(), previous_id).await?;
            if previous.is_led_by(user_id) && user.role == Role::TeamLeader {
                user.role = Role::Employee;
            }
            previous.remove_member(user_id);
            save(self.context.store(), previous).await?;
        }

        user.team_id = Some(team.id);
        team.add_member(user_id);
        save(self.context.store(), user).await?;
        let team = save(self.context.store(), team).await?;
        info!(team_id = %team.id, user_id = %user_id, "employee assigned to team");
        Ok(team)
    }

    /// Remove a member from a team; a removed leader loses leadership
    pub async fn remove_employee(
        &self,
        caller: &Caller,
        team_id: TeamId,
        user_id: UserId,
    ) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::ManageTeamMembers)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut team: Team = load(self.context.store(), team_id).await?;
        let mut user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(team.organization_id)?;
        gate.check_authentication(user.organization_id)?;
        self.context.validator().user_is_team_member(team_id, user_id).await?;

        if team.is_led_by(user_id) && user.role == Role::TeamLeader {
            user.role = Role::Employee;
        }
        team.remove_member(user_id);
        user.team_id = None;
        save(self.context.store(), user).await?;
        let team = save(self.context.store(), team).await?;
        info!(team_id = %team.id, user_id = %user_id, "employee removed from team");
        Ok(team)
    }

    /// Make a member the team's leader
    ///
    /// An employee is promoted to team leader; the previous leader, if it
    /// held the team leader role, returns to employee.
    pub async fn assign_leader(
        &self,
        caller: &Caller,
        team_id: TeamId,
        user_id: UserId,
    ) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignTeamLeader)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut team: Team = load(self.context.store(), team_id).await?;
        let mut user: User = load(self.context.store(), user_id).await?;
        gate.check_authentication(team.organization_id)?;
        gate.check_authentication(user.organization_id)?;
        self.context.validator().user_is_team_member(team_id, user_id).await?;

        if team.is_led_by(user_id) {
            return Ok(team);
        }
        if let Some(previous_id) = team.leader {
            self.demote(previous_id).await?;
        }
        if user.role == Role::Employee {
            user.role = Role::TeamLeader;
            save(self.context.store(), user).await?;
        }
        team.leader = Some(user_id);
        let team = save(self.context.store(), team).await?;
        info!(team_id = %team.id, leader_id = %user_id, "team leader assigned");
        Ok(team)
    }

    /// Clear the team's leader
    pub async fn remove_leader(&self, caller: &Caller, team_id: TeamId) -> DomainResult<Team> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignTeamLeader)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let mut team: Team = load(self.context.store(), team_id).await?;
        gate.check_authentication(team.organization_id)?;

        if let Some(leader_id) = team.leader.take() {
            self.demote(leader_id).await?;
            info!(team_id = %team.id, leader_id = %leader_id, "team leader removed");
        }
        save(self.context.store(), team).await
    }

    /// Assign a criteria to every member of a team
    ///
    /// Returns the members that already had the criteria; they are left
    /// unchanged.
    pub async fn assign_criteria_to_team(
        &self,
        caller: &Caller,
        team_id: TeamId,
        criteria_id: CriteriaId,
    ) -> DomainResult<Vec<UserId>> {
        let gate = self.context.gate(caller);
        gate.require_role(Operation::AssignCriteria)?;

        let _unit = self.context.store().begin_unit_of_work().await;
        let team: Team = load(self.context.store(), team_id).await?;
        let criteria: Criteria = load(self.context.store(), criteria_id).await?;
        gate.check_authentication(team.organization_id)?;
        gate.check_authentication(criteria.organization_id)?;
        self.context
            .validator()
            .team_and_criteria_same_organization(team_id, criteria_id)
            .await?;

        let mut already_assigned = Vec::new();
        for &member_id in &team.members {
            let mut member: User = load(self.context.store(), member_id).await?;
            if !member.criteria.insert(criteria_id) {
                already_assigned.push(member_id);
                continue;
            }
            save(self.context.store(), member).await?;
        }
        info!(
            team_id = %team.id,
            criteria_id = %criteria_id,
            skipped = already_assigned.len(),
            "criteria assigned to team"
        );
        Ok(already_assigned)
    }

    /// Teams of the caller's organization whose name contains `fragment`
    pub async fn search_teams(&self, caller: &Caller, fragment: &str) -> DomainResult<Vec<Team>> {
        self.context.gate(caller).authorize(Operation::SearchTeams, caller.organization_id)?;
        if fragment.trim().is_empty() {
            return Err(DomainError::violation(
                ViolationKind::MissingSearchParameters,
                "Team name parameter must be specified.",
            ));
        }
        let teams: Vec<Team> = list(self.context.store(), caller.organization_id).await?;
        Ok(teams
            .into_iter()
            .filter(|team| contains_ignore_case(&team.name, fragment))
            .collect())
    }

    async fn demote(&self, user_id: UserId) -> DomainResult<()> {
        let mut user: User = load(self.context.store(), user_id).await?;
        if user.role == Role::TeamLeader {
            user.role = Role::Employee;
            save(self.context.store(), user).await?;
        }
        Ok(())
    }
}
