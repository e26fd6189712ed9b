mod common;

use pretty_assertions::assert_eq;
use test_case::test_case;

use common::World;
use review_domain::store::{insert, save};
use review_domain::{
    Caller, DomainError, Evaluation, JobTitle, RelationshipValidator, Review, Role, TeamId,
    UserId, ViolationKind,
};

fn kind(result: Result<(), DomainError>) -> Option<ViolationKind> {
    result.err().and_then(|err| err.violation_kind())
}

#[tokio::test]
async fn organization_ownership_checks() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let (acme, globex) = (world.acme.id, world.globex.id);

    let title = insert(&*world.store, JobTitle::new("Engineer", acme)).await.unwrap();
    let criteria = world.criteria(acme, "Quality").await;
    let team = world.team(acme, "Platform").await;
    let user = world.employee(acme, "Eve").await;

    assert!(validator.job_title_in_organization(acme, title.id).await.is_ok());
    assert!(validator.criteria_in_organization(acme, criteria.id).await.is_ok());
    assert!(validator.team_in_organization(acme, team.id).await.is_ok());
    assert!(validator.user_in_organization(acme, user.id).await.is_ok());

    assert_eq!(
        kind(validator.job_title_in_organization(globex, title.id).await),
        Some(ViolationKind::JobTitleForeignToOrganization)
    );
    assert_eq!(
        kind(validator.criteria_in_organization(globex, criteria.id).await),
        Some(ViolationKind::CriteriaForeignToOrganization)
    );
    assert_eq!(
        kind(validator.team_in_organization(globex, team.id).await),
        Some(ViolationKind::TeamForeignToOrganization)
    );
    assert_eq!(
        kind(validator.user_in_organization(globex, user.id).await),
        Some(ViolationKind::UserForeignToOrganization)
    );
}

#[tokio::test]
async fn users_in_organization_stops_at_first_failure() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let local = world.employee(world.acme.id, "Eve").await;
    let foreign = world.employee(world.globex.id, "Fay").await;

    assert!(validator.users_in_organization(world.acme.id, &[]).await.is_ok());
    assert!(validator
        .users_in_organization(world.acme.id, &[local.id, world.manager.id])
        .await
        .is_ok());

    let err = validator
        .users_in_organization(world.acme.id, &[local.id, foreign.id, UserId::new(999)])
        .await
        .unwrap_err();
    assert_eq!(err.violation_kind(), Some(ViolationKind::UserForeignToOrganization));
}

#[tokio::test]
async fn missing_entities_propagate_not_found() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);

    let err = validator
        .team_in_organization(world.acme.id, TeamId::new(404))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("Team", 404));

    let err = validator
        .same_team_distinct_users(world.manager.id, UserId::new(404))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn membership_checks_flip_after_assignment() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let mut team = world.team(world.acme.id, "Platform").await;
    let mut user = world.employee(world.acme.id, "Eve").await;

    assert!(validator.user_is_not_team_member(team.id, user.id).await.is_ok());
    assert_eq!(
        kind(validator.user_is_team_member(team.id, user.id).await),
        Some(ViolationKind::UserNotInTeam)
    );

    team.add_member(user.id);
    user.team_id = Some(team.id);
    save(&*world.store, team.clone()).await.unwrap();
    save(&*world.store, user.clone()).await.unwrap();

    assert!(validator.user_is_team_member(team.id, user.id).await.is_ok());
    assert_eq!(
        kind(validator.user_is_not_team_member(team.id, user.id).await),
        Some(ViolationKind::UserAlreadyInTeam)
    );
}

#[test_case(Some(0), Some(0), false, None ; "teammates")]
#[test_case(Some(0), Some(0), true, Some(ViolationKind::SelfReview) ; "same user")]
#[test_case(Some(0), Some(1), false, Some(ViolationKind::ReviewAcrossTeams) ; "different teams")]
#[test_case(None, None, false, None ; "both teamless")]
#[test_case(Some(0), None, false, Some(ViolationKind::ReviewAcrossTeams) ; "one teamless")]
#[test_case(None, None, true, Some(ViolationKind::SelfReview) ; "teamless self review")]
#[tokio::test]
async fn same_team_distinct_users(
    first_team: Option<usize>,
    second_team: Option<usize>,
    same_user: bool,
    expected: Option<ViolationKind>,
) {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let teams = [
        world.team(world.acme.id, "Platform").await.id,
        world.team(world.acme.id, "Payments").await.id,
    ];

    let mut first = world.employee(world.acme.id, "Eve").await;
    let mut second = world.employee(world.acme.id, "Fay").await;
    first.team_id = first_team.map(|index| teams[index]);
    second.team_id = second_team.map(|index| teams[index]);
    save(&*world.store, first.clone()).await.unwrap();
    save(&*world.store, second.clone()).await.unwrap();

    let second_id = if same_user { first.id } else { second.id };
    assert_eq!(
        kind(validator.same_team_distinct_users(first.id, second_id).await),
        expected
    );
}

#[tokio::test]
async fn cross_organization_pair_checks() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let (acme, globex) = (world.acme.id, world.globex.id);

    let title = insert(&*world.store, JobTitle::new("Engineer", acme)).await.unwrap();
    let team = world.team(acme, "Platform").await;
    let user = world.employee(acme, "Eve").await;
    let local_criteria = world.criteria(acme, "Quality").await;
    let foreign_criteria = world.criteria(globex, "Speed").await;
    let foreign_user = world.employee(globex, "Fay").await;

    assert!(validator
        .job_title_and_criteria_same_organization(title.id, local_criteria.id)
        .await
        .is_ok());
    assert!(validator.team_and_user_same_organization(team.id, user.id).await.is_ok());
    assert!(validator
        .team_and_criteria_same_organization(team.id, local_criteria.id)
        .await
        .is_ok());
    assert!(validator
        .user_and_criteria_same_organization(user.id, local_criteria.id)
        .await
        .is_ok());

    assert_eq!(
        kind(validator.job_title_and_criteria_same_organization(title.id, foreign_criteria.id).await),
        Some(ViolationKind::CrossOrganizationJobTitleCriteria)
    );
    assert_eq!(
        kind(validator.team_and_user_same_organization(team.id, foreign_user.id).await),
        Some(ViolationKind::CrossOrganizationTeamUser)
    );
    assert_eq!(
        kind(validator.team_and_criteria_same_organization(team.id, foreign_criteria.id).await),
        Some(ViolationKind::CrossOrganizationTeamCriteria)
    );
    assert_eq!(
        kind(validator.user_and_criteria_same_organization(user.id, foreign_criteria.id).await),
        Some(ViolationKind::CrossOrganizationUserCriteria)
    );
}

#[tokio::test]
async fn review_visibility_checks() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let team = world.team(world.acme.id, "Platform").await;
    let other_team = world.team(world.acme.id, "Payments").await;
    let review = insert(
        &*world.store,
        Review::new(
            UserId::new(10),
            UserId::new(11),
            team.id,
            world.acme.id,
            Evaluation::new(),
        ),
    )
    .await
    .unwrap();

    let leader = |team_id: TeamId| Caller {
        user_id: UserId::new(10),
        organization_id: world.acme.id,
        role: Role::TeamLeader,
        team_id: Some(team_id),
    };

    assert!(validator
        .review_in_manager_organization(&world.manager_caller(), review.id)
        .await
        .is_ok());
    assert_eq!(
        kind(validator.review_in_manager_organization(&world.globex_caller(), review.id).await),
        Some(ViolationKind::ManagerReviewUnrelated)
    );
    assert!(validator.review_in_leader_team(&leader(team.id), review.id).await.is_ok());
    assert_eq!(
        kind(validator.review_in_leader_team(&leader(other_team.id), review.id).await),
        Some(ViolationKind::TeamLeaderReviewUnrelated)
    );
}

#[tokio::test]
async fn evaluation_must_use_assigned_criteria() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let quality = world.criteria(world.acme.id, "Quality").await;
    let speed = world.criteria(world.acme.id, "Speed").await;
    let mut user = world.employee(world.acme.id, "Eve").await;
    user.criteria.insert(quality.id);
    save(&*world.store, user.clone()).await.unwrap();

    let assigned = Evaluation::from([(quality.id, 7)]);
    let stray = Evaluation::from([(quality.id, 7), (speed.id, 5)]);

    assert!(validator.evaluation_within_assigned_criteria(user.id, &assigned).await.is_ok());
    assert!(validator
        .evaluation_within_assigned_criteria(user.id, &Evaluation::new())
        .await
        .is_ok());
    assert_eq!(
        kind(validator.evaluation_within_assigned_criteria(user.id, &stray).await),
        Some(ViolationKind::CriteriaNotAssigned)
    );
}

#[tokio::test]
async fn job_title_name_and_usage_checks() {
    let world = World::new().await;
    let validator = RelationshipValidator::new(&*world.store);
    let title = insert(&*world.store, JobTitle::new("Engineer", world.acme.id))
        .await
        .unwrap();

    assert_eq!(
        kind(validator.job_title_name_available(world.acme.id, "Engineer").await),
        Some(ViolationKind::JobTitleExistsInOrganization)
    );
    assert!(validator.job_title_name_available(world.acme.id, "Designer").await.is_ok());
    assert!(validator.job_title_name_available(world.globex.id, "Engineer").await.is_ok());

    assert!(validator.job_title_unused(title.id).await.is_ok());
    let mut user = world.employee(world.acme.id, "Eve").await;
    user.job_title_id = Some(title.id);
    save(&*world.store, user).await.unwrap();
    assert_eq!(
        kind(validator.job_title_unused(title.id).await),
        Some(ViolationKind::JobTitleInUse)
    );
}
