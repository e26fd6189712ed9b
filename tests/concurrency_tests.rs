mod common;

use std::sync::Arc;

use common::World;
use review_domain::{Caller, TeamService, ViolationKind};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_assignment_admits_exactly_one() {
    let world = World::new().await;
    let team = world.team(world.acme.id, "Platform").await;
    let employee = world.employee(world.acme.id, "Eve").await;
    let manager: Caller = world.manager_caller();
    let (team_id, employee_id) = (team.id, employee.id);

    let service = Arc::new(TeamService::new(Arc::clone(&world.store), Default::default()));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let service = Arc::clone(&service);
            let manager = manager.clone();
            tokio::spawn(async move { service.assign_employee(&manager, team_id, employee_id).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let rejections: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| outcome.as_ref().err())
        .map(|err| err.violation_kind())
        .collect();

    assert_eq!(successes, 1);
    assert_eq!(rejections, vec![Some(ViolationKind::UserAlreadyInTeam)]);

    let team = world.domain.teams.get_team(&manager, team_id).await.unwrap();
    assert_eq!(team.members.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_job_titles_with_same_name_admit_one() {
    let world = Arc::new(World::new().await);
    let manager = world.manager_caller();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let world = Arc::clone(&world);
            let manager = manager.clone();
            tokio::spawn(async move {
                world
                    .domain
                    .job_titles
                    .add(&manager, world.acme.id, "Engineer")
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_eq!(
                err.violation_kind(),
                Some(ViolationKind::JobTitleExistsInOrganization)
            ),
        }
    }
    assert_eq!(created, 1);
}
