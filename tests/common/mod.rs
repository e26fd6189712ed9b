#![allow(dead_code)]

use std::sync::Arc;

use review_domain::store::{insert, load};
use review_domain::{
    Caller, Criteria, DomainConfig, Organization, OrganizationId, ReviewDomain, Role, Team, User,
    UserId, InMemoryEntityStore,
};

/// Two tenants with a manager each, seeded straight into the store
pub struct World {
    pub store: Arc<InMemoryEntityStore>,
    pub domain: ReviewDomain<InMemoryEntityStore>,
    pub acme: Organization,
    pub globex: Organization,
    pub admin: User,
    pub manager: User,
    pub globex_manager: User,
}

impl World {
    pub async fn new() -> Self {
        Self::with_config(DomainConfig::default()).await
    }

    pub async fn with_config(config: DomainConfig) -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        let acme = insert(&*store, Organization::new("Acme")).await.unwrap();
        let globex = insert(&*store, Organization::new("Globex")).await.unwrap();
        let admin = seed_user(&store, acme.id, "Ada", "Admin", Role::Admin).await;
        let manager = seed_user(&store, acme.id, "Mona", "Manager", Role::Manager).await;
        let globex_manager = seed_user(&store, globex.id, "Gus", "Manager", Role::Manager).await;

        Self {
            domain: ReviewDomain::new(Arc::clone(&store), config),
            store,
            acme,
            globex,
            admin,
            manager,
            globex_manager,
        }
    }

    /// Fresh caller identity for a stored user
    pub async fn caller(&self, user_id: UserId) -> Caller {
        let user: User = load(&*self.store, user_id).await.unwrap();
        Caller::from_user(&user)
    }

    pub fn manager_caller(&self) -> Caller {
        Caller::from_user(&self.manager)
    }

    pub fn admin_caller(&self) -> Caller {
        Caller::from_user(&self.admin)
    }

    pub fn globex_caller(&self) -> Caller {
        Caller::from_user(&self.globex_manager)
    }

    pub async fn employee(&self, organization_id: OrganizationId, name: &str) -> User {
        seed_user(&self.store, organization_id, name, "Employee", Role::Employee).await
    }

    pub async fn team(&self, organization_id: OrganizationId, name: &str) -> Team {
        insert(&*self.store, Team::new(name, organization_id)).await.unwrap()
    }

    pub async fn criteria(&self, organization_id: OrganizationId, description: &str) -> Criteria {
        insert(&*self.store, Criteria::new(description, organization_id))
            .await
            .unwrap()
    }

    /// Reload a user as stored now
    pub async fn user(&self, user_id: UserId) -> User {
        load(&*self.store, user_id).await.unwrap()
    }
}

pub async fn seed_user(
    store: &InMemoryEntityStore,
    organization_id: OrganizationId,
    name: &str,
    surname: &str,
    role: Role,
) -> User {
    insert(store, User::new(name, surname, organization_id).with_role(role))
        .await
        .unwrap()
}
