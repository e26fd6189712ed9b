// Copyright 2025 Cowboy AI, LLC.

//! Entity store port and in-memory adapter
//!
//! The store is the only shared mutable resource. Validation and scoring only
//! read from it; domain services write through it inside a unit of work so
//! that check-then-act sequences are never interleaved with a conflicting
//! writer.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::{Criteria, JobTitle, Organization, OrganizationId, OrganizationScoped, Review, Team, User};
use crate::entity::{DomainEntity, EntityId};
use crate::errors::{DomainError, DomainResult};

/// Lookup and persistence for one entity type
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: DomainEntity + OrganizationScoped,
{
    /// Load an entity; fails with [`DomainError::EntityNotFound`] when absent
    async fn get(&self, id: EntityId<E>) -> DomainResult<E>;

    /// All entities owned by an organization, ordered by ID
    async fn list_by_organization(&self, organization_id: OrganizationId) -> DomainResult<Vec<E>>;

    /// Store a new entity under a freshly assigned ID
    async fn insert(&self, entity: E) -> DomainResult<E>;

    /// Overwrite an existing entity
    async fn save(&self, entity: E) -> DomainResult<E>;

    /// Remove an entity
    async fn delete(&self, id: EntityId<E>) -> DomainResult<()>;
}

/// Guard serializing one mutating operation against the store
///
/// Dropping the guard ends the unit of work.
#[derive(Debug)]
pub struct UnitOfWork {
    _guard: OwnedMutexGuard<()>,
}

impl UnitOfWork {
    /// Wrap a held lock
    pub fn from_guard(guard: OwnedMutexGuard<()>) -> Self {
        Self { _guard: guard }
    }
}

/// Entity store covering every entity type of the review domain
#[async_trait]
pub trait EntityStore:
    Repository<Organization>
    + Repository<Team>
    + Repository<User>
    + Repository<JobTitle>
    + Repository<Criteria>
    + Repository<Review>
{
    /// Start a unit of work; concurrent callers wait until it is dropped
    async fn begin_unit_of_work(&self) -> UnitOfWork;
}

/// Load an entity through whichever repository serves its type
pub async fn load<E, S>(store: &S, id: EntityId<E>) -> DomainResult<E>
where
    E: DomainEntity + OrganizationScoped,
    S: Repository<E> + ?Sized,
{
    store.get(id).await
}

/// List an organization's entities of one type
pub async fn list<E, S>(store: &S, organization_id: OrganizationId) -> DomainResult<Vec<E>>
where
    E: DomainEntity + OrganizationScoped,
    S: Repository<E> + ?Sized,
{
    store.list_by_organization(organization_id).await
}

/// Insert an entity through whichever repository serves its type
pub async fn insert<E, S>(store: &S, entity: E) -> DomainResult<E>
where
    E: DomainEntity + OrganizationScoped,
    S: Repository<E> + ?Sized,
{
    store.insert(entity).await
}

/// Save an entity through whichever repository serves its type
pub async fn save<E, S>(store: &S, entity: E) -> DomainResult<E>
where
    E: DomainEntity + OrganizationScoped,
    S: Repository<E> + ?Sized,
{
    store.save(entity).await
}

/// Delete an entity through whichever repository serves its type
pub async fn delete<E, S>(store: &S, id: EntityId<E>) -> DomainResult<()>
where
    E: DomainEntity + OrganizationScoped,
    S: Repository<E> + ?Sized,
{
    store.delete(id).await
}

struct Table<E> {
    rows: BTreeMap<EntityId<E>, E>,
    next_id: u64,
}

impl<E: DomainEntity + OrganizationScoped> Table<E> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn get(&self, id: EntityId<E>) -> DomainResult<E> {
        self.rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(E::ENTITY_TYPE, id.value()))
    }

    fn list_by_organization(&self, organization_id: OrganizationId) -> Vec<E> {
        self.rows
            .values()
            .filter(|entity| entity.organization_id() == organization_id)
            .cloned()
            .collect()
    }

    fn insert(&mut self, mut entity: E) -> E {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        entity.set_id(id);
        self.rows.insert(id, entity.clone());
        entity
    }

    fn save(&mut self, entity: E) -> DomainResult<E> {
        let id = entity.id();
        match self.rows.get_mut(&id) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(E::ENTITY_TYPE, id.value())),
        }
    }

    fn delete(&mut self, id: EntityId<E>) -> DomainResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(E::ENTITY_TYPE, id.value()))
    }
}

struct Tables {
    organizations: Table<Organization>,
    teams: Table<Team>,
    users: Table<User>,
    job_titles: Table<JobTitle>,
    criteria: Table<Criteria>,
    reviews: Table<Review>,
}

/// In-memory entity store for tests and embedding
///
/// All tables sit behind one lock, so a read issued after a write always
/// observes it.
pub struct InMemoryEntityStore {
    tables: RwLock<Tables>,
    unit_of_work: Arc<Mutex<()>>,
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                organizations: Table::new(),
                teams: Table::new(),
                users: Table::new(),
                job_titles: Table::new(),
                criteria: Table::new(),
                reviews: Table::new(),
            }),
            unit_of_work: Arc::new(Mutex::new(())),
        }
    }
}

macro_rules! in_memory_repository {
    ($entity:ty, $table:ident) => {
        #[async_trait]
        impl Repository<$entity> for InMemoryEntityStore {
            async fn get(&self, id: EntityId<$entity>) -> DomainResult<$entity> {
                self.tables.read().await.$table.get(id)
            }

            async fn list_by_organization(
                &self,
                organization_id: OrganizationId,
            ) -> DomainResult<Vec<$entity>> {
                Ok(self.tables.read().await.$table.list_by_organization(organization_id))
            }

            async fn insert(&self, entity: $entity) -> DomainResult<$entity> {
                Ok(self.tables.write().await.$table.insert(entity))
            }

            async fn save(&self, entity: $entity) -> DomainResult<$entity> {
                self.tables.write().await.$table.save(entity)
            }

            async fn delete(&self, id: EntityId<$entity>) -> DomainResult<()> {
                self.tables.write().await.$table.delete(id)
            }
        }
    };
}

in_memory_repository!(Organization, organizations);
in_memory_repository!(Team, teams);
in_memory_repository!(User, users);
in_memory_repository!(JobTitle, job_titles);
in_memory_repository!(Criteria, criteria);
in_memory_repository!(Review, reviews);

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn begin_unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::from_guard(self.unit_of_work.clone().lock_owned().await)
    }
}
