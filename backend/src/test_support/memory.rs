//! In-memory repositories mirroring the Postgres adapters' constraints.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{
    ImmutableDrawingPersistenceError, ImmutableDrawingRepository, MutableDrawingPersistenceError,
    MutableDrawingRepository, NewUser, PasswordHash, SessionPersistenceError, SessionRepository,
    ShortKeyInsertOutcome, StoredCredentials, UserInsertOutcome, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    ContentDigest, DrawingChanges, DrawingId, EmailAddress, ImmutableDrawing, MutableDrawing,
    MutableDrawingSummary, NewImmutableDrawing, NewMutableDrawing, SessionKey, ShortKey, User,
    UserId,
};
use crate::server::Repositories;

use super::SteppingClock;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct UserRow {
    id: UserId,
    email: EmailAddress,
    password_hash: PasswordHash,
}

/// Users table with a unique email constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserRow>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserInsertOutcome, UserPersistenceError> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.email == user.email) {
            return Ok(UserInsertOutcome::EmailTaken);
        }
        let id = UserId::new(i64::try_from(rows.len() + 1).unwrap_or(i64::MAX));
        rows.push(UserRow {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(UserInsertOutcome::Inserted(id))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.email.as_ref() == email)
            .map(|row| StoredCredentials {
                user_id: row.id,
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.id == id)
            .map(|row| User::new(row.id, row.email.clone())))
    }
}

/// Sessions table keyed by session key.
#[derive(Default)]
pub struct InMemorySessionRepository {
    rows: Mutex<HashMap<String, UserId>>,
}

impl InMemorySessionRepository {
    /// Live sessions held by `user_id`.
    pub fn count_for(&self, user_id: UserId) -> usize {
        lock(&self.rows)
            .values()
            .filter(|owner| **owner == user_id)
            .count()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(
        &self,
        key: &SessionKey,
        user_id: UserId,
    ) -> Result<(), SessionPersistenceError> {
        let mut rows = lock(&self.rows);
        if rows.contains_key(key.as_str()) {
            return Err(SessionPersistenceError::query(
                "duplicate key value violates unique constraint \"sessions_pkey\"",
            ));
        }
        rows.insert(key.as_str().to_owned(), user_id);
        Ok(())
    }

    async fn find_user_id(
        &self,
        key: &SessionKey,
    ) -> Result<Option<UserId>, SessionPersistenceError> {
        Ok(lock(&self.rows).get(key.as_str()).copied())
    }

    async fn delete_for_user(&self, user_id: UserId) -> Result<u64, SessionPersistenceError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|_, owner| *owner != user_id);
        Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX))
    }
}

struct ImmutableRow {
    digest: ContentDigest,
    data: String,
    created_at: DateTime<Utc>,
    hits: u64,
}

/// Published drawings keyed by short key (the primary key).
pub struct InMemoryImmutableDrawingRepository {
    clock: Arc<dyn Clock>,
    rows: Mutex<BTreeMap<String, ImmutableRow>>,
}

impl InMemoryImmutableDrawingRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rows: Mutex::new(BTreeMap::new()),
        }
    }

    /// Store a row directly, bypassing key resolution.
    pub fn seed(&self, short_key: &ShortKey, digest: ContentDigest, data: &str) {
        let created_at = self.clock.utc();
        lock(&self.rows).insert(
            short_key.as_str().to_owned(),
            ImmutableRow {
                digest,
                data: data.to_owned(),
                created_at,
                hits: 0,
            },
        );
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read counter for `short_key`.
    pub fn hits(&self, short_key: &str) -> Option<u64> {
        lock(&self.rows).get(short_key).map(|row| row.hits)
    }
}

impl Default for InMemoryImmutableDrawingRepository {
    fn default() -> Self {
        Self::new(Arc::new(SteppingClock::default()))
    }
}

#[async_trait]
impl ImmutableDrawingRepository for InMemoryImmutableDrawingRepository {
    async fn insert(
        &self,
        drawing: &NewImmutableDrawing,
    ) -> Result<ShortKeyInsertOutcome, ImmutableDrawingPersistenceError> {
        let created_at = self.clock.utc();
        let mut rows = lock(&self.rows);
        if rows.contains_key(drawing.short_key.as_str()) {
            return Ok(ShortKeyInsertOutcome::ShortKeyTaken);
        }
        rows.insert(
            drawing.short_key.as_str().to_owned(),
            ImmutableRow {
                digest: drawing.content_digest.clone(),
                data: drawing.data.as_str().to_owned(),
                created_at,
                hits: 0,
            },
        );
        Ok(ShortKeyInsertOutcome::Inserted)
    }

    async fn find_digest(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ContentDigest>, ImmutableDrawingPersistenceError> {
        Ok(lock(&self.rows)
            .get(short_key.as_str())
            .map(|row| row.digest.clone()))
    }

    async fn record_hit(
        &self,
        short_key: &ShortKey,
    ) -> Result<u64, ImmutableDrawingPersistenceError> {
        Ok(match lock(&self.rows).get_mut(short_key.as_str()) {
            Some(row) => {
                row.hits += 1;
                1
            }
            None => 0,
        })
    }

    async fn find(
        &self,
        short_key: &ShortKey,
    ) -> Result<Option<ImmutableDrawing>, ImmutableDrawingPersistenceError> {
        Ok(lock(&self.rows)
            .get(short_key.as_str())
            .map(|row| ImmutableDrawing {
                short_key: short_key.clone(),
                data: row.data.clone(),
                created_at: row.created_at,
            }))
    }
}

/// Owned drawings; every statement is scoped by `id AND owner`.
pub struct InMemoryMutableDrawingRepository {
    clock: Arc<dyn Clock>,
    rows: Mutex<Vec<MutableDrawing>>,
}

impl InMemoryMutableDrawingRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryMutableDrawingRepository {
    fn default() -> Self {
        Self::new(Arc::new(SteppingClock::default()))
    }
}

#[async_trait]
impl MutableDrawingRepository for InMemoryMutableDrawingRepository {
    async fn create(
        &self,
        drawing: &NewMutableDrawing,
    ) -> Result<DrawingId, MutableDrawingPersistenceError> {
        let created_at = self.clock.utc();
        let mut rows = lock(&self.rows);
        let next = rows.iter().map(|row| row.id.as_i64()).max().unwrap_or(0) + 1;
        let id = DrawingId::new(next);
        rows.push(MutableDrawing {
            id,
            owner: drawing.owner,
            name: drawing.name.as_str().to_owned(),
            data: drawing.data.as_str().to_owned(),
            created_at,
        });
        Ok(id)
    }

    async fn update(
        &self,
        owner: UserId,
        id: DrawingId,
        changes: &DrawingChanges,
    ) -> Result<u64, MutableDrawingPersistenceError> {
        let mut rows = lock(&self.rows);
        let Some(row) = rows
            .iter_mut()
            .find(|row| row.id == id && row.owner == owner)
        else {
            return Ok(0);
        };
        if let Some(name) = changes.name() {
            row.name = name.to_owned();
        }
        if let Some(data) = changes.data() {
            row.data = data.to_owned();
        }
        Ok(1)
    }

    async fn delete(
        &self,
        owner: UserId,
        id: DrawingId,
    ) -> Result<u64, MutableDrawingPersistenceError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| !(row.id == id && row.owner == owner));
        Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX))
    }

    async fn find(
        &self,
        owner: UserId,
        id: DrawingId,
    ) -> Result<Option<MutableDrawing>, MutableDrawingPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| row.id == id && row.owner == owner)
            .cloned())
    }

    async fn list(
        &self,
        owner: UserId,
        limit: i64,
    ) -> Result<Vec<MutableDrawingSummary>, MutableDrawingPersistenceError> {
        let mut owned: Vec<MutableDrawingSummary> = lock(&self.rows)
            .iter()
            .filter(|row| row.owner == owner)
            .map(|row| MutableDrawingSummary {
                id: row.id,
                name: row.name.clone(),
                created_at: row.created_at,
            })
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        owned.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(owned)
    }
}

/// Fresh in-memory repositories sharing one stepping clock.
pub fn in_memory_repositories() -> Repositories<
    InMemoryUserRepository,
    InMemorySessionRepository,
    InMemoryImmutableDrawingRepository,
    InMemoryMutableDrawingRepository,
> {
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::default());
    Repositories {
        users: Arc::new(InMemoryUserRepository::default()),
        sessions: Arc::new(InMemorySessionRepository::default()),
        immutable_drawings: Arc::new(InMemoryImmutableDrawingRepository::new(Arc::clone(&clock))),
        mutable_drawings: Arc::new(InMemoryMutableDrawingRepository::new(clock)),
    }
}
