use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Film, FilmId, Mark, Rating, UserId},
    stores::{CatalogStore, IdentityStore, RatingStore},
};

/// In-memory implementation of all three collaborator stores
///
/// Used by the test suite and by embedders that keep the catalog in process.
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: HashSet<UserId>,
    films: HashMap<FilmId, Film>,
    /// (user, film) -> mark; the map key enforces upsert (last-wins) semantics
    marks: HashMap<(UserId, FilmId), Mark>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user_id: UserId) {
        self.inner.write().await.users.insert(user_id);
    }

    pub async fn add_film(&self, film: Film) {
        self.inner.write().await.films.insert(film.id, film);
    }

    /// Records a mark; a repeated (user, film) pair overwrites the earlier mark
    pub async fn add_rating(&self, user_id: UserId, film_id: FilmId, mark: Mark) {
        self.inner.write().await.marks.insert((user_id, film_id), mark);
    }
}

#[async_trait::async_trait]
impl RatingStore for InMemoryStore {
    async fn fetch_all_ratings(&self) -> AppResult<Vec<Rating>> {
        let inner = self.inner.read().await;
        Ok(inner
            .marks
            .iter()
            .map(|(&(user_id, film_id), &mark)| Rating::new(user_id, film_id, mark))
            .collect())
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryStore {
    async fn film_ids(&self) -> AppResult<HashSet<FilmId>> {
        let inner = self.inner.read().await;
        Ok(inner.films.keys().copied().collect())
    }

    async fn resolve_film(&self, film_id: FilmId) -> AppResult<Film> {
        let inner = self.inner.read().await;
        inner
            .films
            .get(&film_id)
            .cloned()
            .ok_or_else(|| AppError::unknown_film(film_id))
    }
}

#[async_trait::async_trait]
impl IdentityStore for InMemoryStore {
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.users.contains(&user_id))
    }

    async fn rated_film_ids(&self, user_id: UserId) -> AppResult<HashSet<FilmId>> {
        let inner = self.inner.read().await;
        Ok(inner
            .marks
            .keys()
            .filter(|(uid, _)| *uid == user_id)
            .map(|&(_, film_id)| film_id)
            .collect())
    }
}
