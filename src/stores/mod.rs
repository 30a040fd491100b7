/// Collaborator store abstractions
///
/// The recommendation engine never talks to a database directly; it reads
/// through these three contracts. The surrounding backend wires them to its
/// relational storage, tests wire them to mocks or to the in-memory store.
use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{Film, FilmId, Rating, UserId},
};

pub mod memory;

pub use memory::InMemoryStore;

/// Supplies the full set of rating observations currently on record
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    /// Full scan of every (user, film, mark) triple
    ///
    /// The engine needs the global matrix; no filtering or pagination. The
    /// returned snapshot is treated as a consistent point-in-time view.
    async fn fetch_all_ratings(&self) -> AppResult<Vec<Rating>>;
}

/// Supplies the film universe and resolves ids to full records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every film id known to the catalog
    async fn film_ids(&self) -> AppResult<HashSet<FilmId>>;

    /// Resolves a film id to its full record
    ///
    /// Fails with `AppError::UnknownEntity` for ids the catalog does not know.
    async fn resolve_film(&self, film_id: FilmId) -> AppResult<Film>;
}

/// Validates users and reports what they have already rated
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    async fn user_exists(&self, user_id: UserId) -> AppResult<bool>;

    /// Film ids the user has already rated; these must never be recommended
    async fn rated_film_ids(&self, user_id: UserId) -> AppResult<HashSet<FilmId>>;
}
