//! Rating-based film recommendation engine
//!
//! Given the full matrix of (user, film, mark) observations, produces a
//! ranked list of films a target user has not rated yet but is predicted to
//! rate highly. The prediction follows the Slope One scheme: pairwise average
//! rating deviations across the whole population, aggregated per candidate
//! film with co-occurrence counts as weights.
//!
//! The engine reads its inputs through three collaborator contracts
//! ([`stores::RatingStore`], [`stores::CatalogStore`], [`stores::IdentityStore`])
//! and exposes one entry point, [`services::Recommender::recommendations`].
//! Nothing is cached between calls; each request recomputes from the current
//! rating snapshot.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;

pub use config::EngineConfig;
pub use error::{AppError, AppResult};
pub use services::Recommender;
