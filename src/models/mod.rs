use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier for a user in the catalog backend
pub type UserId = i64;

/// Identifier for a film in the catalog backend
pub type FilmId = i64;

/// Integer score a user assigns a film (1..=10 on the default scale)
pub type Mark = i32;

/// Per-user view of the rating data: userId -> (filmId -> mark)
///
/// Built fresh per recommendation request, never mutated afterwards and never
/// persisted.
pub type RatingMatrix = HashMap<UserId, HashMap<FilmId, Mark>>;

/// A single (user, film, mark) observation from the rating store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: UserId,
    pub film_id: FilmId,
    pub mark: Mark,
}

impl Rating {
    pub fn new(user_id: UserId, film_id: FilmId, mark: Mark) -> Self {
        Rating {
            user_id,
            film_id,
            mark,
        }
    }
}

/// Full film record as resolved from the catalog store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Film {
    /// Creates a film record with only the mandatory fields set
    pub fn new(id: FilmId, name: impl Into<String>) -> Self {
        Film {
            id,
            name: name.into(),
            description: None,
            release_date: None,
            duration: None,
            genres: Vec::new(),
        }
    }
}
