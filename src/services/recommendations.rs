use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use crate::{
    config::EngineConfig,
    error::{AppError, AppResult},
    models::{Film, FilmId, UserId},
    services::{deviation::DeviationModel, matrix::build_rating_matrix, predictor::predict},
    stores::{CatalogStore, IdentityStore, RatingStore},
};

/// Rating-based film recommendation engine
///
/// Builds a pairwise deviation model from the full rating snapshot, predicts
/// marks for the target user and returns the films predicted above the
/// inclusion threshold that the user has not rated yet.
///
/// Stateless across calls: every invocation recomputes from the current
/// snapshot, so concurrent requests need no synchronization beyond whatever
/// isolation the rating store already provides.
pub struct Recommender {
    ratings: Arc<dyn RatingStore>,
    catalog: Arc<dyn CatalogStore>,
    identity: Arc<dyn IdentityStore>,
    config: EngineConfig,
}

impl Recommender {
    pub fn new(
        ratings: Arc<dyn RatingStore>,
        catalog: Arc<dyn CatalogStore>,
        identity: Arc<dyn IdentityStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            ratings,
            catalog,
            identity,
            config,
        }
    }

    /// Produces the ordered recommendation list for `user_id`
    ///
    /// Fails with `AppError::UnknownEntity` before any computation when the
    /// user does not exist. Every other missing-data condition (no ratings at
    /// all, user with zero ratings, no co-rated pairs) resolves to an empty
    /// list; recommendation absence is a normal outcome, not an error.
    pub async fn recommendations(&self, user_id: UserId) -> AppResult<Vec<Film>> {
        let start = Instant::now();

        // 1. Identity check, up front; short-circuits everything else
        if !self.identity.user_exists(user_id).await? {
            return Err(AppError::unknown_user(user_id));
        }

        // 2. Full rating snapshot -> per-user matrix
        let all_ratings = self.ratings.fetch_all_ratings().await?;

        // Out-of-scale marks come from upstream validation gaps; they skew
        // deviations but must not crash the engine
        if let Some(bad) = all_ratings
            .iter()
            .find(|r| r.mark < self.config.mark_min || r.mark > self.config.mark_max)
        {
            tracing::warn!(
                rater = bad.user_id,
                film_id = bad.film_id,
                mark = bad.mark,
                "Snapshot contains a mark outside the configured scale"
            );
        }

        let matrix = build_rating_matrix(&all_ratings);

        let Some(user_ratings) = matrix.get(&user_id) else {
            tracing::debug!(user_id, "User has no ratings, nothing to pivot on");
            return Ok(Vec::new());
        };

        tracing::info!(
            user_id,
            rating_count = all_ratings.len(),
            user_count = matrix.len(),
            "Building deviation model"
        );

        // 3. Deviation model over the whole population, predictions for the
        //    target user only
        let model = DeviationModel::build(&matrix);
        let predictions = predict(&model, user_ratings);

        // 4. Filter and rank candidates
        let rated = self.identity.rated_film_ids(user_id).await?;
        let catalog_ids = self.catalog.film_ids().await?;
        let candidate_ids = select_candidates(
            &predictions,
            &rated,
            &catalog_ids,
            self.config.recommendation_threshold,
        );

        // 5. Resolve surviving ids to full records
        let mut films = Vec::with_capacity(candidate_ids.len());
        for film_id in candidate_ids {
            films.push(self.catalog.resolve_film(film_id).await?);
        }

        tracing::info!(
            user_id,
            model_films = model.film_count(),
            recommended = films.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations computed"
        );

        Ok(films)
    }
}

/// Applies the exclusion rules and ranks the survivors
///
/// A film is recommended only when it is in the catalog universe, has a
/// defined prediction (no signal means no recommendation), is not already
/// rated by the user, and its predicted mark strictly exceeds the threshold.
/// Output is ordered by descending prediction, ties broken by ascending film
/// id, so identical input always yields identical output.
fn select_candidates(
    predictions: &HashMap<FilmId, f64>,
    rated: &HashSet<FilmId>,
    catalog_ids: &HashSet<FilmId>,
    threshold: f64,
) -> Vec<FilmId> {
    let mut candidates: Vec<(FilmId, f64)> = predictions
        .iter()
        .filter(|&(film_id, &predicted)| {
            catalog_ids.contains(film_id) && !rated.contains(film_id) && predicted > threshold
        })
        .map(|(&film_id, &predicted)| (film_id, predicted))
        .collect();

    candidates.sort_by(|(id_a, score_a), (id_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| id_a.cmp(id_b))
    });

    candidates.into_iter().map(|(film_id, _)| film_id).collect()
}
