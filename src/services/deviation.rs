use std::collections::HashMap;

use crate::models::{FilmId, RatingMatrix};

/// Pairwise rating-deviation model over the full rating matrix
///
/// For every ordered pair of films that share at least one common rater, the
/// model holds the average signed rating difference and the number of users
/// supporting it. The absence of an entry means "no evidence relating these
/// two films". Self-pairs are kept (deviation 0, one observation per rater),
/// uniformly for every film; the candidate selector excludes already-rated
/// films downstream, so they never bias a recommendation.
///
/// Building is O(Σ ratedCount(user)²): quadratic per user in the number of
/// films that user rated. Acceptable while per-user rated counts stay small
/// relative to the catalog; a user who has rated a large share of the catalog
/// would need a cap or sampling strategy.
#[derive(Debug, Default)]
pub struct DeviationModel {
    /// filmA -> (filmB -> average of markForA - markForB)
    diffs: HashMap<FilmId, HashMap<FilmId, f64>>,
    /// filmA -> (filmB -> number of users who rated both)
    counts: HashMap<FilmId, HashMap<FilmId, u32>>,
}

impl DeviationModel {
    /// Builds the model from the entire rating matrix (all users)
    ///
    /// The signal comes from aggregate pairwise deviations across the whole
    /// population, not from a nearest-neighbor subset.
    pub fn build(matrix: &RatingMatrix) -> Self {
        let mut diffs: HashMap<FilmId, HashMap<FilmId, f64>> = HashMap::new();
        let mut counts: HashMap<FilmId, HashMap<FilmId, u32>> = HashMap::new();

        // 1. Accumulate raw sums and observation counts per ordered pair
        for user_ratings in matrix.values() {
            for (&film_a, &mark_a) in user_ratings {
                let diff_row = diffs.entry(film_a).or_default();
                let count_row = counts.entry(film_a).or_default();

                for (&film_b, &mark_b) in user_ratings {
                    *diff_row.entry(film_b).or_insert(0.0) += f64::from(mark_a - mark_b);
                    *count_row.entry(film_b).or_insert(0) += 1;
                }
            }
        }

        // 2. Divide each sum by its count; entries only exist where count >= 1,
        //    so the division can never hit zero
        for (film_a, diff_row) in diffs.iter_mut() {
            for (film_b, diff) in diff_row.iter_mut() {
                let count = counts[film_a][film_b];
                *diff /= f64::from(count);
            }
        }

        DeviationModel { diffs, counts }
    }

    /// Average deviation and support count for the ordered pair (a, b)
    ///
    /// `None` means no user has rated both films.
    pub fn deviation(&self, film_a: FilmId, film_b: FilmId) -> Option<(f64, u32)> {
        let diff = *self.diffs.get(&film_a)?.get(&film_b)?;
        let count = *self.counts.get(&film_a)?.get(&film_b)?;
        Some((diff, count))
    }

    /// Every film id present anywhere in the model
    pub fn films(&self) -> impl Iterator<Item = FilmId> + '_ {
        self.diffs.keys().copied()
    }

    /// All films related to `film` in the model, with deviation and count
    pub fn relations_to(
        &self,
        film: FilmId,
    ) -> impl Iterator<Item = (FilmId, f64, u32)> + '_ {
        self.diffs
            .get(&film)
            .into_iter()
            .flat_map(move |row| {
                row.iter().map(move |(&other, &diff)| {
                    let count = self.counts[&film][&other];
                    (other, diff, count)
                })
            })
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Number of films the model knows about
    pub fn film_count(&self) -> usize {
        self.diffs.len()
    }
}
