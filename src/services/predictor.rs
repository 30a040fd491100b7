use std::collections::HashMap;

use crate::models::{FilmId, Mark};
use crate::services::deviation::DeviationModel;

/// Predicts marks for one user from the deviation model
///
/// Pure function: accumulators are local to a single call, so predictions for
/// one user can never absorb contributions from another user's computation.
///
/// For each film `r` the user rated with mark `m_r`, every film `k` related
/// to `r` in the model accumulates `(avgDiff(k, r) + m_r) * count(k, r)` into
/// a running sum weighted by `count(k, r)`. A film only appears in the output
/// when its total weight is positive; the division is guarded by construction,
/// never by catching an arithmetic failure after the fact.
///
/// Films the user already rated come back with their actual mark as the
/// predicted value. They are excluded later by the candidate selector; keeping
/// them here leaves the "already rated" signal visible for sanity checks.
pub fn predict(
    model: &DeviationModel,
    user_ratings: &HashMap<FilmId, Mark>,
) -> HashMap<FilmId, f64> {
    let mut sums: HashMap<FilmId, f64> = HashMap::new();
    let mut weights: HashMap<FilmId, u32> = HashMap::new();

    for (&rated_film, &mark) in user_ratings {
        for (candidate, diff, count) in model.relations_to(rated_film) {
            // relations_to(r) yields (k, avgDiff(r, k), ...); the prediction
            // pivots the other way around, so flip the sign
            let predicted = -diff + f64::from(mark);
            *sums.entry(candidate).or_insert(0.0) += predicted * f64::from(count);
            *weights.entry(candidate).or_insert(0) += count;
        }
    }

    let mut predictions: HashMap<FilmId, f64> = sums
        .into_iter()
        .filter_map(|(film, sum)| {
            let weight = weights[&film];
            (weight > 0).then(|| (film, sum / f64::from(weight)))
        })
        .collect();

    // Already-rated films report their actual mark
    for (&film, &mark) in user_ratings {
        predictions.insert(film, f64::from(mark));
    }

    predictions
}
