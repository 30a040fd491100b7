use crate::models::{Rating, RatingMatrix};

/// Groups the flat stream of rating triples into a per-user mapping
///
/// Pure transformation; an empty input produces an empty matrix, which callers
/// treat as "no data, no recommendations possible" rather than an error.
///
/// Valid data carries at most one mark per (user, film) pair. Should
/// duplicates appear anyway, the last observation wins.
pub fn build_rating_matrix(ratings: &[Rating]) -> RatingMatrix {
    let mut matrix = RatingMatrix::new();

    for rating in ratings {
        matrix
            .entry(rating.user_id)
            .or_default()
            .insert(rating.film_id, rating.mark);
    }

    matrix
}
