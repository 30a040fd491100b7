use std::sync::Arc;

use film_recs::models::{Film, FilmId, Mark, UserId};
use film_recs::stores::InMemoryStore;
use film_recs::{AppError, EngineConfig, Recommender};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn recommender_over(store: &InMemoryStore) -> Recommender {
    Recommender::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        EngineConfig::default(),
    )
}

/// Seeds users, films (ids 1..=film_count) and ratings in one go
async fn seeded_store(
    users: &[UserId],
    film_count: FilmId,
    ratings: &[(UserId, FilmId, Mark)],
) -> InMemoryStore {
    let store = InMemoryStore::new();
    for &user_id in users {
        store.add_user(user_id).await;
    }
    for film_id in 1..=film_count {
        store.add_film(Film::new(film_id, format!("Film {}", film_id))).await;
    }
    for &(user_id, film_id, mark) in ratings {
        store.add_rating(user_id, film_id, mark).await;
    }
    store
}

#[tokio::test]
async fn test_co_rated_film_is_recommended() {
    init_tracing();

    // U1: F1=8, F2=9; U2: F1=8. Predicted F2 for U2 is 9.0 > 5.0
    let store = seeded_store(&[1, 2], 2, &[(1, 1, 8), (1, 2, 9), (2, 1, 8)]).await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(2).await.unwrap();

    assert_eq!(films.len(), 1);
    assert_eq!(films[0], Film::new(2, "Film 2"));
}

#[tokio::test]
async fn test_unknown_user_fails() {
    let store = seeded_store(&[1], 1, &[]).await;
    let recommender = recommender_over(&store);

    let result = recommender.recommendations(42).await;

    match result {
        Err(AppError::UnknownEntity(message)) => {
            assert_eq!(message, "user with id = 42 not found");
        }
        other => panic!("expected UnknownEntity, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_rating_store_yields_empty_list() {
    let store = seeded_store(&[1], 3, &[]).await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(1).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_user_without_ratings_gets_nothing() {
    // Other users have rated, the target has not; there is no film to pivot
    // predictions from
    let store = seeded_store(&[1, 2], 2, &[(1, 1, 3), (1, 2, 2)]).await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(2).await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_identical_rating_sets_recommend_nothing() {
    // No film is unrated by one user but rated by the other
    let store = seeded_store(&[1, 2], 1, &[(1, 1, 9), (2, 1, 9)]).await;
    let recommender = recommender_over(&store);

    assert!(recommender.recommendations(1).await.unwrap().is_empty());
    assert!(recommender.recommendations(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_already_rated_film_never_recommended() {
    // Every film U2 rated stays out of the output no matter how high its mark
    let store = seeded_store(
        &[1, 2],
        3,
        &[(1, 1, 9), (1, 2, 10), (1, 3, 10), (2, 1, 10), (2, 2, 10)],
    )
    .await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(2).await.unwrap();

    let ids: Vec<FilmId> = films.iter().map(|f| f.id).collect();
    assert!(!ids.contains(&1));
    assert!(!ids.contains(&2));
    assert_eq!(ids, vec![3]);
}

#[tokio::test]
async fn test_film_without_co_rating_evidence_excluded() {
    // F3 is in the catalog and even rated, but shares no rater with anything
    // U2 rated; F4 has no ratings at all. Neither may be recommended.
    let store = seeded_store(
        &[1, 2, 3],
        4,
        &[(1, 1, 8), (1, 2, 9), (2, 1, 8), (3, 3, 10)],
    )
    .await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(2).await.unwrap();

    let ids: Vec<FilmId> = films.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_threshold_boundary_is_strict() {
    // U1: F1=4, F2=5 gives avgDiff(F2, F1) = 1; U2: F1=4 predicts F2 at
    // exactly 5.0, which must be excluded
    let store = seeded_store(&[1, 2], 2, &[(1, 1, 4), (1, 2, 5), (2, 1, 4)]).await;
    let recommender = recommender_over(&store);

    assert!(recommender.recommendations(2).await.unwrap().is_empty());

    // Nudge the pivot mark up by one: prediction 6.0 clears the threshold
    store.add_rating(2, 1, 5).await;
    let films = recommender.recommendations(2).await.unwrap();
    assert_eq!(films.len(), 1);
    assert_eq!(films[0].id, 2);
}

#[tokio::test]
async fn test_results_ordered_by_descending_prediction() {
    // U2 pivots on F1=8; U1's marks put F2 at 9.0 and F3 at 7.0
    let store = seeded_store(
        &[1, 2],
        3,
        &[(1, 1, 8), (1, 2, 9), (1, 3, 7), (2, 1, 8)],
    )
    .await;
    let recommender = recommender_over(&store);

    let films = recommender.recommendations(2).await.unwrap();

    let ids: Vec<FilmId> = films.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_isolation_across_users() {
    let store = seeded_store(
        &[1, 2, 3],
        3,
        &[(1, 1, 8), (1, 2, 9), (2, 1, 8), (3, 1, 2), (3, 3, 9)],
    )
    .await;
    let recommender = recommender_over(&store);

    let alone = recommender.recommendations(2).await.unwrap();

    // Interleave computations for the other users, then repeat
    let _ = recommender.recommendations(1).await.unwrap();
    let _ = recommender.recommendations(3).await.unwrap();
    let after_others = recommender.recommendations(2).await.unwrap();

    assert_eq!(alone, after_others);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let store = seeded_store(
        &[1, 2],
        2,
        &[(1, 1, 8), (1, 2, 9), (2, 1, 8)],
    )
    .await;
    let recommender = Arc::new(recommender_over(&store));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let recommender = Arc::clone(&recommender);
        handles.push(tokio::spawn(async move {
            recommender.recommendations(2).await.unwrap()
        }));
    }

    for handle in handles {
        let films = handle.await.unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].id, 2);
    }
}
