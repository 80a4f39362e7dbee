mod common;

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use common::{InMemoryQuizResultRepository, InMemoryUserRepository};
use tuneguess_server::{
    models::domain::QuizResult,
    repositories::{QuizResultRepository, UserRepository},
    services::UserService,
    spotify::types::UserProfile,
    spotify::TimeRange,
};

fn profile(id: &str, email: &str) -> UserProfile {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "display_name": "Jane Doe",
        "email": email,
        "images": []
    }))
    .unwrap()
}

#[tokio::test]
async fn sign_in_creates_user_once_then_refreshes_credential() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = UserService::new(repository.clone());

    let first = service
        .sign_in(&profile("sp-1", "jane@example.com"), "refresh-1")
        .await
        .unwrap();
    assert_eq!(first.refresh_token, "refresh-1");
    assert!(first.id.is_some());
    assert_eq!(repository.len().await, 1);

    // Repeat sign-in must not create a second record, only replace the
    // refresh credential.
    let second = service
        .sign_in(&profile("sp-1", "jane@example.com"), "refresh-2")
        .await
        .unwrap();
    assert_eq!(second.refresh_token, "refresh-2");
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn sign_in_without_email_is_rejected() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = UserService::new(repository.clone());

    let no_email: UserProfile =
        serde_json::from_value(serde_json::json!({ "id": "sp-2" })).unwrap();

    assert!(service.sign_in(&no_email, "refresh-1").await.is_err());
    assert_eq!(repository.len().await, 0);
}

#[tokio::test]
async fn duplicate_spotify_id_or_email_rejected_at_repository() {
    let repository = InMemoryUserRepository::new();

    let user = tuneguess_server::models::domain::User::new(
        "Jane",
        "jane@example.com",
        "sp-1",
        "rt",
        None,
    );
    repository.create(user.clone()).await.unwrap();
    assert!(repository.create(user).await.is_err());
}

#[tokio::test]
async fn result_listing_is_newest_first_with_tracks_projected_out() {
    let repository = InMemoryQuizResultRepository::new();
    let user_id = ObjectId::new();

    for score in [3, 7, 9] {
        let mut result = QuizResult::new(
            user_id,
            "jane@example.com",
            "Jane Doe",
            score,
            10,
            TimeRange::MediumTerm,
            vec![],
        );
        // distinct dates so the ordering is unambiguous
        result.date = result.date + chrono::Duration::seconds(score as i64);
        repository.insert(result).await.unwrap();
    }

    let page = repository.find_page_for_user(&user_id, 0, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].score, 9);
    assert_eq!(page[1].score, 7);
    assert!(page.iter().all(|r| r.tracks.is_empty()));

    let total = repository.count_for_user(&user_id).await.unwrap();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn stats_are_a_read_time_reduction_over_all_results() {
    let repository = InMemoryQuizResultRepository::new();
    let user_id = ObjectId::new();
    let other_user = ObjectId::new();

    for (score, total) in [(5, 10), (10, 10)] {
        let result = QuizResult::new(
            user_id,
            "jane@example.com",
            "Jane Doe",
            score,
            total,
            TimeRange::ShortTerm,
            vec![],
        );
        repository.insert(result).await.unwrap();
    }
    // Another user's result must not leak into the aggregates.
    repository
        .insert(QuizResult::new(
            other_user,
            "bob@example.com",
            "Bob",
            1,
            10,
            TimeRange::ShortTerm,
            vec![],
        ))
        .await
        .unwrap();

    let stats = repository.aggregate_stats(&user_id).await.unwrap();
    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.average_score, 75.0); // mean of 50% and 100%
    assert_eq!(stats.best_score, 100);
    assert_eq!(stats.total_correct, 15);
    assert_eq!(stats.total_questions, 20);
}

#[tokio::test]
async fn stats_for_user_with_no_results_are_all_zero() {
    let repository = InMemoryQuizResultRepository::new();

    let stats = repository.aggregate_stats(&ObjectId::new()).await.unwrap();
    assert_eq!(stats.total_quizzes, 0);
    assert_eq!(stats.average_score, 0.0);
    assert_eq!(stats.best_score, 0);
}
