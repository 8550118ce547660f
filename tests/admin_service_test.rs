//! Admin review service tests.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use trailhead::domain::{ApplicationFilter, ApplicationStatus};
use trailhead::errors::AppError;
use trailhead::services::{AdminReviewService, ReviewDesk};

use common::{test_admin, test_application, test_event, test_user, TestStore};

fn desk(store: &TestStore) -> ReviewDesk {
    ReviewDesk::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn review_stamps_reviewer_and_review_time() {
    let store = TestStore::new();
    let admin = store.add_user(test_admin("admin@example.com"));
    let user = store.add_user(test_user("hiker@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let reviewed = desk(&store)
        .review(
            admin.id,
            application.id,
            ApplicationStatus::Approved,
            Some("Looks good".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(reviewed.application.status, ApplicationStatus::Approved);
    assert_eq!(reviewed.application.admin_notes.as_deref(), Some("Looks good"));
    assert_eq!(reviewed.application.reviewed_by, Some(admin.id));
    assert!(reviewed.application.reviewed_at.is_some());
    assert_eq!(reviewed.reviewer.as_ref().unwrap().id, admin.id);
    assert_eq!(reviewed.user.email, "hiker@example.com");
}

#[tokio::test]
async fn repeat_review_overwrites_previous_decision() {
    let store = TestStore::new();
    let admin = store.add_user(test_admin("admin@example.com"));
    let second_admin = store.add_user(test_admin("second@example.com"));
    let user = store.add_user(test_user("hiker@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));
    let desk = desk(&store);

    desk.review(admin.id, application.id, ApplicationStatus::Waitlist, None)
        .await
        .unwrap();
    let reviewed = desk
        .review(
            second_admin.id,
            application.id,
            ApplicationStatus::Rejected,
            Some("No room after all".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(reviewed.application.status, ApplicationStatus::Rejected);
    assert_eq!(reviewed.application.reviewed_by, Some(second_admin.id));
}

#[tokio::test]
async fn review_of_missing_application_is_not_found() {
    let store = TestStore::new();
    let admin = store.add_user(test_admin("admin@example.com"));

    let result = desk(&store)
        .review(admin.id, Uuid::new_v4(), ApplicationStatus::Approved, None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn list_filters_by_event_and_status() {
    let store = TestStore::new();
    let user = store.add_user(test_user("hiker@example.com"));
    let event_a = store.add_event(test_event("Camp A"));
    let event_b = store.add_event(test_event("Camp B"));

    let matching = store.add_application(test_application(&user, &event_a));
    let mut wrong_status = test_application(&user, &event_a);
    wrong_status.id = Uuid::new_v4();
    wrong_status.status = ApplicationStatus::Rejected;
    store.add_application(wrong_status);
    store.add_application(test_application(&user, &event_b));

    let listed = desk(&store)
        .list(ApplicationFilter {
            event_id: Some(event_a.id),
            status: Some(ApplicationStatus::Pending),
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].application.id, matching.id);
}

#[tokio::test]
async fn search_matches_applicant_name_or_owner_email_case_insensitively() {
    let store = TestStore::new();
    let anna = store.add_user(test_user("anna@example.com"));
    let bob = store.add_user(test_user("bob@example.com"));
    let event = store.add_event(test_event("Summer Camp"));

    let by_email = store.add_application(test_application(&anna, &event));
    let mut by_name = test_application(&bob, &event);
    by_name.applicant_name = "Joanna Smith".to_string();
    let by_name = store.add_application(by_name);
    let mut unrelated = test_application(&bob, &event);
    unrelated.id = Uuid::new_v4();
    unrelated.event_id = store.add_event(test_event("Other Camp")).id;
    unrelated.applicant_name = "Carl Jones".to_string();
    store.add_application(unrelated);

    let listed = desk(&store)
        .list(ApplicationFilter {
            event_id: None,
            status: None,
            search: Some("ANN".to_string()),
        })
        .await
        .unwrap();

    let ids: Vec<Uuid> = listed.iter().map(|v| v.application.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&by_email.id));
    assert!(ids.contains(&by_name.id));
}

#[tokio::test]
async fn get_returns_any_application_with_joins() {
    let store = TestStore::new();
    let user = store.add_user(test_user("hiker@example.com"));
    let event = store.add_event(test_event("Summer Camp"));
    let application = store.add_application(test_application(&user, &event));

    let view = desk(&store).get(application.id).await.unwrap();

    assert_eq!(view.application.id, application.id);
    assert_eq!(view.user.id, user.id);
    assert_eq!(view.event.id, event.id);
    assert!(view.reviewer.is_none());
}

#[tokio::test]
async fn dashboard_zero_fills_counts_and_limits_recent_to_five() {
    let store = TestStore::new();
    let user = store.add_user(test_user("hiker@example.com"));

    for i in 0..7 {
        let event = store.add_event(test_event(&format!("Camp {}", i)));
        let mut application = test_application(&user, &event);
        application.submitted_at = Utc::now() - Duration::minutes(i);
        if i < 2 {
            application.status = ApplicationStatus::Approved;
        }
        store.add_application(application);
    }

    let summary = desk(&store).dashboard().await.unwrap();

    assert_eq!(summary.total_applications, 7);
    assert_eq!(summary.status_counts.pending, 5);
    assert_eq!(summary.status_counts.approved, 2);
    assert_eq!(summary.status_counts.rejected, 0);
    assert_eq!(summary.status_counts.waitlist, 0);
    assert_eq!(summary.recent_applications.len(), 5);

    // newest first
    let times: Vec<_> = summary
        .recent_applications
        .iter()
        .map(|v| v.application.submitted_at)
        .collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn dashboard_on_empty_store_is_all_zeroes() {
    let store = TestStore::new();

    let summary = desk(&store).dashboard().await.unwrap();

    assert_eq!(summary.total_applications, 0);
    assert_eq!(summary.status_counts.pending, 0);
    assert!(summary.recent_applications.is_empty());
}
