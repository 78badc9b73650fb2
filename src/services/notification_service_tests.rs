// src/services/notification_service_tests.rs
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::create_test_pool;
use crate::domain::user::{UserProfile, UserType};
use crate::domain::walk_application::WalkApplication;
use crate::domain::walk_request::WalkRequest;
use crate::domain::{NotificationItem, NotificationType};
use crate::error::AppError;
use crate::repositories::{
    MockUserRepository, MockWalkApplicationRepository, MockWalkRequestRepository,
    SqliteUserRepository, SqliteWalkApplicationRepository, SqliteWalkRequestRepository,
    UserRepository, WalkApplicationRepository, WalkRequestRepository,
};
use crate::services::notification_service::{sort_newest_first, NotificationAggregator};

struct Store {
    aggregator: NotificationAggregator,
    users: Arc<SqliteUserRepository>,
    requests: Arc<SqliteWalkRequestRepository>,
    applications: Arc<SqliteWalkApplicationRepository>,
}

fn store() -> Store {
    let pool = Arc::new(create_test_pool().unwrap());
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let requests = Arc::new(SqliteWalkRequestRepository::new(pool.clone()));
    let applications = Arc::new(SqliteWalkApplicationRepository::new(pool));

    let aggregator =
        NotificationAggregator::new(users.clone(), requests.clone(), applications.clone());
    Store {
        aggregator,
        users,
        requests,
        applications,
    }
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

async fn user(store: &Store, name: &str, user_type: UserType) -> UserProfile {
    let email = format!("{}@example.com", name.to_lowercase());
    let profile = UserProfile::new(name.to_string(), email, user_type);
    store.users.save(&profile).await.unwrap();
    profile
}

fn request_for(owner_id: Uuid) -> WalkRequest {
    WalkRequest::new(owner_id, Uuid::new_v4(), at(18), 30, "Park".to_string())
}

/// Accepted request with a chosen walker, last touched at `updated_at`
async fn accepted_request(
    store: &Store,
    owner_id: Uuid,
    walker_id: Uuid,
    updated_at: DateTime<Utc>,
) -> WalkRequest {
    let mut request = request_for(owner_id);
    request.select_walker(walker_id).unwrap();
    request.updated_at = updated_at;
    store.requests.save(&request).await.unwrap();
    request
}

async fn application(
    store: &Store,
    request: &WalkRequest,
    walker_id: Uuid,
    created_at: Option<DateTime<Utc>>,
) -> WalkApplication {
    let mut application = WalkApplication::new(request.id, request.owner_id, walker_id, None);
    application.created_at = created_at;
    store.applications.save(&application).await.unwrap();
    application
}

fn summary(items: &[NotificationItem]) -> Vec<(NotificationType, Uuid)> {
    items.iter().map(|i| (i.kind, i.id)).collect()
}

#[tokio::test]
async fn test_owner_feed_orders_newest_first() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let w1 = user(&s, "Walt", UserType::Walker).await;
    let w2 = user(&s, "Wendy", UserType::Walker).await;

    let r1 = accepted_request(&s, owner.id, w1.id, at(9)).await;
    let open = request_for(owner.id);
    s.requests.save(&open).await.unwrap();
    let a1 = application(&s, &open, w2.id, Some(at(10))).await;

    let items = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();

    assert_eq!(
        summary(&items),
        vec![
            (NotificationType::NewApplication, a1.id),
            (NotificationType::WalkerSelected, r1.id),
        ]
    );
    assert_eq!(items[0].message, "Wendy applied for your walk request");
    assert_eq!(items[0].title, "New Application");
    assert_eq!(items[0].timestamp, at(10));
    assert_eq!(items[0].related_walk_request.id, open.id);
    assert_eq!(items[1].message, "Walt has been selected for your walk request");
    assert_eq!(items[1].timestamp, at(9));
}

#[tokio::test]
async fn test_pending_application_on_accepted_request_appears_with_selection() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let w1 = user(&s, "Walt", UserType::Walker).await;
    let w2 = user(&s, "Wendy", UserType::Walker).await;

    let r1 = accepted_request(&s, owner.id, w1.id, at(9)).await;
    let a1 = application(&s, &r1, w2.id, Some(at(10))).await;

    let items = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();

    assert_eq!(
        summary(&items),
        vec![
            (NotificationType::NewApplication, a1.id),
            (NotificationType::WalkerSelected, r1.id),
        ]
    );
    assert_eq!(items[0].message, "Wendy applied for your walk request");
    assert_eq!(items[0].related_walk_request.id, r1.id);
    assert_eq!(items[1].message, "Walt has been selected for your walk request");
}

#[tokio::test]
async fn test_owner_feed_drops_pending_application_with_deleted_request() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let walker = user(&s, "Walt", UserType::Walker).await;

    let gone = request_for(owner.id);
    s.requests.save(&gone).await.unwrap();
    application(&s, &gone, walker.id, Some(at(10))).await;
    let kept = request_for(owner.id);
    s.requests.save(&kept).await.unwrap();
    let survivor = application(&s, &kept, walker.id, Some(at(8))).await;
    s.requests.delete(gone.id).await.unwrap();

    let items = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();
    assert_eq!(summary(&items), vec![(NotificationType::NewApplication, survivor.id)]);
}

#[tokio::test]
async fn test_walker_feed_drops_applications_with_deleted_request() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let walker = user(&s, "Walt", UserType::Walker).await;

    let request = accepted_request(&s, owner.id, walker.id, at(9)).await;
    let mut app = application(&s, &request, walker.id, Some(at(8))).await;
    app.accept().unwrap();
    s.applications.save(&app).await.unwrap();
    s.requests.delete(request.id).await.unwrap();

    let items = s.aggregator.aggregate(Some(walker.id), UserType::Walker).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_walker_feed_names_the_owner() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let walker = user(&s, "Walt", UserType::Walker).await;

    let request = accepted_request(&s, owner.id, walker.id, at(11)).await;
    let mut app = application(&s, &request, walker.id, Some(at(8))).await;
    app.accept().unwrap();
    s.applications.save(&app).await.unwrap();

    let items = s.aggregator.aggregate_for(walker.id).await.unwrap();
    assert_eq!(summary(&items), vec![(NotificationType::ApplicationAccepted, app.id)]);
    assert_eq!(items[0].message, "Olga accepted your application");
    assert_eq!(items[0].timestamp, at(11));
}

#[tokio::test]
async fn test_missing_walker_profile_falls_back_to_generic_text() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let r1 = accepted_request(&s, owner.id, Uuid::new_v4(), at(9)).await;

    let items = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();
    assert_eq!(summary(&items), vec![(NotificationType::WalkerSelected, r1.id)]);
    assert_eq!(items[0].message, "A walker has been selected for your walk request");
}

#[tokio::test]
async fn test_no_current_user_means_empty_feed() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    accepted_request(&s, owner.id, Uuid::new_v4(), at(9)).await;

    assert!(s.aggregator.aggregate(None, UserType::DogOwner).await.unwrap().is_empty());
    assert!(s.aggregator.aggregate(None, UserType::Walker).await.unwrap().is_empty());
    assert!(s.aggregator.aggregate_for(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_created_at_uses_current_time() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let walker = user(&s, "Walt", UserType::Walker).await;
    let request = request_for(owner.id);
    s.requests.save(&request).await.unwrap();
    application(&s, &request, walker.id, None).await;

    let before = Utc::now();
    let items = s.aggregator.owner_feed(owner.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].timestamp >= before);
}

#[tokio::test]
async fn test_one_item_per_record_and_stable_between_calls() {
    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let walker = user(&s, "Walt", UserType::Walker).await;

    accepted_request(&s, owner.id, walker.id, at(7)).await;
    accepted_request(&s, owner.id, walker.id, at(12)).await;
    let open = request_for(owner.id);
    s.requests.save(&open).await.unwrap();
    for hour in [8, 10, 10, 14] {
        let w = user(&s, &format!("Walker{}", Uuid::new_v4().simple()), UserType::Walker).await;
        application(&s, &open, w.id, Some(at(hour))).await;
    }

    let first = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();
    let second = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();

    assert_eq!(first.len(), 6);
    assert!(first.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(first, second);

    let mut ids: Vec<Uuid> = first.iter().map(|i| i.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_sort_keeps_ties_in_input_order() {
    let request = request_for(Uuid::new_v4());
    let make = |kind, hour| NotificationItem::new(Uuid::new_v4(), kind, String::new(), request.clone(), at(hour));

    let tie_a = make(NotificationType::WalkerSelected, 9);
    let tie_b = make(NotificationType::NewApplication, 9);
    let newest = make(NotificationType::NewApplication, 12);
    let mut items = vec![tie_a.clone(), tie_b.clone(), newest.clone()];

    sort_newest_first(&mut items);
    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![newest.id, tie_a.id, tie_b.id]
    );
}

// ----------------------------------------------------------------------
// Failure injection
// ----------------------------------------------------------------------

fn mocked(
    users: MockUserRepository,
    requests: MockWalkRequestRepository,
    applications: MockWalkApplicationRepository,
) -> NotificationAggregator {
    NotificationAggregator::new(Arc::new(users), Arc::new(requests), Arc::new(applications))
}

#[tokio::test]
async fn test_bulk_query_failure_is_backend_unavailable() {
    let mut requests = MockWalkRequestRepository::new();
    requests
        .expect_query()
        .returning(|_| Err(AppError::Pool("connection refused".into())));

    let aggregator = mocked(
        MockUserRepository::new(),
        requests,
        MockWalkApplicationRepository::new(),
    );
    let err = aggregator
        .aggregate(Some(Uuid::new_v4()), UserType::DogOwner)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BackendUnavailable(msg) if msg.contains("walk_requests")));
}

#[tokio::test]
async fn test_second_bulk_query_failure_returns_no_partial_feed() {
    let owner = Uuid::new_v4();
    let mut accepted = request_for(owner);
    accepted.select_walker(Uuid::new_v4()).unwrap();

    let mut requests = MockWalkRequestRepository::new();
    requests
        .expect_query()
        .returning(move |_| Ok(vec![accepted.clone()]));

    let mut applications = MockWalkApplicationRepository::new();
    applications
        .expect_query()
        .returning(|_| Err(AppError::Other("timeout".into())));

    let aggregator = mocked(MockUserRepository::new(), requests, applications);
    let result = aggregator.aggregate(Some(owner), UserType::DogOwner).await;
    assert!(matches!(result, Err(AppError::BackendUnavailable(_))));
}

#[tokio::test]
async fn test_profile_lookup_error_only_downgrades_message() {
    let owner = Uuid::new_v4();
    let mut accepted = request_for(owner);
    accepted.select_walker(Uuid::new_v4()).unwrap();
    let accepted_id = accepted.id;

    let mut requests = MockWalkRequestRepository::new();
    requests
        .expect_query()
        .returning(move |_| Ok(vec![accepted.clone()]));

    let mut applications = MockWalkApplicationRepository::new();
    applications.expect_query().returning(|_| Ok(Vec::new()));

    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .returning(|_| Err(AppError::Pool("busy".into())));

    let aggregator = mocked(users, requests, applications);
    let items = aggregator.aggregate(Some(owner), UserType::DogOwner).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, accepted_id);
    assert_eq!(items[0].message, "A walker has been selected for your walk request");
}

#[tokio::test]
async fn test_accepted_request_without_walker_is_skipped() {
    let owner = Uuid::new_v4();
    let mut orphan = request_for(owner);
    orphan.status = crate::domain::WalkRequestStatus::Accepted;
    orphan.updated_at = at(9) - Duration::minutes(5);

    let mut requests = MockWalkRequestRepository::new();
    requests
        .expect_query()
        .returning(move |_| Ok(vec![orphan.clone()]));
    let mut applications = MockWalkApplicationRepository::new();
    applications.expect_query().returning(|_| Ok(Vec::new()));

    let aggregator = mocked(MockUserRepository::new(), requests, applications);
    assert!(aggregator.owner_feed(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_accepted_walker_shows_up_in_both_feeds() {
    use crate::events::EventBus;
    use crate::services::WalkApplicationService;

    let s = store();
    let owner = user(&s, "Olga", UserType::DogOwner).await;
    let chosen = user(&s, "Walt", UserType::Walker).await;
    let other = user(&s, "Wendy", UserType::Walker).await;
    let request = request_for(owner.id);
    s.requests.save(&request).await.unwrap();

    let service = WalkApplicationService::new(
        s.applications.clone(),
        s.requests.clone(),
        s.users.clone(),
        Arc::new(EventBus::new()),
    );
    let winning = service.apply(chosen.id, request.id, None).await.unwrap();
    service.apply(other.id, request.id, None).await.unwrap();

    let before = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();
    assert_eq!(before.len(), 2);
    assert!(before.iter().all(|i| i.kind == NotificationType::NewApplication));

    service.accept(owner.id, winning.id).await.unwrap();

    let owner_feed = s.aggregator.aggregate(Some(owner.id), UserType::DogOwner).await.unwrap();
    assert_eq!(summary(&owner_feed), vec![(NotificationType::WalkerSelected, request.id)]);
    assert_eq!(owner_feed[0].message, "Walt has been selected for your walk request");

    let walker_feed = s.aggregator.aggregate(Some(chosen.id), UserType::Walker).await.unwrap();
    assert_eq!(summary(&walker_feed), vec![(NotificationType::ApplicationAccepted, winning.id)]);

    let loser_feed = s.aggregator.aggregate(Some(other.id), UserType::Walker).await.unwrap();
    assert!(loser_feed.is_empty());
}
