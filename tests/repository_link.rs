//! Contract tests for the in-memory link repository, including the
//! concurrency guarantees the service layer relies on.

use std::sync::Arc;

use shortener::application::services::LinkService;
use shortener::domain::entities::NewShortLink;
use shortener::domain::repositories::LinkRepository;
use shortener::error::AppError;
use shortener::infrastructure::persistence::InMemoryLinkRepository;

fn new_link(url: &str, code: &str, owner_id: i64) -> NewShortLink {
    NewShortLink {
        original_url: url.to_string(),
        short_code: code.to_string(),
        owner_id,
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_zero_count() {
    let repo = InMemoryLinkRepository::new();

    let link = repo
        .create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.visit_count, 0);
    assert_eq!(link.owner_id, 1);
}

#[tokio::test]
async fn test_create_rejects_duplicate_original_url() {
    let repo = InMemoryLinkRepository::new();

    repo.create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    let err = repo
        .create(new_link("https://example.com", "xyz789", 2))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Duplicate { .. }));
}

#[tokio::test]
async fn test_create_rejects_duplicate_short_code() {
    let repo = InMemoryLinkRepository::new();

    repo.create(new_link("https://example.com/1", "abc123", 1))
        .await
        .unwrap();

    let err = repo
        .create(new_link("https://example.com/2", "abc123", 1))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_lookups_hit_and_miss() {
    let repo = InMemoryLinkRepository::new();

    let created = repo
        .create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    assert_eq!(
        repo.find_by_id(created.id).await.unwrap().unwrap().id,
        created.id
    );
    assert_eq!(
        repo.find_by_code("abc123").await.unwrap().unwrap().id,
        created.id
    );
    assert_eq!(
        repo.find_by_original_url("https://example.com")
            .await
            .unwrap()
            .unwrap()
            .id,
        created.id
    );

    assert!(repo.find_by_id(999).await.unwrap().is_none());
    assert!(repo.find_by_code("zzzzzz").await.unwrap().is_none());
    // Lookup is case-sensitive exact match.
    assert!(
        repo.find_by_original_url("https://EXAMPLE.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_list_by_owner_filters() {
    let repo = InMemoryLinkRepository::new();

    repo.create(new_link("https://example.com/1", "aaaaaa", 1))
        .await
        .unwrap();
    repo.create(new_link("https://example.com/2", "bbbbbb", 2))
        .await
        .unwrap();
    repo.create(new_link("https://example.com/3", "cccccc", 1))
        .await
        .unwrap();

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 3);
    // Newest first.
    assert_eq!(all[0].short_code, "cccccc");

    let owned = repo.list_by_owner(1).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|l| l.owner_id == 1));
}

#[tokio::test]
async fn test_delete_reports_presence() {
    let repo = InMemoryLinkRepository::new();

    let created = repo
        .create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_code("abc123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_record_visit_increments() {
    let repo = InMemoryLinkRepository::new();

    let created = repo
        .create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    assert_eq!(repo.record_visit(created.id).await.unwrap(), 1);
    assert_eq!(repo.record_visit(created.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_record_visit_unknown_id() {
    let repo = InMemoryLinkRepository::new();

    let err = repo.record_visit(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_visits_lose_no_updates() {
    let repo = Arc::new(InMemoryLinkRepository::new());

    let created = repo
        .create(new_link("https://example.com", "abc123", 1))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..100 {
        let repo = repo.clone();
        let id = created.id;
        handles.push(tokio::spawn(async move { repo.record_visit(id).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(link.visit_count, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_through_service() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo));

    let created = service
        .create_link("https://example.com".to_string(), 1)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..100 {
        let service = service.clone();
        let code = created.short_code.clone();
        handles.push(tokio::spawn(
            async move { service.resolve(&code).await },
        ));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = service.get_link(created.id).await.unwrap();
    assert_eq!(link.visit_count, 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_of_same_url_store_one_record() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone()));

    let mut handles = Vec::new();
    for owner_id in 0..10 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_link("https://example.com/raced".to_string(), owner_id)
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Duplicate { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
