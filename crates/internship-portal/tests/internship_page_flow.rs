//! End-to-end scenarios for the internship page driven through the public API, against both the
//! in-memory collaborator and the REST client pointed at a mock backend.

use std::sync::Arc;
use std::time::Duration;

use internship_portal::backend::{InMemoryBackend, RestBackend};
use internship_portal::config::BackendConfig;
use internship_portal::interaction::NotificationKind;
use internship_portal::internship::{
    fallback_catalog, CatalogOrigin, DraftField, InternshipPage, LoadOutcome, PositionCategory,
    SubmitOutcome,
};
use reqwest::Url;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fill_sales_application<B>(page: &InternshipPage<B>) {
    page.set_field(DraftField::FirstName, "A");
    page.set_field(DraftField::LastName, "B");
    page.set_field(DraftField::Email, "a@b.com");
    page.set_field(DraftField::Position, "Sales");
}

fn rest_backend(server: &MockServer) -> Arc<RestBackend> {
    let config = BackendConfig {
        base_url: Url::parse(&server.uri()).expect("mock uri parses"),
        anon_key: "anon-key".to_string(),
        timeout: Duration::from_secs(5),
    };
    Arc::new(RestBackend::new(&config).expect("client builds"))
}

#[tokio::test]
async fn in_memory_visit_loads_catalog_and_records_application() {
    let backend = Arc::new(InMemoryBackend::with_positions(vec![
        PositionCategory {
            title: "Sales".to_string(),
            items: vec!["Sales Executive".to_string()],
        },
        PositionCategory {
            title: "Backend".to_string(),
            items: vec!["Go Developer".to_string()],
        },
    ]));
    let page = InternshipPage::mount(backend.clone());
    assert_eq!(page.positions(), fallback_catalog());

    assert_eq!(
        page.load_positions().await,
        LoadOutcome::Replaced { count: 2 }
    );
    let titles: Vec<_> = page
        .positions()
        .into_iter()
        .map(|category| category.title)
        .collect();
    assert_eq!(titles, vec!["Backend", "Sales"]);

    fill_sales_application(&page);
    assert_eq!(page.submit().await, SubmitOutcome::Submitted);

    let stored = backend.applications();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].row.position, "Sales");
    assert!(page.view().confirmation_open);
    assert!(page.draft().is_empty());
}

#[tokio::test]
async fn rest_visit_submits_snake_case_row_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/internship_positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/internship_applications"))
        .and(body_json(json!([{
            "first_name": "A",
            "last_name": "B",
            "email": "a@b.com",
            "position": "Sales"
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let page = InternshipPage::mount(rest_backend(&server));
    assert_eq!(page.load_positions().await, LoadOutcome::KeptFallback);
    assert_eq!(page.view().catalog_source, CatalogOrigin::Fallback);

    fill_sales_application(&page);
    assert_eq!(page.submit().await, SubmitOutcome::Submitted);
    assert!(page.confirmation_open());
}

#[tokio::test]
async fn rest_outage_keeps_fallback_and_draft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/internship_positions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/internship_applications"))
        .respond_with(ResponseTemplate::new(500).set_body_string("insert failed"))
        .mount(&server)
        .await;

    let page = InternshipPage::mount(rest_backend(&server));
    assert_eq!(page.load_positions().await, LoadOutcome::Failed);
    assert_eq!(page.positions(), fallback_catalog());

    fill_sales_application(&page);
    assert_eq!(page.submit().await, SubmitOutcome::Failed);
    assert_eq!(page.draft().position, "Sales");
    let notifications = page.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn slow_catalog_is_dropped_when_visitor_leaves() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/internship_positions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "title": "Backend", "items": [] }]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let page = Arc::new(InternshipPage::mount(rest_backend(&server)));
    let loader = {
        let page = page.clone();
        tokio::spawn(async move { page.load_positions().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    page.unmount();

    assert_eq!(loader.await.expect("loader joins"), LoadOutcome::Discarded);
    assert_eq!(page.positions(), fallback_catalog());
}
