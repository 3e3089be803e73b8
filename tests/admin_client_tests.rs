// tests/admin_client_tests.rs
use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;
use uuid::Uuid;

use kycflow::admin::types::{OccupationProfession, Page, Resource, SortOrder};
use kycflow::admin::{AdminClient, ListController};
use kycflow::utils::config::AdminConfig;

/// Queries and deletions the stub backend has seen.
#[derive(Default)]
struct Recorder {
    list_queries: Mutex<Vec<HashMap<String, String>>>,
    deletes: Mutex<Vec<String>>,
}

fn taxonomy_page(page: usize) -> Page<OccupationProfession> {
    Page {
        items: vec![
            OccupationProfession {
                id: Uuid::new_v4(),
                occupation: "Trader".to_string(),
                profession: "Finance".to_string(),
                risk_category: Some("high".to_string()),
            },
            OccupationProfession {
                id: Uuid::new_v4(),
                occupation: "Architect".to_string(),
                profession: "Construction".to_string(),
                risk_category: None,
            },
        ],
        page,
        page_size: 10,
        total_count: 40,
        total_pages: 4,
        has_next: page < 4,
        has_previous: page > 1,
    }
}

async fn list_taxonomy(
    recorder: web::Data<Arc<Recorder>>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let query = query.into_inner();
    let page = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1);
    recorder.list_queries.lock().push(query);
    HttpResponse::Ok().json(taxonomy_page(page))
}

async fn delete_taxonomy(
    recorder: web::Data<Arc<Recorder>>,
    id: web::Path<String>,
) -> HttpResponse {
    recorder.deletes.lock().push(id.into_inner());
    HttpResponse::NoContent().finish()
}

/// Serve the stub console backend on an ephemeral port.
async fn start_stub_backend(recorder: Arc<Recorder>) -> (String, actix_web::dev::ServerHandle) {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(recorder.clone()))
            .route(
                "/occupations-professions/paginated/enhanced",
                web::get().to(list_taxonomy),
            )
            .route(
                "/occupations-professions/{id}",
                web::delete().to(delete_taxonomy),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind stub backend");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    tokio::spawn(server);
    (format!("http://{addr}"), handle)
}

fn client(base_url: String) -> AdminClient {
    AdminClient::new(&AdminConfig {
        base_url,
        timeout_secs: 5,
        page_size: 10,
    })
    .expect("client")
}

#[actix_web::test]
async fn test_filter_change_refetches_from_page_1() {
    let recorder = Arc::new(Recorder::default());
    let (base_url, handle) = start_stub_backend(recorder.clone()).await;
    let client = client(base_url);

    let mut controller: ListController<OccupationProfession> =
        ListController::new(Resource::OccupationsProfessions, 10);

    controller.refresh(&client).await.unwrap();
    assert!(controller.next_page());
    controller.refresh(&client).await.unwrap();
    assert!(controller.next_page());
    controller.refresh(&client).await.unwrap();

    controller.set_filter("risk_category", "high");
    controller.refresh(&client).await.unwrap();

    let queries = recorder.list_queries.lock();
    let pages: Vec<&str> = queries.iter().map(|q| q["page"].as_str()).collect();
    assert_eq!(pages, vec!["1", "2", "3", "1"]);
    assert_eq!(
        queries.last().unwrap().get("filters").map(String::as_str),
        Some("risk_category=high")
    );
    drop(queries);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_taxonomy_sort_never_reaches_the_backend() {
    let recorder = Arc::new(Recorder::default());
    let (base_url, handle) = start_stub_backend(recorder.clone()).await;
    let client = client(base_url);

    let mut controller: ListController<OccupationProfession> =
        ListController::new(Resource::OccupationsProfessions, 10);
    controller.set_sort("occupation", SortOrder::Asc);
    controller.refresh(&client).await.unwrap();

    // The request carried no sort parameter...
    assert!(!recorder.list_queries.lock()[0].contains_key("sort_by"));
    // ...and the fetched page was ordered locally instead.
    let order: Vec<&str> = controller
        .items()
        .iter()
        .map(|t| t.occupation.as_str())
        .collect();
    assert_eq!(order, vec!["Architect", "Trader"]);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_delete_refetches_the_current_page() {
    let recorder = Arc::new(Recorder::default());
    let (base_url, handle) = start_stub_backend(recorder.clone()).await;
    let client = client(base_url);

    let mut controller: ListController<OccupationProfession> =
        ListController::new(Resource::OccupationsProfessions, 10);
    controller.refresh(&client).await.unwrap();
    assert!(controller.next_page());
    controller.refresh(&client).await.unwrap();

    controller.delete_and_refresh(&client, "some-id").await.unwrap();

    assert_eq!(recorder.deletes.lock().as_slice(), ["some-id".to_string()]);
    // The delete re-fetched page 2, not page 1 and not a local splice.
    let queries = recorder.list_queries.lock();
    assert_eq!(queries.last().unwrap()["page"], "2");
    assert_eq!(queries.len(), 3);
    drop(queries);

    handle.stop(true).await;
}
