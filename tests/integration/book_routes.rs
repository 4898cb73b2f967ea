//! Catalog routes driven through the real router

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use uuid::Uuid;

use locallib_server::{
    api,
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
    repository::{memory::MemoryStore, CatalogStore},
    services::Services,
    AppConfig, AppError, AppResult, AppState,
};

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

fn app(store: Arc<dyn CatalogStore>) -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(store)),
    };
    api::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_form(app: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create a book through the form and return its detail URL
async fn create_book(app: &Router, title: &str, author: &str) -> String {
    let form = format!("title={title}&author={author}&summary=A%20summary&isbn=978-0441013593");
    let response = post_form(app, "/catalog/book/create", &form).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    response.location.expect("redirect location")
}

/// Store whose backend is down: every call fails
struct OfflineStore;

fn offline() -> AppError {
    AppError::Internal("store offline at 10.0.0.5".to_string())
}

#[async_trait]
impl CatalogStore for OfflineStore {
    async fn count_books(&self) -> AppResult<i64> {
        Err(offline())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Err(offline())
    }

    async fn list_books(&self) -> AppResult<Vec<BookListEntry>> {
        Err(offline())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        Err(offline())
    }

    async fn find_book(&self, _id: Uuid) -> AppResult<Option<Book>> {
        Err(offline())
    }

    async fn find_book_populated(&self, _id: Uuid) -> AppResult<Option<BookDetail>> {
        Err(offline())
    }

    async fn create_book(&self, _data: &BookInput) -> AppResult<Book> {
        Err(offline())
    }

    async fn update_book(&self, _id: Uuid, _data: &BookInput) -> AppResult<Option<Book>> {
        Err(offline())
    }

    async fn delete_book(&self, _id: Uuid) -> AppResult<bool> {
        Err(offline())
    }

    async fn ping(&self) -> AppResult<()> {
        Err(offline())
    }
}

async fn seeded() -> (Arc<MemoryStore>, Author) {
    let store = Arc::new(MemoryStore::new());
    let herbert = Author::new("Frank", "Herbert");
    store.insert_author(herbert.clone()).await;
    store.insert_author(Author::new("Isaac", "Asimov")).await;
    (store, herbert)
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, "/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_home_shows_counts() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    create_book(&app, "Dune", &herbert.id.to_string()).await;

    let response = get(&app, "/catalog").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<strong>Books:</strong> 1"));
    assert!(response.body.contains("<strong>Authors:</strong> 2"));
}

#[tokio::test]
async fn test_empty_book_list() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, "/catalog/books").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Book List</h1>"));
    assert!(response.body.contains("There are no books."));
}

#[tokio::test]
async fn test_book_list_sorted_by_title() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let author = herbert.id.to_string();
    for title in ["Solaris", "Dune", "Neuromancer"] {
        create_book(&app, title, &author).await;
    }

    let body = get(&app, "/catalog/books").await.body;
    let dune = body.find(">Dune<").unwrap();
    let neuromancer = body.find(">Neuromancer<").unwrap();
    let solaris = body.find(">Solaris<").unwrap();
    assert!(dune < neuromancer && neuromancer < solaris);
    assert!(body.contains("(Herbert, Frank)"));
}

#[tokio::test]
async fn test_create_form_lists_authors() {
    let (store, _) = seeded().await;
    let app = app(store);

    let response = get(&app, "/catalog/book/create").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Create Book</h1>"));
    let asimov = response.body.find("Asimov, Isaac").unwrap();
    let herbert = response.body.find("Herbert, Frank").unwrap();
    assert!(asimov < herbert);
}

#[tokio::test]
async fn test_create_redirects_to_detail() {
    let (store, herbert) = seeded().await;
    let app = app(store);

    let form = format!(
        "title=%20%20War%20%26%20Peace%20&author={}&summary=%3Cb%3ELong%3C%2Fb%3E&isbn=%20123%20",
        herbert.id
    );
    let response = post_form(&app, "/catalog/book/create", &form).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let location = response.location.unwrap();
    assert!(location.starts_with("/catalog/book/"));

    let detail = get(&app, &location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("<h1>Title: War &amp; Peace</h1>"));
    assert!(detail.body.contains("&lt;b&gt;Long&lt;&#x2F;b&gt;"));
    assert!(detail.body.contains("<strong>ISBN:</strong> 123"));
    assert!(detail.body.contains("<strong>Author:</strong> Herbert, Frank"));
}

#[tokio::test]
async fn test_create_accepts_unresolved_author() {
    let app = app(Arc::new(MemoryStore::new()));
    let location = create_book(&app, "Orphan", "not-an-author").await;

    let detail = get(&app, &location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("<h1>Title: Orphan</h1>"));
}

#[tokio::test]
async fn test_create_with_empty_author_rerenders_form() {
    let (store, _) = seeded().await;
    let app = app(store.clone());

    let response = post_form(
        &app,
        "/catalog/book/create",
        "title=Dune&author=&summary=s&isbn=123",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<li>Author must not be empty.</li>"));
    assert!(response.body.contains(r#"value="Dune""#));
    assert!(response.body.contains(r#"value="123""#));
    assert!(!response.body.contains("Title must not be empty."));
    assert!(response.body.contains("Herbert, Frank"));

    let list = get(&app, "/catalog/books").await;
    assert!(list.body.contains("There are no books."));
}

#[tokio::test]
async fn test_create_lists_errors_in_field_order() {
    let app = app(Arc::new(MemoryStore::new()));

    let response = post_form(&app, "/catalog/book/create", "isbn=%20%20&summary=").await;
    assert_eq!(response.status, StatusCode::OK);

    let positions: Vec<usize> = [
        "Title must not be empty.",
        "Author must not be empty.",
        "Summary must not be empty.",
        "ISBN must not be empty",
    ]
    .iter()
    .map(|m| response.body.find(m).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_detail_not_found() {
    let app = app(Arc::new(MemoryStore::new()));

    let missing = get(&app, &format!("/catalog/book/{}", Uuid::new_v4())).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.contains("Book not found"));

    let malformed = get(&app, "/catalog/book/not-a-uuid").await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_form_prefilled() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "Dune", &herbert.id.to_string()).await;

    let response = get(&app, &format!("{location}/update")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Update Book</h1>"));
    assert!(response.body.contains(r#"value="Dune""#));
    assert!(response
        .body
        .contains(&format!(r#"<option value="{}" selected>"#, herbert.id)));
}

#[tokio::test]
async fn test_update_form_for_missing_book() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, &format!("/catalog/book/{}/update", Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_book() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "Dune", &herbert.id.to_string()).await;

    let form = format!(
        "title=Dune%20Messiah&author={}&summary=Sequel&isbn=978-0593098233",
        herbert.id
    );
    let response = post_form(&app, &format!("{location}/update"), &form).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some(location.as_str()));

    let detail = get(&app, &location).await;
    assert!(detail.body.contains("<h1>Title: Dune Messiah</h1>"));
    assert!(detail.body.contains("Sequel"));
}

#[tokio::test]
async fn test_update_form_escapes_stored_title_once() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "a%20%26%20b", &herbert.id.to_string()).await;

    let response = get(&app, &format!("{location}/update")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"value="a &amp; b""#));
    assert!(!response.body.contains("&amp;amp;"));
    for field in ["title", "author", "summary", "isbn"] {
        assert!(response.body.contains(&format!(r#"id="{field}""#)));
    }
}

#[tokio::test]
async fn test_update_with_errors_keeps_candidate() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "Dune", &herbert.id.to_string()).await;

    let response = post_form(
        &app,
        &format!("{location}/update"),
        "title=%20Changed%20&author=x&summary=&isbn=1",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Update Book</h1>"));
    assert!(response.body.contains(r#"value="Changed""#));
    assert!(response.body.contains("<li>Summary must not be empty.</li>"));

    let detail = get(&app, &location).await;
    assert!(detail.body.contains("<h1>Title: Dune</h1>"));
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = post_form(
        &app,
        &format!("/catalog/book/{}/update", Uuid::new_v4()),
        "title=t&author=a&summary=s&isbn=i",
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_confirmation() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "Dune", &herbert.id.to_string()).await;

    let response = get(&app, &format!("{location}/delete")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<h1>Delete Book: Dune</h1>"));
    assert!(response.body.contains("Do you really want to delete this Book?"));
}

#[tokio::test]
async fn test_delete_confirmation_for_missing_book_redirects() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, &format!("/catalog/book/{}/delete", Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/books"));
}

#[tokio::test]
async fn test_delete_existing_and_missing_redirect_alike() {
    let (store, herbert) = seeded().await;
    let app = app(store);
    let location = create_book(&app, "Dune", &herbert.id.to_string()).await;
    let book_id = location.trim_start_matches("/catalog/book/");

    let first = post_form(&app, &format!("{location}/delete"), &format!("bookid={book_id}")).await;
    let second = post_form(&app, &format!("{location}/delete"), &format!("bookid={book_id}")).await;

    for response in [&first, &second] {
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/catalog/books"));
    }
    assert_eq!(get(&app, &location).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app(Arc::new(MemoryStore::new()));

    let health = get(&app, "/health").await;
    assert_eq!(health.status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&health.body).unwrap();
    assert_eq!(body["status"], "healthy");

    let ready = get(&app, "/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&ready.body).unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_unknown_route_renders_error_page() {
    let app = app(Arc::new(MemoryStore::new()));
    let response = get(&app, "/catalog/genres").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page not found"));
}

#[tokio::test]
async fn test_store_failure_renders_generic_500() {
    let app = app(Arc::new(OfflineStore));

    for uri in ["/catalog", "/catalog/books", "/catalog/book/create"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert!(response.body.contains("Internal server error"), "{uri}");
        assert!(!response.body.contains("10.0.0.5"), "{uri}");
    }

    let response = post_form(
        &app,
        "/catalog/book/create",
        "title=Dune&author=a&summary=s&isbn=1",
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.body.contains("store offline"));
}

#[tokio::test]
async fn test_readiness_reports_unavailable_store() {
    let app = app(Arc::new(OfflineStore));

    let ready = get(&app, "/ready").await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(ready.body.contains("Service unavailable"));
    assert!(!ready.body.contains("10.0.0.5"));

    let health = get(&app, "/health").await;
    assert_eq!(health.status, StatusCode::OK);
}
