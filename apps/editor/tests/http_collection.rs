//! End-to-end tests of the timeline controller against a local HTTP collection endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tokio::net::TcpListener;

use resume_editor::api_client::{build_client, CollectionApi, HttpCollection};
use resume_editor::config::TimelineSettings;
use resume_editor::errors::ApiError;
use resume_editor::models::Education;
use resume_editor::timeline::{NotificationKind, TimelineController, TimelineOptions};

#[derive(Clone, Default)]
struct FakeCollection {
    items: Arc<Mutex<Vec<Education>>>,
    next_id: Arc<AtomicUsize>,
}

async fn list(State(db): State<FakeCollection>) -> Json<Vec<Education>> {
    Json(db.items.lock().unwrap().clone())
}

async fn create(
    State(db): State<FakeCollection>,
    Json(mut body): Json<Education>,
) -> (StatusCode, Json<Education>) {
    body.id = format!("edu-{}", db.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    db.items.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update(
    State(db): State<FakeCollection>,
    Path(id): Path<String>,
    Json(mut body): Json<Education>,
) -> Result<Json<Education>, StatusCode> {
    let mut items = db.items.lock().unwrap();
    let slot = items
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    body.id = id;
    *slot = body.clone();
    Ok(Json(body))
}

async fn remove(State(db): State<FakeCollection>, Path(id): Path<String>) -> StatusCode {
    let mut items = db.items.lock().unwrap();
    let before = items.len();
    items.retain(|e| e.id != id);
    if items.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database offline")
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

async fn spawn_collection(seed: Vec<Education>) -> (String, FakeCollection) {
    let db = FakeCollection {
        items: Arc::new(Mutex::new(seed)),
        ..Default::default()
    };
    let app = Router::new()
        .route("/api/educations", get(list).post(create))
        .route("/api/educations/:id", put(update).delete(remove))
        .with_state(db.clone());
    (serve(app).await, db)
}

async fn spawn_failing() -> String {
    let app = Router::new()
        .route("/api/educations", get(unavailable).post(unavailable))
        .route("/api/educations/:id", put(unavailable).delete(unavailable));
    serve(app).await
}

fn controller(base: &str) -> TimelineController<Education, HttpCollection<Education>> {
    let client = build_client(std::time::Duration::from_secs(5)).unwrap();
    TimelineController::new(
        HttpCollection::for_entity(client, base),
        TimelineOptions::for_entity(),
        &TimelineSettings::default(),
    )
}

fn edu(id: &str, school: &str, start: &str) -> Education {
    Education {
        id: id.into(),
        school: school.into(),
        start_date: start.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_load_renders_newest_first() {
    let (base, _db) = spawn_collection(vec![
        edu("1", "State College", "2012-09"),
        edu("2", "Tech University", "2016-09"),
    ])
    .await;
    let mut ctl = controller(&base);
    ctl.load().await;

    assert!(!ctl.is_loading());
    assert!(ctl.error().is_none());
    let titles: Vec<String> = ctl.timeline_items().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["Tech University", "State College"]);
    assert_eq!(ctl.items()[0].id, "1", "stored order untouched");
}

#[tokio::test]
async fn test_add_edit_delete_round_trip() {
    let (base, db) = spawn_collection(vec![]).await;
    let mut ctl = controller(&base);
    ctl.load().await;
    assert_eq!(ctl.notification().unwrap().kind, NotificationKind::Info);

    let id = ctl.add().await.expect("created");
    assert_eq!(id, "edu-1");
    assert_eq!(ctl.selected_id(), Some("edu-1"));

    let mut session = ctl.open_editor().expect("editing new entry");
    session.draft_mut().school = "Open University".into();
    let saved = session.save(ctl.api()).await.expect("saved");
    ctl.save(saved);
    assert!(ctl.selected_id().is_none());
    assert_eq!(db.items.lock().unwrap()[0].school, "Open University");

    assert!(ctl.request_delete(&id));
    assert!(ctl.confirm_delete(&id).await);
    assert!(ctl.items().is_empty());
    assert!(ctl.delete_id().is_none());
    assert!(db.items.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_server_failures_are_recoverable() {
    let base = spawn_failing().await;
    let mut ctl = controller(&base);

    ctl.load().await;
    assert!(ctl.error().is_some());
    assert!(ctl.items().is_empty());

    assert!(ctl.add().await.is_none());
    assert_eq!(ctl.notification().unwrap().kind, NotificationKind::Error);
    assert!(ctl.items().is_empty());
}

#[tokio::test]
async fn test_failed_delete_keeps_entry_and_confirmation() {
    let (base, db) = spawn_collection(vec![edu("1", "MIT", "2020")]).await;
    let mut ctl = controller(&base);
    ctl.load().await;

    // Removed behind the controller's back, so the DELETE answers 404.
    db.items.lock().unwrap().clear();
    ctl.request_delete("1");
    assert!(!ctl.confirm_delete("1").await);

    assert_eq!(ctl.items().len(), 1);
    assert_eq!(ctl.delete_id(), Some("1"));
    assert!(!ctl.is_deleting());
    ctl.cancel_delete();
    assert!(ctl.delete_id().is_none());
}

#[tokio::test]
async fn test_non_2xx_body_is_reported() {
    let base = spawn_failing().await;
    let client = build_client(std::time::Duration::from_secs(5)).unwrap();
    let api: HttpCollection<Education> = HttpCollection::for_entity(client, &base);

    match api.list().await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
