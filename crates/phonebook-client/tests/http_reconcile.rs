use std::sync::Arc;

use phonebook_client::{
    ClientError, Confirmation, DeleteOutcome, DirectoryTransport, EntryId, HttpTransport, Notice,
    Reconciler, Submission, SubmitOutcome, UpdateOutcome,
};
use phonebook_server::{build_router, AppState};
use phonebook_service::{CreateEntry, DirectoryService};
use phonebook_store::InMemoryEntryStore;

/// Spin up the HTTP server on an OS-assigned port, returning the base URL and
/// the directory behind it.
async fn spawn_test_server() -> (String, Arc<DirectoryService>) {
    let directory = Arc::new(DirectoryService::new(Arc::new(InMemoryEntryStore::new())));
    let app = build_router(AppState::new(Arc::clone(&directory)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://127.0.0.1:{port}"), directory)
}

#[tokio::test]
async fn scenario_a_create_into_empty_store() {
    let (base, directory) = spawn_test_server().await;
    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();
    assert!(reconciler.cache().is_empty());

    let outcome = reconciler
        .submit(Submission::new("Ada Lovelace", "39-44-5323523"))
        .await
        .unwrap();
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected a create, got {outcome:?}");
    };
    assert_eq!(created.name, "Ada Lovelace");
    assert_eq!(created.number, "39-44-5323523");

    assert_eq!(reconciler.cache().entries(), vec![created.clone()]);
    assert_eq!(directory.list_all().unwrap(), vec![created]);
}

#[tokio::test]
async fn scenario_b_same_number_is_rejected_locally() {
    let (base, directory) = spawn_test_server().await;
    let ada = directory
        .create(CreateEntry::new("Ada Lovelace", "39-44-5323523"))
        .unwrap();

    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();

    let outcome = reconciler
        .submit(Submission::new("ada lovelace", "39-44-5323523"))
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::AlreadyPresent(ada));
    assert_eq!(directory.count().unwrap(), 1);
}

#[tokio::test]
async fn scenario_c_confirmed_update() {
    let (base, directory) = spawn_test_server().await;
    let ada = directory
        .create(CreateEntry::new("Ada Lovelace", "39-44-5323523"))
        .unwrap();

    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();

    let SubmitOutcome::ConfirmUpdate(pending) = reconciler
        .submit(Submission::new("Ada Lovelace", "000-000"))
        .await
        .unwrap()
    else {
        panic!("expected a confirmation prompt");
    };

    let outcome = reconciler
        .resolve_update(pending, Confirmation::Confirmed)
        .await
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated(ref e) if e.number == "000-000"));
    assert_eq!(reconciler.cache().get(&ada.id).unwrap().number, "000-000");
    assert_eq!(directory.get(&ada.id.to_string()).unwrap().number, "000-000");
}

#[tokio::test]
async fn confirmed_delete_over_http() {
    let (base, directory) = spawn_test_server().await;
    let ada = directory
        .create(CreateEntry::new("Ada Lovelace", "39-44-5323523"))
        .unwrap();
    let dan = directory.create(CreateEntry::new("Dan Abramov", "12-43-234345")).unwrap();

    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();

    let pending = reconciler.request_delete(&ada.id).unwrap();
    let outcome = reconciler
        .resolve_delete(pending, Confirmation::Confirmed)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted(ada.clone()));
    assert_eq!(outcome.notice(), Some(Notice::Deleted("Ada Lovelace".into())));

    assert_eq!(reconciler.cache().entries(), vec![dan.clone()]);
    assert_eq!(directory.list_all().unwrap(), vec![dan]);
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let (base, directory) = spawn_test_server().await;
    let ada = directory
        .create(CreateEntry::new("Ada Lovelace", "39-44-5323523"))
        .unwrap();

    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();

    let pending = reconciler.request_delete(&ada.id).unwrap();
    let outcome = reconciler
        .resolve_delete(pending, Confirmation::Declined)
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(reconciler.cache().len(), 1);
    assert_eq!(directory.count().unwrap(), 1);
}

#[tokio::test]
async fn update_of_entry_deleted_elsewhere() {
    let (base, directory) = spawn_test_server().await;
    let ada = directory
        .create(CreateEntry::new("Ada Lovelace", "39-44-5323523"))
        .unwrap();

    let reconciler = Reconciler::new(HttpTransport::new(&base));
    reconciler.load().await.unwrap();

    let SubmitOutcome::ConfirmUpdate(pending) = reconciler
        .submit(Submission::new("Ada Lovelace", "000-000"))
        .await
        .unwrap()
    else {
        panic!("expected a confirmation prompt");
    };

    // Another client removes the entry while the prompt is open.
    directory.delete(&ada.id.to_string()).unwrap();

    let outcome = reconciler
        .resolve_update(pending, Confirmation::Confirmed)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::AlreadyDeleted(ada.clone()));
    assert_eq!(
        outcome.notice().unwrap().to_string(),
        "Information of Ada Lovelace has already been removed from server"
    );
    assert!(reconciler.cache().get(&ada.id).is_none());
    assert_eq!(directory.count().unwrap(), 0);
}

#[tokio::test]
async fn delete_never_issued_id_is_204_twice() {
    let (base, _directory) = spawn_test_server().await;
    let transport = HttpTransport::new(&base);
    let id = EntryId::new();
    transport.delete(&id).await.unwrap();
    transport.delete(&id).await.unwrap();
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (base, _directory) = spawn_test_server().await;
    let transport = HttpTransport::new(&base);
    let err = transport
        .update_number(&EntryId::new(), "Ada Lovelace", "1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_create_over_http() {
    let (base, _directory) = spawn_test_server().await;
    let transport = HttpTransport::new(&base);
    transport.create("Ada Lovelace", "1").await.unwrap();
    let err = transport.create("ADA LOVELACE", "2").await.unwrap_err();
    assert!(matches!(err, ClientError::DuplicateName(ref m) if m == "name already exists"));
}

#[tokio::test]
async fn info_page_over_http() {
    let (base, directory) = spawn_test_server().await;
    directory.seed_defaults().unwrap();
    let page = HttpTransport::new(&base).info().await.unwrap();
    assert!(page.contains("Phonebook has info for 5 people"));
}

#[tokio::test]
async fn unknown_endpoint_returns_404() {
    let (base, _directory) = spawn_test_server().await;
    let resp = reqwest::get(format!("{base}/api/persons")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unknown endpoint");
}
