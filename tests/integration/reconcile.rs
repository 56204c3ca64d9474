//! End-to-end synchronization against a mock service

use crate::integration::mock_server::MockServerFixture;
use luis_sync::{ClassifierType, DesiredState, Error};
use serde_json::json;

#[tokio::test]
async fn test_sync_intents_keeps_none_and_recreates_desired() {
    let fixture = MockServerFixture::new().await;
    let list = fixture
        .mock_list(
            "intents",
            json!([{"ID": "1", "Name": "None"}, {"ID": "2", "Name": "old"}]),
        )
        .await;
    let delete_old = fixture.mock_delete("intents/2", 1).await;
    let delete_none = fixture.mock_delete("intents/1", 0).await;
    let add_end = fixture.mock_add("intents", "end", 201, 1).await;
    let add_confirm = fixture.mock_add("intents", "confirm", 201, 1).await;

    let report = fixture
        .reconciler()
        .sync_intents(&["end", "confirm"])
        .await
        .unwrap();

    assert_eq!(report.removed, 1);
    assert_eq!(report.preserved, 1);
    assert_eq!(report.added, 2);
    list.assert_async().await;
    delete_old.assert_async().await;
    delete_none.assert_async().await;
    add_end.assert_async().await;
    add_confirm.assert_async().await;
}

#[tokio::test]
async fn test_failed_add_skips_remaining_names() {
    let fixture = MockServerFixture::new().await;
    let _list = fixture.mock_list("entities", json!([])).await;
    let add_a = fixture.mock_add("entities", "a", 201, 1).await;
    let add_b = fixture.mock_add("entities", "b", 400, 1).await;
    let add_c = fixture.mock_add("entities", "c", 201, 0).await;

    let err = fixture
        .reconciler()
        .sync_entities(&["a", "b", "c"])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    add_a.assert_async().await;
    add_b.assert_async().await;
    add_c.assert_async().await;
}

#[tokio::test]
async fn test_invalid_type_issues_no_requests() {
    let fixture = MockServerFixture::new().await;
    let get = fixture.forbid("GET").await;
    let post = fixture.forbid("POST").await;
    let delete = fixture.forbid("DELETE").await;

    let err = fixture
        .reconciler()
        .sync_named("foo", &["x"])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidClassifierType(ref t) if t == "foo"));
    get.assert_async().await;
    post.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_adding_prebuilts_is_unsupported() {
    let fixture = MockServerFixture::new().await;
    let post = fixture.forbid("POST").await;

    let err = fixture
        .store_client()
        .add_many(ClassifierType::Prebuilts, &["number"])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unsupported { .. }));
    post.assert_async().await;
}

#[tokio::test]
async fn test_clear_prebuilts() {
    let fixture = MockServerFixture::new().await;
    let _list = fixture
        .mock_list("prebuilts", json!([{"ID": "p1", "Name": "number"}]))
        .await;
    let delete = fixture.mock_delete("prebuilts/p1", 1).await;

    let summary = fixture
        .reconciler()
        .clear(ClassifierType::Prebuilts)
        .await
        .unwrap();

    assert_eq!(summary.deleted, vec!["p1"]);
    delete.assert_async().await;
}

#[tokio::test]
async fn test_full_run_from_manifest() {
    let fixture = MockServerFixture::new().await;
    let _intents = fixture
        .mock_list("intents", json!([{"ID": "1", "Name": "None"}]))
        .await;
    let _entities = fixture
        .mock_list("entities", json!([{"ID": "e1", "Name": "nursing"}]))
        .await;
    let delete_entity = fixture.mock_delete("entities/e1", 1).await;
    let add_greet = fixture.mock_add("intents", "greet", 201, 1).await;
    let add_side = fixture.mock_add("entities", "side", 201, 1).await;

    let desired = DesiredState::from_yaml_str(
        "intents: [greet]\nentities: [side]\nprebuilts: [number]\n",
    )
    .unwrap();
    let report = fixture.reconciler().run(&desired).await.unwrap();

    assert_eq!(report.types.len(), 2);
    assert_eq!(report.skipped_prebuilts, vec!["number"]);
    delete_entity.assert_async().await;
    add_greet.assert_async().await;
    add_side.assert_async().await;
}

#[tokio::test]
async fn test_clear_deletes_records_without_names() {
    let fixture = MockServerFixture::new().await;
    let _list = fixture
        .mock_list(
            "prebuilts",
            json!([{"ID": "p1", "Type": "prebuilt"}, {"ID": "p2", "Name": null}]),
        )
        .await;
    let delete_p1 = fixture.mock_delete("prebuilts/p1", 1).await;
    let delete_p2 = fixture.mock_delete("prebuilts/p2", 1).await;

    let summary = fixture
        .store_client()
        .remove_all(ClassifierType::Prebuilts)
        .await
        .unwrap();

    assert_eq!(summary.deleted, vec!["p1", "p2"]);
    delete_p1.assert_async().await;
    delete_p2.assert_async().await;
}
