// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Operation tests for nimbus-api against a mock HTTP server.

use std::time::Duration;

use serde::Deserialize;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nimbus_api::{Api, ApiConfig, ApiError};
use nimbus_store::{Action, Entity, ReduceOutcome, Slice, Store, StoreHandle, Verb, reduce};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Widget {
    id: u64,
    label: String,
    status: String,
}

impl Entity for Widget {
    type Id = u64;
    type Scope = ();
    type Children = ();

    const SINGULAR: &'static str = "widget";
    const PLURAL: &'static str = "widgets";
    const SUPPORTS: &'static [Verb] = Verb::ALL;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/widgets".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Snapshot {
    id: u64,
    label: String,
}

impl Entity for Snapshot {
    type Id = u64;
    type Scope = ();
    type Children = ();

    const SINGULAR: &'static str = "snapshot";
    const PLURAL: &'static str = "snapshots";
    const SUPPORTS: &'static [Verb] = Verb::READ_ONLY;

    fn id(&self) -> u64 {
        self.id
    }

    fn collection_path(_scope: &()) -> String {
        "/snapshots".to_string()
    }
}

fn route(action: Action<Widget>) -> Action<Widget> {
    action
}

fn widget_store() -> StoreHandle<Slice<Widget>, Action<Widget>> {
    Store::new(Slice::default(), reduce::<Widget>)
}

fn api_for(server: &MockServer) -> Api<Slice<Widget>, Action<Widget>> {
    let config = ApiConfig::new()
        .with_base_url(server.uri())
        .with_poll_interval(Duration::from_millis(10));
    Api::new(config, widget_store()).unwrap()
}

fn widget_json(id: u64, label: &str, status: &str) -> serde_json::Value {
    serde_json::json!({"id": id, "label": label, "status": status})
}

#[tokio::test]
async fn test_fetch_page_mirrors_into_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [widget_json(1, "a", "ready"), widget_json(2, "b", "ready")],
            "page": 1,
            "pages": 4,
            "results": 98,
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let page = api.fetch_page(&(), 1, route).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pages, 4);

    api.store().read(|slice| {
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.total_pages, 4);
        assert_eq!(slice.total_results, 98);
        assert_eq!(slice.record(&1).unwrap().label, "a");
    });
}

#[tokio::test]
async fn test_fetch_page_drops_ids_missing_from_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [widget_json(2, "kept", "ready")],
            "page": 1,
            "pages": 1,
            "results": 1,
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.store().dispatch(Action::Upsert {
        verb: Verb::One,
        record: Widget {
            id: 1,
            label: "stale".to_string(),
            status: "ready".to_string(),
        },
    });

    api.fetch_page(&(), 1, route).await.unwrap();

    api.store().read(|slice| {
        assert!(!slice.contains(&1));
        assert!(slice.contains(&2));
    });
}

#[tokio::test]
async fn test_fetch_item_upserts_with_polling_lowered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(7, "w", "ready")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let widget = api.fetch_item(&(), &7, route).await.unwrap();

    assert_eq!(widget.label, "w");
    api.store().read(|slice| {
        let tracked = slice.get(&7).unwrap();
        assert!(!tracked.polling);
        assert_eq!(tracked.record, widget);
    });
}

#[tokio::test]
async fn test_fetch_until_stops_when_predicate_holds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(7, "w", "creating")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(7, "w", "ready")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let widget = api
        .fetch_until(
            &(),
            &7,
            |w: &Widget| w.status == "ready",
            Duration::from_secs(5),
            route,
        )
        .await
        .unwrap();

    assert_eq!(widget.status, "ready");
    api.store().read(|slice| {
        assert!(!slice.get(&7).unwrap().polling);
        assert_eq!(slice.record(&7).unwrap().status, "ready");
    });
}

#[tokio::test]
async fn test_fetch_until_times_out_silently_with_last_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(7, "w", "creating")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let widget = api
        .fetch_until(
            &(),
            &7,
            |w: &Widget| w.status == "ready",
            Duration::from_millis(40),
            route,
        )
        .await
        .unwrap();

    // Deadline passed: the last observed record comes back as Ok.
    assert_eq!(widget.status, "creating");
}

#[tokio::test]
async fn test_fetch_until_propagates_probe_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets/7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "errors": [{"reason": "internal error"}]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .fetch_until(
            &(),
            &7,
            |w: &Widget| w.status == "ready",
            Duration::from_secs(5),
            route,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_create_caches_server_representation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(31, "srv-label", "creating")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let body = serde_json::json!({"label": "client-label"});
    let widget = api.create(&(), &body, route).await.unwrap();

    // The server's representation wins over the optimistic body.
    assert_eq!(widget.label, "srv-label");
    api.store()
        .read(|slice| assert_eq!(slice.record(&31).unwrap().label, "srv-label"));
}

#[tokio::test]
async fn test_update_caches_server_representation() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/widgets/31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(widget_json(31, "renamed", "ready")))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let body = serde_json::json!({"label": "renamed"});
    let widget = api.update(&(), &31, &body, route).await.unwrap();

    assert_eq!(widget.label, "renamed");
    api.store()
        .read(|slice| assert_eq!(slice.record(&31).unwrap().status, "ready"));
}

#[tokio::test]
async fn test_delete_evicts_record() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/widgets/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.store().dispatch(Action::Upsert {
        verb: Verb::One,
        record: Widget {
            id: 9,
            label: "doomed".to_string(),
            status: "ready".to_string(),
        },
    });

    api.delete(&(), &9, route).await.unwrap();
    api.store().read(|slice| assert!(!slice.contains(&9)));
}

#[tokio::test]
async fn test_failed_delete_keeps_record() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/widgets/9"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "errors": [{"reason": "busy"}]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    api.store().dispatch(Action::Upsert {
        verb: Verb::One,
        record: Widget {
            id: 9,
            label: "survivor".to_string(),
            status: "ready".to_string(),
        },
    });

    let err = api.delete(&(), &9, route).await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 500, .. }));
    api.store().read(|slice| assert!(slice.contains(&9)));
}

#[tokio::test]
async fn test_validation_errors_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [{"field": "label", "reason": "Label must be 3-32 characters"}]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let body = serde_json::json!({"label": "x"});
    let err = api.create(&(), &body, route).await.unwrap_err();

    match err {
        ApiError::Api { status, errors } => {
            assert_eq!(status, 400);
            assert_eq!(errors[0].field.as_deref(), Some("label"));
            assert_eq!(errors[0].reason, "Label must be 3-32 characters");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unsupported_verb_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    // No mocks mounted: a request would fail the test with a 404 from wiremock.

    let config = ApiConfig::new().with_base_url(server.uri());
    let store: StoreHandle<Slice<Snapshot>, Action<Snapshot>> =
        Store::new(Slice::default(), reduce::<Snapshot>);
    let api = Api::new(config, store).unwrap();

    let err = api
        .delete(&(), &1, |a: Action<Snapshot>| a)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Unsupported {
            verb: Verb::Delete,
            entity: "snapshots"
        }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[test]
fn test_reduce_outcome_surfaces_noops() {
    let store = widget_store();
    let outcome = store.dispatch(Action::Remove { id: 404 });
    assert_eq!(outcome, ReduceOutcome::Noop);
}
