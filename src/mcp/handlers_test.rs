use std::sync::Arc;

use serde_json::json;

use super::handlers::HandlerSet;
use super::protocol::methods;
use crate::tmdb::stub::{StubMovieDb, two_movies};

fn handler_set() -> HandlerSet {
    HandlerSet::new(Arc::new(StubMovieDb::with_movies(two_movies())))
}

#[test]
fn test_table_registers_one_handler_per_request_kind() {
    let handlers = handler_set();
    assert_eq!(handlers.len(), 4);
    for method in [
        methods::RESOURCES_LIST,
        methods::RESOURCES_READ,
        methods::TOOLS_LIST,
        methods::TOOLS_CALL,
    ] {
        assert!(handlers.contains(method), "missing handler for {method}");
    }
}

#[test]
fn test_unregistered_method_has_no_handler() {
    let handlers = handler_set();
    assert!(handlers.dispatch("prompts/list", None).is_none());
    assert!(handlers.dispatch(methods::INITIALIZE, None).is_none());
}

#[tokio::test]
async fn test_dispatch_list_resources() {
    let handlers = handler_set();

    let value = handlers
        .dispatch(methods::RESOURCES_LIST, None)
        .unwrap()
        .await
        .unwrap();
    assert_eq!(value["resources"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dispatch_accepts_explicit_params() {
    let handlers = handler_set();

    let value = handlers
        .dispatch(methods::RESOURCES_LIST, Some(json!({"cursor": "1"})))
        .unwrap()
        .await
        .unwrap();
    assert_eq!(value["resources"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dispatch_rejects_malformed_params() {
    let handlers = handler_set();

    // resources/read requires a uri.
    let result = handlers
        .dispatch(methods::RESOURCES_READ, Some(json!({})))
        .unwrap()
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_tool_call_errors_stay_inside_the_envelope() {
    let handlers = HandlerSet::new(Arc::new(StubMovieDb::failing()));

    let value = handlers
        .dispatch(
            methods::TOOLS_CALL,
            Some(json!({"name": "search_movies", "arguments": {"query": "a"}})),
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(value["isError"], json!(true));
    assert!(
        value["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Error: ")
    );
}

#[tokio::test]
async fn test_table_is_shared_not_copied() {
    let handlers = Arc::new(handler_set());

    let a = super::server::ProtocolServer::new(Arc::clone(&handlers));
    let b = super::server::ProtocolServer::new(Arc::clone(&handlers));
    assert!(Arc::ptr_eq(a.handlers(), b.handlers()));
}
