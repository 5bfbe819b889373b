use serde_json::json;

use super::protocol::{
    CallToolResult, Content, JsonRpcRequest, JsonRpcResponse, ListResourcesResult, RequestId,
    Resource, error_codes,
};

#[test]
fn test_numeric_id_round_trips() {
    let request: JsonRpcRequest =
        serde_json::from_value(json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"}))
            .unwrap();
    assert_eq!(request.id, Some(RequestId::Number(7)));

    let response = JsonRpcResponse::result(request.id.unwrap(), json!({}));
    let encoded = serde_json::to_value(&response).unwrap();
    assert_eq!(encoded["id"], json!(7));
}

#[test]
fn test_string_id_round_trips() {
    let request: JsonRpcRequest = serde_json::from_value(
        json!({"jsonrpc": "2.0", "id": "abc-123", "method": "tools/list"}),
    )
    .unwrap();
    assert_eq!(request.id, Some(RequestId::String("abc-123".to_string())));

    let encoded =
        serde_json::to_value(JsonRpcResponse::result(request.id.unwrap(), json!({}))).unwrap();
    assert_eq!(encoded["id"], json!("abc-123"));
}

#[test]
fn test_request_without_id_is_a_notification() {
    let request: JsonRpcRequest = serde_json::from_value(
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .unwrap();
    assert!(request.id.is_none());
    assert!(request.params.is_none());
}

#[test]
fn test_error_response_shape() {
    let response = JsonRpcResponse::error(
        RequestId::Number(1),
        error_codes::METHOD_NOT_FOUND,
        "method not found: nope",
    );
    let encoded = serde_json::to_value(&response).unwrap();

    assert_eq!(encoded["error"]["code"], json!(-32601));
    assert!(encoded.get("result").is_none());
}

#[test]
fn test_result_response_omits_error_field() {
    let encoded =
        serde_json::to_value(JsonRpcResponse::result(RequestId::Number(1), json!({"ok": true})))
            .unwrap();
    assert!(encoded.get("error").is_none());
    assert_eq!(encoded["result"]["ok"], json!(true));
}

#[test]
fn test_listing_serializes_camel_case_and_skips_absent_cursor() {
    let result = ListResourcesResult {
        resources: vec![Resource {
            uri: "tmdb:///movie/1".to_string(),
            mime_type: "application/json".to_string(),
            name: "A (2020)".to_string(),
        }],
        next_cursor: None,
    };
    let encoded = serde_json::to_value(&result).unwrap();

    assert_eq!(encoded["resources"][0]["mimeType"], json!("application/json"));
    assert!(encoded.get("nextCursor").is_none());

    let with_cursor = ListResourcesResult {
        next_cursor: Some("2".to_string()),
        ..result
    };
    let encoded = serde_json::to_value(&with_cursor).unwrap();
    assert_eq!(encoded["nextCursor"], json!("2"));
}

#[test]
fn test_tool_result_wire_shape() {
    let result = CallToolResult {
        content: vec![Content::text("Error: boom")],
        is_error: true,
    };
    let encoded = serde_json::to_value(&result).unwrap();

    assert_eq!(encoded["isError"], json!(true));
    assert_eq!(encoded["content"][0]["type"], json!("text"));
    assert_eq!(encoded["content"][0]["text"], json!("Error: boom"));
}
