//! Integration tests for the MCP server public API.
//! Exercises handle_request from outside the crate (initialize, tools/list, tools/call).

use codecritic::mcp::{handle_request, respond, JsonRpcRequest};
use serde_json::json;

fn make_request(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: Some("2.0".to_string()),
        id: Some(json!(1)),
        method: method.to_string(),
        params,
    }
}

fn tool_call(name: &str, arguments: serde_json::Value) -> serde_json::Value {
    let req = make_request(
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    );
    let resp = handle_request(&req);
    assert!(resp.error.is_none());
    resp.result.expect("expected result")
}

fn call_text(result: &serde_json::Value) -> &str {
    result["content"][0]["text"].as_str().expect("text content")
}

#[test]
fn mcp_initialize_returns_protocol_and_server_info() {
    let resp = handle_request(&make_request("initialize", None));

    assert_eq!(resp.jsonrpc, "2.0");
    assert!(resp.error.is_none());
    let result = resp.result.expect("expected result");
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "codecritic");
    assert!(result["serverInfo"]["version"].as_str().is_some());
}

#[test]
fn mcp_tools_list_returns_all_tools() {
    let resp = handle_request(&make_request("tools/list", None));
    let result = resp.result.expect("expected result");
    let tools = result["tools"].as_array().expect("tools array");
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["analyze_code", "analyze_file"]);
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["code", "language"]));
}

#[test]
fn mcp_analyze_code_matches_library() {
    let code = std::fs::read_to_string("test-repos/snippets/two_sum.py").unwrap();
    let result = tool_call(
        "analyze_code",
        json!({ "code": code, "language": "python", "title": "Two Sum" }),
    );
    assert!(result.get("isError").is_none());

    let report: codecritic::AnalysisReport = serde_json::from_str(call_text(&result)).unwrap();
    assert_eq!(report, codecritic::analyze(&code, "python", ""));
}

#[test]
fn mcp_analyze_code_missing_code() {
    let result = tool_call("analyze_code", json!({ "language": "python" }));
    assert_eq!(result["isError"], true);
    assert_eq!(call_text(&result), "Error: Missing required argument: code");
}

#[test]
fn mcp_analyze_file_fixture() {
    let result = tool_call(
        "analyze_file",
        json!({ "file": "test-repos/snippets/fizzbuzz.py" }),
    );
    let parsed: serde_json::Value = serde_json::from_str(call_text(&result)).unwrap();
    assert_eq!(parsed["language"], "python");
    assert_eq!(parsed["stats"]["complexityIndicators"], 5);
    assert_eq!(parsed["report"]["quality_score"], 70);
    assert_eq!(parsed["report"]["complexity"], "high");
}

#[test]
fn mcp_analyze_file_language_argument() {
    let result = tool_call(
        "analyze_file",
        json!({ "file": "test-repos/snippets/two_sum.py", "language": "java" }),
    );
    let parsed: serde_json::Value = serde_json::from_str(call_text(&result)).unwrap();
    assert_eq!(parsed["language"], "java");
    assert_eq!(parsed["report"]["quality_score"], 70);
}

#[test]
fn mcp_analyze_file_missing_argument() {
    let result = tool_call("analyze_file", json!({}));
    assert_eq!(result["isError"], true);
    assert!(call_text(&result).contains("Missing required argument: file"));
}

#[test]
fn mcp_unknown_tool() {
    let result = tool_call("refactor_code", json!({}));
    assert_eq!(result["isError"], true);
    assert_eq!(call_text(&result), "Error: Unknown tool: refactor_code");
}

#[test]
fn mcp_notification_without_id_is_not_answered() {
    let req: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
    assert!(respond(&req).is_none());
}
