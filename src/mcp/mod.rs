//! MCP (Model Context Protocol) server: line-delimited JSON-RPC over stdio.
//!
//! Exposes tools: analyze_code, analyze_file.

use crate::analyzer::AnalysisEngine;
use crate::config::load_config;
use crate::{CodeSubmission, Language};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// MCP JSON-RPC request
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,
    pub id: Option<serde_json::Value>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Failures reported back to the client as `isError` tool results
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error(transparent)]
    Analysis(#[from] anyhow::Error),
}

/// Tool definition for MCP tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDef {
    name: &'static str,
    description: &'static str,
    input_schema: InputSchema,
}

#[derive(Debug, Serialize)]
struct InputSchema {
    #[serde(rename = "type")]
    typ: &'static str,
    properties: serde_json::Value,
    required: Vec<&'static str>,
}

fn tool_definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "analyze_code",
            description: "Score a code snippet and return strengths, suggestions, complexity, readability and best practices",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({
                    "code": { "type": "string", "description": "Code to analyze" },
                    "language": { "type": "string", "description": "Language identifier, e.g. python or javascript" },
                    "title": { "type": "string", "description": "Challenge title (context only)" }
                }),
                required: vec!["code", "language"],
            },
        },
        ToolDef {
            name: "analyze_file",
            description: "Analyze a code file on disk and return its report and line statistics",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({
                    "file": { "type": "string", "description": "Path to the code file" },
                    "language": { "type": "string", "description": "Force a language instead of detecting it from the extension" }
                }),
                required: vec!["file"],
            },
        },
    ]
}

/// Handle a single JSON-RPC request and return a response.
pub fn handle_request(req: &JsonRpcRequest) -> JsonRpcResponse {
    let id = req.id.clone();
    let result = match req.method.as_str() {
        "initialize" => Some(serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "codecritic", "version": env!("CARGO_PKG_VERSION") }
        })),
        "tools/list" => Some(serde_json::json!({ "tools": tool_definitions() })),
        "tools/call" => {
            let (name, args) = req
                .params
                .as_ref()
                .and_then(|p| p.get("params").or(Some(p)))
                .map(|p| {
                    let name = p.get("name").and_then(|n| n.as_str()).unwrap_or("");
                    let args = p
                        .get("arguments")
                        .and_then(|a| a.as_object())
                        .cloned()
                        .unwrap_or_default();
                    (name, args)
                })
                .unwrap_or(("", serde_json::Map::new()));

            tracing::debug!(tool = name, "tools/call");
            let result = match name {
                "analyze_code" => run_analyze_code(&args),
                "analyze_file" => run_analyze_file(&args),
                _ => Err(ToolError::UnknownTool(name.to_string())),
            };

            match result {
                Ok(val) => Some(serde_json::json!({
                    "content": [{ "type": "text", "text": serde_json::to_string(&val).unwrap_or_else(|_| "{}".to_string()) }]
                })),
                Err(e) => Some(serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {}", e) }],
                    "isError": true
                })),
            }
        }
        _ => None,
    };

    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result,
        error: None,
    }
}

/// Response to send back, if any. Notifications (requests without an id) get none.
pub fn respond(req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    req.id.as_ref()?;
    Some(handle_request(req))
}

/// Run the MCP server loop (stdin / stdout).
pub fn run_mcp_server() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());

    tracing::info!("tool server listening on stdio");
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed request");
                continue;
            }
        };

        let Some(response) = respond(&req) else {
            tracing::debug!(method = %req.method, "notification, no reply");
            continue;
        };
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

type Arguments = serde_json::Map<String, serde_json::Value>;

fn string_arg<'a>(args: &'a Arguments, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

fn run_analyze_code(args: &Arguments) -> Result<serde_json::Value, ToolError> {
    let code = string_arg(args, "code").ok_or(ToolError::MissingArgument("code"))?;
    let language = string_arg(args, "language").ok_or(ToolError::MissingArgument("language"))?;
    let title = string_arg(args, "title").unwrap_or("");

    let submission = CodeSubmission::new(code, language).with_title(title);
    let report = AnalysisEngine::new().analyze(&submission);
    serde_json::to_value(report).map_err(|e| ToolError::Analysis(e.into()))
}

fn run_analyze_file(args: &Arguments) -> Result<serde_json::Value, ToolError> {
    let file = string_arg(args, "file").ok_or(ToolError::MissingArgument("file"))?;
    let path = Path::new(file);
    if !path.is_file() {
        return Err(ToolError::FileNotFound(file.to_string()));
    }

    let mut engine = AnalysisEngine::new();
    if let Some(language) = string_arg(args, "language") {
        engine = engine.with_language(Language::from_identifier(language));
    }
    let work_dir = path.parent().unwrap_or(Path::new("."));
    let config = load_config(work_dir, None).ok();

    let result = engine.analyze_file(path, config.as_ref())?;
    serde_json::to_value(result).map_err(|e| ToolError::Analysis(e.into()))
}
