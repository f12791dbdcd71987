//! The fixed request script sent to the server
//!
//! Five JSON-RPC 2.0 requests exercising initialization, tool discovery,
//! a ping liveness probe, and the `web_search` tool with intent analysis
//! off and on. The script is built once at startup and never mutated.

use serde::Serialize;
use serde_json::{json, Value};

/// MCP protocol version advertised in the initialize request
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// One scripted JSON-RPC request.
///
/// Serializes to the compact wire envelope; the label is console-only.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptedMessage {
    jsonrpc: &'static str,
    pub id: i64,
    pub method: &'static str,
    pub params: Value,
    /// Step banner shown before the message is sent
    #[serde(skip)]
    pub label: String,
}

impl ScriptedMessage {
    fn new(id: i64, method: &'static str, params: Value, label: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
            label: label.into(),
        }
    }

    /// Serialize to a single compact line (no trailing newline)
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Build the fixed five-message script for the given search query
pub fn script(query: &str) -> Vec<ScriptedMessage> {
    vec![
        ScriptedMessage::new(
            1,
            "initialize",
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
            "Initializing",
        ),
        ScriptedMessage::new(2, "tools/list", json!({}), "Listing tools"),
        ScriptedMessage::new(
            3,
            "tools/call",
            json!({
                "name": "ping",
                "arguments": {},
            }),
            "Testing ping",
        ),
        ScriptedMessage::new(
            4,
            "tools/call",
            json!({
                "name": "web_search",
                "arguments": {
                    "query": query,
                    "search_intent": false,
                },
            }),
            format!("Testing web search with query: '{query}'"),
        ),
        ScriptedMessage::new(
            5,
            "tools/call",
            json!({
                "name": "web_search",
                "arguments": {
                    "query": query,
                    "search_intent": true,
                },
            }),
            "Testing web search with intent analysis",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn ids_are_one_through_five_in_order() {
        let script = script("anything");
        let ids: Vec<i64> = script.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn lines_are_single_line_json_rpc() {
        for msg in script("rust async") {
            let line = msg.to_line().unwrap();
            assert!(!line.contains('\n'));

            let value: Value = serde_json::from_str(&line).unwrap();
            assert_eq!(value["jsonrpc"], "2.0");
            assert_eq!(value["id"], msg.id);
            assert_eq!(value["method"], msg.method);
            assert!(value["params"].is_object());
        }
    }

    #[test]
    fn methods_follow_the_fixed_sequence() {
        let methods: Vec<&str> = script("q").iter().map(|m| m.method).collect();
        assert_eq!(
            methods,
            vec!["initialize", "tools/list", "tools/call", "tools/call", "tools/call"]
        );
    }

    #[test]
    fn initialize_carries_protocol_version_and_client_info() {
        let script = script("q");
        let init: Value = serde_json::from_str(&script[0].to_line().unwrap()).unwrap();
        assert_eq!(init["params"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(init["params"]["clientInfo"]["name"], "mcp-probe");
        assert!(init["params"]["capabilities"].as_object().unwrap().is_empty());
    }

    #[test]
    fn search_messages_differ_only_in_intent_flag() {
        let script = script("Go programming tutorial");

        let plain: Value = serde_json::from_str(&script[3].to_line().unwrap()).unwrap();
        let intent: Value = serde_json::from_str(&script[4].to_line().unwrap()).unwrap();

        for msg in [&plain, &intent] {
            assert_eq!(msg["params"]["name"], "web_search");
            assert_eq!(
                msg["params"]["arguments"]["query"],
                "Go programming tutorial"
            );
        }
        assert_eq!(plain["params"]["arguments"]["search_intent"], false);
        assert_eq!(intent["params"]["arguments"]["search_intent"], true);
    }

    #[test]
    fn ping_call_has_empty_arguments() {
        let script = script("q");
        let ping: Value = serde_json::from_str(&script[2].to_line().unwrap()).unwrap();
        assert_eq!(ping["params"]["name"], "ping");
        assert!(ping["params"]["arguments"].as_object().unwrap().is_empty());
    }
}
