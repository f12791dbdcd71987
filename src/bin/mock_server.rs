//! Mock MCP server binary for integration testing
//!
//! Implements just enough of the line-delimited MCP surface (initialize,
//! tools/list, tools/call for `ping` and `web_search`) to exercise the
//! probe without a real server.
//!
//! Failure modes, selected with `MOCK_SERVER_MODE`:
//! - `mute`: reads requests but never answers and never exits, forcing
//!   the probe's drain timeout and kill path.
//! - `quit`: answers normally, then exits abruptly on the fifth request
//!   without answering it, simulating a crash right after the script.

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};

fn main() {
    let mode = std::env::var("MOCK_SERVER_MODE").unwrap_or_default();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();

    let mut requests_seen = 0u32;
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => break,
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(_) => continue,
        };
        requests_seen += 1;

        match mode.as_str() {
            "mute" => continue,
            "quit" if requests_seen >= 5 => return,
            _ => {}
        }

        let response = respond(&request);
        if let Ok(body) = serde_json::to_string(&response) {
            let _ = writeln!(writer, "{body}");
            let _ = writer.flush();
        }
    }

    // A mute server must also outlive stdin closing, otherwise the
    // probe's kill path is never reached.
    if mode == "mute" {
        loop {
            std::thread::sleep(std::time::Duration::from_secs(60));
        }
    }
}

fn respond(request: &Value) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");

    match method {
        "initialize" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "mock-server", "version": "0.1.0" },
            },
        }),
        "tools/list" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "tools": [
                    {
                        "name": "ping",
                        "description": "Liveness check",
                        "inputSchema": { "type": "object", "properties": {} },
                    },
                    {
                        "name": "web_search",
                        "description": "Search the web",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "query": { "type": "string" },
                                "search_intent": { "type": "boolean" },
                            },
                            "required": ["query"],
                        },
                    },
                ],
            },
        }),
        "tools/call" => call_tool(id, request),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "Method not found" },
        }),
    }
}

fn call_tool(id: Value, request: &Value) -> Value {
    let params = &request["params"];
    let name = params["name"].as_str().unwrap_or("");

    let text = match name {
        "ping" => "pong".to_string(),
        "web_search" => {
            let query = params["arguments"]["query"].as_str().unwrap_or("");
            let intent = params["arguments"]["search_intent"]
                .as_bool()
                .unwrap_or(false);
            format!("Results for '{query}' (search_intent: {intent})")
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32602, "message": format!("Unknown tool: {name}") },
            });
        }
    };

    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "content": [{ "type": "text", "text": text }],
        },
    })
}
