//! Line-delimited JSON-RPC server exposing the dispatch core over stdio.
//!
//! One request per line in, one response per line out. Only a failed
//! dispatch (unknown agent, remote-call failure) becomes a protocol
//! error; local process failures arrive inside a normal `reply`, because
//! the executors already turned them into text.

use crate::agents::builder::Dispatcher;
use crate::agents::session::Session;
use crate::error::{RelayError, Result};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

/// What the serve command hands over: one plain session, or a built
/// dispatcher. Always passed in explicitly; the server holds no globals.
pub enum ServeHandle {
    Single(Session),
    Multi(Dispatcher),
}

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;
const UPSTREAM_FAILED: i64 = -32000;
const AGENT_NOT_FOUND: i64 = -32001;

pub struct StdioServer {
    handle: ServeHandle,
    verbose: bool,
}

impl StdioServer {
    pub fn new(handle: ServeHandle, verbose: bool) -> Self {
        Self { handle, verbose }
    }

    /// Serve requests until the input stream closes.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line);
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Value {
        let request: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return error_response(Value::Null, PARSE_ERROR, &e.to_string()),
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let Some(method) = request.get("method").and_then(Value::as_str) else {
            return error_response(id, INVALID_REQUEST, "missing method");
        };

        match method {
            "agents" => ok_response(id, json!({ "agents": self.names() })),
            "chat" => self.handle_chat(id, request.get("params")),
            other => {
                error_response(id, METHOD_NOT_FOUND, &format!("unknown method: {}", other))
            }
        }
    }

    fn handle_chat(&mut self, id: Value, params: Option<&Value>) -> Value {
        let Some(prompt) = params
            .and_then(|p| p.get("prompt"))
            .and_then(Value::as_str)
        else {
            return error_response(id, INVALID_PARAMS, "missing prompt");
        };
        let agent = params.and_then(|p| p.get("agent")).and_then(Value::as_str);

        if self.verbose {
            eprintln!("chat -> {}", agent.unwrap_or("(auto)"));
        }

        let result = match &mut self.handle {
            ServeHandle::Single(session) => session.ask(prompt),
            ServeHandle::Multi(Dispatcher::Orchestrated(orchestrator)) => {
                orchestrator.ask(prompt)
            }
            ServeHandle::Multi(Dispatcher::Registry(registry)) => match agent {
                Some(name) => registry.dispatch(prompt, name),
                None => {
                    return error_response(
                        id,
                        INVALID_PARAMS,
                        "chat against a registry requires an agent name",
                    )
                }
            },
        };

        match result {
            Ok(reply) => ok_response(id, json!({ "reply": reply })),
            Err(RelayError::AgentNotFound(name)) => error_response(
                id,
                AGENT_NOT_FOUND,
                &format!("agent not found: {}", name),
            ),
            Err(err) => error_response(id, UPSTREAM_FAILED, &err.to_string()),
        }
    }

    fn names(&self) -> Vec<String> {
        match &self.handle {
            ServeHandle::Single(_) => Vec::new(),
            ServeHandle::Multi(Dispatcher::Registry(registry)) => registry.names(),
            ServeHandle::Multi(Dispatcher::Orchestrated(orchestrator)) => orchestrator.options(),
        }
    }
}

fn ok_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::executor::{Executor, RecordingExecutor};
    use crate::agents::registry::Registry;
    use std::io::Cursor;

    fn registry_server() -> StdioServer {
        let mut registry = Registry::new();
        registry.insert(
            "a",
            Session::new(Executor::Recording(RecordingExecutor::replying("a-reply"))),
            Some("first".to_string()),
        );
        registry.insert(
            "b",
            Session::new(Executor::Recording(RecordingExecutor::replying("b-reply"))),
            None,
        );
        StdioServer::new(ServeHandle::Multi(Dispatcher::Registry(registry)), false)
    }

    #[test]
    fn test_chat_dispatches_and_replies() {
        let mut server = registry_server();
        let response = server.handle_line(
            r#"{"jsonrpc":"2.0","id":1,"method":"chat","params":{"prompt":"hi","agent":"a"}}"#,
        );
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["reply"], "a-reply");
    }

    #[test]
    fn test_unknown_agent_is_a_protocol_error() {
        let mut server = registry_server();
        let response = server.handle_line(
            r#"{"jsonrpc":"2.0","id":2,"method":"chat","params":{"prompt":"hi","agent":"zz"}}"#,
        );
        assert_eq!(response["error"]["code"], AGENT_NOT_FOUND);
    }

    #[test]
    fn test_registry_chat_requires_an_agent() {
        let mut server = registry_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"chat","params":{"prompt":"hi"}}"#);
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_agents_listing() {
        let mut server = registry_server();
        let response = server.handle_line(r#"{"jsonrpc":"2.0","id":4,"method":"agents"}"#);
        assert_eq!(response["result"]["agents"], json!(["a", "b"]));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let mut server = registry_server();
        let response = server.handle_line("{not json");
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[test]
    fn test_unknown_method() {
        let mut server = registry_server();
        let response = server.handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"reboot"}"#);
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[test]
    fn test_run_answers_line_by_line() {
        let mut server = registry_server();
        let input = Cursor::new(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"agents\"}\n\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"chat\",\"params\":{\"prompt\":\"hi\",\"agent\":\"b\"}}\n",
        );
        let mut output = Vec::new();

        server.run(input, &mut output).unwrap();

        let lines: Vec<&str> = std::str::from_utf8(&output)
            .unwrap()
            .lines()
            .collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["result"]["agents"], json!(["a", "b"]));

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["result"]["reply"], "b-reply");
    }

    #[test]
    fn test_single_session_ignores_agent_param() {
        let session = Session::new(Executor::Recording(RecordingExecutor::replying("solo")));
        let mut server = StdioServer::new(ServeHandle::Single(session), false);

        let response = server.handle_line(
            r#"{"jsonrpc":"2.0","id":1,"method":"chat","params":{"prompt":"hi","agent":"whatever"}}"#,
        );
        assert_eq!(response["result"]["reply"], "solo");
    }
}
