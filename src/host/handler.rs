//! Routes MCP methods to the tool dispatcher.

use serde_json::{Value, json};

use crate::host::contract::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, McpMethod,
    PROTOCOL_VERSION, RpcRequest, RpcResponse, SERVER_NAME,
};
use crate::tools::{ToolCallRequest, ToolDispatcher};

/// Answers protocol requests using an owned [`ToolDispatcher`].
#[derive(Debug)]
pub struct McpHandler {
    dispatcher: ToolDispatcher,
}

impl McpHandler {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        };
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(RpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match McpMethod::parse(&request.method) {
            Some(McpMethod::Initialize) => RpcResponse::ok(id, initialize_result()),
            Some(McpMethod::Ping) => RpcResponse::ok(id, json!({})),
            Some(McpMethod::ToolsList) => {
                match serde_json::to_value(self.dispatcher.list_tools()) {
                    Ok(tools) => RpcResponse::ok(id, json!({ "tools": tools })),
                    Err(e) => RpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
                }
            }
            Some(McpMethod::ToolsCall) => match parse_call_params(request.params) {
                Ok(call) => {
                    let response = self.dispatcher.call_tool(call).await;
                    match serde_json::to_value(response) {
                        Ok(result) => RpcResponse::ok(id, result),
                        Err(e) => RpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
                    }
                }
                Err(message) => RpcResponse::error(id, INVALID_PARAMS, message),
            },
            Some(McpMethod::Initialized) | None => {
                tracing::debug!(method = %request.method, "unsupported method");
                RpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("method not found: {}", request.method),
                )
            }
        };
        Some(response)
    }

    /// Shut down the dispatcher and its searcher.
    pub fn shutdown(self) {
        self.dispatcher.shutdown();
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

fn parse_call_params(params: Option<Value>) -> Result<ToolCallRequest, String> {
    let params = params.ok_or_else(|| "tools/call requires params".to_owned())?;
    serde_json::from_value(params).map_err(|e| format!("invalid tools/call params: {e}"))
}
