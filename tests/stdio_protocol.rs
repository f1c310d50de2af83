//! Protocol tests for the stdio server, driven in-process over a duplex pipe.
//!
//! Each test writes newline-delimited JSON-RPC frames into the server, closes
//! the input and collects every response frame written before shutdown.

use std::time::Duration;

use mcp_web_search::host::contract::{
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use mcp_web_search::host::serve;
use mcp_web_search::{McpHandler, ToolDispatcher};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use web_search::{SearchConfig, Searcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn handler_for(api_base: &str) -> McpHandler {
    let config = SearchConfig {
        instant_answer_endpoint: format!("{api_base}/api/"),
        html_endpoint: format!("{api_base}/html/"),
        timeout_seconds: 5,
        ..Default::default()
    };
    let searcher = Searcher::new(config).expect("searcher");
    McpHandler::new(ToolDispatcher::new(searcher, Duration::from_secs(10)))
}

fn offline_handler() -> McpHandler {
    handler_for("http://127.0.0.1:9")
}

/// Feed `frames` to a fresh server and return every response, in write order.
async fn exchange(handler: McpHandler, frames: &[Value]) -> Vec<Value> {
    let (client, server) = tokio::io::duplex(256 * 1024);
    let (server_read, server_write) = tokio::io::split(server);
    let (mut client_read, mut client_write) = tokio::io::split(client);

    let server_task = tokio::spawn(serve(server_read, server_write, handler));

    for frame in frames {
        let line = format!("{frame}\n");
        client_write.write_all(line.as_bytes()).await.expect("write frame");
    }
    client_write.shutdown().await.expect("close input");

    let mut output = String::new();
    client_read
        .read_to_string(&mut output)
        .await
        .expect("read output");
    server_task
        .await
        .expect("server task")
        .expect("server result");

    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("response is JSON"))
        .collect()
}

fn request(id: i64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

fn by_id(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no response with id {id} in {responses:?}"))
}

#[tokio::test]
async fn initialize_handshake() {
    let responses = exchange(
        offline_handler(),
        &[
            request(1, "initialize", json!({"protocolVersion": PROTOCOL_VERSION, "capabilities": {}})),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            request(2, "ping", json!({})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2, "notifications get no response");
    let init = by_id(&responses, 1);
    assert_eq!(init["result"]["protocolVersion"], PROTOCOL_VERSION);
    assert!(init["result"]["capabilities"]["tools"].is_object());
    assert_eq!(init["result"]["serverInfo"]["name"], "mcp-web-search");
    assert_eq!(by_id(&responses, 2)["result"], json!({}));
}

#[tokio::test]
async fn tools_list_exposes_schemas() {
    let responses = exchange(offline_handler(), &[request(1, "tools/list", json!({}))]).await;
    let tools = responses[0]["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "web_search");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["query"]));
    assert_eq!(tools[1]["name"], "get_webpage_content");
    assert_eq!(tools[1]["inputSchema"]["required"], json!(["url"]));
}

#[tokio::test]
async fn protocol_errors() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server);
    let (mut client_read, mut client_write) = tokio::io::split(client);
    let server_task = tokio::spawn(serve(server_read, server_write, offline_handler()));

    let input = concat!(
        "this is not json\n",
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"resources/list\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"tools/call\",\"params\":{\"arguments\":{}}}\n",
        "{\"jsonrpc\":\"1.0\",\"id\":4,\"method\":\"ping\"}\n",
    );
    client_write.write_all(input.as_bytes()).await.expect("write");
    client_write.shutdown().await.expect("close input");

    let mut output = String::new();
    client_read.read_to_string(&mut output).await.expect("read");
    server_task.await.expect("task").expect("serve");

    let responses: Vec<Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).expect("json"))
        .collect();
    assert_eq!(responses.len(), 5);

    let parse = responses
        .iter()
        .find(|r| r["id"].is_null())
        .expect("parse error response");
    assert_eq!(parse["error"]["code"], PARSE_ERROR);
    assert_eq!(by_id(&responses, 1)["error"]["code"], METHOD_NOT_FOUND);
    assert_eq!(by_id(&responses, 2)["error"]["code"], INVALID_PARAMS);
    assert_eq!(by_id(&responses, 3)["error"]["code"], INVALID_PARAMS);
    assert_eq!(by_id(&responses, 4)["error"]["code"], INVALID_REQUEST);
}

#[tokio::test]
async fn unknown_tool_is_a_result_not_an_error() {
    let responses = exchange(
        offline_handler(),
        &[request(
            7,
            "tools/call",
            json!({"name": "bogus_tool", "arguments": {}}),
        )],
    )
    .await;
    let response = by_id(&responses, 7);
    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"]["content"],
        json!([{"type": "text", "text": "unknown tool: bogus_tool"}])
    );
}

#[tokio::test]
async fn concurrent_tool_calls_all_answered_before_shutdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>slow page</body></html>", "text/html")
                .set_delay(Duration::from_millis(800)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>fast page</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let responses = exchange(
        handler_for(&server.uri()),
        &[
            request(
                1,
                "tools/call",
                json!({"name": "get_webpage_content", "arguments": {"url": format!("{}/slow", server.uri())}}),
            ),
            request(
                2,
                "tools/call",
                json!({"name": "get_webpage_content", "arguments": {"url": format!("{}/fast", server.uri())}}),
            ),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    // The slow call was issued first but finishes last.
    assert_eq!(responses[0]["id"], 2);
    assert_eq!(
        by_id(&responses, 1)["result"]["content"][0]["text"],
        "slow page"
    );
    assert_eq!(
        by_id(&responses, 2)["result"]["content"][0]["text"],
        "fast page"
    );
}
