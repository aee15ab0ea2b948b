//! End-to-end tests for the WebSocket board server.
//!
//! Each test starts a real listener on an ephemeral port with the board
//! pointed at a mockito upstream, then speaks to it with a tungstenite
//! client.

use futures_util::{SinkExt, StreamExt};
use mockito::Matcher;
use privat_rates::board::ExchangeBoard;
use privat_rates::server;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

const BOARD_BODY: &str = r#"[
    {"ccy":"EUR","base_ccy":"UAH","buy":"48.20000","sale":"49.20000"},
    {"ccy":"USD","base_ccy":"UAH","buy":"41.25000","sale":"41.85000"},
    {"ccy":"BTC","base_ccy":"USD","buy":"111650.0000","sale":"123402.0000"}
]"#;

async fn start_server(board_base: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let board = ExchangeBoard::with_base_url(reqwest::Client::new(), board_base);

    tokio::spawn(async move {
        server::run(listener, board).await.unwrap();
    });

    addr
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_text(ws: &mut WsStream) -> String {
    let frame = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timeout waiting for reply")
        .expect("stream closed")
        .expect("message error");
    match frame {
        Message::Text(text) => text.to_string(),
        other => panic!("expected text frame, got: {}", other),
    }
}

#[tokio::test]
async fn exchange_command_returns_the_board() {
    let mut upstream = mockito::Server::new_async().await;
    let _m = upstream
        .mock("GET", "/pubinfo")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(BOARD_BODY)
        .create_async()
        .await;

    let addr = start_server(upstream.url()).await;
    let (mut ws, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    ws.send(Message::Text(
        r#"{"type":"command","content":"exchange"}"#.into(),
    ))
    .await
    .unwrap();

    let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();

    assert_eq!(reply["type"], "exchange_data");
    let content = reply["content"].as_object().unwrap();
    assert_eq!(
        content.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
        ["EUR", "USD"]
    );
    assert_eq!(content["EUR"]["Buy"].as_f64().unwrap(), 48.2);
    assert_eq!(content["EUR"]["Sell"].as_f64().unwrap(), 49.2);
    assert_eq!(content["USD"]["Buy"].as_f64().unwrap(), 41.25);
    assert_eq!(content["USD"]["Sell"].as_f64().unwrap(), 41.85);
}

#[tokio::test]
async fn unknown_command_is_reported_in_an_error_envelope() {
    let addr = start_server("http://127.0.0.1:9".to_string()).await;
    let (mut ws, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    ws.send(Message::Text(
        r#"{"type":"command","content":"bogus"}"#.into(),
    ))
    .await
    .unwrap();

    let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();

    assert_eq!(reply["type"], "error");
    assert_eq!(reply["content"], "Unknown command: bogus");
}

#[tokio::test]
async fn upstream_failure_becomes_an_error_envelope() {
    let mut upstream = mockito::Server::new_async().await;
    let _m = upstream
        .mock("GET", "/pubinfo")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let addr = start_server(upstream.url()).await;
    let (mut ws, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    ws.send(Message::Text(
        r#"{"type":"command","content":"exchange"}"#.into(),
    ))
    .await
    .unwrap();

    let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();

    assert_eq!(reply["type"], "error");
    let content = reply["content"].as_str().unwrap();
    assert!(content.contains("HTTP 500"), "got: {}", content);
}

#[tokio::test]
async fn malformed_messages_get_no_reply_and_the_connection_stays_open() {
    let addr = start_server("http://127.0.0.1:9".to_string()).await;
    let (mut ws, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    for bad in [
        "not json",
        r#"{"foo":"bar"}"#,
        r#"{"type":"request","content":"exchange"}"#,
        r#"{"type":"command"}"#,
    ] {
        ws.send(Message::Text(bad.into())).await.unwrap();
    }

    let quiet = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(quiet.is_err(), "server must not reply to malformed messages");

    // the same connection still dispatches afterwards
    ws.send(Message::Text(
        r#"{"type":"command","content":"ping"}"#.into(),
    ))
    .await
    .unwrap();

    let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();

    assert_eq!(reply["content"], "Unknown command: ping");
}

#[tokio::test]
async fn each_command_fetches_a_fresh_board() {
    let mut upstream = mockito::Server::new_async().await;
    let m = upstream
        .mock("GET", "/pubinfo")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(BOARD_BODY)
        .expect(2)
        .create_async()
        .await;

    let addr = start_server(upstream.url()).await;
    let (mut ws, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    for _ in 0..2 {
        ws.send(Message::Text(
            r#"{"type":"command","content":"exchange"}"#.into(),
        ))
        .await
        .unwrap();

        let reply: Value = serde_json::from_str(&next_text(&mut ws).await).unwrap();
        assert_eq!(reply["type"], "exchange_data");
    }

    m.assert_async().await;
}

#[tokio::test]
async fn connections_are_served_concurrently() {
    let mut upstream = mockito::Server::new_async().await;
    let _m = upstream
        .mock("GET", "/pubinfo")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(BOARD_BODY)
        .create_async()
        .await;

    let addr = start_server(upstream.url()).await;
    let (mut first, _) = connect_async(format!("ws://{}", addr)).await.unwrap();
    let (mut second, _) = connect_async(format!("ws://{}", addr)).await.unwrap();

    // the second connection gets an answer while the first sits idle
    second
        .send(Message::Text(
            r#"{"type":"command","content":"exchange"}"#.into(),
        ))
        .await
        .unwrap();
    let reply: Value = serde_json::from_str(&next_text(&mut second).await).unwrap();
    assert_eq!(reply["type"], "exchange_data");

    first
        .send(Message::Text(
            r#"{"type":"command","content":"exchange"}"#.into(),
        ))
        .await
        .unwrap();
    let reply: Value = serde_json::from_str(&next_text(&mut first).await).unwrap();
    assert_eq!(reply["type"], "exchange_data");
}
