//! Exercises the client against a local mock of the reply endpoint.

use std::time::Duration;

use serde_json::json;
use vida_assistant::{
    MemoryStore, ReplyContext, ReplyError, ReplyOrigin, ReplyRequest, ReplySource, Responder,
    RuleSet, Transcript,
};
use vida_remote::{ReplyClient, ReplyClientError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_replying(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> ReplyClient {
    ReplyClient::new(format!("{}/api/chat", server.uri()))
}

#[tokio::test]
async fn posts_message_and_context() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "message": "Quiero afiliarme",
            "context": { "intent": "sitio_web_vida" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "¡Bienvenido!" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = ReplyRequest::new("Quiero afiliarme");
    request.context = Some(ReplyContext::new("sitio_web_vida"));

    let reply = client_for(&server).fetch_reply(&request).await.unwrap();

    assert_eq!(reply, "¡Bienvenido!");
}

#[tokio::test]
async fn non_success_status() {
    let server = server_replying(ResponseTemplate::new(500)).await;

    let err = client_for(&server)
        .post(&ReplyRequest::new("hola"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReplyClientError::Status { status: 500 }));
}

#[tokio::test]
async fn missing_reply_field() {
    let server =
        server_replying(ResponseTemplate::new(200).set_body_json(json!({ "ok": true }))).await;

    let err = client_for(&server)
        .fetch_reply(&ReplyRequest::new("hola"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReplyError::MissingReply));
}

#[tokio::test]
async fn empty_reply_field() {
    let server =
        server_replying(ResponseTemplate::new(200).set_body_json(json!({ "reply": "" }))).await;

    let err = client_for(&server)
        .fetch_reply(&ReplyRequest::new("hola"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReplyError::MissingReply));
}

#[tokio::test]
async fn malformed_body() {
    let server =
        server_replying(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let err = client_for(&server)
        .post(&ReplyRequest::new("hola"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReplyClientError::Json(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ReplyClient::new(format!("http://{addr}/api/chat"));

    let err = client
        .fetch_reply(&ReplyRequest::new("hola"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReplyError::Transport(_)));
}

#[tokio::test]
async fn responder_uses_remote_reply() {
    let server = server_replying(
        ResponseTemplate::new(200).set_body_json(json!({ "reply": "Respuesta del servidor" })),
    )
    .await;
    let transcript = Transcript::restore(MemoryStore::new());
    let mut responder = Responder::with_remote(transcript, client_for(&server));

    let exchange = responder.send("hola").await.unwrap();

    assert_eq!(exchange.origin, ReplyOrigin::Remote);
    assert_eq!(exchange.reply.content, "Respuesta del servidor");
}

#[tokio::test]
async fn responder_falls_back_on_server_error() {
    let server = server_replying(ResponseTemplate::new(503)).await;
    let transcript = Transcript::restore(MemoryStore::new());
    let mut responder = Responder::with_remote(transcript, client_for(&server));
    let input = "quiero afiliarme y ser voluntario";

    let exchange = responder.send(input).await.unwrap();

    assert_eq!(exchange.origin, ReplyOrigin::Fallback);
    assert_eq!(exchange.reply.content, RuleSet::builtin().respond(input));
    assert_eq!(responder.transcript().len(), 3);
}

#[tokio::test]
async fn responder_falls_back_on_slow_server() {
    let server = server_replying(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "reply": "demasiado tarde" }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    let transcript = Transcript::restore(MemoryStore::new());
    let mut responder = Responder::with_remote(transcript, client_for(&server))
        .with_timeout(Duration::from_millis(200));

    let exchange = responder.send("¿Hay eventos?").await.unwrap();

    assert_eq!(exchange.origin, ReplyOrigin::Fallback);
    assert!(exchange.reply.content.contains("eventos"));
}

#[tokio::test]
#[ignore = "requires VIDA_REMOTE_ENDPOINT env var"]
async fn test_live_endpoint() {
    let endpoint = std::env::var("VIDA_REMOTE_ENDPOINT").expect("VIDA_REMOTE_ENDPOINT not set");
    let client = ReplyClient::new(endpoint);

    let result = client.post(&ReplyRequest::new("Hola")).await;

    assert!(result.is_ok());
}
