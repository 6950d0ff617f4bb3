//! End-to-end tests against a canned local HTTP server.
//!
//! Each test spins up a one-shot TCP listener that records the request bytes
//! and replies with a fixed HTTP response, so the full client path (multipart
//! encoding, dispatch, stream decoding, session bookkeeping) is exercised
//! without a real generation service.

use futures::StreamExt;
use nanostyle::{
    GenerationRequest, SessionStatus, StudioClient, StudioConfig, StudioError, StudioSession,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn http_response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Serve exactly one request, returning the base URL to point the client at
/// and a handle resolving to the raw request bytes.
async fn serve_once(response: Vec<u8>) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                panic!("connection closed before headers were complete");
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(pos) = find_subsequence(&request, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&request[..header_end]).into_owned();
        let expected = header_end + content_length(&headers);
        while request.len() < expected {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(&response).await.unwrap();
        socket.flush().await.unwrap();
        request
    });

    (format!("http://{}", addr), handle)
}

fn client_for(base_url: &str) -> StudioClient {
    StudioClient::new(StudioConfig::new().with_base_url(base_url)).unwrap()
}

fn session_with_image() -> StudioSession {
    let mut session = StudioSession::new();
    session.set_prompt("bob cut");
    session.choose_file(b"fake png bytes".to_vec(), "portrait.png", "image/png");
    session
}

#[tokio::test]
async fn single_request_yields_one_result_with_index_zero() {
    let (base_url, server) = serve_once(http_response("200 OK", "image/png", b"PNGDATA")).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let produced = session.submit(&client, 1).await.unwrap();
    assert_eq!(produced, 1);
    assert_eq!(session.gallery().len(), 1);

    let items = session.gallery().ordered();
    assert_eq!(items[0].index, 0);
    assert_eq!(items[0].image, b"PNGDATA");
    assert_eq!(*session.status(), SessionStatus::Complete { produced: 1 });

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /hairstyle HTTP/1.1"));
    assert!(text.contains("name=\"prompt\""));
    assert!(text.contains("bob cut keep my face same"));
    assert!(text.contains("name=\"image\""));
    assert!(text.contains("filename=\"portrait.png\""));
}

#[tokio::test]
async fn streaming_results_are_displayed_in_index_order() {
    let body = concat!(
        "{\"index\":1,\"image_base64\":\"QQ==\"}\n",
        "{\"index\":0,\"image_base64\":\"Qg==\"}\n",
        "{\"index\":2,\"image_base64\":\"Qw==\"}\n",
    );
    let (base_url, server) =
        serve_once(http_response("200 OK", "application/x-ndjson", body.as_bytes())).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let produced = session.submit(&client, 3).await.unwrap();
    assert_eq!(produced, 3);

    let ordered = session.gallery().ordered();
    let indices: Vec<i64> = ordered.iter().map(|item| item.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    // Payloads follow their indices: Qg== is "B", QQ== is "A", Qw== is "C".
    assert_eq!(ordered[0].image, b"B");
    assert_eq!(ordered[1].image, b"A");
    assert_eq!(ordered[2].image, b"C");

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /hairstyles/stream HTTP/1.1"));
    assert!(text.contains("name=\"count\""));
}

#[tokio::test]
async fn stream_error_keeps_partial_results() {
    let body = concat!(
        "{\"index\":0,\"image_base64\":\"QQ==\"}\n",
        "{\"error\":\"quota exceeded\"}\n",
    );
    let (base_url, server) =
        serve_once(http_response("200 OK", "application/x-ndjson", body.as_bytes())).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let result = session.submit(&client, 2).await;
    match result {
        Err(StudioError::StreamProtocolError(message)) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected stream protocol error, got {:?}", other),
    }

    // The variant decoded before the error stays visible.
    assert_eq!(session.gallery().len(), 1);
    assert_eq!(session.gallery().items()[0].index, 0);
    match session.status() {
        SessionStatus::Failed(message) => assert!(message.contains("quota exceeded")),
        other => panic!("expected failed status, got {:?}", other),
    }

    server.await.unwrap();
}

#[tokio::test]
async fn non_2xx_single_reports_body_text() {
    let (base_url, server) =
        serve_once(http_response("503 Service Unavailable", "text/plain", b"backend down")).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let result = session.submit(&client, 1).await;
    match result {
        Err(StudioError::TransportError(message)) => {
            assert!(message.contains("503"));
            assert!(message.contains("backend down"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert!(session.gallery().is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn non_2xx_with_empty_body_uses_generic_detail() {
    let (base_url, server) = serve_once(http_response("500 Internal Server Error", "text/plain", b"")).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let result = session.submit(&client, 1).await;
    match result {
        Err(StudioError::TransportError(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("No details provided."));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn non_2xx_stream_fails_before_decoding() {
    let (base_url, server) =
        serve_once(http_response("429 Too Many Requests", "text/plain", b"slow down")).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();

    let result = session.submit(&client, 4).await;
    match result {
        Err(StudioError::TransportError(message)) => {
            assert!(message.contains("429"));
            assert!(message.contains("slow down"));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert!(session.gallery().is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn event_stream_facade_yields_items_then_error() {
    let body = concat!(
        "{\"index\":0,\"image_base64\":\"QQ==\"}\n",
        "{\"error\":\"quota exceeded\"}\n",
    );
    let (base_url, server) =
        serve_once(http_response("200 OK", "application/x-ndjson", body.as_bytes())).await;
    let client = client_for(&base_url);

    let request = GenerationRequest::new(
        "bob cut",
        2,
        b"fake png bytes".to_vec(),
        "portrait.png",
        "image/png",
        6,
    )
    .unwrap();

    let mut events = client.stream().generate_events(request);
    let first = events.next().await.unwrap().unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.image, b"A");

    match events.next().await.unwrap() {
        Err(StudioError::StreamProtocolError(message)) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected stream protocol error, got {:?}", other),
    }
    assert!(events.next().await.is_none());
    server.await.unwrap();
}

#[tokio::test]
async fn new_submission_clears_previous_results() {
    let (base_url, _server) = serve_once(http_response("200 OK", "image/png", b"FIRST")).await;
    let client = client_for(&base_url);
    let mut session = session_with_image();
    session.submit(&client, 1).await.unwrap();
    assert_eq!(session.gallery().len(), 1);

    let (base_url, _server) = serve_once(http_response("200 OK", "image/png", b"SECOND")).await;
    let client = client_for(&base_url);
    session.submit(&client, 1).await.unwrap();
    assert_eq!(session.gallery().len(), 1);
    assert_eq!(session.gallery().items()[0].image, b"SECOND");
}
