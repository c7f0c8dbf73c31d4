use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use gacha_application::ingest::{FetchStop, PaginatedFetcher};
use gacha_application::Metrics;
use gacha_domain::ports::{FetchError, PullHistorySource, SilentProgress};
use gacha_domain::{CategoryId, FetchPolicy, ImportCredentials, PageLimit, PullRecord, ServerRegion};
use gacha_infrastructure::HttpHistorySource;

#[derive(Debug, Clone)]
struct Captured {
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone)]
struct Recorder {
    requests: Arc<Mutex<Vec<Captured>>>,
    reply: fn(usize) -> Response,
    delay: Duration,
}

async fn record(
    State(recorder): State<Recorder>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let index = {
        let mut requests = recorder.requests.lock().expect("requests lock");
        requests.push(Captured {
            query,
            headers,
            body,
        });
        requests.len() - 1
    };
    if !recorder.delay.is_zero() {
        tokio::time::sleep(recorder.delay).await;
    }
    (recorder.reply)(index)
}

async fn spawn_server(reply: fn(usize) -> Response, delay: Duration) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder {
        requests: requests.clone(),
        reply,
        delay,
    };
    let app = Router::new().route("/list", post(record)).with_state(recorder);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}/list", addr), requests)
}

fn source(endpoint: &str, timeout: Duration) -> HttpHistorySource {
    HttpHistorySource::new(timeout, true)
        .expect("client")
        .with_endpoint_override(endpoint)
}

fn credentials() -> ImportCredentials {
    ImportCredentials {
        token: "secret-token".to_string(),
        email: "player@example.com".to_string(),
        server: ServerRegion::HaoplayJapan,
    }
}

fn json(body: &'static str) -> Response {
    ([("content-type", "application/json")], body).into_response()
}

#[tokio::test]
async fn request_carries_query_headers_and_form_body() {
    let (endpoint, requests) = spawn_server(
        |_| {
            json(r#"{"code":0,"message":"OK","data":{"list":[{"time":100,"pool_id":1001,"item":1025,"num":1}],"next":"abc"}}"#)
        },
        Duration::ZERO,
    )
    .await;

    let page = source(&endpoint, Duration::from_secs(5))
        .fetch_page(&credentials(), &CategoryId::from("3"), Some("cursor-1"))
        .await
        .expect("page");

    assert_eq!(page.records, vec![PullRecord::new(100, 1001, 1025)]);
    assert_eq!(page.next.as_deref(), Some("abc"));

    let requests = requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.query.get("game_channel_id").map(String::as_str), Some("5"));
    assert_eq!(request.query.get("type_id").map(String::as_str), Some("3"));
    assert_eq!(request.query.get("u").map(String::as_str), Some("player@example.com"));
    assert_eq!(request.query.get("next").map(String::as_str), Some("cursor-1"));
    assert_eq!(request.body, "server=1");

    let header = |name: &str| {
        request
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header("authorization").as_deref(), Some("secret-token"));
    assert_eq!(header("x-unity-version").as_deref(), Some("2019.4.40f1"));
    assert_eq!(
        header("user-agent").as_deref(),
        Some("UnityPlayer/2019.4.40f1 (UnityWebRequest/1.0, libcurl/7.80.0-DEV)")
    );
    assert_eq!(
        header("content-type").as_deref(),
        Some("application/x-www-form-urlencoded")
    );
}

#[tokio::test]
async fn first_page_omits_cursor() {
    let (endpoint, requests) = spawn_server(
        |_| json(r#"{"code":0,"data":{"list":[],"next":""}}"#),
        Duration::ZERO,
    )
    .await;

    let page = source(&endpoint, Duration::from_secs(5))
        .fetch_page(&credentials(), &CategoryId::from("1"), None)
        .await
        .expect("page");

    assert!(page.next.is_none());
    let requests = requests.lock().expect("requests lock");
    assert!(!requests[0].query.contains_key("next"));
}

#[tokio::test]
async fn non_zero_code_is_an_api_error() {
    let (endpoint, _requests) = spawn_server(
        |_| json(r#"{"code":-1,"message":"invalid token","data":null}"#),
        Duration::ZERO,
    )
    .await;

    let err = source(&endpoint, Duration::from_secs(5))
        .fetch_page(&credentials(), &CategoryId::from("1"), None)
        .await
        .expect_err("api error");

    assert_eq!(
        err,
        FetchError::Api {
            code: -1,
            message: "invalid token".to_string()
        }
    );
}

#[tokio::test]
async fn non_200_status_is_an_http_error() {
    let (endpoint, _requests) = spawn_server(
        |_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Duration::ZERO,
    )
    .await;

    let err = source(&endpoint, Duration::from_secs(5))
        .fetch_page(&credentials(), &CategoryId::from("1"), None)
        .await
        .expect_err("http error");

    assert_eq!(err, FetchError::Http { status: 500 });
    assert_eq!(err.to_string(), "HTTP error: 500");
}

#[tokio::test]
async fn slow_server_times_out() {
    let (endpoint, _requests) = spawn_server(
        |_| json(r#"{"code":0,"data":{"list":[],"next":""}}"#),
        Duration::from_secs(2),
    )
    .await;

    let err = source(&endpoint, Duration::from_millis(200))
        .fetch_page(&credentials(), &CategoryId::from("1"), None)
        .await
        .expect_err("timeout");

    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = source(&format!("http://{}/list", addr), Duration::from_secs(2))
        .fetch_page(&credentials(), &CategoryId::from("1"), None)
        .await
        .expect_err("transport");

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn fetcher_gives_up_after_max_retries_plus_one_requests() {
    let (endpoint, requests) = spawn_server(
        |_| StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Duration::ZERO,
    )
    .await;
    let metrics = Arc::new(Metrics::default());
    let fetcher = PaginatedFetcher::new(
        Arc::new(source(&endpoint, Duration::from_secs(5))),
        FetchPolicy {
            page_limit: PageLimit::Pages(10),
            max_retries: 3,
        },
        metrics.clone(),
    );

    let harvest = fetcher
        .fetch_category(&credentials(), &CategoryId::from("1"), &SilentProgress)
        .await;

    assert!(harvest.records.is_empty());
    assert_eq!(harvest.stop, FetchStop::RetriesExhausted);
    assert_eq!(requests.lock().expect("requests lock").len(), 4);
    assert_eq!(metrics.fetch_retries(), 3);
}

#[tokio::test]
async fn fetcher_follows_cursors_until_drained() {
    let (endpoint, requests) = spawn_server(
        |index| match index {
            0 => json(r#"{"code":0,"data":{"list":[{"time":300,"pool_id":1001,"item":3}],"next":"p2"}}"#),
            1 => StatusCode::BAD_GATEWAY.into_response(),
            _ => json(r#"{"code":0,"data":{"list":[{"time":200,"pool_id":1001,"item":2}],"next":""}}"#),
        },
        Duration::ZERO,
    )
    .await;
    let fetcher = PaginatedFetcher::new(
        Arc::new(source(&endpoint, Duration::from_secs(5))),
        FetchPolicy::default(),
        Arc::new(Metrics::default()),
    );

    let harvest = fetcher
        .fetch_category(&credentials(), &CategoryId::from("4"), &SilentProgress)
        .await;

    assert_eq!(
        harvest.records,
        vec![PullRecord::new(300, 1001, 3), PullRecord::new(200, 1001, 2)]
    );
    assert_eq!(harvest.stop, FetchStop::Drained);
    let requests = requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 3);
    assert!(!requests[0].query.contains_key("next"));
    assert_eq!(requests[1].query.get("next").map(String::as_str), Some("p2"));
    assert_eq!(requests[2].query.get("next").map(String::as_str), Some("p2"));
}
