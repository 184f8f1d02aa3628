//! Integration tests for the Frost client against a local upstream.
//!
//! Each test binds an Axum router on `127.0.0.1:0` and points the
//! client at it through the injected base URL, so no real network
//! access is needed.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use snowdepth_frost::{Filter, FrostClient, FrostConfig, FrostError, UpstreamErrorKind, Url};
use tokio::net::TcpListener;

/// `base64("test-id:")`
const EXPECTED_AUTH: &str = "Basic dGVzdC1pZDo=";

const OBSERVATION_BODY: &str = r#"{
    "@type": "ObservationResponse",
    "totalItemCount": 1,
    "data": [
        {
            "sourceId": "SN90450:0",
            "referenceTime": "2020-06-01T00:00:00.000Z",
            "observations": [
                { "elementId": "surface_snow_thickness", "value": 12.5, "unit": "cm", "qualityCode": 0 }
            ]
        }
    ]
}"#;

const SOURCES_BODY: &str = r#"{
    "@type": "SourceResponse",
    "data": [
        { "@type": "SensorSystem", "id": "SN90450", "name": "TROMSØ", "country": "Norge" },
        { "@type": "SensorSystem", "id": "SN18700", "name": "OSLO - BLINDERN", "country": "Norge" }
    ]
}"#;

async fn spawn_upstream(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

fn client(base_url: Url, client_id: Option<&str>) -> FrostClient {
    FrostClient::new(FrostConfig {
        base_url,
        client_id: client_id.map(ToOwned::to_owned),
        timeout: None,
    })
    .unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == EXPECTED_AUTH)
}

/// Observation endpoint that insists on the snow query and credentials.
fn observations_router() -> Router {
    Router::new().route(
        "/observations/v0.jsonld",
        get(
            |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, String::new());
                }
                let expected = [
                    ("sources", "SN90450"),
                    ("elements", "surface_snow_thickness"),
                    (
                        "referencetime",
                        "2020-01-01T00:00:00.000Z/2020-12-30T00:00:00.000Z",
                    ),
                ];
                let matches = params.len() == expected.len()
                    && expected
                        .iter()
                        .all(|(k, v)| params.get(*k).map(String::as_str) == Some(*v));
                if matches {
                    (StatusCode::OK, OBSERVATION_BODY.to_owned())
                } else {
                    (StatusCode::BAD_REQUEST, String::new())
                }
            },
        ),
    )
}

fn snow_filter() -> Filter {
    Filter::default()
        .sources(["SN90450"])
        .reference_time("2020-01-01T00:00:00.000Z/2020-12-30T00:00:00.000Z")
        .elements(["surface_snow_thickness"])
}

#[tokio::test]
async fn observations_returns_decoded_envelopes() {
    let base = spawn_upstream(observations_router()).await;
    let frost = client(base, Some("test-id"));

    let data = frost.observations(&snow_filter()).await.unwrap();

    assert_eq!(data.len(), 1);
    let record = data.first().unwrap();
    assert_eq!(record.source_id.as_deref(), Some("SN90450:0"));
    assert_eq!(
        record.reference_time.map(|t| t.to_rfc3339()),
        Some("2020-06-01T00:00:00+00:00".to_owned())
    );
    let obs = record.first_observation().unwrap();
    assert!((obs.value - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let base = spawn_upstream(observations_router()).await;
    let frost = client(base, Some("someone-else"));

    let err = frost.observations(&snow_filter()).await.unwrap_err();

    assert_eq!(err.upstream_kind(), Some(UpstreamErrorKind::Unauthorized));
    assert_eq!(err.to_string(), "Unauthorized client ID.");
}

#[tokio::test]
async fn status_codes_are_classified() {
    // The mock answers with whatever status is passed in `elements`.
    let router = Router::new().route(
        "/observations/v0.jsonld",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            params
                .get("elements")
                .and_then(|s| s.parse::<u16>().ok())
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::OK)
        }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    let cases = [
        ("400", UpstreamErrorKind::BadRequest),
        ("401", UpstreamErrorKind::Unauthorized),
        ("404", UpstreamErrorKind::NotFound),
        ("500", UpstreamErrorKind::InternalError),
        ("412", UpstreamErrorKind::Unclassified(412)),
        ("503", UpstreamErrorKind::Unclassified(503)),
    ];

    for (status, expected) in cases {
        let filter = Filter::default().elements([status]);
        let err = frost.observations(&filter).await.unwrap_err();
        assert_eq!(err.upstream_kind(), Some(expected), "status {status}");
    }
}

#[tokio::test]
async fn not_found_carries_upstream_message() {
    let router = Router::new().route(
        "/observations/v0.jsonld",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    let err = frost.observations(&snow_filter()).await.unwrap_err();

    assert!(matches!(
        err,
        FrostError::Upstream {
            kind: UpstreamErrorKind::NotFound
        }
    ));
    assert_eq!(err.to_string(), "No data was found for the list of query Ids.");
}

#[tokio::test]
async fn missing_client_id_fails_before_any_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().fallback(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK
        }
    });
    let base = spawn_upstream(router).await;
    let frost = client(base, None);

    let observations = frost.observations(&snow_filter()).await;
    let sources = frost.all_sources().await;
    let hello = frost.secure_hello().await;

    assert!(matches!(observations, Err(FrostError::Configuration(_))));
    assert!(matches!(sources, Err(FrostError::Configuration(_))));
    assert!(matches!(hello, Err(FrostError::Configuration(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_sources_sends_no_query() {
    let router = Router::new().route(
        "/sources/v0.jsonld",
        get(|RawQuery(query): RawQuery| async move {
            if query.is_some() {
                (StatusCode::BAD_REQUEST, String::new())
            } else {
                (StatusCode::OK, SOURCES_BODY.to_owned())
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    let sources = frost.all_sources().await.unwrap();

    let ids: Vec<_> = sources.iter().filter_map(|s| s.id.as_deref()).collect();
    assert_eq!(ids, ["SN90450", "SN18700"]);
}

#[tokio::test]
async fn sources_forwards_filter() {
    let router = Router::new().route(
        "/sources/v0.jsonld",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("ids").map(String::as_str) == Some("SN90450")
                && params.get("types").map(String::as_str) == Some("SensorSystem")
            {
                (StatusCode::OK, SOURCES_BODY.to_owned())
            } else {
                (StatusCode::BAD_REQUEST, String::new())
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    let filter = Filter::default().ids(["SN90450"]).types(["SensorSystem"]);
    let sources = frost.sources(&filter).await.unwrap();

    assert_eq!(sources.len(), 2);
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let router = Router::new().route(
        "/observations/v0.jsonld",
        get(|| async { "<html>maintenance</html>" }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    let err = frost.observations(&snow_filter()).await.unwrap_err();

    assert!(matches!(err, FrostError::Decode(_)));
}

#[tokio::test]
async fn secure_hello_returns_body_text() {
    let router = Router::new().route(
        "/tests/secureHello",
        get(|headers: HeaderMap| async move {
            if authorized(&headers) {
                (StatusCode::OK, "Hello test-id")
            } else {
                (StatusCode::UNAUTHORIZED, "")
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let frost = client(base, Some("test-id"));

    assert_eq!(frost.secure_hello().await.unwrap(), "Hello test-id");
}

#[tokio::test]
async fn base_url_prefix_is_respected() {
    let base = spawn_upstream(Router::new().nest("/frost", observations_router())).await;
    let prefixed = base.join("frost").unwrap();
    let frost = client(prefixed, Some("test-id"));

    let data = frost.observations(&snow_filter()).await.unwrap();

    assert_eq!(data.len(), 1);
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let frost = client(Url::parse(&format!("http://{addr}/")).unwrap(), Some("test-id"));
    let err = frost.observations(&snow_filter()).await.unwrap_err();

    assert!(matches!(err, FrostError::Transport(_)));
    assert!(err.to_string().starts_with("request failed"));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let router = Router::new().route(
        "/observations/v0.jsonld",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            OBSERVATION_BODY
        }),
    );
    let base = spawn_upstream(router).await;
    let frost = FrostClient::new(FrostConfig {
        base_url: base,
        client_id: Some("test-id".to_owned()),
        timeout: Some(Duration::from_millis(200)),
    })
    .unwrap();

    let err = frost.observations(&snow_filter()).await.unwrap_err();

    assert!(matches!(err, FrostError::Transport(ref e) if e.is_timeout()));
}
