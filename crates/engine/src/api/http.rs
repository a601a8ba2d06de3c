//! HTTP routes.

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;

use loothub_domain::{CodeDraft, CodeStatus, DomainError, LootCode, NewsDraft, NewsId, NewsItem};
use loothub_shared::{
    CodeFilter, CodesQuery, CreateCodeRequest, CreateNewsRequest, DiscoveryLogResponse,
    ErrorResponse, VerifyPinRequest,
};

use crate::app::App;
use crate::infrastructure::ports::RepoError;

/// Header carrying the operator PIN on gated routes.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

const ADMIN_AUTHOR: &str = "Admin";
const DEFAULT_CODE_SOURCE: &str = "Manual Entry";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/codes", get(list_codes).post(create_code))
        .route("/api/news", get(list_news).post(create_news))
        .route("/api/news/{id}", delete(delete_news))
        .route("/api/admin/verify", post(verify_pin))
        .route("/api/admin/discovery", post(run_discovery))
}

async fn health() -> &'static str {
    "OK"
}

/// Operator guard.
///
/// Parts extractors run before the body is read, so a missing or wrong PIN is
/// rejected with 401 even when the body would not parse.
pub struct Admin;

impl FromRequestParts<Arc<App>> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        app: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        let pin = parts
            .headers
            .get(ADMIN_PIN_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if app.use_cases.admin.verify(pin) {
            Ok(Admin)
        } else {
            tracing::warn!(
                path = %parts.uri.path(),
                "Rejected operator request with missing or wrong PIN"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

// =============================================================================
// Codes
// =============================================================================

async fn list_codes(
    State(app): State<Arc<App>>,
    Query(query): Query<CodesQuery>,
) -> Result<Json<Vec<LootCode>>, ApiError> {
    let codes = match query.filter {
        CodeFilter::Active => app.repositories.codes.list_visible().await?,
        CodeFilter::All => app.repositories.codes.list().await?,
    };
    Ok(Json(codes))
}

async fn create_code(
    State(app): State<Arc<App>>,
    _admin: Admin,
    Json(req): Json<CreateCodeRequest>,
) -> Result<(StatusCode, Json<LootCode>), ApiError> {
    let expires_at = match req.expires_in_days {
        Some(days) => Some(
            app.clock
                .now()
                .checked_add_signed(chrono::Duration::days(i64::from(days)))
                .ok_or_else(|| ApiError::BadRequest("expiresInDays is out of range".into()))?,
        ),
        None => None,
    };
    let source = req
        .source
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CODE_SOURCE.to_string());

    let draft = CodeDraft::new(&req.code, req.reward, req.reward_type, ADMIN_AUTHOR)?
        .with_status(req.status.unwrap_or(CodeStatus::Active))
        .with_expiry(expires_at)
        .with_source(source, req.source_url)
        .verified();

    let code = app.repositories.codes.add(draft).await?;
    Ok((StatusCode::CREATED, Json(code)))
}

// =============================================================================
// News
// =============================================================================

async fn list_news(State(app): State<Arc<App>>) -> Result<Json<Vec<NewsItem>>, ApiError> {
    Ok(Json(app.repositories.news.list().await?))
}

async fn create_news(
    State(app): State<Arc<App>>,
    _admin: Admin,
    Json(req): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    let draft = NewsDraft::new(
        req.title,
        req.description,
        req.date,
        req.category,
        req.icon_type,
    )?
    .with_url(req.url)
    .with_thumbnail(req.thumbnail_url);

    let item = app.repositories.news.add(draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn delete_news(
    State(app): State<Arc<App>>,
    _admin: Admin,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    app.repositories.news.remove(&NewsId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Operator
// =============================================================================

async fn verify_pin(
    State(app): State<Arc<App>>,
    Json(req): Json<VerifyPinRequest>,
) -> Result<StatusCode, ApiError> {
    if app.use_cases.admin.verify(&req.pin) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::Unauthorized)
    }
}

async fn run_discovery(
    State(app): State<Arc<App>>,
    _admin: Admin,
) -> Result<Json<DiscoveryLogResponse>, ApiError> {
    let lines = app.use_cases.discovery.collect_log().await;
    Ok(Json(DiscoveryLogResponse { lines }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid admin PIN".to_string()),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SystemRandom};
    use crate::infrastructure::config::EngineConfig;
    use crate::infrastructure::memory_store::MemoryStore;
    use crate::infrastructure::ports::{KeyValueStore, MockKeyValueStore, MockVideoFeedPort};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    const PIN: &str = "2468";

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn app_with_store(store: Arc<dyn KeyValueStore>) -> Router {
        let mut feed = MockVideoFeedPort::new();
        feed.expect_has_credentials().return_const(false);
        let config = EngineConfig::from_lookup(|name| (name == "ADMIN_PIN").then(|| PIN.into()));

        let app = App::new(
            store,
            Arc::new(feed),
            Arc::new(FixedClock(now())),
            Arc::new(SystemRandom::new()),
            &config,
        );
        routes().with_state(Arc::new(app))
    }

    fn app() -> Router {
        app_with_store(Arc::new(MemoryStore::new()))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn send(method: &str, uri: &str, pin: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(pin) = pin {
            builder = builder.header(ADMIN_PIN_HEADER, pin);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app().oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn default_code_listing_hides_expired() {
        let router = app();

        let visible = json(router.clone().oneshot(get("/api/codes")).await.unwrap()).await;
        let all = json(router.oneshot(get("/api/codes?filter=all")).await.unwrap()).await;

        let statuses = |v: &serde_json::Value| -> Vec<String> {
            v.as_array()
                .unwrap()
                .iter()
                .map(|c| c["status"].as_str().unwrap().to_string())
                .collect()
        };
        assert!(!statuses(&visible).contains(&"EXPIRED".to_string()));
        assert!(statuses(&all).contains(&"EXPIRED".to_string()));
        assert_eq!(statuses(&all)[0], "ACTIVE");
    }

    #[tokio::test]
    async fn create_code_requires_pin() {
        let body = serde_json::json!({"code": "newcode", "reward": "500 Gems", "rewardType": "GEMS"});

        let missing = app()
            .oneshot(send("POST", "/api/codes", None, body.clone()))
            .await
            .unwrap();
        let wrong = app()
            .oneshot(send("POST", "/api/codes", Some("0000"), body))
            .await
            .unwrap();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_pin_is_rejected_before_the_body_is_parsed() {
        let request = |pin: Option<&str>| {
            let mut builder = Request::builder()
                .method("POST")
                .uri("/api/codes")
                .header("content-type", "application/json");
            if let Some(pin) = pin {
                builder = builder.header(ADMIN_PIN_HEADER, pin);
            }
            builder.body(Body::from("{not json")).unwrap()
        };

        let missing = app().oneshot(request(None)).await.unwrap();
        let wrong = app().oneshot(request(Some("0000"))).await.unwrap();
        let authorized = app().oneshot(request(Some(PIN))).await.unwrap();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert!(authorized.status().is_client_error());
        assert_ne!(authorized.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_code_fills_operator_defaults() {
        let body = serde_json::json!({
            "code": "newcode",
            "reward": "500 Gems",
            "rewardType": "GEMS",
            "expiresInDays": 7
        });
        let router = app();

        let response = router
            .clone()
            .oneshot(send("POST", "/api/codes", Some(PIN), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = json(response).await;
        assert_eq!(created["code"], "NEWCODE");
        assert_eq!(created["author"], "Admin");
        assert_eq!(created["source"], "Manual Entry");
        assert_eq!(created["isSystemVerified"], true);
        assert_eq!(created["status"], "ACTIVE");
        assert_eq!(created["upvotes"], 0);
        assert_eq!(created["expiresAt"], "2025-06-08T12:00:00Z");

        let listed = json(router.oneshot(get("/api/codes")).await.unwrap()).await;
        assert_eq!(listed[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn blank_code_is_a_bad_request() {
        let body = serde_json::json!({"code": "  ", "reward": "500 Gems", "rewardType": "GEMS"});
        let response = app()
            .oneshot(send("POST", "/api/codes", Some(PIN), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"], "Validation failed: Code cannot be empty");
    }

    #[tokio::test]
    async fn news_can_be_added_and_removed() {
        let router = app();
        let body = serde_json::json!({
            "title": "Ballon d'Or Event",
            "description": "Earn tokens",
            "date": "Oct 28",
            "category": "EVENT",
            "iconType": "STAR"
        });

        let created = router
            .clone()
            .oneshot(send("POST", "/api/news", Some(PIN), body))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let id = json(created).await["id"].as_str().unwrap().to_string();

        let listed = json(router.clone().oneshot(get("/api/news")).await.unwrap()).await;
        assert_eq!(listed[0]["id"], id.as_str());

        let removed = router
            .clone()
            .oneshot(send(
                "DELETE",
                &format!("/api/news/{id}"),
                Some(PIN),
                serde_json::Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(removed.status(), StatusCode::NO_CONTENT);

        let listed = json(router.oneshot(get("/api/news")).await.unwrap()).await;
        assert!(listed
            .as_array()
            .unwrap()
            .iter()
            .all(|item| item["id"] != id.as_str()));
    }

    #[tokio::test]
    async fn deleting_unknown_news_is_still_no_content() {
        let response = app()
            .oneshot(send(
                "DELETE",
                "/api/news/does-not-exist",
                Some(PIN),
                serde_json::Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn verify_pin_reports_match() {
        let ok = app()
            .oneshot(send("POST", "/api/admin/verify", None, serde_json::json!({"pin": PIN})))
            .await
            .unwrap();
        let bad = app()
            .oneshot(send("POST", "/api/admin/verify", None, serde_json::json!({"pin": "1"})))
            .await
            .unwrap();

        assert_eq!(ok.status(), StatusCode::NO_CONTENT);
        assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn discovery_returns_framed_log() {
        let response = app()
            .oneshot(send(
                "POST",
                "/api/admin/discovery",
                Some(PIN),
                serde_json::Value::Null,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        let lines = body["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "> Initializing FC LootHub Ingestion Layer...");
        assert_eq!(lines[13], "> PROCESS COMPLETE. Database updated.");
    }

    #[tokio::test]
    async fn storage_errors_are_generic_500s() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_read()
            .returning(|_| Err(RepoError::database("kv_store.read", "disk full at /var/db")));

        let response = app_with_store(Arc::new(store))
            .oneshot(get("/api/codes"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(response).await["error"], "Internal error");
    }
}
