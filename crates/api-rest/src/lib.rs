//! # API REST
//!
//! REST API implementation for the Oncora case registry.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Bearer sessions issued on practitioner verification
//! - REST-specific concerns (JSON envelopes, CORS, body limits)
//!
//! Uses `api-shared` for wire types and `oncora-core` for case operations.

#![warn(rust_2018_idioms)]

mod error;
mod handlers;
pub mod session;

use api_shared::{
    AnalyticsDto, AnalyticsRes, CaseDto, CaseSubmissionReq, CasesRes, CreateCaseRes, DoctorDto,
    ErrorRes, HealthRes, HospitalDto, HospitalsRes, SelectValue, VerifyReq, VerifyRes,
};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use oncora_core::{CaseService, HospitalDirectory, IdentityVerifier};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use session::SessionRegistry;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request handlers.
#[derive(Clone)]
pub struct AppState {
    service: CaseService,
    directory: Arc<HospitalDirectory>,
    verifier: Arc<dyn IdentityVerifier>,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(
        service: CaseService,
        directory: Arc<HospitalDirectory>,
        verifier: Arc<dyn IdentityVerifier>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            service,
            directory,
            verifier,
            sessions,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_hospitals,
        handlers::verify,
        handlers::query_cases,
        handlers::create_case,
        handlers::analytics,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        HospitalDto,
        HospitalsRes,
        SelectValue,
        VerifyReq,
        DoctorDto,
        VerifyRes,
        CaseDto,
        CasesRes,
        CaseSubmissionReq,
        CreateCaseRes,
        AnalyticsDto,
        AnalyticsRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router with documentation, CORS and the JSON 404 fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/hospitals", get(handlers::list_hospitals))
        .route("/api/auth/verify", post(handlers::verify))
        .route(
            "/api/cases",
            get(handlers::query_cases).post(handlers::create_case),
        )
        .route("/api/analytics", get(handlers::analytics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use oncora_core::seed::seed_store;
    use oncora_core::{CoreConfig, DirectoryVerifier, InMemoryCaseStore, SequentialIdGenerator};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let store = Arc::new(InMemoryCaseStore::new());
        let ids = Arc::new(SequentialIdGenerator::new());
        seed_store(store.as_ref(), ids.as_ref()).unwrap();

        let cfg = Arc::new(CoreConfig::default());
        let sessions = Arc::new(SessionRegistry::new(cfg.session_ttl()));
        let directory = Arc::new(HospitalDirectory::default());
        let verifier = Arc::new(DirectoryVerifier::new(HospitalDirectory::default()));
        let service = CaseService::new(store, ids, cfg);

        router(AppState::new(service, directory, verifier, sessions))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router) -> String {
        let body = json!({
            "medicalId": "MD123456",
            "hospital": {"value": "mayo-clinic", "label": "Mayo Clinic"},
            "email": "doc@example.org"
        });
        let (status, res) = send(app, post_json("/api/auth/verify", None, &body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["doctor"]["region"], "us-midwest");
        res["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let (status, body) = send(&app(), get("/api/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn hospitals_are_listed() {
        let (status, body) = send(&app(), get("/api/hospitals", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hospitals"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn cases_require_a_token() {
        let (status, body) = send(&app(), get("/api/cases", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn unknown_token_is_forbidden() {
        let (status, _) = send(&app(), get("/api/analytics", Some("forged"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn failed_verification_is_bad_request() {
        let body = json!({"medicalId": "123", "hospital": "mayo-clinic"});
        let (status, res) = send(
            &app(),
            post_json("/api/auth/verify", None, &body.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res["message"],
            "Verification failed. Please check your credentials."
        );
    }

    #[tokio::test]
    async fn filtered_query_after_login() {
        let app = app();
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            get("/api/cases?cancerSubtype=hodgkin-lymphoma", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["hasMore"], false);
    }

    #[tokio::test]
    async fn window_over_seeded_store() {
        let app = app();
        let token = login(&app).await;

        let (_, body) = send(&app, get("/api/cases?offset=4&limit=2", Some(&token))).await;
        assert_eq!(body["cases"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"], 6);
        assert_eq!(body["hasMore"], false);

        let (_, body) = send(&app, get("/api/cases?offset=0&limit=2", Some(&token))).await;
        assert_eq!(body["hasMore"], true);
    }

    #[tokio::test]
    async fn negative_limit_is_rejected() {
        let app = app();
        let token = login(&app).await;
        let (status, body) = send(&app, get("/api/cases?limit=-1", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn created_case_counts_in_analytics() {
        let app = app();
        let token = login(&app).await;

        let body = json!({
            "cancerSubtype": {"value": "marginal-zone-lymphoma", "label": "Marginal Zone"},
            "ageRange": "60-69",
            "sex": "female",
            "outcome": "stable-disease",
            "genomicVariants": "MYD88 L265P",
            "symptoms": ["Fatigue", "fatigue"]
        });
        let (status, res) = send(&app, post_json("/api/cases", Some(&token), &body.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(res["message"], "Patient case uploaded successfully");
        assert_eq!(res["case"]["region"], "us-midwest");
        assert_eq!(res["case"]["symptoms"], json!(["fatigue"]));

        let (_, res) = send(&app, get("/api/analytics?timeframe=1year", Some(&token))).await;
        assert_eq!(res["analytics"]["totalCases"], 7);
        assert_eq!(res["analytics"]["timeframe"], "1year");
        assert_eq!(res["analytics"]["region"], "global");
        assert_eq!(res["analytics"]["remissionRate"], 71);
    }

    #[tokio::test]
    async fn submission_without_subtype_is_rejected() {
        let app = app();
        let token = login(&app).await;

        let body = json!({"ageRange": "60-69", "sex": "female"});
        let (status, res) = send(&app, post_json("/api/cases", Some(&token), &body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["message"].as_str().unwrap().contains("cancerSubtype"));

        let (_, res) = send(&app, get("/api/cases", Some(&token))).await;
        assert_eq!(res["total"], 6);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let token = login(&app).await;
        let (status, _) = send(&app, post_json("/api/cases", Some(&token), "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_method_on_known_path_returns_json_404() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/cases")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "API endpoint not found");
    }

    #[tokio::test]
    async fn unknown_route_returns_json_404() {
        let (status, body) = send(&app(), get("/api/nope", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "API endpoint not found");
    }
}
