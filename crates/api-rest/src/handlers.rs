//! HTTP handlers for the registry API.

use crate::error::{auth_error, case_error, json_error, ApiError, NOT_FOUND};
use crate::AppState;
use api_shared::{
    bearer_token, AnalyticsDto, AnalyticsQuery, AnalyticsRes, AuthError, CaseDto, CaseQuery,
    CaseSubmissionReq, CasesRes, CreateCaseRes, DoctorDto, ErrorRes, HealthRes, HealthService,
    HospitalDto, HospitalsRes, VerifyReq, VerifyRes,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::Json;
use oncora_core::{AnalyticsRequest, CallerIdentity, CaseSubmission, Credentials, PageRequest};

/// Resolves the bearer token on `headers` to the caller it was issued for.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CallerIdentity, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = bearer_token(header).map_err(auth_error)?;
    state
        .sessions
        .resolve(token)
        .map_err(case_error)?
        .ok_or_else(|| auth_error(AuthError::InvalidToken))
}

fn bad_request(message: String) -> ApiError {
    json_error(StatusCode::BAD_REQUEST, message)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "Participating hospitals", body = HospitalsRes)
    )
)]
#[axum::debug_handler]
pub async fn list_hospitals(State(state): State<AppState>) -> Json<HospitalsRes> {
    Json(HospitalsRes {
        success: true,
        hospitals: state.directory.list().iter().map(HospitalDto::from).collect(),
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyReq,
    responses(
        (status = 200, description = "Practitioner verified; bearer token issued", body = VerifyRes),
        (status = 400, description = "Verification failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Verify a practitioner and issue a bearer token
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON,
/// - the hospital is not listed or the medical id is too short.
#[axum::debug_handler]
pub async fn verify(
    State(state): State<AppState>,
    req: Result<Json<VerifyReq>, JsonRejection>,
) -> Result<Json<VerifyRes>, ApiError> {
    let Json(req) = req.map_err(|e| bad_request(e.body_text()))?;
    let credentials = Credentials::from(req);

    let doctor = state.verifier.verify(&credentials).map_err(case_error)?;
    let token = state
        .sessions
        .issue(doctor.identity.clone())
        .map_err(case_error)?;

    Ok(Json(VerifyRes {
        success: true,
        doctor: DoctorDto::from(&doctor),
        token,
    }))
}

#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseQuery),
    responses(
        (status = 200, description = "One window of matching cases", body = CasesRes),
        (status = 400, description = "Malformed limit or offset", body = ErrorRes),
        (status = 401, description = "Missing bearer token", body = ErrorRes),
        (status = 403, description = "Unknown or expired bearer token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Search cases
///
/// All supplied clauses must match. `total` counts matches before windowing.
#[axum::debug_handler]
pub async fn query_cases(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CaseQuery>, QueryRejection>,
) -> Result<Json<CasesRes>, ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;

    let page = PageRequest::parse(
        query.offset.as_deref(),
        query.limit.as_deref(),
        state.service.config(),
    )
    .map_err(case_error)?;

    let result = state
        .service
        .query_cases(&caller, &query.filter(), page)
        .map_err(case_error)?;

    Ok(Json(CasesRes {
        success: true,
        cases: result.cases.iter().map(|c| CaseDto::from(c.as_ref())).collect(),
        total: result.total,
        has_more: result.has_more,
    }))
}

#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CaseSubmissionReq,
    responses(
        (status = 201, description = "Case stored", body = CreateCaseRes),
        (status = 400, description = "Invalid submission", body = ErrorRes),
        (status = 401, description = "Missing bearer token", body = ErrorRes),
        (status = 403, description = "Unknown or expired bearer token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Submit a new de-identified case
///
/// The caller's region and identifier are recorded on the case; identifiers and timestamps
/// are assigned by the server.
#[axum::debug_handler]
pub async fn create_case(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: Result<Json<CaseSubmissionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateCaseRes>), ApiError> {
    let caller = authenticate(&state, &headers)?;
    let Json(req) = req.map_err(|e| bad_request(e.body_text()))?;

    let record = state
        .service
        .create_case(&CaseSubmission::from(req), &caller)
        .map_err(case_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCaseRes {
            success: true,
            case: CaseDto::from(record.as_ref()),
            message: "Patient case uploaded successfully".into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Registry-wide statistics", body = AnalyticsRes),
        (status = 401, description = "Missing bearer token", body = ErrorRes),
        (status = 403, description = "Unknown or expired bearer token", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Registry analytics
///
/// `timeframe` and `region` are echoed back; statistics always cover the whole registry.
#[axum::debug_handler]
pub async fn analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AnalyticsRes>, ApiError> {
    authenticate(&state, &headers)?;
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;

    let request = AnalyticsRequest::new(query.timeframe, query.region);
    let summary = state.service.analytics(&request).map_err(case_error)?;

    Ok(Json(AnalyticsRes {
        success: true,
        analytics: AnalyticsDto::from(&summary),
    }))
}

/// JSON 404 for every unrouted path.
pub async fn not_found() -> ApiError {
    json_error(StatusCode::NOT_FOUND, NOT_FOUND)
}
