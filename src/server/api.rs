use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{CONTENT_TYPE, COOKIE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::auth::{self, require_session, CurrentUser};
use super::config::ServerConfig;
use super::error::{ApiError, ApiJson, ApiResult};
use super::{run_blocking, AppState};
use crate::error::FinanceError;
use crate::models::{
    DailyExpense, Emi, EmiId, EmiInput, ExpenseId, ExpenseInput, FamilyMember, MemberId,
    MemberInput, Month, Period,
};
use crate::reports::FinancialSummary;
use crate::services::{EmiService, ExpenseService, MemberService};
use crate::storage::Snapshot;

pub async fn healthz() -> &'static str {
    "ok"
}

async fn get_data(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Snapshot>> {
    let snapshot = state.storage.read(|db| db.snapshot_for(user.id))?;
    Ok(Json(snapshot))
}

fn deleted() -> Json<Value> {
    Json(json!({ "success": true }))
}

// Family members

async fn create_member(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(input): ApiJson<MemberInput>,
) -> ApiResult<Json<FamilyMember>> {
    let member = run_blocking(&state, move |state| {
        MemberService::new(&state.storage).create(user.id, input)
    })
    .await?;
    Ok(Json(member))
}

async fn update_member(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<MemberInput>,
) -> ApiResult<Json<FamilyMember>> {
    // Ids that are not integers can never match a record
    let id = MemberId::parse(&raw_id)
        .map_err(|_| FinanceError::member_not_found(raw_id.as_str()))?;
    let member = run_blocking(&state, move |state| {
        MemberService::new(&state.storage).update(user.id, id, input)
    })
    .await?;
    Ok(Json(member))
}

async fn delete_member(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if let Ok(id) = MemberId::parse(&raw_id) {
        run_blocking(&state, move |state| MemberService::new(&state.storage).delete(user.id, id))
            .await?;
    }
    Ok(deleted())
}

// EMIs

async fn create_emi(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(input): ApiJson<EmiInput>,
) -> ApiResult<Json<Emi>> {
    let emi = run_blocking(&state, move |state| {
        EmiService::new(&state.storage).create(user.id, input)
    })
    .await?;
    Ok(Json(emi))
}

async fn update_emi(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<EmiInput>,
) -> ApiResult<Json<Emi>> {
    // Ids that are not integers can never match a record
    let id = EmiId::parse(&raw_id)
        .map_err(|_| FinanceError::emi_not_found(raw_id.as_str()))?;
    let emi = run_blocking(&state, move |state| {
        EmiService::new(&state.storage).update(user.id, id, input)
    })
    .await?;
    Ok(Json(emi))
}

async fn delete_emi(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if let Ok(id) = EmiId::parse(&raw_id) {
        run_blocking(&state, move |state| EmiService::new(&state.storage).delete(user.id, id))
            .await?;
    }
    Ok(deleted())
}

// Daily expenses

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> ApiResult<Json<DailyExpense>> {
    let expense = run_blocking(&state, move |state| {
        ExpenseService::new(&state.storage).create(user.id, input)
    })
    .await?;
    Ok(Json(expense))
}

async fn update_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<ExpenseInput>,
) -> ApiResult<Json<DailyExpense>> {
    // Ids that are not integers can never match a record
    let id = ExpenseId::parse(&raw_id)
        .map_err(|_| FinanceError::expense_not_found(raw_id.as_str()))?;
    let expense = run_blocking(&state, move |state| {
        ExpenseService::new(&state.storage).update(user.id, id, input)
    })
    .await?;
    Ok(Json(expense))
}

async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if let Ok(id) = ExpenseId::parse(&raw_id) {
        run_blocking(&state, move |state| ExpenseService::new(&state.storage).delete(user.id, id))
            .await?;
    }
    Ok(deleted())
}

// Summary

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    month: Option<String>,
    year: Option<String>,
}

impl SummaryQuery {
    /// Missing parts default to the current month
    fn period(&self) -> ApiResult<Period> {
        let current = Period::current();

        let month = match self.month.as_deref().map(str::trim) {
            None | Some("") => current.month,
            Some(name) => name
                .parse::<Month>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        };

        let year = match self.year.as_deref().map(str::trim) {
            None | Some("") => current.year,
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid year: {}", raw)))?,
        };

        Ok(Period::new(month, year))
    }
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<FinancialSummary>> {
    let period = query.period()?;
    let summary = FinancialSummary::generate(&state.storage, user.id, period)?;
    Ok(Json(summary))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Explicit origins may carry the session cookie
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, COOKIE])
        .allow_credentials(true)
}

pub fn app_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let gated = Router::new()
        .route("/data", get(get_data))
        .route("/family-members", post(create_member))
        .route(
            "/family-members/{id}",
            put(update_member).delete(delete_member),
        )
        .route("/emis", post(create_emi))
        .route("/emis/{id}", put(update_emi).delete(delete_emi))
        .route("/daily-expenses", post(create_expense))
        .route(
            "/daily-expenses/{id}",
            put(update_expense).delete(delete_expense),
        )
        .route("/summary", get(get_summary))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-auth", get(auth::check_auth))
        .merge(gated);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
