//! HTTP request handlers for the payroll engine API.
//!
//! Every handler tags its log lines with a fresh correlation id and maps
//! failures to [`ApiErrorResponse`].

use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PaymentDetails, PaymentField};
use crate::reporting::{export_csv, summarize};

use super::request::{
    BonusRequest, CreatePayrollRequest, EmployeeIdsRequest, ListPayrollsQuery,
    OverrideAdjustmentsRequest, PaymentRequest,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payrolls", post(create_payroll).get(list_payrolls))
        .route("/payrolls/:id", get(get_payroll).delete(delete_payroll))
        .route("/payrolls/:id/lines", get(get_ledger_lines))
        .route("/payrolls/:id/recalculate", post(recalculate_payroll))
        .route("/payrolls/:id/adjustments", post(override_adjustments))
        .route("/payrolls/:id/payment", post(set_payment_status))
        .route("/payrolls/:id/paid", post(mark_fully_paid))
        .route("/periods/:year/:month/generate", post(generate_period))
        .route("/periods/:year/:month/recalculate", post(recalculate_period))
        .route("/periods/:year/:month/regenerate", post(regenerate_period))
        .route(
            "/periods/:year/:month/bonus",
            post(apply_bonus).delete(remove_bonus),
        )
        .route("/periods/:year/:month/summary", get(period_summary))
        .route("/periods/:year/:month/export.csv", get(export_period))
        .with_state(state)
}

fn parse_record_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::from_str(raw)
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid payroll record id: {}", raw)))
}

fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Rejected request body");
        rejection.into()
    })
}

/// Logs the outcome of a service call and converts its error.
fn finish<T>(correlation_id: Uuid, started: Instant, result: PayrollResult<T>) -> ApiResult<T> {
    let duration_us = started.elapsed().as_micros();
    match result {
        Ok(value) => {
            info!(correlation_id = %correlation_id, duration_us, "Request completed");
            Ok(value)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, duration_us, "Request failed");
            Err(err.into())
        }
    }
}

fn json<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

/// POST /payrolls
async fn create_payroll(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayrollRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let request = parse_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        month = request.month,
        year = request.year,
        "Ensuring payroll record"
    );

    let started = Instant::now();
    let result = match request.period() {
        Ok(period) => state.service().ensure_record(&request.employee_id, period).await,
        Err(err) => Err(err),
    };
    let record = finish(correlation_id, started, result)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// GET /payrolls
async fn list_payrolls(
    State(state): State<AppState>,
    Query(query): Query<ListPayrollsQuery>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, ?query, "Listing payroll records");

    let period = query.period().map_err(|err| rejected_period(correlation_id, err))?;
    let started = Instant::now();
    let service = state.service();
    let result = match (query.employee_id.as_deref(), period) {
        (Some(employee_id), period) => service.records_for_employee(employee_id).await.map(|records| {
            records
                .into_iter()
                .filter(|r| period.is_none_or(|p| r.period() == p))
                .filter(|r| query.include_paid || !r.is_fully_paid())
                .collect()
        }),
        (None, Some(period)) => service.records_for_period(period, query.include_paid).await,
        (None, None) => {
            return Err(ApiErrorResponse::bad_request(
                "Either employee_id or both month and year are required",
            ));
        }
    };
    finish(correlation_id, started, result).map(json)
}

/// GET /payrolls/:id
async fn get_payroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    let started = Instant::now();
    let result = state.service().get_record(id).await;
    finish(correlation_id, started, result).map(json)
}

/// DELETE /payrolls/:id
async fn delete_payroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    info!(correlation_id = %correlation_id, record_id = %id, "Deleting payroll record");
    let started = Instant::now();
    let result = state.service().delete_record(id).await;
    finish(correlation_id, started, result).map(|_| StatusCode::NO_CONTENT)
}

/// GET /payrolls/:id/lines
async fn get_ledger_lines(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    let started = Instant::now();
    let result = state.service().ledger_lines(id).await;
    finish(correlation_id, started, result).map(json)
}

/// POST /payrolls/:id/recalculate
async fn recalculate_payroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    info!(correlation_id = %correlation_id, record_id = %id, "Recalculating payroll record");
    let started = Instant::now();
    let result = state.service().recalculate_record(id).await;
    finish(correlation_id, started, result).map(json)
}

/// POST /payrolls/:id/adjustments
async fn override_adjustments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<OverrideAdjustmentsRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    let request = parse_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        record_id = %id,
        deductions = %request.deductions,
        additions = %request.additions,
        "Overriding payroll adjustments"
    );
    let started = Instant::now();
    let result = state
        .service()
        .override_adjustments(id, request.deductions, request.additions)
        .await;
    finish(correlation_id, started, result).map(json)
}

/// POST /payrolls/:id/payment
async fn set_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    let request = parse_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        record_id = %id,
        field = %request.field,
        paid = request.paid,
        "Updating payment status"
    );

    let started = Instant::now();
    let result = match PaymentField::from_str(&request.field) {
        Ok(field) => {
            state
                .service()
                .set_payment_status(id, field, request.paid, request.details())
                .await
        }
        Err(err) => Err(err),
    };
    finish(correlation_id, started, result).map(json)
}

/// POST /payrolls/:id/paid
async fn mark_fully_paid(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentDetails>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let id = parse_record_id(&id)?;
    // The body is optional here; a bare POST marks both sides paid.
    let details = match payload {
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        payload => Some(parse_body(correlation_id, payload)?),
    };
    info!(correlation_id = %correlation_id, record_id = %id, "Marking payroll record fully paid");
    let started = Instant::now();
    let result = state.service().mark_fully_paid(id, details).await;
    finish(correlation_id, started, result).map(json)
}

fn rejected_period(correlation_id: Uuid, err: PayrollError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Rejected pay period");
    err.into()
}

fn period_of(correlation_id: Uuid, year: i32, month: u32) -> ApiResult<PayPeriod> {
    PayPeriod::new(month, year).map_err(|err| rejected_period(correlation_id, err))
}

/// POST /periods/:year/:month/generate
async fn generate_period(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    info!(correlation_id = %correlation_id, period = %period, "Generating payroll period");
    let started = Instant::now();
    let result = state.service().generate_period(period).await;
    finish(correlation_id, started, result).map(json)
}

/// POST /periods/:year/:month/recalculate
async fn recalculate_period(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    info!(correlation_id = %correlation_id, period = %period, "Recalculating payroll period");
    let started = Instant::now();
    let result = state.service().recalculate_all(period).await;
    finish(correlation_id, started, result).map(json)
}

/// POST /periods/:year/:month/regenerate
async fn regenerate_period(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<EmployeeIdsRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    let request = parse_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        period = %period,
        employees = request.employee_ids.len(),
        "Regenerating payroll records"
    );
    let outcome = state
        .service()
        .force_regenerate_payrolls(period, &request.employee_ids)
        .await;
    Ok(json(outcome))
}

/// POST /periods/:year/:month/bonus
async fn apply_bonus(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<BonusRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    let request = parse_body(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        period = %period,
        amount = %request.amount,
        employees = request.employee_ids.len(),
        "Applying attendance bonus"
    );
    let started = Instant::now();
    let result = state
        .service()
        .apply_bonus(&request.employee_ids, period, request.amount)
        .await;
    finish(correlation_id, started, result).map(json)
}

/// DELETE /periods/:year/:month/bonus
async fn remove_bonus(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
    payload: Result<Json<EmployeeIdsRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    let request = parse_body(correlation_id, payload)?;
    info!(correlation_id = %correlation_id, period = %period, "Removing attendance bonus");
    let outcome = state
        .service()
        .remove_bonus(&request.employee_ids, period)
        .await;
    Ok(json(outcome))
}

/// GET /periods/:year/:month/summary
async fn period_summary(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    let started = Instant::now();
    let result = state.service().records_for_period(period, true).await;
    let records = finish(correlation_id, started, result)?;
    Ok(json(summarize(&records)))
}

/// GET /periods/:year/:month/export.csv
async fn export_period(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let period = period_of(correlation_id, year, month)?;
    let started = Instant::now();
    let result = match state.service().records_for_period(period, true).await {
        Ok(records) => export_csv(&records),
        Err(err) => Err(err),
    };
    let body = finish(correlation_id, started, result)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        body,
    )
        .into_response())
}
