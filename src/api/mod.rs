//! HTTP API module for the payroll engine.
//!
//! This module exposes the payroll operations as JSON endpoints. Handlers are
//! thin: they parse the request, call [`PayrollService`](crate::payroll::PayrollService)
//! and map [`PayrollError`](crate::error::PayrollError) to a status code.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BonusRequest, CreatePayrollRequest, EmployeeIdsRequest, ListPayrollsQuery,
    OverrideAdjustmentsRequest, PaymentRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
