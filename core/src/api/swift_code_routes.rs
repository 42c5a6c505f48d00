use super::{ApiError, AppState};
use crate::{error::DirectoryError, registration::BankRegistration};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// GET /v1/swift-codes/:swift_code
pub(super) async fn bank_by_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Response, ApiError> {
    let details = state
        .with_directory(move |dir| dir.bank_by_code(&swift_code))
        .await?;
    Ok(match details {
        Some(details) => (StatusCode::OK, Json(details)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /v1/swift-codes/country/:country_iso2
pub(super) async fn banks_by_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Response, ApiError> {
    let roster = state
        .with_directory(move |dir| dir.banks_by_country(&country_iso2))
        .await?;
    Ok(match roster {
        Some(roster) => (StatusCode::OK, Json(roster)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /v1/swift-codes
///
/// Body decoding failures (missing fields, wrong types, bad JSON) are
/// validation errors, answered with 400 like any other rejected payload.
pub(super) async fn register_bank(
    State(state): State<AppState>,
    payload: Result<Json<BankRegistration>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(registration) =
        payload.map_err(|rejection| DirectoryError::validation("body", rejection.body_text()))?;
    let bank = registration.into_new_bank()?;
    let swift_code = bank.swift_code.clone();

    state
        .with_directory(move |dir| dir.register_bank(&bank))
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("Bank with swift code '{swift_code}' registered successfully") })),
    )
        .into_response())
}

/// DELETE /v1/swift-codes/:swift_code
pub(super) async fn remove_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Response, ApiError> {
    let code = swift_code.clone();
    state.with_directory(move |dir| dir.remove(&code)).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": format!("Bank with swift code '{swift_code}' deleted successfully") })),
    )
        .into_response())
}
