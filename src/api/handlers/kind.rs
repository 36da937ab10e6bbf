//! Add/remove handlers, generic over the rule kind. The router instantiates
//! these once per kind; validation and persistence are shared.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::AppState;
use crate::db::rules as store;
use crate::error::{AppError, AppResult};
use crate::rules::RuleKind;
use crate::validation::parse_rule_payload;

/// POST /api/firewall/{kind} — insert values under a mode.
///
/// Responds 201 with the rows actually inserted; duplicates are filtered out
/// of the response, never reported as errors, so the list may be empty.
pub async fn add<K: RuleKind>(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let payload = parse_rule_payload::<K>(&body).map_err(AppError::Validation)?;
    let inserted = store::add_rules::<K>(&state.db, &payload.values, payload.mode).await?;

    tracing::info!(
        kind = K::KIND,
        mode = payload.mode.as_str(),
        requested = payload.values.len(),
        inserted = inserted.len(),
        "Rules added"
    );

    let values: Vec<Value> = inserted
        .into_iter()
        .map(|(id, value, active)| json!({ "id": id, "value": value, "active": active == 1 }))
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "type": K::KIND,
            "mode": payload.mode,
            "values": values,
            "status": "success",
        })),
    ))
}

/// DELETE /api/firewall/{kind} — remove values matching both value and mode.
///
/// Responds 200 with the values actually deleted, or 404 when nothing matched.
pub async fn remove<K: RuleKind>(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let payload = parse_rule_payload::<K>(&body).map_err(AppError::Validation)?;
    let deleted = store::delete_rules::<K>(&state.db, &payload.values, payload.mode).await?;

    tracing::info!(
        kind = K::KIND,
        mode = payload.mode.as_str(),
        requested = payload.values.len(),
        deleted = deleted.len(),
        "Rules removed"
    );

    if deleted.is_empty() {
        return Err(AppError::NotFound(format!(
            "No matching {} rules found to delete.",
            K::KIND
        )));
    }

    Ok(Json(json!({
        "type": K::KIND,
        "mode": payload.mode,
        "values": deleted,
        "status": "success",
    })))
}
