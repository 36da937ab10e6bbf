//! Cross-kind endpoints: the full rule snapshot and the bulk active-status
//! update.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::AppState;
use crate::db::rules as store;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::rules::{Ip, Mode, Port, RuleKind, Url};
use crate::validation::{parse_update_payload, KindUpdate};

/// GET /api/firewall/rules — every rule, grouped by kind and mode.
///
/// The six reads fan out concurrently and all six buckets are always present,
/// empty or not.
pub async fn list_all(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let db = &state.db;
    let (ips_black, ips_white, urls_black, urls_white, ports_black, ports_white) = tokio::try_join!(
        store::list_by_mode::<Ip>(db, Mode::Blacklist),
        store::list_by_mode::<Ip>(db, Mode::Whitelist),
        store::list_by_mode::<Url>(db, Mode::Blacklist),
        store::list_by_mode::<Url>(db, Mode::Whitelist),
        store::list_by_mode::<Port>(db, Mode::Blacklist),
        store::list_by_mode::<Port>(db, Mode::Whitelist),
    )?;

    Ok(Json(json!({
        "ips": { "blacklist": bucket(ips_black), "whitelist": bucket(ips_white) },
        "urls": { "blacklist": bucket(urls_black), "whitelist": bucket(urls_white) },
        "ports": { "blacklist": bucket(ports_black), "whitelist": bucket(ports_white) },
    })))
}

fn bucket<V: Serialize>(rows: Vec<(i64, V)>) -> Vec<Value> {
    rows.into_iter()
        .map(|(id, value)| json!({ "id": id, "value": value }))
        .collect()
}

/// PUT /api/firewall/rules — bulk-toggle active status by id, per kind.
///
/// Each kind section is optional; ids whose mode does not match the section's
/// mode are silently excluded. 404 when no row matched at all.
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let payload = parse_update_payload(&body).map_err(AppError::Validation)?;

    let db = &state.db;
    let (ips, urls, ports) = tokio::try_join!(
        run_update::<Ip>(db, payload.ips),
        run_update::<Url>(db, payload.urls),
        run_update::<Port>(db, payload.ports),
    )?;

    let mut updated = Vec::new();
    collect_updated::<Ip>(&mut updated, ips);
    collect_updated::<Url>(&mut updated, urls);
    collect_updated::<Port>(&mut updated, ports);

    if updated.is_empty() {
        return Err(AppError::NotFound(
            "No matching rules found to update.".to_string(),
        ));
    }

    tracing::info!(updated = updated.len(), "Rule statuses updated");

    Ok(Json(json!({
        "message": "Successfully updated rule statuses.",
        "updated": updated,
    })))
}

async fn run_update<K: RuleKind>(
    db: &DbPool,
    section: Option<KindUpdate>,
) -> Result<Vec<store::RuleRow<K::Value>>, sqlx::Error> {
    match section {
        Some(section) => {
            store::update_status::<K>(db, &section.ids, section.mode, section.active).await
        }
        None => Ok(Vec::new()),
    }
}

fn collect_updated<K: RuleKind>(out: &mut Vec<Value>, rows: Vec<store::RuleRow<K::Value>>) {
    out.extend(rows.into_iter().map(|(id, value, active)| {
        json!({ "type": K::KIND, "id": id, "value": value, "active": active == 1 })
    }));
}
