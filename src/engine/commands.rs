use chrono::Utc;
use tauri::State;
use uuid::Uuid;

use crate::{
    engine::{CategoryFilter, QueryState, ViewUpdate},
    models::{Report, ReportInput},
    AppState,
};

#[tauri::command]
pub async fn get_reports_view(state: State<'_, AppState>) -> Result<ViewUpdate, String> {
    Ok(state.engine.current_view())
}

#[tauri::command]
pub async fn set_query(
    state: State<'_, AppState>,
    text: String,
    category: String,
) -> Result<(), String> {
    let category = CategoryFilter::parse(&category).map_err(|e| e.to_string())?;
    state.engine.set_query(QueryState { text, category });
    Ok(())
}

#[tauri::command]
pub async fn clear_query(state: State<'_, AppState>) -> Result<(), String> {
    state.engine.clear_query();
    Ok(())
}

#[tauri::command]
pub async fn focus_report(state: State<'_, AppState>, report_id: String) -> Result<(), String> {
    state
        .engine
        .focus_report(&report_id)
        .map_err(|e| e.to_string())
}

/// Validate and store a new report. Validation failures return before any
/// store call; a store failure is surfaced verbatim so the page can keep the
/// form state for a manual retry.
#[tauri::command]
pub async fn submit_report(
    state: State<'_, AppState>,
    input: ReportInput,
) -> Result<Report, String> {
    let report = input
        .into_report(Uuid::new_v4().to_string(), Utc::now())
        .map_err(|e| e.to_string())?;

    state.feed.submit(&report).await.map_err(|e| e.to_string())?;

    Ok(report)
}

/// Mark a report claimed. Irreversible; the page prompts for confirmation
/// before invoking this. On success the feed delivers a fresh snapshot; on
/// failure nothing was written and the view is left as it was.
#[tauri::command]
pub async fn claim_report(state: State<'_, AppState>, report_id: String) -> Result<(), String> {
    state
        .feed
        .claim(&report_id, Utc::now())
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn resync_reports(state: State<'_, AppState>) -> Result<(), String> {
    state.feed.notify().await;
    Ok(())
}
