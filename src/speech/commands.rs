use tauri::State;

use crate::AppState;

/// Read one report's summary aloud. A second call while an utterance is in
/// progress cancels it; an unavailable capability fails right here with no
/// other effect.
#[tauri::command]
pub async fn read_report_aloud(
    state: State<'_, AppState>,
    report_id: String,
) -> Result<String, String> {
    let text = state
        .engine
        .spoken_summary(&report_id)
        .ok_or_else(|| "report no longer exists".to_string())?;

    state.speech.speak(text).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_speech_available(
    state: State<'_, AppState>,
    available: bool,
) -> Result<(), String> {
    state.speech.set_available(available);
    Ok(())
}

#[tauri::command]
pub async fn speech_started(
    state: State<'_, AppState>,
    utterance_id: String,
) -> Result<(), String> {
    state.speech.mark_started(&utterance_id);
    Ok(())
}

#[tauri::command]
pub async fn speech_finished(
    state: State<'_, AppState>,
    utterance_id: String,
) -> Result<(), String> {
    state.speech.mark_finished(&utterance_id);
    Ok(())
}

#[tauri::command]
pub async fn speech_failed(
    state: State<'_, AppState>,
    utterance_id: String,
    message: String,
) -> Result<(), String> {
    state.speech.mark_failed(&utterance_id, &message);
    Ok(())
}
