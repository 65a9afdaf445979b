use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::warn;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use uuid::Uuid;

use super::state::SpeechState;

#[derive(Serialize, Clone)]
struct SpeakEvent {
    utterance_id: String,
    text: String,
}

#[derive(Serialize, Clone)]
struct CancelEvent {
    utterance_id: String,
}

/// Coordinates read-aloud requests against the webview's speech synthesis.
///
/// The cancel instruction for any in-progress utterance is emitted before
/// the new speak instruction, so the page never has two utterances queued.
#[derive(Clone)]
pub struct SpeechController {
    app_handle: AppHandle,
    state: Arc<Mutex<SpeechState>>,
}

impl SpeechController {
    pub fn new(app_handle: AppHandle) -> Self {
        Self {
            app_handle,
            state: Arc::new(Mutex::new(SpeechState::new())),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().unwrap().set_available(available);
    }

    pub fn speak(&self, text: String) -> Result<String> {
        let utterance_id = Uuid::new_v4().to_string();
        let cancelled = self.state.lock().unwrap().begin(utterance_id.clone())?;

        if let Some(previous) = cancelled {
            self.app_handle
                .emit(
                    "speech-cancel",
                    CancelEvent {
                        utterance_id: previous,
                    },
                )
                .map_err(|err| anyhow!("failed to emit speech-cancel: {err}"))?;
        }

        self.app_handle
            .emit(
                "speech-speak",
                SpeakEvent {
                    utterance_id: utterance_id.clone(),
                    text,
                },
            )
            .map_err(|err| anyhow!("failed to emit speech-speak: {err}"))?;

        Ok(utterance_id)
    }

    pub fn mark_started(&self, utterance_id: &str) {
        let state = self.state.lock().unwrap();
        if state.active() != Some(utterance_id) {
            warn!("Start callback for stale utterance {utterance_id}");
        }
    }

    pub fn mark_finished(&self, utterance_id: &str) {
        self.state.lock().unwrap().settle(utterance_id);
    }

    pub fn mark_failed(&self, utterance_id: &str, message: &str) {
        warn!("Utterance {utterance_id} failed: {message}");
        self.state.lock().unwrap().settle(utterance_id);
    }
}
