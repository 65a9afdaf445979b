use anyhow::{bail, Result};

/// Bookkeeping for the single allowed utterance.
///
/// The speech capability itself lives in the webview; this tracks which
/// utterance, if any, is allowed to be speaking right now. Starting a new
/// one always cancels the previous one first — there is no queue.
#[derive(Debug, Default)]
pub struct SpeechState {
    available: bool,
    current: Option<String>,
}

impl SpeechState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page reports capability availability once at load.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Claim the speaking slot for a new utterance. Returns the id of the
    /// utterance that must be cancelled first, if one was in progress.
    /// Fails synchronously when the capability is unavailable.
    pub fn begin(&mut self, utterance_id: String) -> Result<Option<String>> {
        if !self.available {
            bail!("speech synthesis is not available");
        }
        Ok(self.current.replace(utterance_id))
    }

    /// An utterance ended (finished or failed). Only the currently active
    /// utterance clears the slot: a late callback from a cancelled one is
    /// ignored.
    pub fn settle(&mut self, utterance_id: &str) {
        if self.current.as_deref() == Some(utterance_id) {
            self.current = None;
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
