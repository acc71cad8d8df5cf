//! Reference [`AdobeAnalyticsApi`] implementations: a `tracing`-backed client
//! for running without the native SDK, and a recording client that captures
//! every call for assertions.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use engage_core::Dictionary;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::adapter::AdobeAnalyticsApi;

/// Client that logs each SDK call instead of sending it.
#[derive(Debug, Default)]
pub struct TracingClient {
    debug: AtomicBool,
}

impl TracingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    fn log(&self, op: &'static str, name: &str, data: Option<&Dictionary>) {
        let fields = data.map(|d| d.len()).unwrap_or(0);
        if self.is_debug() {
            info!(op, hit = name, fields, data = ?data, "adobe sdk call");
        } else {
            debug!(op, hit = name, fields, "adobe sdk call");
        }
    }
}

impl AdobeAnalyticsApi for TracingClient {
    fn init(&self, debug: Option<bool>) -> Result<()> {
        let debug_mode = debug.unwrap_or(false);
        self.debug.store(debug_mode, Ordering::Relaxed);
        info!(debug = debug_mode, "adobe sdk initialized");
        Ok(())
    }

    fn track_state(&self, state: &str, context_data: Option<&Dictionary>) -> Result<()> {
        self.log("trackState", state, context_data);
        Ok(())
    }

    fn track_action(&self, action: &str, context_data: Option<&Dictionary>) -> Result<()> {
        self.log("trackAction", action, context_data);
        Ok(())
    }

    fn track_video(&self, action: &str, settings: Option<&Dictionary>) -> Result<()> {
        self.log("trackVideo", action, settings);
        Ok(())
    }

    fn track_timed_action_start(
        &self,
        action: &str,
        context_data: Option<&Dictionary>,
    ) -> Result<()> {
        self.log("trackTimedActionStart", action, context_data);
        Ok(())
    }

    fn track_timed_action_update(
        &self,
        action: &str,
        context_data: Option<&Dictionary>,
    ) -> Result<()> {
        self.log("trackTimedActionUpdate", action, context_data);
        Ok(())
    }

    fn track_timed_action_end(&self, action: &str) -> Result<()> {
        self.log("trackTimedActionEnd", action, None);
        Ok(())
    }
}

/// One captured SDK call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ClientCall {
    Init {
        debug: Option<bool>,
    },
    TrackState {
        name: String,
        context_data: Option<Dictionary>,
    },
    TrackAction {
        name: String,
        context_data: Option<Dictionary>,
    },
    TrackVideo {
        action: String,
        settings: Option<Dictionary>,
    },
    TrackTimedActionStart {
        action: String,
        context_data: Option<Dictionary>,
    },
    TrackTimedActionUpdate {
        action: String,
        context_data: Option<Dictionary>,
    },
    TrackTimedActionEnd {
        action: String,
    },
}

/// In-memory client that captures calls for testing.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<ClientCall>>,
    failure: Mutex<Option<String>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Calls made after `init`.
    pub fn hits(&self) -> Vec<ClientCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| !matches!(call, ClientCall::Init { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    /// Make every subsequent tracking call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    fn record(&self, call: ClientCall) -> Result<()> {
        if let Some(message) = self.failure.lock().as_ref() {
            return Err(anyhow!("{message}"));
        }
        self.calls.lock().push(call);
        Ok(())
    }
}

impl AdobeAnalyticsApi for RecordingClient {
    fn init(&self, debug: Option<bool>) -> Result<()> {
        self.calls.lock().push(ClientCall::Init { debug });
        Ok(())
    }

    fn track_state(&self, state: &str, context_data: Option<&Dictionary>) -> Result<()> {
        self.record(ClientCall::TrackState {
            name: state.to_string(),
            context_data: context_data.cloned(),
        })
    }

    fn track_action(&self, action: &str, context_data: Option<&Dictionary>) -> Result<()> {
        self.record(ClientCall::TrackAction {
            name: action.to_string(),
            context_data: context_data.cloned(),
        })
    }

    fn track_video(&self, action: &str, settings: Option<&Dictionary>) -> Result<()> {
        self.record(ClientCall::TrackVideo {
            action: action.to_string(),
            settings: settings.cloned(),
        })
    }

    fn track_timed_action_start(
        &self,
        action: &str,
        context_data: Option<&Dictionary>,
    ) -> Result<()> {
        self.record(ClientCall::TrackTimedActionStart {
            action: action.to_string(),
            context_data: context_data.cloned(),
        })
    }

    fn track_timed_action_update(
        &self,
        action: &str,
        context_data: Option<&Dictionary>,
    ) -> Result<()> {
        self.record(ClientCall::TrackTimedActionUpdate {
            action: action.to_string(),
            context_data: context_data.cloned(),
        })
    }

    fn track_timed_action_end(&self, action: &str) -> Result<()> {
        self.record(ClientCall::TrackTimedActionEnd {
            action: action.to_string(),
        })
    }
}
