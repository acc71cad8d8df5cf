//! Adobe Analytics SDK boundary: the operations the provider needs from the
//! native SDK binding.
//!
//! The provider itself only calls [`init`](AdobeAnalyticsApi::init),
//! [`track_state`](AdobeAnalyticsApi::track_state) and
//! [`track_action`](AdobeAnalyticsApi::track_action). Video and timed-action
//! operations are exposed for callers that reach the SDK directly through
//! [`AdobeAnalyticsProvider::client`](crate::AdobeAnalyticsProvider::client).
//! Nothing here promises delivery, batching or error reporting; that belongs
//! to the implementation.

use anyhow::Result;
use engage_core::Dictionary;

/// Adobe SDK adapter trait.
pub trait AdobeAnalyticsApi: Send + Sync {
    fn init(&self, debug: Option<bool>) -> Result<()>;

    /// Record a state hit (page or screen load).
    fn track_state(&self, state: &str, context_data: Option<&Dictionary>) -> Result<()>;

    /// Record an action hit (discrete interaction).
    fn track_action(&self, action: &str, context_data: Option<&Dictionary>) -> Result<()>;

    fn track_video(&self, action: &str, settings: Option<&Dictionary>) -> Result<()>;

    fn track_timed_action_start(&self, action: &str, context_data: Option<&Dictionary>)
        -> Result<()>;

    fn track_timed_action_update(
        &self,
        action: &str,
        context_data: Option<&Dictionary>,
    ) -> Result<()>;

    fn track_timed_action_end(&self, action: &str) -> Result<()>;
}
