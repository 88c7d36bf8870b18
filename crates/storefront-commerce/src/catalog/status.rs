//! Fetch lifecycle state machine.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// No fetch in flight. Initial state and the state after a success.
    #[default]
    Idle,
    /// A fetch has been issued and has not resolved.
    Loading,
    /// The last fetch failed; stays here until a new request.
    Failed,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the fetch lifecycle: `idle -> loading -> idle | failed`, and
/// `failed -> loading` on retry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchTracker {
    status: FetchStatus,
    /// Reason given for the most recent failure, cleared on success.
    last_error: Option<String>,
    /// Requests issued since the last success.
    attempts: u32,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Issue a request. Allowed from `Idle` and `Failed`; a second request
    /// while `Loading` is rejected so the caller coalesces it.
    pub fn request(&mut self) -> Result<(), CommerceError> {
        match self.status {
            FetchStatus::Idle | FetchStatus::Failed => {
                self.status = FetchStatus::Loading;
                self.attempts = self.attempts.saturating_add(1);
                Ok(())
            }
            FetchStatus::Loading => Err(self.rejected(FetchStatus::Loading)),
        }
    }

    /// Resolve the in-flight request successfully.
    pub fn succeed(&mut self) -> Result<(), CommerceError> {
        self.expect_loading(FetchStatus::Idle)?;
        self.status = FetchStatus::Idle;
        self.last_error = None;
        self.attempts = 0;
        Ok(())
    }

    /// Resolve the in-flight request with a failure.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), CommerceError> {
        self.expect_loading(FetchStatus::Failed)?;
        self.status = FetchStatus::Failed;
        self.last_error = Some(reason.into());
        Ok(())
    }

    fn expect_loading(&self, to: FetchStatus) -> Result<(), CommerceError> {
        if self.status == FetchStatus::Loading {
            Ok(())
        } else {
            Err(self.rejected(to))
        }
    }

    fn rejected(&self, to: FetchStatus) -> CommerceError {
        tracing::warn!(from = %self.status, to = %to, "rejected fetch transition");
        CommerceError::InvalidFetchTransition {
            from: self.status,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let tracker = FetchTracker::new();
        assert_eq!(tracker.status(), FetchStatus::Idle);
        assert_eq!(tracker.attempts(), 0);
    }

    #[test]
    fn test_success_path() {
        let mut tracker = FetchTracker::new();
        tracker.request().unwrap();
        assert_eq!(tracker.status(), FetchStatus::Loading);
        tracker.succeed().unwrap();
        assert_eq!(tracker.status(), FetchStatus::Idle);
        assert_eq!(tracker.attempts(), 0);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut tracker = FetchTracker::new();
        tracker.request().unwrap();
        tracker.fail("connection reset").unwrap();
        assert_eq!(tracker.status(), FetchStatus::Failed);
        assert_eq!(tracker.last_error(), Some("connection reset"));

        tracker.request().unwrap();
        assert_eq!(tracker.status(), FetchStatus::Loading);
        assert_eq!(tracker.attempts(), 2);

        tracker.succeed().unwrap();
        assert_eq!(tracker.last_error(), None);
    }

    #[test]
    fn test_rejects_double_request() {
        let mut tracker = FetchTracker::new();
        tracker.request().unwrap();
        let err = tracker.request().unwrap_err();
        assert_eq!(
            err,
            CommerceError::InvalidFetchTransition {
                from: FetchStatus::Loading,
                to: FetchStatus::Loading,
            }
        );
        assert_eq!(tracker.status(), FetchStatus::Loading);
    }

    #[test]
    fn test_rejects_resolution_without_request() {
        let mut tracker = FetchTracker::new();
        assert!(tracker.succeed().is_err());
        assert!(tracker.fail("boom").is_err());
        assert_eq!(tracker.status(), FetchStatus::Idle);

        tracker.request().unwrap();
        tracker.fail("boom").unwrap();
        assert!(tracker.fail("again").is_err());
        assert!(tracker.succeed().is_err());
        assert_eq!(tracker.status(), FetchStatus::Failed);
        assert_eq!(tracker.last_error(), Some("boom"));
    }
}
