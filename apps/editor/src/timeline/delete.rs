use tracing::debug;

/// Two-phase guard in front of destructive calls.
///
/// `Idle -> Pending { in_flight: false }` on request, `in_flight: true` while
/// the DELETE is outstanding, back to `Idle` on success or cancel. A failed
/// delete stays `Pending` with `in_flight: false` so the user can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    Pending { id: String, in_flight: bool },
}

#[derive(Debug, Clone, Default)]
pub struct DeleteGuard {
    state: DeleteState,
}

impl DeleteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    /// Arms the guard for `id`. Performs no network call. Ignored while
    /// another delete is in flight.
    pub fn request(&mut self, id: &str) -> bool {
        if self.is_in_flight() {
            debug!("Ignoring delete request for {id}: a delete is already in flight");
            return false;
        }
        self.state = DeleteState::Pending {
            id: id.to_string(),
            in_flight: false,
        };
        true
    }

    /// Marks the armed delete for `id` as in flight. Returns false unless the
    /// guard is armed for exactly this id and idle.
    pub fn begin(&mut self, id: &str) -> bool {
        match &mut self.state {
            DeleteState::Pending {
                id: pending,
                in_flight,
            } if pending.as_str() == id && !*in_flight => {
                *in_flight = true;
                true
            }
            _ => false,
        }
    }

    pub fn succeed(&mut self, id: &str) {
        if self.pending_id() == Some(id) {
            self.state = DeleteState::Idle;
        }
    }

    /// Keeps the confirmation open for `id` but clears the in-flight flag.
    pub fn fail(&mut self, id: &str) {
        if let DeleteState::Pending {
            id: pending,
            in_flight,
        } = &mut self.state
        {
            if pending.as_str() == id {
                *in_flight = false;
            }
        }
    }

    /// Disarms unconditionally. Calling it while idle changes nothing.
    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }

    pub fn pending_id(&self) -> Option<&str> {
        match &self.state {
            DeleteState::Pending { id, .. } => Some(id),
            DeleteState::Idle => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, DeleteState::Pending { in_flight: true, .. })
    }

    /// Caption for the confirming control.
    pub fn confirm_label(&self) -> &'static str {
        if self.is_in_flight() {
            "Deleting..."
        } else {
            "Delete"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_arms_without_in_flight() {
        let mut guard = DeleteGuard::new();
        assert!(guard.request("a"));
        assert_eq!(guard.pending_id(), Some("a"));
        assert!(!guard.is_in_flight());
        assert_eq!(guard.confirm_label(), "Delete");
    }

    #[test]
    fn test_success_returns_to_idle() {
        let mut guard = DeleteGuard::new();
        guard.request("a");
        assert!(guard.begin("a"));
        assert_eq!(guard.confirm_label(), "Deleting...");
        guard.succeed("a");
        assert_eq!(guard.state(), &DeleteState::Idle);
    }

    #[test]
    fn test_failure_keeps_confirmation() {
        let mut guard = DeleteGuard::new();
        guard.request("a");
        guard.begin("a");
        guard.fail("a");
        assert_eq!(
            guard.state(),
            &DeleteState::Pending {
                id: "a".to_string(),
                in_flight: false
            }
        );
        assert!(guard.begin("a"), "retry allowed after failure");
    }

    #[test]
    fn test_begin_requires_matching_id() {
        let mut guard = DeleteGuard::new();
        assert!(!guard.begin("a"));
        guard.request("a");
        assert!(!guard.begin("b"));
        assert!(guard.begin("a"));
        assert!(!guard.begin("a"), "double confirm is ignored");
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut guard = DeleteGuard::new();
        guard.cancel();
        assert_eq!(guard.state(), &DeleteState::Idle);
        guard.request("a");
        guard.cancel();
        guard.cancel();
        assert_eq!(guard.state(), &DeleteState::Idle);
    }

    #[test]
    fn test_late_result_after_cancel_is_ignored() {
        let mut guard = DeleteGuard::new();
        guard.request("a");
        guard.begin("a");
        guard.cancel();
        guard.request("b");
        guard.fail("a");
        guard.succeed("a");
        assert_eq!(guard.pending_id(), Some("b"));
    }
}
