//! Fullscreen violation policy
//!
//! A monotonic escalation ladder over the session's running violation count.
//! The caller owns the counter and resets it between sessions; the engine
//! only maps the current count to a tier. There is no de-escalation.

use crate::types::{ViolationAction, ViolationDecision, ViolationSnapshot};

/// Penalty applied at the third violation (percentage points)
const THIRD_VIOLATION_PENALTY: f64 = 5.0;
/// Penalty applied when the session is ended (percentage points)
const END_SESSION_PENALTY: f64 = 10.0;

/// Policy for lock-mode fullscreen violations
pub struct ViolationPolicy;

impl ViolationPolicy {
    /// Map the running violation count to an escalation tier
    pub fn evaluate(snapshot: &ViolationSnapshot) -> ViolationDecision {
        let reason = format!(
            "violation #{} ({}, {:.0}s after the previous one)",
            snapshot.violation_count,
            snapshot.last_violation.as_str(),
            snapshot.seconds_since_last,
        );

        match snapshot.violation_count {
            0 | 1 => ViolationDecision {
                action: ViolationAction::SoftWarning,
                penalty_percentage: 0.0,
                reason,
                message: "You left fullscreen mode. Stay in fullscreen to keep your session \
                          on track."
                    .to_string(),
            },
            2 => ViolationDecision {
                action: ViolationAction::StrongWarning,
                penalty_percentage: 0.0,
                reason,
                message: "Second fullscreen violation. One more and your focus score will \
                          take a penalty."
                    .to_string(),
            },
            3 => ViolationDecision {
                action: ViolationAction::ApplyScorePenalty,
                penalty_percentage: THIRD_VIOLATION_PENALTY,
                reason,
                message: "Third violation: a 5% penalty was applied to your focus score. \
                          The next one ends the session."
                    .to_string(),
            },
            _ => ViolationDecision {
                action: ViolationAction::EndSession,
                penalty_percentage: END_SESSION_PENALTY,
                reason,
                message: "Too many fullscreen violations. The session has been ended with a \
                          10% score penalty."
                    .to_string(),
            },
        }
    }
}
