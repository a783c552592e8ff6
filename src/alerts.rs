//! Distraction alert evaluation
//!
//! A stateless decision table evaluated at periodic checkpoints during a
//! session. Rules are checked top to bottom and the first match wins:
//! repeated distraction bursts, then sustained distraction in the trailing
//! window, then a sagging focus score.

use crate::types::{AlertDecision, AlertType, DistractionSnapshot};

/// Distraction events in the 5-minute window that trigger a break suggestion
const BURST_EVENT_COUNT: u32 = 3;
/// Burst rule only applies once the session has run this long (minutes)
const BURST_MIN_DURATION_MIN: f64 = 5.0;

/// Sustained gaze-away threshold within the 30-second window (seconds)
const SUSTAINED_GAZE_AWAY_SEC: f64 = 6.0;
/// Sustained face-absence threshold within the 30-second window (seconds)
const SUSTAINED_FACE_ABSENCE_SEC: f64 = 7.0;
/// Sustained head-turn threshold within the 30-second window (seconds)
const SUSTAINED_HEAD_TURN_SEC: f64 = 5.0;

/// Recovery faster than this downgrades a sustained-distraction alert (seconds)
const FAST_RECOVERY_SEC: f64 = 10.0;

/// Focus score below which the low-focus rule fires
const LOW_FOCUS_THRESHOLD: f64 = 50.0;
/// Low-focus rule only applies once the session has run this long (minutes)
const LOW_FOCUS_MIN_DURATION_MIN: f64 = 1.0;

/// Evaluator for periodic distraction checkpoints
pub struct AlertEvaluator;

impl AlertEvaluator {
    /// Evaluate a trailing-window snapshot into an alert decision
    pub fn evaluate(snapshot: &DistractionSnapshot) -> AlertDecision {
        // Rule 1: repeated distraction bursts
        if snapshot.distraction_events_last_5_min >= BURST_EVENT_COUNT
            && snapshot.duration_minutes > BURST_MIN_DURATION_MIN
        {
            return AlertDecision {
                alert_type: AlertType::SuggestBreak,
                reason: format!(
                    "{} distraction events in the last 5 minutes",
                    snapshot.distraction_events_last_5_min
                ),
                message: "You've been distracted several times in a row. A short break now \
                          will make the rest of your session count."
                    .to_string(),
            };
        }

        // Rule 2: sustained distraction in the trailing 30-second window
        let sustained = sustained_conditions(snapshot);
        if !sustained.is_empty() {
            let fast_recovery = snapshot.avg_recovery_time_seconds > 0.0
                && snapshot.avg_recovery_time_seconds < FAST_RECOVERY_SEC;
            let (alert_type, message) = if fast_recovery {
                (
                    AlertType::SoftAlert,
                    "Your attention drifted for a moment. Back to it — you recover quickly."
                        .to_string(),
                )
            } else {
                (
                    AlertType::StrongAlert,
                    "You've been looking away from your work. Bring your focus back to the screen."
                        .to_string(),
                )
            };
            return AlertDecision {
                alert_type,
                reason: sustained.join("; "),
                message,
            };
        }

        // Rule 3: sagging focus score
        if snapshot.current_focus_score < LOW_FOCUS_THRESHOLD
            && snapshot.duration_minutes > LOW_FOCUS_MIN_DURATION_MIN
        {
            return AlertDecision {
                alert_type: AlertType::SoftAlert,
                reason: format!("focus score dropped to {:.0}", snapshot.current_focus_score),
                message: "Your focus is dropping. Take a breath and re-center on the task."
                    .to_string(),
            };
        }

        AlertDecision {
            alert_type: AlertType::NoAlert,
            reason: "no distraction conditions met".to_string(),
            message: String::new(),
        }
    }
}

/// Collect every sustained-distraction condition that fired, with its
/// measured duration
fn sustained_conditions(snapshot: &DistractionSnapshot) -> Vec<String> {
    let mut fired = Vec::new();
    if snapshot.gaze_away_seconds >= SUSTAINED_GAZE_AWAY_SEC {
        fired.push(format!("gaze away {:.1}s of last 30s", snapshot.gaze_away_seconds));
    }
    if snapshot.face_absence_seconds >= SUSTAINED_FACE_ABSENCE_SEC {
        fired.push(format!("face absent {:.1}s of last 30s", snapshot.face_absence_seconds));
    }
    if snapshot.head_turn_seconds > SUSTAINED_HEAD_TURN_SEC {
        fired.push(format!("head turned {:.1}s of last 30s", snapshot.head_turn_seconds));
    }
    fired
}
