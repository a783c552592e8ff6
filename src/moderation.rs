//! Study room moderation
//!
//! Per-participant decision table for shared silent study rooms, evaluated
//! top to bottom with first-match-wins semantics: open microphone, lock-mode
//! fullscreen violations, distraction bursts, then room-wide fatigue.
//!
//! Every branch populates at most one of the private/room messages; the
//! group-break suggestion is the only room-wide broadcast and carries no
//! per-user penalty.

use crate::types::{
    FullscreenStatus, MicStatus, ModerationAction, ModerationDecision, RoomSnapshot,
};

/// Lock-mode violations at which the score penalty tier starts
const LOCK_PENALTY_VIOLATIONS: u32 = 3;
/// Penalty for repeated lock-mode violations (percentage points)
const LOCK_VIOLATION_PENALTY: f64 = 5.0;

/// Distraction events in the 5-minute window that draw a warning
const DISTRACTION_WARNING_COUNT: u32 = 3;

/// Room average below which a group break is considered
const GROUP_FATIGUE_THRESHOLD: f64 = 60.0;
/// A group break is only suggested with this much time left (minutes)
const GROUP_BREAK_MIN_REMAINING_MIN: f64 = 10.0;

/// Moderator for shared study rooms
pub struct RoomModerator;

impl RoomModerator {
    /// Evaluate one participant's room snapshot into a moderation decision
    pub fn moderate(snapshot: &RoomSnapshot) -> ModerationDecision {
        // Rule 1: open microphone in a silent room, independent of all else
        if snapshot.mic_status == MicStatus::On {
            return private(
                ModerationAction::SoftNotice,
                0.0,
                "microphone on in a silent room",
                "Your microphone is on. Please mute it — this is a silent study room.",
            );
        }

        // Rule 2: lock-mode fullscreen violations, escalating with the count
        if snapshot.fullscreen_status == FullscreenStatus::Inactive {
            return if snapshot.lock_mode_violations >= LOCK_PENALTY_VIOLATIONS {
                private(
                    ModerationAction::ApplyScorePenalty,
                    LOCK_VIOLATION_PENALTY,
                    &format!(
                        "fullscreen inactive after {} lock-mode violations",
                        snapshot.lock_mode_violations
                    ),
                    "Repeated lock-mode violations: a 5% penalty was applied to your score. \
                     Return to fullscreen to continue.",
                )
            } else if snapshot.lock_mode_violations == 2 {
                private(
                    ModerationAction::Warning,
                    0.0,
                    "fullscreen inactive, second lock-mode violation",
                    "You left fullscreen again. One more violation and your score will take \
                     a penalty.",
                )
            } else {
                private(
                    ModerationAction::SoftNotice,
                    0.0,
                    "fullscreen inactive",
                    "This room runs in lock mode. Please return to fullscreen.",
                )
            };
        }

        // Rule 3: distraction burst
        if snapshot.distraction_events_last_5_min >= DISTRACTION_WARNING_COUNT {
            return private(
                ModerationAction::Warning,
                0.0,
                &format!(
                    "{} distraction events in the last 5 minutes",
                    snapshot.distraction_events_last_5_min
                ),
                "You've been distracted several times in the last few minutes. Try to \
                 settle back in — the room is counting on you.",
            );
        }

        // Rule 4: room-wide fatigue, only worth a break if enough time remains
        if snapshot.participants > 1
            && snapshot.average_room_focus_score < GROUP_FATIGUE_THRESHOLD
            && snapshot.minutes_remaining > GROUP_BREAK_MIN_REMAINING_MIN
        {
            return ModerationDecision {
                action: ModerationAction::SuggestGroupBreak,
                penalty_percentage: 0.0,
                private_message: None,
                room_message: Some(
                    "The room's focus is dipping. How about a short group break before the \
                     next stretch?"
                        .to_string(),
                ),
                reason: format!(
                    "room average focus {:.0} with {:.0} minutes remaining",
                    snapshot.average_room_focus_score, snapshot.minutes_remaining
                ),
            };
        }

        ModerationDecision {
            action: ModerationAction::NoAction,
            penalty_percentage: 0.0,
            private_message: None,
            room_message: None,
            reason: "no moderation conditions met".to_string(),
        }
    }
}

fn private(
    action: ModerationAction,
    penalty_percentage: f64,
    reason: &str,
    message: &str,
) -> ModerationDecision {
    ModerationDecision {
        action,
        penalty_percentage,
        private_message: Some(message.to_string()),
        room_message: None,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CameraStatus;

    fn make_good_snapshot() -> RoomSnapshot {
        RoomSnapshot {
            participants: 4,
            focus_score: 82.0,
            average_room_focus_score: 78.0,
            mic_status: MicStatus::Off,
            camera_status: CameraStatus::On,
            fullscreen_status: FullscreenStatus::Active,
            distraction_events_last_5_min: 0,
            lock_mode_violations: 0,
            minutes_remaining: 35.0,
        }
    }

    #[test]
    fn test_good_participant_no_action() {
        let decision = RoomModerator::moderate(&make_good_snapshot());
        assert_eq!(decision.action, ModerationAction::NoAction);
        assert!(decision.private_message.is_none());
        assert!(decision.room_message.is_none());
    }

    #[test]
    fn test_open_mic_short_circuits_everything() {
        // Every other field at its worst; the mic rule must still win
        let snapshot = RoomSnapshot {
            participants: 6,
            focus_score: 10.0,
            average_room_focus_score: 20.0,
            mic_status: MicStatus::On,
            camera_status: CameraStatus::Off,
            fullscreen_status: FullscreenStatus::Inactive,
            distraction_events_last_5_min: 9,
            lock_mode_violations: 5,
            minutes_remaining: 40.0,
        };
        let decision = RoomModerator::moderate(&snapshot);
        assert_eq!(decision.action, ModerationAction::SoftNotice);
        assert!(decision.reason.contains("microphone"));
        assert_eq!(decision.penalty_percentage, 0.0);
    }

    #[test]
    fn test_lock_mode_escalation() {
        let mut snapshot = make_good_snapshot();
        snapshot.fullscreen_status = FullscreenStatus::Inactive;

        snapshot.lock_mode_violations = 1;
        assert_eq!(
            RoomModerator::moderate(&snapshot).action,
            ModerationAction::SoftNotice
        );

        snapshot.lock_mode_violations = 2;
        assert_eq!(
            RoomModerator::moderate(&snapshot).action,
            ModerationAction::Warning
        );

        snapshot.lock_mode_violations = 3;
        let decision = RoomModerator::moderate(&snapshot);
        assert_eq!(decision.action, ModerationAction::ApplyScorePenalty);
        assert_eq!(decision.penalty_percentage, 5.0);
    }

    #[test]
    fn test_distraction_burst_warning() {
        let mut snapshot = make_good_snapshot();
        snapshot.distraction_events_last_5_min = 3;
        let decision = RoomModerator::moderate(&snapshot);
        assert_eq!(decision.action, ModerationAction::Warning);
        assert!(decision.private_message.is_some());
        assert!(decision.room_message.is_none());
    }

    #[test]
    fn test_group_break_is_room_wide_and_penalty_free() {
        let mut snapshot = make_good_snapshot();
        snapshot.average_room_focus_score = 52.0;
        let decision = RoomModerator::moderate(&snapshot);
        assert_eq!(decision.action, ModerationAction::SuggestGroupBreak);
        assert!(decision.room_message.is_some());
        assert!(decision.private_message.is_none());
        assert_eq!(decision.penalty_percentage, 0.0);
    }

    #[test]
    fn test_no_group_break_when_alone() {
        let mut snapshot = make_good_snapshot();
        snapshot.participants = 1;
        snapshot.average_room_focus_score = 30.0;
        assert_eq!(
            RoomModerator::moderate(&snapshot).action,
            ModerationAction::NoAction
        );
    }

    #[test]
    fn test_no_group_break_near_session_end() {
        let mut snapshot = make_good_snapshot();
        snapshot.average_room_focus_score = 40.0;
        snapshot.minutes_remaining = 8.0;
        assert_eq!(
            RoomModerator::moderate(&snapshot).action,
            ModerationAction::NoAction
        );
    }
}
