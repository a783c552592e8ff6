//! User progression helpers
//!
//! Maps a student's running average focus score to a display title and
//! decides whether a finished session extends the daily study streak. Titles
//! apply to students only; staff roles keep their role badge.

use crate::types::UserRole;

/// Average-score thresholds for the title ladder (inclusive lower bounds)
const MASTER_THRESHOLD: f64 = 90.0;
const DEEP_WORKER_THRESHOLD: f64 = 80.0;
const SCHOLAR_THRESHOLD: f64 = 65.0;
const RISING_THRESHOLD: f64 = 50.0;

/// Minimum session score that counts towards the streak
const STREAK_MIN_SCORE: u32 = 50;

/// Title for a student's running average focus score.
///
/// Returns `None` for non-student roles.
pub fn title_for_average(avg_focus_score: f64, role: UserRole) -> Option<&'static str> {
    if role != UserRole::Student {
        return None;
    }
    let title = if avg_focus_score >= MASTER_THRESHOLD {
        "Focus Master"
    } else if avg_focus_score >= DEEP_WORKER_THRESHOLD {
        "Deep Worker"
    } else if avg_focus_score >= SCHOLAR_THRESHOLD {
        "Steady Scholar"
    } else if avg_focus_score >= RISING_THRESHOLD {
        "Rising Learner"
    } else {
        "Getting Started"
    };
    Some(title)
}

/// Whether a session with this focus score extends the daily streak
pub fn extends_streak(focus_score: u32) -> bool {
    focus_score >= STREAK_MIN_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_ladder() {
        let cases = [
            (95.0, "Focus Master"),
            (90.0, "Focus Master"),
            (82.0, "Deep Worker"),
            (70.0, "Steady Scholar"),
            (50.0, "Rising Learner"),
            (20.0, "Getting Started"),
        ];
        for (avg, expected) in cases {
            assert_eq!(title_for_average(avg, UserRole::Student), Some(expected));
        }
    }

    #[test]
    fn test_staff_roles_get_no_title() {
        assert_eq!(title_for_average(95.0, UserRole::Teacher), None);
        assert_eq!(title_for_average(95.0, UserRole::Admin), None);
    }

    #[test]
    fn test_streak_threshold() {
        assert!(!extends_streak(49));
        assert!(extends_streak(50));
        assert!(extends_streak(100));
    }
}
