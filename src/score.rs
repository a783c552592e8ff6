//! Advanced focus score calculation
//!
//! Turns an end-of-session telemetry snapshot into a 0-100 focus score with a
//! performance level, an analysis sentence, and strength/improvement callouts.
//!
//! The score is a weighted sum of four clamped sub-metrics (attention ratio,
//! presence stability, distraction recovery, emotional engagement) with a
//! small multiplicative bonus for clean or long sessions.

use crate::types::{FocusMetric, FocusReport, PerformanceLevel, SessionTelemetry};

/// Sessions at or below this duration return the fixed "too short" report
const SHORT_SESSION_CUTOFF_MIN: f64 = 0.1;

/// Virtual minutes of perfect performance added to ratio numerators and
/// denominators. Dampens early-session volatility; fixed, not proportional.
const SMOOTHING_MINUTES: f64 = 5.0;

/// Sub-metric weights (sum to 1.0)
const ATTENTION_WEIGHT: f64 = 0.50;
const PRESENCE_WEIGHT: f64 = 0.30;
const RECOVERY_WEIGHT: f64 = 0.15;
const ENGAGEMENT_WEIGHT: f64 = 0.05;

/// Recovery at or below this many seconds scores 1.0
const RECOVERY_FAST_SEC: f64 = 10.0;
/// Recovery at or above this many seconds scores 0.0
const RECOVERY_SLOW_SEC: f64 = 60.0;

/// Bonus for a session with zero distraction events
const ZERO_DISTRACTION_BONUS: f64 = 0.05;
/// Bonus for a deep-work session
const DEEP_WORK_BONUS: f64 = 0.03;
/// Minimum duration for the deep-work bonus (minutes)
const DEEP_WORK_MIN_DURATION_MIN: f64 = 50.0;

/// Performance level thresholds (inclusive lower bounds)
const EXCELLENT_THRESHOLD: u32 = 90;
const HIGH_THRESHOLD: u32 = 75;
const MODERATE_THRESHOLD: u32 = 50;

/// A sub-metric below this gap from perfect is considered already strong
const MAINTAIN_GAP: f64 = 0.10;

/// Calculator for the advanced session focus score
pub struct FocusScorer;

impl FocusScorer {
    /// Score an end-of-session telemetry snapshot
    pub fn score(telemetry: &SessionTelemetry) -> FocusReport {
        if telemetry.duration_minutes <= SHORT_SESSION_CUTOFF_MIN {
            return short_session_report();
        }

        let attention_ratio = compute_smoothed_ratio(
            telemetry.sustained_attention_minutes,
            telemetry.duration_minutes,
        );
        let presence_stability =
            compute_smoothed_ratio(telemetry.face_presence_minutes, telemetry.duration_minutes);
        let recovery_score = compute_recovery_score(
            telemetry.distraction_events,
            telemetry.avg_recovery_time_seconds,
        );
        let engagement_stability = telemetry.emotion_stability_ratio.clamp(0.0, 1.0);

        let raw_score = ATTENTION_WEIGHT * attention_ratio
            + PRESENCE_WEIGHT * presence_stability
            + RECOVERY_WEIGHT * recovery_score
            + ENGAGEMENT_WEIGHT * engagement_stability;

        let mut bonus_multiplier = 1.0;
        if telemetry.distraction_events == 0 {
            bonus_multiplier += ZERO_DISTRACTION_BONUS;
        }
        if telemetry.duration_minutes >= DEEP_WORK_MIN_DURATION_MIN {
            bonus_multiplier += DEEP_WORK_BONUS;
        }

        let focus_score = (raw_score * 100.0 * bonus_multiplier)
            .round()
            .clamp(0.0, 100.0) as u32;

        let performance_level = level_for_score(focus_score);

        // With zero distraction events there were no recoveries to judge, so
        // the pinned 1.0 recovery score is not a candidate strength or
        // improvement area.
        let mut candidates = vec![
            (FocusMetric::SustainedAttention, attention_ratio),
            (FocusMetric::PresenceConsistency, presence_stability),
        ];
        if telemetry.distraction_events > 0 {
            candidates.push((FocusMetric::DistractionRecovery, recovery_score));
        }
        candidates.push((FocusMetric::EmotionalEngagement, engagement_stability));

        let (strength_metric, strength_value) = argmax(&candidates);
        let (weakest_metric, weakest_value) = argmin(&candidates);

        let strength = format!("{} ({:.0}%)", strength_metric.label(), strength_value * 100.0);
        let improvement_area = if (1.0 - weakest_value) < MAINTAIN_GAP {
            "All metrics look strong. Keep doing what you're doing!".to_string()
        } else {
            format!(
                "Work on {} (currently {:.0}%)",
                weakest_metric.label(),
                weakest_value * 100.0
            )
        };

        FocusReport {
            focus_score,
            performance_level,
            analysis: analysis_for_level(performance_level).to_string(),
            strength,
            improvement_area,
        }
    }
}

/// Additively smoothed ratio, clamped to [0, 1]
fn compute_smoothed_ratio(numerator_minutes: f64, duration_minutes: f64) -> f64 {
    ((numerator_minutes + SMOOTHING_MINUTES) / (duration_minutes + SMOOTHING_MINUTES))
        .clamp(0.0, 1.0)
}

/// Piecewise-linear recovery score.
///
/// 1.0 at or below 10 s average recovery, 0.0 at or above 60 s, linear in
/// between. Zero distraction events force 1.0 regardless of the recovery time.
fn compute_recovery_score(distraction_events: u32, avg_recovery_time_seconds: f64) -> f64 {
    if distraction_events == 0 {
        return 1.0;
    }
    (1.0 - (avg_recovery_time_seconds - RECOVERY_FAST_SEC) / (RECOVERY_SLOW_SEC - RECOVERY_FAST_SEC))
        .clamp(0.0, 1.0)
}

fn level_for_score(score: u32) -> PerformanceLevel {
    if score >= EXCELLENT_THRESHOLD {
        PerformanceLevel::Excellent
    } else if score >= HIGH_THRESHOLD {
        PerformanceLevel::High
    } else if score >= MODERATE_THRESHOLD {
        PerformanceLevel::Moderate
    } else {
        PerformanceLevel::Low
    }
}

fn analysis_for_level(level: PerformanceLevel) -> &'static str {
    match level {
        PerformanceLevel::Excellent => {
            "Outstanding session. You maintained deep, consistent focus almost the entire time."
        }
        PerformanceLevel::High => {
            "Strong session. Your focus held up well with only minor lapses."
        }
        PerformanceLevel::Moderate => {
            "A decent session, but your focus wavered in places. There is room to improve."
        }
        PerformanceLevel::Low => {
            "Focus was hard to hold this session. Small changes to your routine could help a lot."
        }
    }
}

fn short_session_report() -> FocusReport {
    FocusReport {
        focus_score: 0,
        performance_level: PerformanceLevel::Low,
        analysis: "Session too short to analyze. Study for at least a few minutes to get a meaningful score."
            .to_string(),
        strength: "N/A".to_string(),
        improvement_area: "N/A".to_string(),
    }
}

/// First entry with the maximum value (fixed candidate order makes ties stable)
fn argmax(candidates: &[(FocusMetric, f64)]) -> (FocusMetric, f64) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best
}

/// First entry with the minimum value
fn argmin(candidates: &[(FocusMetric, f64)]) -> (FocusMetric, f64) {
    let mut worst = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.1 < worst.1 {
            worst = candidate;
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_telemetry() -> SessionTelemetry {
        SessionTelemetry {
            duration_minutes: 60.0,
            sustained_attention_minutes: 55.0,
            face_presence_minutes: 58.0,
            distraction_events: 0,
            avg_recovery_time_seconds: 0.0,
            emotion_stability_ratio: 0.9,
        }
    }

    #[test]
    fn test_excellent_clean_session() {
        let report = FocusScorer::score(&make_telemetry());

        assert_eq!(report.performance_level, PerformanceLevel::Excellent);
        assert!(report.focus_score >= 90);
        assert!(
            report.strength.starts_with("Sustained Attention")
                || report.strength.starts_with("Presence Consistency")
        );
    }

    #[test]
    fn test_low_scattered_session() {
        let telemetry = SessionTelemetry {
            duration_minutes: 30.0,
            sustained_attention_minutes: 5.0,
            face_presence_minutes: 10.0,
            distraction_events: 8,
            avg_recovery_time_seconds: 70.0,
            emotion_stability_ratio: 0.2,
        };
        let report = FocusScorer::score(&telemetry);

        assert_eq!(report.performance_level, PerformanceLevel::Low);
        assert!(report.focus_score < 40);
    }

    #[test]
    fn test_short_session_cutoff() {
        let mut telemetry = make_telemetry();
        telemetry.duration_minutes = 0.1;
        let report = FocusScorer::score(&telemetry);

        assert_eq!(report.focus_score, 0);
        assert_eq!(report.performance_level, PerformanceLevel::Low);
        assert_eq!(report.strength, "N/A");
        assert_eq!(report.improvement_area, "N/A");

        // Just above the cutoff, the full calculation runs
        telemetry.duration_minutes = 0.11;
        let report = FocusScorer::score(&telemetry);
        assert_ne!(report.strength, "N/A");
        assert!(report.focus_score > 0);
    }

    #[test]
    fn test_recovery_score_decay() {
        assert!((compute_recovery_score(1, 10.0) - 1.0).abs() < 1e-9);
        assert!((compute_recovery_score(1, 35.0) - 0.5).abs() < 1e-9);
        assert!((compute_recovery_score(1, 60.0) - 0.0).abs() < 1e-9);
        // Clamped outside the knee points
        assert!((compute_recovery_score(1, 3.0) - 1.0).abs() < 1e-9);
        assert!((compute_recovery_score(1, 120.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_events_ignores_recovery_time() {
        assert!((compute_recovery_score(0, 500.0) - 1.0).abs() < 1e-9);

        let mut telemetry = make_telemetry();
        telemetry.avg_recovery_time_seconds = 500.0;
        let report = FocusScorer::score(&telemetry);
        assert_eq!(report.performance_level, PerformanceLevel::Excellent);
    }

    #[test]
    fn test_more_attention_never_lowers_score() {
        let mut telemetry = make_telemetry();
        telemetry.distraction_events = 3;
        telemetry.avg_recovery_time_seconds = 25.0;

        let mut previous = 0;
        for attention in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
            telemetry.sustained_attention_minutes = attention;
            let score = FocusScorer::score(&telemetry).focus_score;
            assert!(score >= previous, "score dropped at attention={attention}");
            previous = score;
        }
    }

    #[test]
    fn test_score_always_in_range() {
        let extremes = [
            (0.0, 0.0, 0.0, 0, 0.0, 0.0),
            (0.2, 90.0, 90.0, 0, 0.0, 1.0),
            (600.0, 600.0, 600.0, 0, 0.0, 1.0),
            (45.0, 0.0, 0.0, 50, 300.0, -1.0),
            (45.0, 80.0, 80.0, 0, 0.0, 2.0),
        ];
        for (dur, att, face, events, recovery, emotion) in extremes {
            let report = FocusScorer::score(&SessionTelemetry {
                duration_minutes: dur,
                sustained_attention_minutes: att,
                face_presence_minutes: face,
                distraction_events: events,
                avg_recovery_time_seconds: recovery,
                emotion_stability_ratio: emotion,
            });
            assert!(report.focus_score <= 100);
        }
    }

    #[test]
    fn test_identical_input_identical_output() {
        let telemetry = make_telemetry();
        assert_eq!(FocusScorer::score(&telemetry), FocusScorer::score(&telemetry));
    }

    #[test]
    fn test_maintain_message_when_all_metrics_strong() {
        let telemetry = SessionTelemetry {
            duration_minutes: 60.0,
            sustained_attention_minutes: 58.0,
            face_presence_minutes: 59.0,
            distraction_events: 0,
            avg_recovery_time_seconds: 0.0,
            emotion_stability_ratio: 0.95,
        };
        let report = FocusScorer::score(&telemetry);
        assert!(report.improvement_area.contains("Keep doing"));
    }

    #[test]
    fn test_deep_work_bonus_at_threshold() {
        let mut telemetry = make_telemetry();
        telemetry.distraction_events = 2;
        telemetry.avg_recovery_time_seconds = 30.0;
        telemetry.sustained_attention_minutes = 40.0;
        telemetry.face_presence_minutes = 40.0;

        telemetry.duration_minutes = 49.9;
        let without = FocusScorer::score(&telemetry).focus_score;
        telemetry.duration_minutes = 50.0;
        let with = FocusScorer::score(&telemetry).focus_score;

        // Longer duration lowers the ratios slightly but the bonus outweighs it
        assert!(with >= without);
    }
}
