//! Session counter adaptation
//!
//! Converts the raw end-of-session counters posted by the client into the
//! telemetry snapshot the focus scorer consumes. Counters arrive in seconds;
//! the scorer works in minutes. Missing advanced metrics fall back to the
//! legacy counters.

use crate::types::{SessionCounters, SessionTelemetry};

/// Floor for the derived duration so ratios stay well-defined (minutes)
const MIN_DURATION_MINUTES: f64 = 0.1;

/// Emotion stability assumed when the emotion monitor was off
const DEFAULT_EMOTION_STABILITY: f64 = 0.5;

impl SessionCounters {
    /// Whether the client-side monitors reported the advanced metrics.
    ///
    /// Both sustained-attention and sustained-distraction minutes must be
    /// present; a partial report falls back to legacy scoring.
    pub fn has_advanced_metrics(&self) -> bool {
        self.sustained_attention_minutes.is_some() && self.sustained_distraction_minutes.is_some()
    }

    /// Derive the scoring telemetry snapshot from the raw counters
    pub fn to_telemetry(&self) -> SessionTelemetry {
        let duration_seconds = f64::from(self.duration_seconds);
        let camera_absence_seconds = f64::from(self.camera_absence_seconds);

        SessionTelemetry {
            duration_minutes: (duration_seconds / 60.0).max(MIN_DURATION_MINUTES),
            sustained_attention_minutes: self.sustained_attention_minutes.unwrap_or(0.0),
            face_presence_minutes: ((duration_seconds - camera_absence_seconds) / 60.0).max(0.0),
            distraction_events: self.distraction_events.unwrap_or(self.distractions),
            avg_recovery_time_seconds: self.avg_recovery_time_seconds.unwrap_or(0.0),
            emotion_stability_ratio: self
                .emotion_stability_ratio
                .unwrap_or(DEFAULT_EMOTION_STABILITY),
        }
    }

    /// Share of the session spent with both mouse and keyboard idle (0-100)
    pub fn idle_percentage(&self) -> f64 {
        if self.duration_seconds == 0 {
            return 0.0;
        }
        let idle = f64::from(self.mouse_inactive_seconds + self.keyboard_inactive_seconds);
        (idle / f64::from(self.duration_seconds) * 100.0).min(100.0)
    }
}
