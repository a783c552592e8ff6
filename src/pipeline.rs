//! Pipeline orchestration
//!
//! This module provides the public JSON API for the FocusFlow engine: one
//! entry point per evaluation, each parsing a request, running the pure
//! evaluation, and wrapping the decision in a report envelope.

use serde::{Deserialize, Serialize};

use crate::alerts::AlertEvaluator;
use crate::cognitive::CognitiveAnalyzer;
use crate::encoder::ReportEncoder;
use crate::error::EngineError;
use crate::moderation::RoomModerator;
use crate::score::FocusScorer;
use crate::types::{
    DistractionSnapshot, RefreshSnapshot, ReportKind, RoomSnapshot, SessionMeta,
    SessionTelemetry, ViolationSnapshot,
};
use crate::violations::ViolationPolicy;

/// End-of-session scoring request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub session: SessionMeta,
    pub telemetry: SessionTelemetry,
}

/// Periodic distraction checkpoint request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    #[serde(default)]
    pub session: SessionMeta,
    pub window: DistractionSnapshot,
}

/// Fullscreen violation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationRequest {
    #[serde(default)]
    pub session: SessionMeta,
    pub violation: ViolationSnapshot,
}

/// Study room moderation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRequest {
    #[serde(default)]
    pub session: SessionMeta,
    pub room: RoomSnapshot,
}

/// Cognitive refresh request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub session: SessionMeta,
    pub refresh: RefreshSnapshot,
}

/// Score an end-of-session telemetry request (JSON in, report JSON out)
pub fn score_session_json(raw_json: &str) -> Result<String, EngineError> {
    FocusEngine::new().score_session(raw_json)
}

/// Evaluate a distraction checkpoint request (JSON in, report JSON out)
pub fn distraction_alert_json(raw_json: &str) -> Result<String, EngineError> {
    FocusEngine::new().distraction_alert(raw_json)
}

/// Evaluate a fullscreen violation request (JSON in, report JSON out)
pub fn fullscreen_violation_json(raw_json: &str) -> Result<String, EngineError> {
    FocusEngine::new().fullscreen_violation(raw_json)
}

/// Evaluate a study room moderation request (JSON in, report JSON out)
pub fn room_moderation_json(raw_json: &str) -> Result<String, EngineError> {
    FocusEngine::new().room_moderation(raw_json)
}

/// Evaluate a cognitive refresh request (JSON in, report JSON out)
pub fn cognitive_refresh_json(raw_json: &str) -> Result<String, EngineError> {
    FocusEngine::new().cognitive_refresh(raw_json)
}

/// Engine front-end with a stable producer instance ID.
///
/// Hosts that serve many requests should keep one `FocusEngine` so every
/// report carries the same instance ID; the free functions above create a
/// fresh one per call.
pub struct FocusEngine {
    encoder: ReportEncoder,
}

impl Default for FocusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusEngine {
    /// Create an engine with a fresh producer instance ID
    pub fn new() -> Self {
        Self {
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an engine with a specific producer instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self {
            encoder: ReportEncoder::with_instance_id(instance_id),
        }
    }

    /// Score an end-of-session telemetry request
    pub fn score_session(&self, raw_json: &str) -> Result<String, EngineError> {
        let request: ScoreRequest = serde_json::from_str(raw_json)?;
        let report = FocusScorer::score(&request.telemetry);
        log::debug!(
            "session scored: {} ({})",
            report.focus_score,
            report.performance_level.as_str()
        );
        self.encoder
            .encode_to_json(ReportKind::FocusScore, &report, &request.session)
    }

    /// Evaluate a distraction checkpoint request
    pub fn distraction_alert(&self, raw_json: &str) -> Result<String, EngineError> {
        let request: AlertRequest = serde_json::from_str(raw_json)?;
        let decision = AlertEvaluator::evaluate(&request.window);
        log::debug!("distraction checkpoint: {:?}", decision.alert_type);
        self.encoder
            .encode_to_json(ReportKind::DistractionAlert, &decision, &request.session)
    }

    /// Evaluate a fullscreen violation request
    pub fn fullscreen_violation(&self, raw_json: &str) -> Result<String, EngineError> {
        let request: ViolationRequest = serde_json::from_str(raw_json)?;
        let decision = ViolationPolicy::evaluate(&request.violation);
        log::debug!(
            "violation #{}: {:?}",
            request.violation.violation_count,
            decision.action
        );
        self.encoder
            .encode_to_json(ReportKind::FullscreenViolation, &decision, &request.session)
    }

    /// Evaluate a study room moderation request
    pub fn room_moderation(&self, raw_json: &str) -> Result<String, EngineError> {
        let request: ModerationRequest = serde_json::from_str(raw_json)?;
        let decision = RoomModerator::moderate(&request.room);
        log::debug!("room moderation: {:?}", decision.action);
        self.encoder
            .encode_to_json(ReportKind::RoomModeration, &decision, &request.session)
    }

    /// Evaluate a cognitive refresh request
    pub fn cognitive_refresh(&self, raw_json: &str) -> Result<String, EngineError> {
        let request: RefreshRequest = serde_json::from_str(raw_json)?;
        let report = CognitiveAnalyzer::analyze(&request.refresh);
        log::debug!(
            "cognitive refresh: {:?} -> {:?}",
            report.cognitive_state,
            report.recommended_action
        );
        self.encoder
            .encode_to_json(ReportKind::CognitiveRefresh, &report, &request.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_score_request() -> &'static str {
        r#"{
            "session": {
                "session_id": "3f6f1c2e-8f5a-4a3b-9a37-21a5cbb0e0a1",
                "observed_at": "2024-03-01T10:30:00Z"
            },
            "telemetry": {
                "duration_minutes": 60.0,
                "sustained_attention_minutes": 55.0,
                "face_presence_minutes": 58.0,
                "distraction_events": 0,
                "avg_recovery_time_seconds": 0.0,
                "emotion_stability_ratio": 0.9
            }
        }"#
    }

    #[test]
    fn test_score_session_json() {
        let result = score_session_json(sample_score_request());
        assert!(result.is_ok());

        let report: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(report["report_version"], "1.0.0");
        assert_eq!(report["producer"]["name"], "focusflow-engine");
        assert_eq!(report["kind"], "focus_score");
        assert_eq!(
            report["provenance"]["session_id"],
            "3f6f1c2e-8f5a-4a3b-9a37-21a5cbb0e0a1"
        );
        assert_eq!(report["decision"]["performance_level"], "excellent");
        assert!(report["decision"]["focus_score"].as_u64().unwrap() >= 90);
    }

    #[test]
    fn test_decision_payload_is_deterministic() {
        let engine = FocusEngine::with_instance_id("fixed".to_string());
        let first = engine.score_session(sample_score_request()).unwrap();
        let second = engine.score_session(sample_score_request()).unwrap();

        let first: serde_json::Value = serde_json::from_str(&first).unwrap();
        let second: serde_json::Value = serde_json::from_str(&second).unwrap();
        assert_eq!(first["decision"], second["decision"]);
    }

    #[test]
    fn test_session_meta_is_optional() {
        let raw = r#"{
            "telemetry": {
                "duration_minutes": 30.0,
                "sustained_attention_minutes": 20.0,
                "face_presence_minutes": 25.0,
                "distraction_events": 2,
                "avg_recovery_time_seconds": 15.0,
                "emotion_stability_ratio": 0.7
            }
        }"#;
        let report: serde_json::Value =
            serde_json::from_str(&score_session_json(raw).unwrap()).unwrap();
        assert!(report["provenance"]["session_id"].is_null());
    }

    #[test]
    fn test_distraction_alert_json() {
        let raw = r#"{
            "window": {
                "duration_minutes": 12.0,
                "gaze_away_seconds": 8.0,
                "face_absence_seconds": 0.0,
                "head_turn_seconds": 0.0,
                "distraction_events_last_5_min": 1,
                "avg_recovery_time_seconds": 30.0,
                "current_focus_score": 70.0
            }
        }"#;
        let report: serde_json::Value =
            serde_json::from_str(&distraction_alert_json(raw).unwrap()).unwrap();
        assert_eq!(report["kind"], "distraction_alert");
        assert_eq!(report["decision"]["alert_type"], "strong_alert");
    }

    #[test]
    fn test_fullscreen_violation_json() {
        let raw = r#"{
            "violation": {
                "violation_count": 3,
                "last_violation": "exit_fullscreen",
                "seconds_since_last": 45.0,
                "current_focus_score": 68.0
            }
        }"#;
        let report: serde_json::Value =
            serde_json::from_str(&fullscreen_violation_json(raw).unwrap()).unwrap();
        assert_eq!(report["decision"]["action"], "apply_score_penalty");
        assert_eq!(report["decision"]["penalty_percentage"], 5.0);
    }

    #[test]
    fn test_room_moderation_json() {
        let raw = r#"{
            "room": {
                "participants": 4,
                "focus_score": 80.0,
                "average_room_focus_score": 75.0,
                "mic_status": "on",
                "camera_status": "on",
                "fullscreen_status": "active",
                "distraction_events_last_5_min": 0,
                "lock_mode_violations": 0,
                "minutes_remaining": 30.0
            }
        }"#;
        let report: serde_json::Value =
            serde_json::from_str(&room_moderation_json(raw).unwrap()).unwrap();
        assert_eq!(report["decision"]["action"], "soft_notice");
        assert!(report["decision"]["private_message"].is_string());
        assert!(report["decision"].get("room_message").is_none());
    }

    #[test]
    fn test_cognitive_refresh_json() {
        let raw = r#"{
            "refresh": {
                "current": {
                    "game_type": "breathing",
                    "stability_score": 0.3
                },
                "focus_score": 45.0
            }
        }"#;
        let report: serde_json::Value =
            serde_json::from_str(&cognitive_refresh_json(raw).unwrap()).unwrap();
        assert_eq!(report["decision"]["cognitive_state"], "fatigued");
        assert_eq!(report["decision"]["recommended_action"], "extend_break_2_min");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(score_session_json("not valid json").is_err());
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        assert!(score_session_json(r#"{"session": {}}"#).is_err());
    }
}
