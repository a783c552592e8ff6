//! Core types for the FocusFlow engine
//!
//! This module defines the data structures that flow through each engine
//! operation: telemetry snapshots on the way in, structured decisions on the
//! way out. Every type is a plain immutable record; the engine never keeps
//! state between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Performance level derived from the session focus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Low,
    Moderate,
    High,
    Excellent,
}

impl PerformanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Low => "low",
            PerformanceLevel::Moderate => "moderate",
            PerformanceLevel::High => "high",
            PerformanceLevel::Excellent => "excellent",
        }
    }
}

/// The four sub-metrics that make up the session focus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMetric {
    SustainedAttention,
    PresenceConsistency,
    DistractionRecovery,
    EmotionalEngagement,
}

impl FocusMetric {
    /// Human-readable label used in strength/improvement messages
    pub fn label(&self) -> &'static str {
        match self {
            FocusMetric::SustainedAttention => "Sustained Attention",
            FocusMetric::PresenceConsistency => "Presence Consistency",
            FocusMetric::DistractionRecovery => "Distraction Recovery",
            FocusMetric::EmotionalEngagement => "Emotional Engagement",
        }
    }
}

/// End-of-session telemetry snapshot, already validated by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTelemetry {
    /// Session duration (minutes)
    pub duration_minutes: f64,
    /// Minutes classified as actively focused by the monitoring collaborator
    pub sustained_attention_minutes: f64,
    /// Minutes a face was present in front of the camera
    pub face_presence_minutes: f64,
    /// Number of distraction events over the whole session
    pub distraction_events: u32,
    /// Average seconds from a distraction event back to a focused state
    pub avg_recovery_time_seconds: f64,
    /// Emotional stability over the session (0-1)
    pub emotion_stability_ratio: f64,
}

/// Result of the advanced focus score calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusReport {
    /// Overall focus score (integer, 0-100)
    pub focus_score: u32,
    /// Performance level mapped from the score
    pub performance_level: PerformanceLevel,
    /// Fixed analysis sentence for the performance level
    pub analysis: String,
    /// Highest-scoring sub-metric with its percentage
    pub strength: String,
    /// Lowest-scoring sub-metric, or a maintain message when the gap is small
    pub improvement_area: String,
}

/// Alert severity emitted by the distraction evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    NoAlert,
    SoftAlert,
    StrongAlert,
    SuggestBreak,
}

/// Trailing-window distraction telemetry evaluated at periodic checkpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistractionSnapshot {
    /// Session duration so far (minutes)
    pub duration_minutes: f64,
    /// Seconds of gaze away from the screen over the trailing 30-second window
    pub gaze_away_seconds: f64,
    /// Seconds of face absence over the trailing 30-second window
    pub face_absence_seconds: f64,
    /// Seconds of head turn over the trailing 30-second window
    pub head_turn_seconds: f64,
    /// Distraction events over the trailing 5-minute window
    pub distraction_events_last_5_min: u32,
    /// Average seconds to recover from a distraction
    pub avg_recovery_time_seconds: f64,
    /// Current running focus score (0-100)
    pub current_focus_score: f64,
}

/// Decision returned by the distraction alert evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    pub alert_type: AlertType,
    /// Which conditions fired, with measured durations
    pub reason: String,
    /// User-facing message
    pub message: String,
}

/// What kind of lock-mode violation the client last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    TabSwitch,
    WindowBlur,
    ExitFullscreen,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::TabSwitch => "tab switch",
            ViolationKind::WindowBlur => "window blur",
            ViolationKind::ExitFullscreen => "fullscreen exit",
        }
    }
}

/// Fullscreen violation snapshot. The caller owns the running counter and
/// resets it between sessions; the engine is a pure step function of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationSnapshot {
    /// Monotonic violation counter for the current session
    pub violation_count: u32,
    /// Most recent violation kind
    pub last_violation: ViolationKind,
    /// Seconds since the last violation
    pub seconds_since_last: f64,
    /// Current running focus score (0-100)
    pub current_focus_score: f64,
}

/// Escalation tier for fullscreen violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationAction {
    SoftWarning,
    StrongWarning,
    ApplyScorePenalty,
    EndSession,
}

/// Decision returned by the fullscreen violation policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationDecision {
    pub action: ViolationAction,
    /// Score penalty to apply (percentage points: 0, 5 or 10)
    pub penalty_percentage: f64,
    pub reason: String,
    pub message: String,
}

/// Microphone state reported for a study-room participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicStatus {
    On,
    Off,
}

/// Camera state reported for a study-room participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraStatus {
    On,
    Off,
}

/// Fullscreen state reported for a study-room participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullscreenStatus {
    Active,
    Inactive,
}

/// Per-participant study room snapshot at a moderation checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Number of participants currently in the room
    pub participants: u32,
    /// This participant's running focus score (0-100)
    pub focus_score: f64,
    /// Room-wide average focus score (0-100)
    pub average_room_focus_score: f64,
    pub mic_status: MicStatus,
    pub camera_status: CameraStatus,
    pub fullscreen_status: FullscreenStatus,
    /// Distraction events over the trailing 5-minute window
    pub distraction_events_last_5_min: u32,
    /// Lock-mode violations for this participant
    pub lock_mode_violations: u32,
    /// Minutes remaining in the scheduled room session
    pub minutes_remaining: f64,
}

/// Moderation tier for a study-room participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    NoAction,
    SoftNotice,
    Warning,
    ApplyScorePenalty,
    SuggestGroupBreak,
}

/// Decision returned by the study room moderator.
///
/// At most one of `private_message` / `room_message` is populated; `NoAction`
/// carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationDecision {
    pub action: ModerationAction,
    /// Score penalty to apply (percentage points)
    pub penalty_percentage: f64,
    /// Message delivered to this participant only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_message: Option<String>,
    /// Message broadcast to the whole room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_message: Option<String>,
    pub reason: String,
}

/// Break mini-game type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Stroop,
    Reaction,
    Recall,
    Breathing,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Stroop => "stroop",
            GameType::Reaction => "reaction",
            GameType::Recall => "recall",
            GameType::Breathing => "breathing",
        }
    }
}

/// Round metrics for a break mini-game, one variant per game type.
///
/// Fields are optional so a round with partial metrics still scores; each
/// scoring formula falls back to a fixed default for a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game_type", rename_all = "snake_case")]
pub enum GameMetrics {
    Stroop {
        /// Fraction of correct responses (0-1)
        #[serde(default)]
        accuracy: Option<f64>,
        /// Average response time (milliseconds)
        #[serde(default)]
        avg_response_time_ms: Option<f64>,
        #[serde(default)]
        error_count: Option<u32>,
    },
    Reaction {
        /// Average reaction time (milliseconds)
        #[serde(default)]
        avg_reaction_time_ms: Option<f64>,
        /// Best single reaction time (milliseconds)
        #[serde(default)]
        best_reaction_time_ms: Option<f64>,
    },
    Recall {
        /// Longest digit span recalled
        #[serde(default)]
        max_digit_length: Option<u32>,
        /// Fraction of correct recalls (0-1)
        #[serde(default)]
        accuracy: Option<f64>,
    },
    Breathing {
        /// Breathing rhythm stability (0-1)
        #[serde(default)]
        stability_score: Option<f64>,
        /// Focus score measured before the exercise (0-100)
        #[serde(default)]
        pre_exercise_focus_score: Option<f64>,
        /// Focus score measured after the exercise (0-100)
        #[serde(default)]
        post_exercise_focus_score: Option<f64>,
    },
}

impl GameMetrics {
    pub fn game_type(&self) -> GameType {
        match self {
            GameMetrics::Stroop { .. } => GameType::Stroop,
            GameMetrics::Reaction { .. } => GameType::Reaction,
            GameMetrics::Recall { .. } => GameType::Recall,
            GameMetrics::Breathing { .. } => GameType::Breathing,
        }
    }
}

/// Input to the cognitive refresh analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSnapshot {
    /// Metrics for the round just played
    pub current: GameMetrics,
    /// Metrics for the previous round of the same game, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<GameMetrics>,
    /// Focus score at the moment the break started (0-100)
    #[serde(default)]
    pub focus_score: f64,
}

/// Cognitive state inferred from break-game performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveState {
    Fatigued,
    Stable,
    Refreshed,
}

/// Next step recommended after a break activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ReturnToStudy,
    #[serde(rename = "extend_break_2_min")]
    ExtendBreak2Min,
    SuggestDeepBreathing,
}

/// Result of the cognitive refresh analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Cognitive refresh score (0-100)
    pub refresh_score: f64,
    pub cognitive_state: CognitiveState,
    pub recommended_action: RecommendedAction,
    pub analysis: String,
    pub motivation_message: String,
}

/// Emotion probability distribution from the (external) emotion classifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionDistribution {
    #[serde(default)]
    pub happy: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub surprise: f64,
    #[serde(default)]
    pub sad: f64,
    #[serde(default)]
    pub angry: f64,
    #[serde(default)]
    pub fear: f64,
    #[serde(default)]
    pub disgust: f64,
}

/// Per-frame observation assembled from the vision collaborator's outputs.
///
/// The engine never runs inference; it only weighs numbers the external
/// face/landmark/emotion models already produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameObservation {
    pub face_detected: bool,
    #[serde(default)]
    pub face_count: u32,
    #[serde(default)]
    pub eyes_detected: bool,
    #[serde(default)]
    pub eyes_open: bool,
    #[serde(default)]
    pub blink_detected: bool,
    /// Attention score from the landmark tracker (0-1)
    #[serde(default)]
    pub attention_score: f64,
    /// Horizontal gaze offset, 0 = screen center
    #[serde(default)]
    pub gaze_horizontal: f64,
    /// Vertical gaze offset, 0 = screen center
    #[serde(default)]
    pub gaze_vertical: f64,
    /// Dominant emotion label from the classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_emotion: Option<String>,
    /// Full emotion distribution, when the classifier ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<EmotionDistribution>,
}

/// Focus metrics aggregated from one frame observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameFocusMetrics {
    pub face_present: bool,
    /// More than one face in frame (distraction indicator)
    pub multiple_faces: bool,
    pub eyes_open: bool,
    pub blink_detected: bool,
    pub attention_score: f64,
    pub gaze_centered: bool,
    pub emotion_state: String,
    pub engagement_score: f64,
    /// Combined frame focus score (0-1)
    pub overall_focus_score: f64,
}

/// Raw end-of-session counters as posted by the client.
///
/// Legacy counters are always present; the advanced metrics arrive only when
/// the client-side activity monitors were enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCounters {
    /// Session duration (seconds)
    pub duration_seconds: u32,
    /// Legacy distraction counter
    #[serde(default)]
    pub distractions: u32,
    #[serde(default)]
    pub mouse_inactive_seconds: u32,
    #[serde(default)]
    pub keyboard_inactive_seconds: u32,
    #[serde(default)]
    pub tab_switches: u32,
    /// Seconds the camera produced no usable frame
    #[serde(default)]
    pub camera_absence_seconds: u32,
    /// Seconds a frame was usable but no face was present
    #[serde(default)]
    pub face_absence_seconds: u32,
    #[serde(default)]
    pub sustained_attention_minutes: Option<f64>,
    #[serde(default)]
    pub sustained_distraction_minutes: Option<f64>,
    #[serde(default)]
    pub distraction_events: Option<u32>,
    #[serde(default)]
    pub avg_recovery_time_seconds: Option<f64>,
    #[serde(default)]
    pub emotion_stability_ratio: Option<f64>,
}

/// User role, as known to the host backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

/// Optional identity/timing metadata attached to an evaluation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Session identifier assigned by the host backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    /// When the telemetry in this request was observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

/// Which engine operation produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    FocusScore,
    DistractionAlert,
    FullscreenViolation,
    RoomModeration,
    CognitiveRefresh,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Report provenance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProvenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at_utc: Option<String>,
    pub computed_at_utc: String,
}

/// Versioned envelope around a single engine decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub provenance: ReportProvenance,
    pub kind: ReportKind,
    /// The decision payload, exactly as the evaluation function returned it
    pub decision: serde_json::Value,
}
