//! Frame-level focus metrics
//!
//! Aggregates one frame's worth of already-computed vision outputs (face
//! detection, eye landmarks, emotion probabilities) into focus metrics. The
//! three models run in an external collaborator; nothing here touches pixels.

use crate::types::{EmotionDistribution, FrameFocusMetrics, FrameObservation};

/// Component weights for the combined frame focus score
const EYES_WEIGHT: f64 = 0.2;
const ATTENTION_WEIGHT: f64 = 0.3;
const GAZE_WEIGHT: f64 = 0.2;
const ENGAGEMENT_WEIGHT: f64 = 0.3;

/// Gaze offsets within this bound count as looking at the screen
const GAZE_CENTERED_BOUND: f64 = 0.3;

/// Credit still given for an off-center but present gaze
const GAZE_OFF_CENTER_CREDIT: f64 = 0.5;

/// Multiplier applied when more than one face is in frame
const MULTIPLE_FACES_PENALTY: f64 = 0.7;

/// Aggregator for per-frame vision outputs
pub struct FrameAnalyzer;

impl FrameAnalyzer {
    /// Aggregate a frame observation into focus metrics.
    ///
    /// An observation without a detected face yields the all-zero metrics.
    pub fn analyze(observation: &FrameObservation) -> FrameFocusMetrics {
        if !observation.face_detected || observation.face_count == 0 {
            return empty_metrics();
        }

        let gaze_centered = observation.gaze_horizontal.abs() < GAZE_CENTERED_BOUND
            && observation.gaze_vertical.abs() < GAZE_CENTERED_BOUND;

        let engagement_score = observation
            .emotions
            .as_ref()
            .map(engagement_from_emotions)
            .unwrap_or(0.0);

        let mut overall_focus_score = EYES_WEIGHT
            * if observation.eyes_detected { 1.0 } else { 0.0 }
            + ATTENTION_WEIGHT * observation.attention_score.clamp(0.0, 1.0)
            + GAZE_WEIGHT * if gaze_centered { 1.0 } else { GAZE_OFF_CENTER_CREDIT }
            + ENGAGEMENT_WEIGHT * engagement_score;

        let multiple_faces = observation.face_count > 1;
        if multiple_faces {
            overall_focus_score *= MULTIPLE_FACES_PENALTY;
        }

        FrameFocusMetrics {
            face_present: true,
            multiple_faces,
            eyes_open: observation.eyes_open,
            blink_detected: observation.blink_detected,
            attention_score: observation.attention_score.clamp(0.0, 1.0),
            gaze_centered,
            emotion_state: observation
                .dominant_emotion
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            engagement_score,
            overall_focus_score,
        }
    }
}

/// Engagement score from an emotion probability distribution.
///
/// Positive emotions contribute, negative emotions subtract; the result is
/// clamped to [0, 1].
pub fn engagement_from_emotions(emotions: &EmotionDistribution) -> f64 {
    let positive = emotions.happy * 1.0 + emotions.neutral * 0.8 + emotions.surprise * 0.6;
    let negative =
        emotions.sad * 0.3 + emotions.angry * 0.5 + emotions.fear * 0.4 + emotions.disgust * 0.4;
    (positive - negative).clamp(0.0, 1.0)
}

fn empty_metrics() -> FrameFocusMetrics {
    FrameFocusMetrics {
        face_present: false,
        multiple_faces: false,
        eyes_open: false,
        blink_detected: false,
        attention_score: 0.0,
        gaze_centered: false,
        emotion_state: "unknown".to_string(),
        engagement_score: 0.0,
        overall_focus_score: 0.0,
    }
}
