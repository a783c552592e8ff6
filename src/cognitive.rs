//! Cognitive refresh analysis
//!
//! Evaluates performance in a break mini-game to decide whether the user is
//! ready to return to studying. Each game type has its own normalization to a
//! 0-100 refresh score; a previous round of the same game shifts the state by
//! relative comparison, and an absolute-score fallback applies when the
//! comparison left the state untouched. A recommendation table then maps
//! (state, game, pre-break focus score) to the next step.

use crate::types::{
    CognitiveState, GameMetrics, GameType, RecommendedAction, RefreshReport, RefreshSnapshot,
};

// Stroop: accuracy carries 60 points, response time 40
const STROOP_ACCURACY_POINTS: f64 = 60.0;
const STROOP_RT_POINTS: f64 = 40.0;
/// Response time at or below this scores full RT points (milliseconds)
const STROOP_RT_BEST_MS: f64 = 500.0;
/// Response time at or above this scores zero RT points (milliseconds)
const STROOP_RT_WORST_MS: f64 = 1500.0;
/// Error count above which the flat error penalty applies
const STROOP_ERROR_LIMIT: u32 = 5;
const STROOP_ERROR_PENALTY: f64 = 10.0;

/// Reaction: <=200 ms scores 100, >=500 ms scores 0
const REACTION_BEST_MS: f64 = 500.0;
const REACTION_SCALE: f64 = 3.0;

const RECALL_POINTS_PER_DIGIT: f64 = 10.0;
const RECALL_ACCURACY_POINTS: f64 = 20.0;

const BREATHING_STABILITY_POINTS: f64 = 70.0;
const BREATHING_IMPROVEMENT_POINTS: f64 = 10.0;
/// Stability above this indicates successful regulation
const BREATHING_REFRESHED_STABILITY: f64 = 0.8;
/// Stability below this indicates the exercise did not land
const BREATHING_FATIGUED_STABILITY: f64 = 0.4;
/// Focus-score improvement that alone indicates a successful exercise
const BREATHING_REFRESHED_IMPROVEMENT: f64 = 10.0;

/// Bonus added when a round clearly improves on the previous one
const IMPROVEMENT_BONUS: f64 = 10.0;

/// Absolute-score fallbacks when no comparison moved the state
const REFRESHED_SCORE_THRESHOLD: f64 = 75.0;
const FATIGUED_SCORE_THRESHOLD: f64 = 40.0;

/// Pre-break focus below which a stable result still earns a longer break
const LOW_FOCUS_THRESHOLD: f64 = 50.0;

/// Analyzer for break-activity performance
pub struct CognitiveAnalyzer;

impl CognitiveAnalyzer {
    /// Analyze a refresh snapshot into a state, score and recommendation
    pub fn analyze(snapshot: &RefreshSnapshot) -> RefreshReport {
        let game_type = snapshot.current.game_type();

        // A previous round only informs the comparison when it came from the
        // same game; anything else is treated as no history.
        let previous = snapshot
            .previous
            .as_ref()
            .filter(|p| p.game_type() == game_type);

        let (raw_score, state) = match &snapshot.current {
            GameMetrics::Stroop {
                accuracy,
                avg_response_time_ms,
                error_count,
            } => score_stroop(*accuracy, *avg_response_time_ms, *error_count, previous),
            GameMetrics::Reaction {
                avg_reaction_time_ms,
                ..
            } => score_reaction(*avg_reaction_time_ms, previous),
            GameMetrics::Recall {
                max_digit_length,
                accuracy,
            } => score_recall(*max_digit_length, *accuracy, previous),
            GameMetrics::Breathing {
                stability_score,
                pre_exercise_focus_score,
                post_exercise_focus_score,
            } => score_breathing(
                *stability_score,
                *pre_exercise_focus_score,
                *post_exercise_focus_score,
            ),
        };

        let refresh_score = raw_score.clamp(0.0, 100.0);

        // Absolute fallback when the comparison logic left the state alone
        let state = if state == CognitiveState::Stable {
            if refresh_score > REFRESHED_SCORE_THRESHOLD {
                CognitiveState::Refreshed
            } else if refresh_score < FATIGUED_SCORE_THRESHOLD {
                CognitiveState::Fatigued
            } else {
                CognitiveState::Stable
            }
        } else {
            state
        };

        let (recommended_action, analysis, motivation_message) =
            recommend(state, game_type, refresh_score, snapshot.focus_score);

        RefreshReport {
            refresh_score,
            cognitive_state: state,
            recommended_action,
            analysis,
            motivation_message,
        }
    }
}

fn score_stroop(
    accuracy: Option<f64>,
    avg_response_time_ms: Option<f64>,
    error_count: Option<u32>,
    previous: Option<&GameMetrics>,
) -> (f64, CognitiveState) {
    let acc = accuracy.unwrap_or(0.0);
    let rt = avg_response_time_ms.unwrap_or(1000.0);
    let errors = error_count.unwrap_or(0);

    let rt_score = ((STROOP_RT_WORST_MS - rt) / (STROOP_RT_WORST_MS - STROOP_RT_BEST_MS))
        .clamp(0.0, 1.0);
    let mut score = acc * STROOP_ACCURACY_POINTS + rt_score * STROOP_RT_POINTS;

    if errors > STROOP_ERROR_LIMIT {
        score -= STROOP_ERROR_PENALTY;
    }

    let mut state = CognitiveState::Stable;
    if let Some(GameMetrics::Stroop {
        accuracy: prev_accuracy,
        ..
    }) = previous
    {
        let prev_acc = prev_accuracy.unwrap_or(0.0);
        if acc < prev_acc * 0.8 {
            state = CognitiveState::Fatigued;
        } else if acc > prev_acc * 1.05 {
            state = CognitiveState::Refreshed;
            score += IMPROVEMENT_BONUS;
        }
    }

    (score, state)
}

fn score_reaction(
    avg_reaction_time_ms: Option<f64>,
    previous: Option<&GameMetrics>,
) -> (f64, CognitiveState) {
    let avg_rt = avg_reaction_time_ms.unwrap_or(400.0);
    let mut score = ((REACTION_BEST_MS - avg_rt) / REACTION_SCALE).clamp(0.0, 100.0);

    let mut state = CognitiveState::Stable;
    if let Some(GameMetrics::Reaction {
        avg_reaction_time_ms: prev_avg,
        ..
    }) = previous
    {
        let prev_avg = prev_avg.unwrap_or(400.0);
        if avg_rt > prev_avg * 1.2 {
            // 20% slower than last round
            state = CognitiveState::Fatigued;
        } else if avg_rt < prev_avg * 0.9 {
            // 10% faster
            state = CognitiveState::Refreshed;
            score += IMPROVEMENT_BONUS;
        }
    }

    (score, state)
}

fn score_recall(
    max_digit_length: Option<u32>,
    accuracy: Option<f64>,
    previous: Option<&GameMetrics>,
) -> (f64, CognitiveState) {
    let length = max_digit_length.unwrap_or(4);
    let acc = accuracy.unwrap_or(0.0);

    let score = (f64::from(length) * RECALL_POINTS_PER_DIGIT + acc * RECALL_ACCURACY_POINTS)
        .min(100.0);

    let mut state = CognitiveState::Stable;
    if let Some(GameMetrics::Recall {
        max_digit_length: prev_length,
        ..
    }) = previous
    {
        let prev_length = prev_length.unwrap_or(0);
        if length + 1 < prev_length {
            state = CognitiveState::Fatigued;
        } else if length > prev_length {
            state = CognitiveState::Refreshed;
        }
    }

    (score, state)
}

fn score_breathing(
    stability_score: Option<f64>,
    pre_exercise_focus_score: Option<f64>,
    post_exercise_focus_score: Option<f64>,
) -> (f64, CognitiveState) {
    let stability = stability_score.unwrap_or(0.5);
    let pre = pre_exercise_focus_score.unwrap_or(50.0);
    let post = post_exercise_focus_score.unwrap_or(50.0);

    let improvement = (post - pre).max(0.0);
    let score = (stability * BREATHING_STABILITY_POINTS
        + improvement * BREATHING_IMPROVEMENT_POINTS)
        .min(100.0);

    let state = if stability > BREATHING_REFRESHED_STABILITY
        || improvement > BREATHING_REFRESHED_IMPROVEMENT
    {
        CognitiveState::Refreshed
    } else if stability < BREATHING_FATIGUED_STABILITY {
        // Did not regulate well
        CognitiveState::Fatigued
    } else {
        CognitiveState::Stable
    };

    (score, state)
}

/// Map (state, game, score, pre-break focus) to an action and its rationale
fn recommend(
    state: CognitiveState,
    game_type: GameType,
    refresh_score: f64,
    focus_score: f64,
) -> (RecommendedAction, String, String) {
    let score = refresh_score.round() as i64;
    match state {
        CognitiveState::Refreshed => (
            RecommendedAction::ReturnToStudy,
            format!(
                "Your performance in {} was excellent (Score: {}). Your cognitive control \
                 and alertness are fully restored.",
                game_type.as_str(),
                score
            ),
            "You are sharp and ready! This is the perfect time to tackle your hardest task."
                .to_string(),
        ),
        CognitiveState::Stable => {
            if focus_score < LOW_FOCUS_THRESHOLD {
                (
                    RecommendedAction::ExtendBreak2Min,
                    format!(
                        "Your game performance was stable (Score: {}), but your focus before \
                         the break was low. A few more minutes off should secure the reset.",
                        score
                    ),
                    "You're doing okay, but let's take 2 more minutes to make sure you're \
                     fully recharged before jumping back in."
                        .to_string(),
                )
            } else {
                (
                    RecommendedAction::ReturnToStudy,
                    format!(
                        "Your cognitive metrics are within normal ranges (Score: {}). You \
                         have maintained your mental baseline.",
                        score
                    ),
                    "Good job maintaining stability. You are ready to continue your session."
                        .to_string(),
                )
            }
        }
        CognitiveState::Fatigued => {
            if game_type == GameType::Breathing {
                // Already breathing and still low: more breathing won't help
                (
                    RecommendedAction::ExtendBreak2Min,
                    "Your physiological stability is still lower than optimal. Rushing back \
                     now could lead to quick burnout."
                        .to_string(),
                    "Take a moment. There is no rush. Let's relax for 2 more minutes."
                        .to_string(),
                )
            } else {
                (
                    RecommendedAction::SuggestDeepBreathing,
                    format!(
                        "Your reaction times and accuracy (Score: {}) show signs of cognitive \
                         fatigue compared to your baseline.",
                        score
                    ),
                    "Your brain is tired, and that's okay. Instead of forcing it, let's try \
                     a breathing exercise to reset your nervous system."
                        .to_string(),
                )
            }
        }
    }
}
