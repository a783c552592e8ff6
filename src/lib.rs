//! FocusFlow Engine - deterministic focus scoring and behavioral policy
//!
//! The engine turns study-session telemetry into structured decisions through
//! stateless evaluations: focus scoring, distraction alerts, fullscreen
//! violation policy, study room moderation, and cognitive refresh analysis.
//! Every call is pure and independent; identical snapshots always produce
//! identical decisions.
//!
//! ## Modules
//!
//! - **Session scoring**: end-of-session telemetry into a 0-100 focus score
//! - **Live policies**: distraction alerts, violations and room moderation at
//!   periodic checkpoints
//! - **Break analysis**: cognitive refresh scoring for break mini-games

pub mod adapter;
pub mod alerts;
pub mod cognitive;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod moderation;
pub mod pipeline;
pub mod progress;
pub mod score;
pub mod types;
pub mod violations;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use alerts::AlertEvaluator;
pub use cognitive::CognitiveAnalyzer;
pub use error::EngineError;
pub use frame::{engagement_from_emotions, FrameAnalyzer};
pub use moderation::RoomModerator;
pub use pipeline::{
    cognitive_refresh_json, distraction_alert_json, fullscreen_violation_json,
    room_moderation_json, score_session_json, FocusEngine,
};
pub use score::FocusScorer;
pub use violations::ViolationPolicy;

/// Engine version embedded in all evaluation reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for evaluation reports
pub const PRODUCER_NAME: &str = "focusflow-engine";
