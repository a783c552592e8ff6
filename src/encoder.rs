//! Evaluation report encoding
//!
//! Wraps engine decisions in a versioned report envelope with producer and
//! provenance metadata, for the host backend to persist or relay. Decisions
//! stay pure; only the envelope carries a computed-at timestamp.

use crate::error::EngineError;
use crate::types::{EvaluationReport, ReportKind, ReportProducer, ReportProvenance, SessionMeta};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Encoder for producing evaluation report envelopes
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Wrap a decision in a report envelope
    pub fn encode<T: Serialize>(
        &self,
        kind: ReportKind,
        decision: &T,
        meta: &SessionMeta,
    ) -> Result<EvaluationReport, EngineError> {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: ENGINE_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let provenance = ReportProvenance {
            session_id: meta.session_id,
            observed_at_utc: meta.observed_at.map(|t| t.to_rfc3339()),
            computed_at_utc: Utc::now().to_rfc3339(),
        };

        Ok(EvaluationReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            provenance,
            kind,
            decision: serde_json::to_value(decision)?,
        })
    }

    /// Wrap a decision and serialize the envelope to JSON
    pub fn encode_to_json<T: Serialize>(
        &self,
        kind: ReportKind,
        decision: &T,
        meta: &SessionMeta,
    ) -> Result<String, EngineError> {
        let report = self.encode(kind, decision, meta)?;
        serde_json::to_string_pretty(&report).map_err(EngineError::JsonError)
    }
}
