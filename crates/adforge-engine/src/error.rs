//! Engine error types.
//!
//! Only request-fatal failures surface here: text generation/validation
//! and the batched record write. Image failures are data on the
//! `GeneratedImage` items, and video-pipeline failures stay behind the
//! hand-off and are logged only.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Text generation failed: {0}")]
    Text(#[source] adforge_genai::GenAiError),

    #[error("Campaign write failed: {0}")]
    Persist(#[from] adforge_firestore::FirestoreError),
}
