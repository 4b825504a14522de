//! Blog post generation pipeline.
//!
//! Three strictly sequential completion calls -- body, then title, then meta
//! description -- where the generated body is threaded into the later calls
//! as an assistant message. Typed intermediates keep each step's failure
//! individually attributable.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{
    DraftBody, GeneratedPost, GenerationError, GenerationStep, PostGenerator,
};
