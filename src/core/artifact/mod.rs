//! Retrieval of finished dump artifacts

pub mod retriever;

pub use retriever::{ArtifactRetriever, SIGNED_URL_VALIDITY};
