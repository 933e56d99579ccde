//! Embedding-vector math and the model capability seam.
//!
//! The comparator operates only on vectors; it never touches audio. The
//! neural model producing embeddings is an external collaborator hidden
//! behind [`EmbeddingModel`].

pub mod compare;
pub mod error;
pub mod model;

pub use compare::{centroid, cosine_similarity};
pub use error::EmbeddingError;
pub use model::{EmbeddingModel, EmbeddingVector};
