//! bloomquiz-core — Question model and duplicate-aware question repository.
//!
//! This crate defines the question record (three variants classified by
//! Bloom's Taxonomy level) and the in-memory repository that assigns ids
//! and refuses questions repeated in the same or the preceding year.

pub mod error;
pub mod model;
pub mod repository;
pub mod summary;

pub use error::{QuestionError, RepositoryError};
pub use model::{BloomLevel, Question, QuestionId, QuestionKind, QuestionType};
pub use repository::QuestionRepository;
pub use summary::CompletionTime;
