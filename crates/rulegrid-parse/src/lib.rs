//! rulegrid-parse: content stream tokenizer and page backends.
//!
//! This crate walks page content streams and turns their `m` / `l`
//! operators into the [`PathOp`](rulegrid_core::PathOp) feed consumed by
//! rulegrid-core. Documents are read through the [`ContentSource`] trait,
//! implemented for lopdf by [`LopdfDocument`].

pub mod backend;
pub mod error;
pub mod feed;
pub mod lopdf_backend;
pub mod tokenizer;

pub use backend::ContentSource;
pub use error::BackendError;
pub use feed::path_ops;
pub use lopdf_backend::LopdfDocument;
pub use rulegrid_core;
pub use tokenizer::{Operand, Operator, tokenize};
