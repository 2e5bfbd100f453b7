//! A collection of traits to glob-import for ergonomic use of the library.

pub use crate::source::{PointSource, PointSourceMetadata};
