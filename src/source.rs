//! The pull interface the aggregator consumes points through, and the
//! introspection surface it forwards to callers.

use std::collections::VecDeque;
use std::io;

use thiserror::Error;

use crate::point::{Modality, Point};

/// An error raised while pulling a point from the underlying source.
///
/// These are produced by [`PointSource`] implementations, never by the
/// aggregator itself, and propagate to the caller unmodified.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("encountered a malformed point record: {0}")]
    MalformedRecord(String),
    #[error("encountered an IO error: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
}

/// The introspection surface of a point source.
///
/// Wrappers around a source forward these transparently, so metadata stays
/// reachable through however many layers sit on top of the reader that
/// produced it. See [`delegate_impl_point_source_metadata`](macro@crate::delegate_impl_point_source_metadata).
pub trait PointSourceMetadata {
    /// A short name for the underlying format or parser, used in error and
    /// log messages.
    fn format(&self) -> &str;

    /// The schema column names this source exposes, one per field of its
    /// records.
    fn headers(&self) -> &[String];
}

/// A source of [`Point`]s consumed one at a time.
///
/// `next_point` follows the shape of a fallible iterator: `None` signals
/// exhaustion, `Some(Err(_))` a failure in the underlying reader. Sources
/// are not rewindable; a consumed point is gone.
pub trait PointSource: PointSourceMetadata {
    fn next_point(&mut self) -> Option<Result<Point, SourceError>>;
}

/// Implements the body of a [`PointSourceMetadata`] impl by forwarding every
/// method to a member field.
#[macro_export]
macro_rules! delegate_impl_point_source_metadata {
    ($source:ident) => {
        fn format(&self) -> &str {
            self.$source.format()
        }

        fn headers(&self) -> &[String] {
            self.$source.headers()
        }
    };
}

/// An in-memory [`PointSource`] over already-parsed points.
///
/// Useful for testing and for callers whose parsing happens elsewhere. The
/// schema is synthesized from the [`Modality`] the points were measured in,
/// or supplied verbatim with [`MemoryPointSource::with_headers`].
#[derive(Debug, Clone)]
pub struct MemoryPointSource {
    points: VecDeque<Point>,
    headers: Vec<String>,
}

impl MemoryPointSource {
    pub fn new(points: impl IntoIterator<Item = Point>, modality: Modality) -> Self {
        Self::with_headers(
            points,
            vec![
                "time".to_string(),
                modality.coordinate_field().to_string(),
                "intensity".to_string(),
            ],
        )
    }

    pub fn with_headers(points: impl IntoIterator<Item = Point>, headers: Vec<String>) -> Self {
        Self {
            points: points.into_iter().collect(),
            headers,
        }
    }

    /// The number of points not yet pulled.
    pub fn remaining(&self) -> usize {
        self.points.len()
    }
}

impl PointSourceMetadata for MemoryPointSource {
    fn format(&self) -> &str {
        "memory"
    }

    fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl PointSource for MemoryPointSource {
    fn next_point(&mut self) -> Option<Result<Point, SourceError>> {
        self.points.pop_front().map(Ok)
    }
}
