//! `specbin` groups a time-ordered stream of measurement points into
//! discrete spectra.
//!
//! A [`PointSource`] yields points one at a time, each carrying a time, a
//! coordinate along the source's active axis (m/z for mass spectrometry,
//! wavelength for optical detectors), and an intensity. A
//! [`SpectrumAggregator`] pulls from the source and buckets the points by
//! time: points within `time_res` of a bucket's anchor time accumulate
//! together, intensities at identical coordinates are reduced with a merge
//! function when the bucket closes, and each closed bucket is emitted as a
//! [`Spectrum`]. The whole stream is processed in a single pass with one
//! point of lookahead, so arbitrarily large inputs aggregate in bounded
//! memory (per bucket).
//!
//! Parsing raw files into points is left to [`PointSource`] implementors;
//! this crate ships only the in-memory [`MemoryPointSource`].
//!
//! ```
//! use specbin::{MemoryPointSource, Modality, Point, SpectrumAggregator};
//!
//! # fn main() -> Result<(), specbin::AggregatorError> {
//! let source = MemoryPointSource::new(
//!     [
//!         Point::new(0.0, 100.0, 5.0),
//!         Point::new(0.0, 200.0, 1.0),
//!         Point::new(2.0, 100.0, 7.0),
//!     ],
//!     Modality::MassCharge,
//! );
//! let mut aggregator = SpectrumAggregator::new(source, 1.0)?;
//!
//! let first = aggregator.next_spectrum()?.expect("a closed bucket");
//! assert_eq!(first.time(), 0.0);
//! assert_eq!(first.to_peaks(), vec![(100.0, 5.0), (200.0, 1.0)]);
//!
//! let second = aggregator.next_spectrum()?.expect("the final bucket");
//! assert_eq!(second.get(100.0), Some(7.0));
//!
//! assert!(aggregator.next_spectrum()?.is_none());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod merge;
pub mod point;
pub mod prelude;
pub mod source;
pub mod spectrum;

pub use crate::aggregator::{AggregatorError, SpectrumAggregator};
pub use crate::merge::MergeFn;
pub use crate::point::{Modality, Point};
pub use crate::source::{MemoryPointSource, PointSource, PointSourceMetadata, SourceError};
pub use crate::spectrum::Spectrum;
