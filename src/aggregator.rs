//! The streaming transform that groups a point stream into spectra.

use std::mem;

use identity_hash::BuildIdentityHasher;
use indexmap::IndexMap;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::merge::{self, MergeFn};
use crate::point::{Modality, Point};
use crate::source::{PointSource, PointSourceMetadata, SourceError};
use crate::spectrum::{IntensityMap, Spectrum};

/// The in-progress bucket: each coordinate (keyed by bit pattern) maps to
/// the ordered list of intensities contributed to it so far.
type ContributionMap = IndexMap<u64, Vec<f64>, BuildIdentityHasher<u64>>;

#[derive(Debug, Error)]
pub enum AggregatorError {
    /// The source's schema exposes neither coordinate column.
    #[error("{format} source does not expose an 'mz' or 'wavelength' column")]
    MissingCoordinateColumn { format: String },
    /// The source was exhausted before yielding a single point.
    #[error("{format} source produced no points")]
    EmptySource { format: String },
    /// A failure in the underlying source, propagated unmodified.
    #[error("encountered an error while pulling from the source: {0}")]
    Source(
        #[from]
        #[source]
        SourceError,
    ),
}

/**
A wrapper for [`PointSource`] implementors that buckets their points by time
and merges them into [`Spectrum`] instances.

Points whose time lies within `time_res` of the current bucket's anchor time
(the time of the first point in the bucket) accumulate into that bucket,
intensities at bit-identical coordinates appending to a shared contribution
list. The first point whose time delta strictly exceeds `time_res` closes
the bucket: every contribution list is reduced with the merge function and
the result is emitted as a [`Spectrum`], while the boundary-crossing point
seeds the next bucket. When the source runs out, a non-empty bucket is
flushed as a final partial spectrum.

Construction pulls one point to seed the first bucket, so a source must
yield at least one point for construction to succeed.

```
use specbin::{MemoryPointSource, Modality, Point, SpectrumAggregator};

# fn main() -> Result<(), specbin::AggregatorError> {
let source = MemoryPointSource::new(
    [
        Point::new(0.0, 100.0, 5.0),
        Point::new(0.0, 100.0, 3.0),
        Point::new(2.0, 100.0, 7.0),
    ],
    Modality::MassCharge,
);
let mut aggregator = SpectrumAggregator::new(source, 1.0)?;
while let Some(spectrum) = aggregator.next_spectrum()? {
    println!("{}: {} coordinates", spectrum.time(), spectrum.len());
}
# Ok(())
# }
```
*/
#[derive(Debug)]
pub struct SpectrumAggregator<S: PointSource, M: Fn(&[f64]) -> f64 = MergeFn> {
    source: S,
    modality: Modality,
    time_res: f64,
    merge_fn: M,
    anchor_time: f64,
    bucket: ContributionMap,
    depth: usize,
}

impl<S: PointSource> SpectrumAggregator<S> {
    /// Wrap `source`, bucketing points whose times lie within `time_res` of
    /// each bucket's anchor and merging intensities with [`merge::sum`].
    ///
    /// `time_res` is expected to be non-negative; `0` puts every distinct
    /// time value in its own bucket.
    pub fn new(source: S, time_res: f64) -> Result<Self, AggregatorError> {
        let merge_fn: MergeFn = merge::sum;
        Self::with_merge_fn(source, time_res, merge_fn)
    }
}

impl<S: PointSource, M: Fn(&[f64]) -> f64> SpectrumAggregator<S, M> {
    /// Like [`SpectrumAggregator::new`], but reducing each coordinate's
    /// ordered contribution list with `merge_fn` instead of summing it.
    pub fn with_merge_fn(
        mut source: S,
        time_res: f64,
        merge_fn: M,
    ) -> Result<Self, AggregatorError> {
        let modality = Modality::from_headers(source.headers()).ok_or_else(|| {
            AggregatorError::MissingCoordinateColumn {
                format: source.format().to_string(),
            }
        })?;
        let seed = match source.next_point() {
            Some(point) => point?,
            None => {
                return Err(AggregatorError::EmptySource {
                    format: source.format().to_string(),
                })
            }
        };
        debug!(
            "aggregating the {} axis of a {} source at time_res {}",
            modality,
            source.format(),
            time_res
        );
        let mut this = Self {
            source,
            modality,
            time_res,
            merge_fn,
            anchor_time: seed.time,
            bucket: ContributionMap::default(),
            depth: 0,
        };
        this.push_point(seed);
        Ok(this)
    }

    /// Produce the next closed [`Spectrum`], pulling points from the source
    /// until a bucket boundary is crossed or the source is exhausted.
    ///
    /// Returns `Ok(None)` once every point has been emitted in some
    /// spectrum. A [`SourceError`] propagates immediately and leaves the
    /// bucket in progress unusable; callers should not continue after one.
    pub fn next_spectrum(&mut self) -> Result<Option<Spectrum>, AggregatorError> {
        while let Some(pulled) = self.source.next_point() {
            let point = pulled?;
            if point.time - self.anchor_time > self.time_res {
                let spectrum = self.close_bucket();
                self.anchor_time = point.time;
                self.push_point(point);
                return Ok(Some(spectrum));
            }
            self.push_point(point);
        }
        if self.bucket.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.close_bucket()))
    }

    fn push_point(&mut self, point: Point) {
        self.bucket
            .entry(point.coordinate.to_bits())
            .or_default()
            .push(point.intensity);
        self.depth += 1;
        if self.depth % 1_000_000 == 0 {
            warn!(
                "bucket anchored at {} has accumulated {} points",
                self.anchor_time, self.depth
            );
        }
    }

    fn close_bucket(&mut self) -> Spectrum {
        let bucket = mem::take(&mut self.bucket);
        trace!(
            "closing bucket anchored at {} with {} distinct coordinates from {} points",
            self.anchor_time,
            bucket.len(),
            self.depth
        );
        self.depth = 0;
        let merge_fn = &self.merge_fn;
        let entries: IntensityMap = bucket
            .into_iter()
            .map(|(coordinate, contributions)| (coordinate, merge_fn(&contributions)))
            .collect();
        Spectrum::new(self.anchor_time, entries)
    }

    /// The coordinate axis resolved from the source's schema at
    /// construction.
    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// The bucket width threshold.
    pub fn time_res(&self) -> f64 {
        self.time_res
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Discard the aggregator and recover the wrapped source.
    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S: PointSource, M: Fn(&[f64]) -> f64> PointSourceMetadata for SpectrumAggregator<S, M> {
    crate::delegate_impl_point_source_metadata!(source);
}

impl<S: PointSource, M: Fn(&[f64]) -> f64> Iterator for SpectrumAggregator<S, M> {
    type Item = Result<Spectrum, AggregatorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spectrum().transpose()
    }
}
