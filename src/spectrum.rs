//! The closed, merged output of one time bucket.

use identity_hash::BuildIdentityHasher;
use indexmap::IndexMap;

/// Coordinates are keyed by their exact bit pattern so that grouping within a
/// bucket uses bit-identical `f64` equality, with no tolerance.
pub(crate) type IntensityMap = IndexMap<u64, f64, BuildIdentityHasher<u64>>;

/// One spectrum: the bucket anchor time plus a mapping from coordinate to
/// merged intensity.
///
/// Produced by [`SpectrumAggregator`](crate::SpectrumAggregator) when a time
/// bucket closes, and immutable from then on. The coordinate mapping is
/// semantically unordered; [`Spectrum::iter`] yields entries in first-seen
/// order and [`Spectrum::to_peaks`] sorts them by coordinate.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Spectrum {
    time: f64,
    entries: IntensityMap,
}

impl Spectrum {
    pub(crate) fn new(time: f64, entries: IntensityMap) -> Self {
        Self { time, entries }
    }

    /// The anchor time of the bucket this spectrum was merged from.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The merged intensity recorded at a coordinate, matched by exact bit
    /// pattern.
    pub fn get(&self, coordinate: f64) -> Option<f64> {
        self.entries.get(&coordinate.to_bits()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.entries
            .iter()
            .map(|(bits, intensity)| (f64::from_bits(*bits), *intensity))
    }

    /// The number of distinct coordinates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All (coordinate, intensity) pairs sorted by coordinate.
    pub fn to_peaks(&self) -> Vec<(f64, f64)> {
        let mut peaks: Vec<_> = self.iter().collect();
        peaks.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        peaks
    }

    /// The most intense (coordinate, intensity) pair, or `None` for an empty
    /// spectrum.
    pub fn base_peak(&self) -> Option<(f64, f64)> {
        self.iter().max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// The sum of all merged intensities.
    pub fn total_intensity(&self) -> f64 {
        self.entries.values().sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_spectrum() -> Spectrum {
        let mut entries = IntensityMap::default();
        entries.insert(200.0f64.to_bits(), 1.0);
        entries.insert(100.0f64.to_bits(), 8.0);
        Spectrum::new(4.25, entries)
    }

    #[test]
    fn test_accessors() {
        let spectrum = make_spectrum();
        assert_eq!(spectrum.time(), 4.25);
        assert_eq!(spectrum.len(), 2);
        assert!(!spectrum.is_empty());
        assert_eq!(spectrum.get(100.0), Some(8.0));
        assert_eq!(spectrum.get(100.5), None);
    }

    #[test]
    fn test_summaries() {
        let spectrum = make_spectrum();
        assert_eq!(spectrum.to_peaks(), vec![(100.0, 8.0), (200.0, 1.0)]);
        assert_eq!(spectrum.base_peak(), Some((100.0, 8.0)));
        assert_eq!(spectrum.total_intensity(), 9.0);
    }
}
