//! The merge function contract applied when a bucket closes.
//!
//! Every coordinate in a closing bucket carries the ordered list of
//! intensities contributed to it, and the aggregator reduces that list to a
//! single value with the merge function it was constructed with. Any
//! `Fn(&[f64]) -> f64` fits, so callers may pass closures that are sensitive
//! to contribution order (first, last) or not (sum, max). Only the default
//! lives here.

/// The canonical shape of a merge function.
pub type MergeFn = fn(&[f64]) -> f64;

/// The default merge: arithmetic sum over all contributions.
pub fn sum(intensities: &[f64]) -> f64 {
    intensities.iter().sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(sum(&[5.0, 3.0]), 8.0);
        assert_eq!(sum(&[]), 0.0);
    }
}
