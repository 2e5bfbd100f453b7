use std::cmp;
use std::fmt;

/// A single measurement pulled from a [`PointSource`](crate::PointSource): an
/// acquisition time, a coordinate along the source's active axis, and the
/// signal intensity recorded there.
///
/// Points are plain values. The aggregator never mutates them, and which axis
/// the `coordinate` field refers to is determined by the source's
/// [`Modality`], not by the point itself.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub time: f64,
    pub coordinate: f64,
    pub intensity: f64,
}

impl Point {
    #[inline]
    pub fn new(time: f64, coordinate: f64, intensity: f64) -> Self {
        Self {
            time,
            coordinate,
            intensity,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Point({}, {}, {})",
            self.time, self.coordinate, self.intensity
        )
    }
}

impl cmp::PartialOrd<Point> for Point {
    fn partial_cmp(&self, other: &Point) -> Option<cmp::Ordering> {
        match self.time.partial_cmp(&other.time) {
            Some(cmp::Ordering::Equal) => self.coordinate.partial_cmp(&other.coordinate),
            ord => ord,
        }
    }
}

/// Which physical axis the `coordinate` field of a [`Point`] measures.
///
/// Resolved once when an aggregator is constructed and fixed for its
/// lifetime. Mass spectrometry sources expose an `mz` column, optical
/// sources a `wavelength` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    MassCharge,
    Wavelength,
}

impl Modality {
    /// The schema column this modality reads its coordinate from.
    pub const fn coordinate_field(&self) -> &'static str {
        match self {
            Self::MassCharge => "mz",
            Self::Wavelength => "wavelength",
        }
    }

    /// Select the active modality from a source's schema columns.
    ///
    /// `mz` wins over `wavelength` when a source exposes both. Returns
    /// `None` when neither column is present.
    pub fn from_headers(headers: &[String]) -> Option<Self> {
        if headers.iter().any(|h| h == Self::MassCharge.coordinate_field()) {
            Some(Self::MassCharge)
        } else if headers
            .iter()
            .any(|h| h == Self::Wavelength.coordinate_field())
        {
            Some(Self::Wavelength)
        } else {
            None
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.coordinate_field())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_modality_resolution() {
        let headers = |names: &[&str]| -> Vec<String> {
            names.iter().map(|s| s.to_string()).collect()
        };

        assert_eq!(
            Modality::from_headers(&headers(&["time", "mz", "intensity"])),
            Some(Modality::MassCharge)
        );
        assert_eq!(
            Modality::from_headers(&headers(&["time", "wavelength", "intensity"])),
            Some(Modality::Wavelength)
        );
        // mz takes precedence when a source carries both columns
        assert_eq!(
            Modality::from_headers(&headers(&["time", "wavelength", "mz", "intensity"])),
            Some(Modality::MassCharge)
        );
        assert_eq!(Modality::from_headers(&headers(&["time", "index"])), None);
    }

    #[test]
    fn test_point_ordering() {
        let a = Point::new(1.0, 100.0, 5.0);
        let b = Point::new(1.0, 200.0, 1.0);
        let c = Point::new(2.0, 50.0, 1.0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.to_string(), "Point(1, 100, 5)");
    }
}
