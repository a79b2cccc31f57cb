use crate::errors::{CoordinateError, Result};
use std::fmt;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A normalized angular value in degrees.
///
/// An `Angle` always holds a finite value in [0°, 360°). Out-of-range inputs
/// are rejected by [`Angle::new`]; use [`Angle::normalized`] to fold an
/// arbitrary finite degree value into range first.
///
/// Two angles are equal iff their degree values are numerically equal -- there
/// is no tolerance on `Angle` itself. Tolerance semantics live with the
/// coordinate comparisons that consume angles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// Constructs an angle from a degree value already in [0°, 360°).
    ///
    /// Returns [`CoordinateError::InvalidArgument`] if `degrees` is non-finite
    /// or outside the interval.
    pub fn new(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() || !(0.0..360.0).contains(&degrees) {
            return Err(CoordinateError::InvalidArgument(format!(
                "angle must be a finite value in [0°, 360°), got {degrees}"
            )));
        }
        Ok(Self { degrees })
    }

    /// Constructs an angle from an arbitrary finite degree value by folding it
    /// into [0°, 360°) first.
    pub fn normalized(degrees: f64) -> Result<Self> {
        Ok(Self {
            degrees: Self::normalize(degrees)?,
        })
    }

    /// Folds an arbitrary finite degree value into [0°, 360°).
    ///
    /// Returns [`CoordinateError::InvalidArgument`] if `degrees` is non-finite.
    pub fn normalize(degrees: f64) -> Result<f64> {
        if !degrees.is_finite() {
            return Err(CoordinateError::InvalidArgument(format!(
                "cannot normalize a non-finite angle ({degrees})"
            )));
        }
        let folded = degrees.rem_euclid(360.0);
        // rem_euclid of a tiny negative value rounds up to 360.0 itself
        Ok(if folded >= 360.0 { 0.0 } else { folded })
    }

    /// Returns the degree value, always in [0°, 360°).
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.degrees
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.degrees.to_radians()
    }

    /// Interprets the angle as a polar angle (colatitude, measured from the
    /// positive z axis) and returns the corresponding signed latitude in
    /// radians.
    #[must_use]
    pub fn as_latitude_radians(self) -> f64 {
        (self.degrees - 90.0).to_radians()
    }

    /// Interprets the angle as an azimuth and returns the corresponding
    /// longitude in radians.
    #[must_use]
    pub fn as_longitude_radians(self) -> f64 {
        self.to_radians()
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}
