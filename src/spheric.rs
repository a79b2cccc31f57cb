use crate::angle::Angle;
use crate::cache::CoordinateCache;
use crate::cartesian::CartesianCoordinate;
use crate::coordinate::Coordinate;
use crate::errors::{CoordinateError, Result};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable point in spheric (spherical-polar) space.
///
/// A spheric coordinate consists of three values, following the physics
/// convention for [spherical coordinates][sph]:
///
/// - the polar angle (colatitude, measured from the positive z axis), in
///   [0°, 180°);
/// - the azimuth (measured in the xy plane from the positive x axis), in
///   [0°, 360°); and
/// - the radius, a non-negative finite slant distance from the origin.
///
/// Instances are canonical: [`SphericCoordinate::of`] interns through the
/// [process-wide cache](CoordinateCache::global), so two requests for the same
/// triple yield the same shared [`Arc`].
///
/// [sph]: https://en.wikipedia.org/wiki/Spherical_coordinate_system
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericCoordinate {
    polar: Angle,
    azimuth: Angle,
    radius: f64,
}

impl SphericCoordinate {
    /// Returns the canonical coordinate for the given polar angle, azimuth,
    /// and radius (angles in degrees).
    ///
    /// Returns [`CoordinateError::InvalidArgument`] unless `0 ≤ polar < 180`,
    /// `0 ≤ azimuth < 360`, `radius ≥ 0`, and all three are finite.
    pub fn of(polar: f64, azimuth: f64, radius: f64) -> Result<Arc<Self>> {
        Self::of_in(CoordinateCache::global(), polar, azimuth, radius)
    }

    /// Like [`SphericCoordinate::of`], but interning through `cache` instead
    /// of the process-wide one.
    ///
    /// Note that conversions performed through the [`Coordinate`] contract
    /// always canonicalize their results through the process-wide cache.
    pub fn of_in(cache: &CoordinateCache, polar: f64, azimuth: f64, radius: f64) -> Result<Arc<Self>> {
        if !polar.is_finite() || !(0.0..180.0).contains(&polar) {
            return Err(CoordinateError::InvalidArgument(format!(
                "polar angle must be a finite value in [0°, 180°), got {polar}"
            )));
        }
        if !azimuth.is_finite() || !(0.0..360.0).contains(&azimuth) {
            return Err(CoordinateError::InvalidArgument(format!(
                "azimuth must be a finite value in [0°, 360°), got {azimuth}"
            )));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(CoordinateError::InvalidArgument(format!(
                "radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(cache.intern_spheric(Self {
            polar: Angle::new(polar)?,
            azimuth: Angle::new(azimuth)?,
            radius,
        }))
    }

    /// Returns the polar angle in degrees, in [0°, 180°).
    #[must_use]
    pub fn polar(&self) -> f64 {
        self.polar.degrees()
    }

    /// Returns the azimuth in degrees, in [0°, 360°).
    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.azimuth.degrees()
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the polar angle as an [`Angle`].
    #[must_use]
    pub fn polar_angle(&self) -> Angle {
        self.polar
    }

    /// Returns the azimuth as an [`Angle`].
    #[must_use]
    pub fn azimuth_angle(&self) -> Angle {
        self.azimuth
    }
}

impl Coordinate for SphericCoordinate {
    fn to_cartesian(&self) -> Result<Arc<CartesianCoordinate>> {
        let polar = self.polar.to_radians();
        let azimuth = self.azimuth.to_radians();
        let x = self.radius * polar.sin() * azimuth.cos();
        let y = self.radius * polar.sin() * azimuth.sin();
        let z = self.radius * polar.cos();
        CartesianCoordinate::of(x, y, z).map_err(|err| {
            CoordinateError::InvalidState(format!(
                "spheric to cartesian conversion produced an invalid coordinate: {err}"
            ))
        })
    }

    fn to_spheric(&self) -> Result<Arc<SphericCoordinate>> {
        // identity conversion; interning makes this the canonical instance
        SphericCoordinate::of(self.polar(), self.azimuth(), self.radius())
    }

    fn check_invariants(&self) -> Result<()> {
        if !self.polar().is_finite() || !(0.0..180.0).contains(&self.polar()) {
            return Err(CoordinateError::InvalidState(format!(
                "polar angle is out of range ({})",
                self.polar
            )));
        }
        if !self.azimuth().is_finite() || !(0.0..360.0).contains(&self.azimuth()) {
            return Err(CoordinateError::InvalidState(format!(
                "azimuth is out of range ({})",
                self.azimuth
            )));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(CoordinateError::InvalidState(format!(
                "radius is out of range ({})",
                self.radius
            )));
        }
        Ok(())
    }
}

impl Display for SphericCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "polar {}, azimuth {}, radius {}",
            self.polar, self.azimuth, self.radius
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for SphericCoordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        f64::abs_diff_eq(&self.polar(), &other.polar(), epsilon)
            && f64::abs_diff_eq(&self.azimuth(), &other.azimuth(), epsilon)
            && f64::abs_diff_eq(&self.radius, &other.radius, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for SphericCoordinate {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        f64::relative_eq(&self.polar(), &other.polar(), epsilon, max_relative)
            && f64::relative_eq(&self.azimuth(), &other.azimuth(), epsilon, max_relative)
            && f64::relative_eq(&self.radius, &other.radius, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::SphericCoordinate;
    use crate::coordinate::Coordinate;
    use crate::errors::CoordinateError;
    use crate::EPSILON;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[case(180.0, 0.0, 1.0)] // polar upper bound is exclusive
    #[case(0.0, 360.0, 1.0)] // azimuth upper bound is exclusive
    #[case(0.0, 0.0, -1.0)] // negative radius
    #[case(-0.1, 0.0, 1.0)]
    #[case(f64::NAN, 0.0, 1.0)]
    #[case(0.0, f64::INFINITY, 1.0)]
    #[case(0.0, 0.0, f64::NAN)]
    fn of_rejects_out_of_range_components(
        #[case] polar: f64,
        #[case] azimuth: f64,
        #[case] radius: f64,
    ) {
        assert!(matches!(
            SphericCoordinate::of(polar, azimuth, radius),
            Err(CoordinateError::InvalidArgument(_))
        ));
    }

    #[test]
    fn of_accepts_the_lower_bounds() {
        let coordinate = SphericCoordinate::of(0.0, 0.0, 0.0).unwrap();
        assert_eq!(coordinate.polar(), 0.0);
        assert_eq!(coordinate.azimuth(), 0.0);
        assert_eq!(coordinate.radius(), 0.0);
    }

    #[test]
    fn of_interns_by_value() {
        let first = SphericCoordinate::of(45.0, 45.0, 10.0).unwrap();
        let second = SphericCoordinate::of(45.0, 45.0, 10.0).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn identity_conversion_yields_the_canonical_instance() {
        let coordinate = SphericCoordinate::of(30.0, 60.0, 2.0).unwrap();
        let converted = coordinate.to_spheric().unwrap();
        assert!(Arc::ptr_eq(&coordinate, &converted));
    }

    #[rstest]
    #[case((90.0, 90.0, 2.0), (0.0, 2.0, 0.0))]
    #[case((45.0, 45.0, 10.0), (5.0, 5.0, 7.071_067_811_865_475))]
    #[case((90.0, 0.0, 1.0), (1.0, 0.0, 0.0))]
    #[case((0.0, 0.0, 3.0), (0.0, 0.0, 3.0))]
    #[case((90.0, 45.0, 2.0_f64.sqrt()), (1.0, 1.0, 0.0))]
    fn to_cartesian_converts(#[case] spheric: (f64, f64, f64), #[case] expected: (f64, f64, f64)) {
        let (polar, azimuth, radius) = spheric;
        let cartesian = SphericCoordinate::of(polar, azimuth, radius)
            .unwrap()
            .to_cartesian()
            .unwrap();
        let (x, y, z) = expected;
        assert_relative_eq!(cartesian.x(), x, epsilon = EPSILON);
        assert_relative_eq!(cartesian.y(), y, epsilon = EPSILON);
        assert_relative_eq!(cartesian.z(), z, epsilon = EPSILON);
    }

    #[rstest]
    #[case(45.0, 45.0, 10.0)]
    #[case(90.0, 90.0, 2.0)]
    #[case(30.0, 60.0, 2.0)]
    #[case(1.0, 359.0, 0.5)]
    #[case(179.0, 180.0, 100.0)]
    fn roundtrip_through_cartesian(#[case] polar: f64, #[case] azimuth: f64, #[case] radius: f64) {
        let spheric = SphericCoordinate::of(polar, azimuth, radius).unwrap();
        let back = spheric.to_cartesian().unwrap().to_spheric().unwrap();
        assert_relative_eq!(*back, *spheric, epsilon = EPSILON);
    }

    #[test]
    fn huge_radius_still_converts() {
        let coordinate = SphericCoordinate::of(90.0, 0.0, f64::MAX).unwrap();
        let cartesian = coordinate.to_cartesian().unwrap();
        assert!(cartesian.x().is_finite());
    }
}
