use crate::angle::Angle;
use crate::cache::CoordinateCache;
use crate::coordinate::Coordinate;
use crate::errors::{CoordinateError, Result};
use crate::spheric::SphericCoordinate;
use crate::Point3;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable point in three-dimensional Cartesian space.
///
/// All three components are finite; this invariant is enforced at
/// construction and re-checked by every operation on the [`Coordinate`]
/// contract.
///
/// Instances are canonical: [`CartesianCoordinate::of`] interns through the
/// [process-wide cache](CoordinateCache::global), so two requests for the same
/// (x, y, z) yield the same shared [`Arc`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CartesianCoordinate {
    point: Point3,
}

impl CartesianCoordinate {
    /// Returns the canonical coordinate for the given (x, y, z).
    ///
    /// Returns [`CoordinateError::InvalidArgument`] if any component is
    /// non-finite.
    pub fn of(x: f64, y: f64, z: f64) -> Result<Arc<Self>> {
        Self::of_in(CoordinateCache::global(), x, y, z)
    }

    /// Like [`CartesianCoordinate::of`], but interning through `cache` instead
    /// of the process-wide one.
    ///
    /// Note that conversions performed through the [`Coordinate`] contract
    /// always canonicalize their results through the process-wide cache.
    pub fn of_in(cache: &CoordinateCache, x: f64, y: f64, z: f64) -> Result<Arc<Self>> {
        for (component, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() {
                return Err(CoordinateError::InvalidArgument(format!(
                    "cartesian component {component} must be finite, got {value}"
                )));
            }
        }
        Ok(cache.intern_cartesian(Self {
            point: Point3::new(x, y, z),
        }))
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.point.z
    }

    pub(crate) fn point(&self) -> Point3 {
        self.point
    }
}

impl Coordinate for CartesianCoordinate {
    fn to_cartesian(&self) -> Result<Arc<CartesianCoordinate>> {
        // identity conversion; interning makes this the canonical instance
        CartesianCoordinate::of(self.x(), self.y(), self.z())
    }

    fn to_spheric(&self) -> Result<Arc<SphericCoordinate>> {
        let radius = self.point.coords.norm();
        if radius == 0.0 {
            return Err(CoordinateError::InvalidState(
                "the origin has no spheric representation (radius is zero)".to_owned(),
            ));
        }
        let azimuth = Angle::normalize(self.y().atan2(self.x()).to_degrees())?;
        // rounding may push z/r marginally outside acos's domain
        let polar = Angle::normalize((self.z() / radius).clamp(-1.0, 1.0).acos().to_degrees())?;
        SphericCoordinate::of(polar, azimuth, radius).map_err(|err| {
            CoordinateError::InvalidState(format!(
                "cartesian to spheric conversion produced an invalid coordinate: {err}"
            ))
        })
    }

    fn check_invariants(&self) -> Result<()> {
        for (component, value) in [("x", self.x()), ("y", self.y()), ("z", self.z())] {
            if !value.is_finite() {
                return Err(CoordinateError::InvalidState(format!(
                    "cartesian component {component} is no longer finite ({value})"
                )));
            }
        }
        Ok(())
    }
}

impl Display for CartesianCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.point)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for CartesianCoordinate {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // component-wise, not vector-magnitude
        self.point.abs_diff_eq(&other.point, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for CartesianCoordinate {
    fn default_max_relative() -> Self::Epsilon {
        Point3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(&other.point, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::CartesianCoordinate;
    use crate::coordinate::Coordinate;
    use crate::errors::CoordinateError;
    use crate::EPSILON;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[case(f64::NAN, 0.0, 0.0)]
    #[case(0.0, f64::INFINITY, 0.0)]
    #[case(0.0, 0.0, f64::NEG_INFINITY)]
    fn of_rejects_non_finite_components(#[case] x: f64, #[case] y: f64, #[case] z: f64) {
        assert!(matches!(
            CartesianCoordinate::of(x, y, z),
            Err(CoordinateError::InvalidArgument(_))
        ));
    }

    #[test]
    fn of_interns_by_value() {
        let first = CartesianCoordinate::of(1.0, 2.0, 3.0).unwrap();
        let second = CartesianCoordinate::of(1.0, 2.0, 3.0).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn identity_conversion_yields_the_canonical_instance() {
        let coordinate = CartesianCoordinate::of(4.0, -5.0, 6.0).unwrap();
        let converted = coordinate.to_cartesian().unwrap();
        assert!(Arc::ptr_eq(&coordinate, &converted));
    }

    #[test]
    fn origin_has_no_spheric_representation() {
        let origin = CartesianCoordinate::of(0.0, 0.0, 0.0).unwrap();
        assert!(matches!(
            origin.to_spheric(),
            Err(CoordinateError::InvalidState(_))
        ));
    }

    #[test]
    fn negative_z_axis_conversion_is_rejected_as_invalid_state() {
        // acos(z/r) lands exactly on the excluded polar upper bound here
        let coordinate = CartesianCoordinate::of(0.0, 0.0, -1.0).unwrap();
        assert!(matches!(
            coordinate.to_spheric(),
            Err(CoordinateError::InvalidState(_))
        ));
    }

    #[rstest]
    #[case(0.0, 2.0, 0.0, (90.0, 90.0, 2.0))]
    #[case(5.0, 5.0, 7.071_067_811_865_5, (45.0, 45.0, 10.0))]
    #[case(1.0, 0.0, 0.0, (90.0, 0.0, 1.0))]
    #[case(0.0, 0.0, 3.0, (0.0, 0.0, 3.0))]
    fn to_spheric_converts(
        #[case] x: f64,
        #[case] y: f64,
        #[case] z: f64,
        #[case] expected: (f64, f64, f64),
    ) {
        let spheric = CartesianCoordinate::of(x, y, z).unwrap().to_spheric().unwrap();
        let (polar, azimuth, radius) = expected;
        assert_relative_eq!(spheric.polar(), polar, epsilon = EPSILON);
        assert_relative_eq!(spheric.azimuth(), azimuth, epsilon = EPSILON);
        assert_relative_eq!(spheric.radius(), radius, epsilon = EPSILON);
    }

    #[test]
    fn negative_y_maps_into_the_upper_azimuth_range() {
        let spheric = CartesianCoordinate::of(1.0, -1.0, 0.0)
            .unwrap()
            .to_spheric()
            .unwrap();
        assert_relative_eq!(spheric.azimuth(), 315.0, epsilon = EPSILON);
    }

    // Cartesian -> spheric -> cartesian over an integer grid around the origin.
    quickcheck! {
        fn roundtrip_through_spheric(x: i16, y: i16, z: i16) -> () {
            if x == 0 && y == 0 {
                // on the z axis the conversion is degenerate (azimuth
                // undefined, polar on the excluded bound for negative z)
                return;
            }
            let cartesian = CartesianCoordinate::of(f64::from(x), f64::from(y), f64::from(z)).unwrap();
            let back = cartesian
                .to_spheric()
                .unwrap()
                .to_cartesian()
                .unwrap();
            assert_relative_eq!(*back, *cartesian, epsilon = EPSILON);
        }
    }
}
