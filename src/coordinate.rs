use crate::cartesian::CartesianCoordinate;
use crate::errors::{CoordinateError, Result};
use crate::spheric::SphericCoordinate;
use crate::EPSILON;
use std::sync::Arc;

/// The capability contract shared by every coordinate representation.
///
/// Implementors supply only the two representation conversions and an
/// invariant check; the distance, central-angle, and equality algorithms are
/// provided methods expressed purely in terms of those primitives, so a
/// Cartesian and a spheric coordinate can be compared directly.
///
/// Every provided method asserts its preconditions (both operands internally
/// valid) and postconditions (finite, non-negative results) and reports
/// violations as [`CoordinateError::InvalidState`] rather than letting a NaN
/// or infinity escape.
pub trait Coordinate {
    /// Converts this coordinate into its canonical Cartesian representation.
    fn to_cartesian(&self) -> Result<Arc<CartesianCoordinate>>;

    /// Converts this coordinate into its canonical spheric representation.
    fn to_spheric(&self) -> Result<Arc<SphericCoordinate>>;

    /// Checks the representation invariants of this coordinate.
    fn check_invariants(&self) -> Result<()>;

    /// Computes the Euclidean distance between the two coordinates in
    /// three-dimensional space, using the Cartesian representation of both.
    fn cartesian_distance(&self, other: &dyn Coordinate) -> Result<f64> {
        self.check_invariants()?;
        other.check_invariants()?;
        let own = self.to_cartesian()?;
        let other = other.to_cartesian()?;
        let distance = (own.point() - other.point()).norm();
        if !distance.is_finite() || distance < 0.0 {
            return Err(CoordinateError::InvalidState(format!(
                "distance must be finite and non-negative, got {distance}"
            )));
        }
        Ok(distance)
    }

    /// Computes the central angle (great-circle angular distance) between the
    /// two coordinates, in radians, using the spheric representation of both.
    ///
    /// The coordinates must lie on the same sphere: if their radii differ by
    /// [`EPSILON`] or more, this returns
    /// [`CoordinateError::InvalidArgument`]. This is a semantic precondition,
    /// not a numerical edge case.
    fn central_angle(&self, other: &dyn Coordinate) -> Result<f64> {
        self.check_invariants()?;
        other.check_invariants()?;
        let own = self.to_spheric()?;
        let other = other.to_spheric()?;
        if (own.radius() - other.radius()).abs() >= EPSILON {
            return Err(CoordinateError::InvalidArgument(format!(
                "coordinates must lie on the same sphere (radii {} and {})",
                own.radius(),
                other.radius()
            )));
        }

        let polar_a = own.polar_angle().to_radians();
        let polar_b = other.polar_angle().to_radians();
        let azimuth_delta = (own.azimuth() - other.azimuth()).abs().to_radians();

        let num_a = (polar_b.cos() * azimuth_delta.sin()).powi(2);
        let num_b = ((polar_a * polar_b.sin()).cos()
            - polar_a.sin() * polar_b.cos() * azimuth_delta.cos())
        .powi(2);
        let den =
            polar_a.sin() * polar_b.sin() + polar_a.cos() * polar_a.cos() * azimuth_delta.cos();
        let angle = (num_a + num_b).sqrt().atan2(den);

        if !angle.is_finite() || angle < 0.0 {
            return Err(CoordinateError::InvalidState(format!(
                "central angle must be finite and non-negative, got {angle}"
            )));
        }
        Ok(angle)
    }

    /// Checks whether the two coordinates denote the same point, comparing
    /// each Cartesian component under the [`EPSILON`] tolerance.
    fn is_equal(&self, other: &dyn Coordinate) -> Result<bool> {
        self.check_invariants()?;
        other.check_invariants()?;
        let own = self.to_cartesian()?;
        let other = other.to_cartesian()?;
        Ok((own.x() - other.x()).abs() < EPSILON
            && (own.y() - other.y()).abs() < EPSILON
            && (own.z() - other.z()).abs() < EPSILON)
    }
}
