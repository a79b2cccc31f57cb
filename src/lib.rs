//! Immutable dual-representation coordinate values.
//!
//! This library models points in three-dimensional space in two
//! interconvertible representations: [`CartesianCoordinate`] (x, y, z) and
//! [`SphericCoordinate`] (polar angle, azimuth, radius). Both implement the
//! [`Coordinate`] contract, which supplies Euclidean distance, great-circle
//! [central angle](Coordinate::central_angle), and tolerance-based equality as
//! shared algorithms expressed purely in terms of the two representation
//! conversions -- so coordinates of different representations can be compared
//! directly.
//!
//! Coordinate values are canonical: the `of` constructors intern through a
//! process-wide [`CoordinateCache`], guaranteeing at most one shared instance
//! per distinct value even under concurrent construction. Two requests for the
//! same components return the same [`Arc`](std::sync::Arc):
//!
//! ```
//! use std::sync::Arc;
//! use kugel::CartesianCoordinate;
//!
//! # fn main() -> kugel::Result<()> {
//! let first = CartesianCoordinate::of(1.0, 2.0, 3.0)?;
//! let second = CartesianCoordinate::of(1.0, 2.0, 3.0)?;
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```
//!
//! Distance and equality work across representations:
//!
//! ```
//! use kugel::{CartesianCoordinate, Coordinate, SphericCoordinate};
//!
//! # fn main() -> kugel::Result<()> {
//! let corner = CartesianCoordinate::of(1.0, 1.0, 1.0)?;
//! // (90°, 90°, 2) is the cartesian point (0, 2, 0)
//! let on_sphere = SphericCoordinate::of(90.0, 90.0, 2.0)?;
//!
//! let distance = corner.cartesian_distance(&*on_sphere)?;
//! assert!((distance - 3.0_f64.sqrt()).abs() < kugel::EPSILON);
//!
//! assert!(on_sphere.is_equal(&*CartesianCoordinate::of(0.0, 2.0, 0.0)?)?);
//! # Ok(())
//! # }
//! ```
//!
//! Bad inputs are rejected eagerly with
//! [`InvalidArgument`](CoordinateError::InvalidArgument), while values that go
//! wrong mid-computation (eg, converting the origin to a spheric coordinate)
//! surface as [`InvalidState`](CoordinateError::InvalidState) -- never as a
//! silent NaN.

mod angle;
mod cache;
mod cartesian;
mod coordinate;
mod errors;
mod spheric;

pub use angle::Angle;
pub use cache::CoordinateCache;
pub use cartesian::CartesianCoordinate;
pub use coordinate::Coordinate;
pub use errors::{CoordinateError, Result};
pub use spheric::SphericCoordinate;

pub(crate) type Point3 = nalgebra::Point3<f64>;

/// Tolerance used by the coordinate comparisons.
///
/// [`Coordinate::is_equal`] compares each Cartesian component against this
/// value, and [`Coordinate::central_angle`] uses it to decide whether two
/// coordinates lie on the same sphere. [`Angle`] equality, by contrast, is
/// exact.
pub const EPSILON: f64 = 1e-9;
