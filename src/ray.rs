#![warn(missing_docs)]
//! Module for handling optical rays
use approx::relative_eq;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use crate::{
    error::{OptResult, OptrayError},
    meter,
};

/// A semi-infinite geometric ray given by its origin and propagation direction.
///
/// Only points `pos + lam * dir` with `lam > 0` are considered part of the ray, so a surface
/// located behind (or exactly at) the origin never produces an intersection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ray {
    /// Stores the position (origin) of the ray
    pos: Point3<Length>,
    /// Stores the propagation direction of the ray (stored as direction cosine)
    dir: Vector3<f64>,
}
impl Ray {
    /// Creates a new [`Ray`].
    ///
    /// The direction vector is normalized. The direction is thus stored as (`direction cosine`)[`https://en.wikipedia.org/wiki/Direction_cosine`]
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the position entries are not finite
    ///  - the direction vector has a zero length or non-finite entries
    pub fn new(position: Point3<Length>, direction: Vector3<f64>) -> OptResult<Self> {
        if position.iter().any(|p| !p.is_finite()) {
            return Err(OptrayError::Other("position entries must be finite".into()));
        }
        if direction.iter().any(|d| !d.is_finite()) {
            return Err(OptrayError::Other(
                "direction vector entries must be finite".into(),
            ));
        }
        if relative_eq!(direction.norm(), 0.0) {
            return Err(OptrayError::Other("length of direction must be >0".into()));
        }
        Ok(Self {
            pos: position,
            dir: direction.normalize(),
        })
    }
    /// Create a new collimated ray.
    ///
    /// Generate a ray at the given position collinear with the z axis (optical axis).
    ///
    /// # Errors
    /// This function returns an error if the position entries are not finite.
    pub fn new_collimated(position: Point3<Length>) -> OptResult<Self> {
        Self::new(position, Vector3::z())
    }
    /// Create a ray with a position at the global coordinate origin pointing along the positive z-axis.
    ///
    /// # Errors
    ///
    /// This function does not return an error in practice. The [`OptResult`] is kept for
    /// uniformity with the other constructors.
    pub fn origin_along_z() -> OptResult<Self> {
        Self::new_collimated(Point3::origin())
    }
    /// Returns the position of this [`Ray`].
    #[must_use]
    pub fn position(&self) -> Point3<Length> {
        self.pos
    }
    /// Returns the direction of this [`Ray`] as a unit vector.
    #[must_use]
    pub const fn direction(&self) -> Vector3<f64> {
        self.dir
    }
    /// Returns the point on this [`Ray`] at the given distance from its origin.
    ///
    /// Since the direction is normalized, the ray parameter equals the geometric distance.
    #[must_use]
    pub fn point_at(&self, distance: Length) -> Point3<Length> {
        let point = self.pos.map(|p| p.value) + distance.value * self.dir;
        meter!(point.x, point.y, point.z)
    }
}
