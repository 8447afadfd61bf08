//! Module for handling bounded geometric optical surfaces
//!
//! This module contains the [`Surface`] trait which handles the interface for calculating
//! ray intersections as well as the concrete surface types: a flat circular [`Disk`], a
//! bounded [`SphericalCap`] and the side wall of a finite [`Cylinder`].

mod cylinder;
mod disk;
mod spherical_cap;

pub use cylinder::Cylinder;
pub use disk::Disk;
pub use spherical_cap::SphericalCap;
pub use spherical_cap::DEFAULT_FLAT_THRESHOLD;

use crate::{error::OptResult, meter, ray::Ray};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uom::si::f64::Length;

/// A successful ray / surface intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// ray parameter of the hit. Since ray directions are normalized this equals the geometric
    /// distance from the ray origin. Always positive.
    pub distance: Length,
    /// position of the intersection point
    pub point: Point3<Length>,
}

impl Intersection {
    /// Create an [`Intersection`] from a ray parameter and an intersection point, both in meters.
    pub(crate) fn from_meters(lam: f64, point: &Point3<f64>) -> Self {
        Self {
            distance: meter!(lam),
            point: meter!(point.x, point.y, point.z),
        }
    }
}

/// Trait for handling bounded geometric surfaces.
///
/// A surface such as [`Disk`] or [`SphericalCap`] has to implement this trait in order to be
/// tested against a [`Ray`] by a beam-tracing orchestrator.
pub trait Surface: Send + Sync {
    /// Calculate the closest intersection of a [`Ray`] with this [`Surface`].
    ///
    /// This function returns `Ok(None)` if the ray does not strike the physical extent of the
    /// surface. This covers rays running parallel to a plane or cylinder axis, rays whose hit
    /// would lie behind the ray origin, tangent configurations and hits outside the aperture.
    ///
    /// # Errors
    ///
    /// This function returns an error if the surface description itself is inconsistent
    /// (see [`OptrayError::InvalidAperture`](crate::error::OptrayError::InvalidAperture)).
    fn intersect(&self, ray: &Ray) -> OptResult<Option<Intersection>>;
    /// Return the surface type as string (for debugging purposes)
    fn name(&self) -> String;
}

impl Debug for dyn Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
