//! Spherical cap surface
//!
//! A bounded spherical surface ("cap") defined by its chord — the flat circular disk the cap
//! projects onto — a signed curvature (1/radius of curvature, in 1/m) and an aperture diameter.
//! Caps with a curvature below a configurable threshold degenerate to a flat [`Disk`] on the
//! same chord.
use approx::relative_eq;
use log::warn;
use nalgebra::{Point3, Vector3};
use num::Zero;
use roots::{find_roots_quadratic, Roots};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use super::{Disk, Intersection, Surface};
use crate::{
    error::{OptResult, OptrayError},
    meter,
    ray::Ray,
};

/// Curvature (in 1/m) below which a [`SphericalCap`] is treated as a flat [`Disk`].
pub const DEFAULT_FLAT_THRESHOLD: f64 = 1.0e-5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A bounded spherical surface defined by its chord, curvature and aperture diameter.
pub struct SphericalCap {
    chord_center: Point3<Length>,
    chord_normal: Vector3<f64>,
    /// curvature (1/radius of curvature) in 1/m. The sign encodes on which side of the chord
    /// the center of curvature lies.
    curvature: f64,
    diameter: Length,
    flat_threshold: f64,
}
impl SphericalCap {
    /// Create a new [`SphericalCap`] from its chord center, chord normal, curvature (in 1/m)
    /// and aperture diameter.
    ///
    /// The chord normal is normalized on entry. The flat-disk curvature threshold is set to
    /// [`DEFAULT_FLAT_THRESHOLD`] and can be changed with
    /// [`set_flat_threshold`](Self::set_flat_threshold).
    ///
    /// # Errors
    ///
    /// This function will return an error if
    /// - the chord center entries are not finite
    /// - the chord normal is zero in length or has non-finite entries
    /// - the diameter is not positive or not finite
    /// - the curvature is not finite
    /// - the aperture diameter is too large for the given curvature
    ///   (`|diameter * curvature / 2| > 1`)
    pub fn new(
        chord_center: Point3<Length>,
        chord_normal: Vector3<f64>,
        curvature: f64,
        diameter: Length,
    ) -> OptResult<Self> {
        if chord_center.iter().any(|c| !c.is_finite()) {
            return Err(OptrayError::Other(
                "chord center entries must be finite".into(),
            ));
        }
        if chord_normal.iter().any(|n| !n.is_finite()) {
            return Err(OptrayError::Other(
                "chord normal entries must be finite".into(),
            ));
        }
        if relative_eq!(chord_normal.norm(), 0.0) {
            return Err(OptrayError::Other("length of chord normal must be >0".into()));
        }
        if !diameter.is_finite() || diameter.is_sign_negative() || diameter.is_zero() {
            return Err(OptrayError::Other("diameter must be >0 and finite".into()));
        }
        if !curvature.is_finite() {
            return Err(OptrayError::Other("curvature must be finite".into()));
        }
        if (0.5 * diameter.value * curvature).abs() > 1.0 {
            return Err(OptrayError::InvalidAperture(
                "aperture diameter too large for the given curvature".into(),
            ));
        }
        Ok(Self {
            chord_center,
            chord_normal: chord_normal.normalize(),
            curvature,
            diameter,
            flat_threshold: DEFAULT_FLAT_THRESHOLD,
        })
    }
    /// Returns the chord center position of this [`SphericalCap`].
    #[must_use]
    pub fn chord_center(&self) -> Point3<Length> {
        self.chord_center
    }
    /// Returns the unit chord normal vector of this [`SphericalCap`].
    #[must_use]
    pub const fn chord_normal(&self) -> Vector3<f64> {
        self.chord_normal
    }
    /// Returns the curvature (in 1/m) of this [`SphericalCap`].
    #[must_use]
    pub const fn curvature(&self) -> f64 {
        self.curvature
    }
    /// Returns the aperture diameter of this [`SphericalCap`].
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }
    /// Returns the curvature threshold below which this cap behaves as a flat [`Disk`].
    #[must_use]
    pub const fn flat_threshold(&self) -> f64 {
        self.flat_threshold
    }
    /// Sets the curvature threshold (in 1/m) below which this cap behaves as a flat [`Disk`].
    pub fn set_flat_threshold(&mut self, threshold: f64) {
        if !threshold.is_finite() || threshold <= 0.0 {
            warn!("flat threshold must be > 0 and finite! Using default value of 1e-5 1/m");
            self.flat_threshold = DEFAULT_FLAT_THRESHOLD;
            return;
        }
        self.flat_threshold = threshold;
    }
    /// Returns the center of curvature of the full sphere this cap lies on.
    ///
    /// An orchestrator needs this point in order to derive the local outward surface normal at
    /// an intersection point. Returns `Ok(None)` if the curvature is below the flat threshold:
    /// the cap then behaves as a [`Disk`] and its chord normal is the surface normal everywhere.
    ///
    /// # Errors
    ///
    /// This function will return an error if the aperture diameter is inconsistent with the
    /// curvature.
    pub fn center_of_curvature(&self) -> OptResult<Option<Point3<Length>>> {
        if self.curvature.abs() < self.flat_threshold {
            return Ok(None);
        }
        let center = self.sphere_center_in_m()?;
        Ok(Some(meter!(center.x, center.y, center.z)))
    }
    /// Center of curvature in meters. The chord subtends the half angle
    /// `theta = asin(diameter * curvature / 2)` as seen from this point.
    fn sphere_center_in_m(&self) -> OptResult<Point3<f64>> {
        let half_angle_sine = 0.5 * self.diameter.value * self.curvature;
        // checked in `new`, but a deserialized cap may bypass the constructor
        if half_angle_sine.abs() > 1.0 {
            return Err(OptrayError::InvalidAperture(
                "aperture diameter too large for the given curvature".into(),
            ));
        }
        Ok(self.chord_center.map(|c| c.value)
            + half_angle_sine.asin().cos() * self.chord_normal / self.curvature)
    }
    /// A point on the full sphere lies on the cap iff the angle between its local normal and
    /// the chord normal stays within the half angle subtended by the cap.
    fn on_cap(&self, sphere_center: &Point3<f64>, point: &Point3<f64>) -> bool {
        let local_normal = (sphere_center - point).normalize();
        local_normal.dot(&self.chord_normal) > 0.5 * self.diameter.value * self.curvature
    }
}

impl Surface for SphericalCap {
    fn intersect(&self, ray: &Ray) -> OptResult<Option<Intersection>> {
        // flat limit: the cap degenerates to a disk on its chord
        if self.curvature.abs() < self.flat_threshold {
            return Disk::new(self.chord_center, self.chord_normal, self.diameter)?.intersect(ray);
        }
        let pos = ray.position().map(|p| p.value);
        let dir = ray.direction();
        let sphere_center = self.sphere_center_in_m()?;
        let radius = 1.0 / self.curvature;
        let pc = sphere_center - pos;
        // a point pos + lam * dir lies on the full sphere iff it is at distance |radius| from
        // the sphere center:
        // lam^2 - 2 * dot(dir, pc) * lam + (|pc|^2 - radius^2) = 0
        let roots = find_roots_quadratic(
            1.0,
            -2.0 * dir.dot(&pc),
            radius.mul_add(-radius, pc.norm_squared()),
        );
        let (lam1, lam2) = match roots {
            // no intersection with the sphere, or the ray is tangent to it
            Roots::No(_) | Roots::One(_) => return Ok(None),
            Roots::Two(t) => (f64::min(t[0], t[1]), f64::max(t[0], t[1])),
            _ => unreachable!(),
        };
        // sphere is completely behind the ray
        if lam1 < 0.0 && lam2 < 0.0 {
            return Ok(None);
        }
        if lam1 < 0.0 && lam2 > 0.0 {
            // single candidate in front. It is on the sphere; check that it is on the cap.
            let point = pos + lam2 * dir;
            if self.on_cap(&sphere_center, &point) {
                return Ok(Some(Intersection::from_meters(lam2, &point)));
            }
        }
        if lam1 > 0.0 && lam2 > 0.0 {
            // two candidates in front. Take the closest one that lies on the cap.
            let point = pos + lam1 * dir;
            if self.on_cap(&sphere_center, &point) {
                return Ok(Some(Intersection::from_meters(lam1, &point)));
            }
            let point = pos + lam2 * dir;
            if self.on_cap(&sphere_center, &point) {
                return Ok(Some(Intersection::from_meters(lam2, &point)));
            }
        }
        Ok(None)
    }
    fn name(&self) -> String {
        "spherical cap".into()
    }
}
