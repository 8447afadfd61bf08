//! Cylindrical shell surface
//!
//! The lateral (side) surface of a finite cylinder, given by the center of one of its end
//! faces, the outgoing normal of that face, a thickness (the cylinder extends by the thickness
//! behind the normal) and a diameter. Only the side wall is modeled; the flat end faces are
//! separate [`Disk`](super::Disk) surfaces.
use approx::relative_eq;
use nalgebra::{Point3, Vector3};
use num::Zero;
use roots::{find_roots_quadratic, Roots};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use super::{Intersection, Surface};
use crate::{
    error::{OptResult, OptrayError},
    ray::Ray,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The side wall of a finite cylinder.
pub struct Cylinder {
    face_center: Point3<Length>,
    normal: Vector3<f64>,
    thickness: Length,
    diameter: Length,
}
impl Cylinder {
    /// Create a new [`Cylinder`] side-wall surface.
    ///
    /// # Attributes
    /// - `face_center`: center of the end face of the cylinder where the normal vector lies
    /// - `normal`: outgoing normal vector of this face (normalized on entry)
    /// - `thickness`: thickness of the cylinder, counted from the face center against the normal
    /// - `diameter`: diameter of the cylinder
    ///
    /// # Errors
    ///
    /// This function will return an error if
    /// - the face center entries are not finite
    /// - the normal vector is zero in length or has non-finite entries
    /// - the thickness or the diameter is not positive or not finite
    pub fn new(
        face_center: Point3<Length>,
        normal: Vector3<f64>,
        thickness: Length,
        diameter: Length,
    ) -> OptResult<Self> {
        if face_center.iter().any(|c| !c.is_finite()) {
            return Err(OptrayError::Other(
                "face center entries must be finite".into(),
            ));
        }
        if normal.iter().any(|n| !n.is_finite()) {
            return Err(OptrayError::Other(
                "normal vector entries must be finite".into(),
            ));
        }
        if relative_eq!(normal.norm(), 0.0) {
            return Err(OptrayError::Other("length of normal must be >0".into()));
        }
        if !thickness.is_finite() || thickness.is_sign_negative() || thickness.is_zero() {
            return Err(OptrayError::Other("thickness must be >0 and finite".into()));
        }
        if !diameter.is_finite() || diameter.is_sign_negative() || diameter.is_zero() {
            return Err(OptrayError::Other("diameter must be >0 and finite".into()));
        }
        Ok(Self {
            face_center,
            normal: normal.normalize(),
            thickness,
            diameter,
        })
    }
    /// Returns the face center position of this [`Cylinder`].
    #[must_use]
    pub fn face_center(&self) -> Point3<Length> {
        self.face_center
    }
    /// Returns the unit axis/face normal vector of this [`Cylinder`].
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }
    /// Returns the thickness of this [`Cylinder`].
    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }
    /// Returns the diameter of this [`Cylinder`].
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }
    /// A candidate point on the infinite cylinder lies on the finite shell iff it falls inside
    /// the sphere circumscribing the shell. The edge circles themselves are excluded.
    fn in_bounds(&self, point: &Point3<f64>) -> bool {
        let center = self.face_center.map(|c| c.value) - 0.5 * self.thickness.value * self.normal;
        let half_thickness = 0.5 * self.thickness.value;
        let radius = 0.5 * self.diameter.value;
        let bound_radius = radius.mul_add(radius, half_thickness * half_thickness).sqrt();
        (point - center).norm() < bound_radius
    }
}

impl Surface for Cylinder {
    fn intersect(&self, ray: &Ray) -> OptResult<Option<Intersection>> {
        let pos = ray.position().map(|p| p.value);
        let dir = ray.direction();
        let dirn = dir.dot(&self.normal);
        // ray collinear with the cylinder axis: the side wall is never met
        if dirn.abs() == 1.0 {
            return Ok(None);
        }
        let pc = self.face_center.map(|c| c.value) - pos;
        let pc_n = pc.dot(&self.normal);
        let pc_dir = pc.dot(&dir);
        let radius = 0.5 * self.diameter.value;
        // the cylinder axis is face_center + x * normal. A point pos + lam * dir lies on the
        // infinite cylinder iff its distance to the axis equals the radius:
        // (1 - dirn^2) * lam^2 - 2 * (pc_dir - dirn * pc_n) * lam
        //   + (|pc|^2 - radius^2 - pc_n^2) = 0
        let roots = find_roots_quadratic(
            dirn.mul_add(-dirn, 1.0),
            -2.0 * dirn.mul_add(-pc_n, pc_dir),
            pc.norm_squared() - radius.mul_add(radius, pc_n * pc_n),
        );
        let (lam1, lam2) = match roots {
            // no intersection with the infinite cylinder, or the ray is tangent to it.
            // A near-axis ray whose quadratic degenerates to a linear equation ends up here
            // as well and is treated as parallel.
            Roots::No(_) | Roots::One(_) => return Ok(None),
            Roots::Two(t) => (f64::min(t[0], t[1]), f64::max(t[0], t[1])),
            _ => unreachable!(),
        };
        // cylinder is completely behind the ray
        if lam1 < 0.0 && lam2 < 0.0 {
            return Ok(None);
        }
        if lam1 < 0.0 && lam2 > 0.0 {
            // single candidate in front. It is on the infinite cylinder; check the finite extent.
            let point = pos + lam2 * dir;
            if self.in_bounds(&point) {
                return Ok(Some(Intersection::from_meters(lam2, &point)));
            }
        }
        if lam1 > 0.0 && lam2 > 0.0 {
            // two candidates in front. Take the closest one within the finite extent.
            let point = pos + lam1 * dir;
            if self.in_bounds(&point) {
                return Ok(Some(Intersection::from_meters(lam1, &point)));
            }
            let point = pos + lam2 * dir;
            if self.in_bounds(&point) {
                return Ok(Some(Intersection::from_meters(lam2, &point)));
            }
        }
        Ok(None)
    }
    fn name(&self) -> String {
        "cylinder".into()
    }
}
