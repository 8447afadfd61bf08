//! Flat disk surface
//!
//! A finite, flat circular surface given by its center position, its normal vector and an
//! aperture diameter.
use approx::relative_eq;
use nalgebra::{Point3, Vector3};
use num::Zero;
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

use super::{Intersection, Surface};
use crate::{
    error::{OptResult, OptrayError},
    ray::Ray,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A finite, flat circular disk bounded by its aperture diameter.
pub struct Disk {
    center: Point3<Length>,
    normal: Vector3<f64>,
    diameter: Length,
}
impl Disk {
    /// Create a new [`Disk`] from its center position, normal vector and aperture diameter.
    ///
    /// The normal vector is normalized on entry.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    /// - the center position entries are not finite
    /// - the normal vector is zero in length or has non-finite entries
    /// - the diameter is not positive or not finite
    pub fn new(center: Point3<Length>, normal: Vector3<f64>, diameter: Length) -> OptResult<Self> {
        if center.iter().any(|c| !c.is_finite()) {
            return Err(OptrayError::Other("center entries must be finite".into()));
        }
        if normal.iter().any(|n| !n.is_finite()) {
            return Err(OptrayError::Other(
                "normal vector entries must be finite".into(),
            ));
        }
        if relative_eq!(normal.norm(), 0.0) {
            return Err(OptrayError::Other("length of normal must be >0".into()));
        }
        if !diameter.is_finite() || diameter.is_sign_negative() || diameter.is_zero() {
            return Err(OptrayError::Other("diameter must be >0 and finite".into()));
        }
        Ok(Self {
            center,
            normal: normal.normalize(),
            diameter,
        })
    }
    /// Returns the center position of this [`Disk`].
    #[must_use]
    pub fn center(&self) -> Point3<Length> {
        self.center
    }
    /// Returns the unit normal vector of this [`Disk`].
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }
    /// Returns the aperture diameter of this [`Disk`].
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }
}

impl Surface for Disk {
    fn intersect(&self, ray: &Ray) -> OptResult<Option<Intersection>> {
        let pos = ray.position().map(|p| p.value);
        let dir = ray.direction();
        let center = self.center.map(|c| c.value);
        // ray parallel to the plane
        if self.normal.dot(&dir) == 0.0 {
            return Ok(None);
        }
        let lam = self.normal.dot(&(center - pos)) / self.normal.dot(&dir);
        // surface behind or at the ray origin
        if lam <= 0.0 {
            return Ok(None);
        }
        let point = pos + lam * dir;
        // outside the aperture. The boundary circle itself does not count as a hit.
        if (point - center).norm() >= 0.5 * self.diameter.value {
            return Ok(None);
        }
        Ok(Some(Intersection::from_meters(lam, &point)))
    }
    fn name(&self) -> String {
        "disk".into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{meter, millimeter};
    use approx::assert_abs_diff_eq;

    #[test]
    fn new() {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        assert!(Disk::new(meter!(f64::NAN, 0.0, 0.0), normal, meter!(1.0)).is_err());
        assert!(Disk::new(meter!(0.0, 0.0, 0.0), Vector3::zeros(), meter!(1.0)).is_err());
        assert!(Disk::new(
            meter!(0.0, 0.0, 0.0),
            Vector3::new(0.0, f64::NAN, 1.0),
            meter!(1.0)
        )
        .is_err());
        assert!(Disk::new(meter!(0.0, 0.0, 0.0), normal, meter!(0.0)).is_err());
        assert!(Disk::new(meter!(0.0, 0.0, 0.0), normal, meter!(-1.0)).is_err());
        assert!(Disk::new(meter!(0.0, 0.0, 0.0), normal, meter!(f64::INFINITY)).is_err());
        let disk = Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -2.0), meter!(1.0))
            .unwrap();
        assert_eq!(disk.normal(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(disk.diameter(), meter!(1.0));
    }
    #[test]
    fn intersect_on_axis() {
        let disk =
            Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0), meter!(10.0)).unwrap();
        let ray = Ray::new(meter!(0.0, 0.0, -10.0), Vector3::z()).unwrap();
        assert_eq!(
            disk.intersect(&ray).unwrap(),
            Some(Intersection {
                distance: meter!(10.0),
                point: meter!(0.0, 0.0, 0.0),
            })
        );
    }
    #[test]
    fn intersect_parallel() {
        let disk =
            Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0), meter!(10.0)).unwrap();
        let ray = Ray::new(meter!(0.0, 0.0, -10.0), Vector3::y()).unwrap();
        assert_eq!(disk.intersect(&ray).unwrap(), None);
    }
    #[test]
    fn intersect_behind() {
        let disk =
            Disk::new(meter!(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, -1.0), meter!(10.0))
                .unwrap();
        let ray = Ray::origin_along_z().unwrap();
        assert_eq!(disk.intersect(&ray).unwrap(), None);
    }
    #[test]
    fn intersect_at_origin() {
        // the ray origin itself lies on the plane: lam == 0 is not a hit
        let disk =
            Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0), meter!(10.0)).unwrap();
        let ray = Ray::origin_along_z().unwrap();
        assert_eq!(disk.intersect(&ray).unwrap(), None);
    }
    #[test]
    fn intersect_aperture() {
        let disk =
            Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0), meter!(10.0)).unwrap();
        // inside the aperture
        let ray = Ray::new(meter!(4.0, 0.0, -10.0), Vector3::z()).unwrap();
        assert_eq!(
            disk.intersect(&ray).unwrap(),
            Some(Intersection {
                distance: meter!(10.0),
                point: meter!(4.0, 0.0, 0.0),
            })
        );
        // exactly on the boundary circle
        let ray = Ray::new(meter!(5.0, 0.0, -10.0), Vector3::z()).unwrap();
        assert_eq!(disk.intersect(&ray).unwrap(), None);
        // outside
        let ray = Ray::new(meter!(6.0, 0.0, -10.0), Vector3::z()).unwrap();
        assert_eq!(disk.intersect(&ray).unwrap(), None);
    }
    #[test]
    fn intersect_oblique() {
        let disk = Disk::new(
            millimeter!(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, -1.0),
            millimeter!(40.0),
        )
        .unwrap();
        let ray = Ray::new(millimeter!(0.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 1.0)).unwrap();
        let intersection = disk.intersect(&ray).unwrap().unwrap();
        assert_abs_diff_eq!(
            intersection.distance.value,
            10.0e-3 * f64::sqrt(2.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(intersection.point.x.value, 0.0);
        assert_abs_diff_eq!(intersection.point.y.value, 11.0e-3, epsilon = 1e-12);
        assert_abs_diff_eq!(intersection.point.z.value, 10.0e-3, epsilon = 1e-12);
    }
    #[test]
    fn name() {
        let disk =
            Disk::new(meter!(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0), meter!(1.0)).unwrap();
        assert_eq!(disk.name(), "disk");
    }
}
