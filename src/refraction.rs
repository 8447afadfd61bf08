#![warn(missing_docs)]
//! Module for computing reflection and refraction directions at an optical interface
//!
//! Given the incoming propagation direction, the local surface normal at the intersection
//! point and the refractive indices on both sides of the interface, [`interaction_directions`]
//! returns the reflected direction and, unless the beam is totally reflected, the refracted
//! direction according to Snell's law.
use approx::relative_eq;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{OptResult, OptrayError};

/// Reflected and refracted propagation directions at an interface between two media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    /// normalized direction of the reflected beam
    pub reflected: Vector3<f64>,
    /// normalized direction of the refracted beam. `None` if the beam is totally reflected.
    pub refracted: Option<Vector3<f64>>,
}

/// Returns the refraction angle (in radians) at an `n1`/`n2` interface for the incoming
/// angle `theta`.
///
/// # Errors
///
/// This function will return [`OptrayError::TotalInternalReflection`] if Snell's law has no
/// real solution, i.e. if `n1 * sin(theta) / n2` falls outside `[-1, 1]`.
pub fn refraction_angle(theta: f64, n1: f64, n2: f64) -> OptResult<f64> {
    let sine = n1 * theta.sin() / n2;
    if sine.abs() > 1.0 {
        return Err(OptrayError::TotalInternalReflection);
    }
    Ok(sine.asin())
}

/// Computes the reflected and refracted directions produced by an incoming beam at an
/// `n1`/`n2` interface.
///
/// `incoming` is the propagation direction of the incoming beam and `normal` the local surface
/// normal at the intersection point; both are normalized on entry. On total internal
/// reflection the returned [`Directions`] carry no refracted direction.
///
/// At exactly normal incidence the refracted beam keeps the incoming direction while the
/// reflected direction is reported as the surface normal itself, whatever its orientation
/// relative to the incoming beam.
///
/// # Errors
///
/// This function will return an error if
/// - `n1` or `n2` is not positive or not finite
/// - `incoming` or `normal` is zero in length or has non-finite entries
pub fn interaction_directions(
    incoming: Vector3<f64>,
    normal: Vector3<f64>,
    n1: f64,
    n2: f64,
) -> OptResult<Directions> {
    if n1 <= 0.0 || !n1.is_finite() || n2 <= 0.0 || !n2.is_finite() {
        return Err(OptrayError::Other(
            "refractive indices must be >0 and finite".into(),
        ));
    }
    if incoming.iter().chain(normal.iter()).any(|c| !c.is_finite()) {
        return Err(OptrayError::Other(
            "direction and normal entries must be finite".into(),
        ));
    }
    if relative_eq!(incoming.norm(), 0.0) || relative_eq!(normal.norm(), 0.0) {
        return Err(OptrayError::Other(
            "length of direction and normal must be >0".into(),
        ));
    }
    let inc = incoming.normalize();
    let nor = normal.normalize();
    // normal incidence
    if inc.dot(&nor).abs() == 1.0 {
        return Ok(Directions {
            reflected: nor,
            refracted: Some(inc),
        });
    }
    let reflected = (inc - 2.0 * inc.dot(&nor) * nor).normalize();
    let theta1 = (-nor.dot(&inc)).acos();
    let theta2 = match refraction_angle(theta1, n1, n2) {
        Ok(theta2) => theta2,
        Err(OptrayError::TotalInternalReflection) => {
            return Ok(Directions {
                reflected,
                refracted: None,
            });
        }
        Err(e) => return Err(e),
    };
    let alpha = n1 / n2;
    let beta = n1 * theta1.cos() / n2 - theta2.cos();
    let refracted = (alpha * inc + beta * nor).normalize();
    Ok(Directions {
        reflected,
        refracted: Some(refracted),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn refraction_angle_snell() {
        // n1 * sin(theta1) == n2 * sin(theta2)
        for theta in [0.0, 0.1, FRAC_PI_4, 1.0, -0.5] {
            let theta2 = refraction_angle(theta, 1.0, 1.5).unwrap();
            assert_abs_diff_eq!(1.5 * theta2.sin(), 1.0 * theta.sin(), epsilon = 1e-12);
        }
        let theta2 = refraction_angle(0.2, 1.5, 1.0).unwrap();
        assert_abs_diff_eq!(1.0 * theta2.sin(), 1.5 * 0.2_f64.sin(), epsilon = 1e-12);
    }
    #[test]
    fn refraction_angle_total_reflection() {
        // sin(1.0) * 1.5 > 1
        assert_matches!(
            refraction_angle(1.0, 1.5, 1.0),
            Err(OptrayError::TotalInternalReflection)
        );
    }
    #[test]
    fn refraction_angle_boundary() {
        // a Snell argument of exactly 1 is still inside the domain: the refracted beam grazes
        // the interface
        let theta2 = refraction_angle(std::f64::consts::FRAC_PI_2, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(theta2, std::f64::consts::FRAC_PI_2);
    }
    #[test]
    fn normal_incidence() {
        let directions =
            interaction_directions(Vector3::z(), Vector3::new(0.0, 0.0, -1.0), 1.0, 1.5).unwrap();
        assert_eq!(directions.reflected, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(directions.refracted, Some(Vector3::z()));
    }
    #[test]
    fn law_of_reflection() {
        let inc = Vector3::new(1.0, 0.0, 1.0).normalize();
        let nor = Vector3::new(0.0, 0.0, -1.0);
        let directions = interaction_directions(inc, nor, 1.0, 1.5).unwrap();
        assert_abs_diff_eq!(directions.reflected.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            directions.reflected.dot(&nor),
            -inc.dot(&nor),
            epsilon = 1e-12
        );
        // incoming, reflected and normal are coplanar: no sideways component appears
        assert_abs_diff_eq!(directions.reflected.y, 0.0);
        assert_abs_diff_eq!(directions.reflected.x, inc.x, epsilon = 1e-12);
        assert_abs_diff_eq!(directions.reflected.z, -inc.z, epsilon = 1e-12);
    }
    #[test]
    fn equal_indices_pass_through() {
        let inc = Vector3::new(0.3, -0.2, 1.0).normalize();
        let nor = Vector3::new(0.0, 0.0, -1.0);
        let directions = interaction_directions(inc, nor, 1.5, 1.5).unwrap();
        let refracted = directions.refracted.unwrap();
        assert_abs_diff_eq!(refracted.x, inc.x, epsilon = 1e-12);
        assert_abs_diff_eq!(refracted.y, inc.y, epsilon = 1e-12);
        assert_abs_diff_eq!(refracted.z, inc.z, epsilon = 1e-12);
    }
    #[test]
    fn snell_refraction() {
        // 30 deg incidence from vacuum into n = 1.5
        let theta1 = 30.0_f64.to_radians();
        let inc = Vector3::new(theta1.sin(), 0.0, theta1.cos());
        let nor = Vector3::new(0.0, 0.0, -1.0);
        let directions = interaction_directions(inc, nor, 1.0, 1.5).unwrap();
        let refracted = directions.refracted.unwrap();
        assert_abs_diff_eq!(refracted.norm(), 1.0, epsilon = 1e-12);
        let theta2 = f64::asin(0.5 / 1.5);
        assert_abs_diff_eq!(refracted.z, theta2.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(refracted.x, theta2.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(refracted.y, 0.0);
    }
    #[test]
    fn total_internal_reflection() {
        // 60 deg incidence from n = 1.5 into vacuum is beyond the critical angle
        let inc = Vector3::new(60.0_f64.to_radians().sin(), 0.0, 0.5);
        let nor = Vector3::new(0.0, 0.0, -1.0);
        let directions = interaction_directions(inc, nor, 1.5, 1.0).unwrap();
        assert_eq!(directions.refracted, None);
        assert_abs_diff_eq!(directions.reflected.x, inc.x, epsilon = 1e-12);
        assert_abs_diff_eq!(directions.reflected.y, 0.0);
        assert_abs_diff_eq!(directions.reflected.z, -0.5, epsilon = 1e-12);
    }
    #[test]
    fn invalid_inputs() {
        let nor = Vector3::new(0.0, 0.0, -1.0);
        assert!(interaction_directions(Vector3::z(), nor, 0.0, 1.5).is_err());
        assert!(interaction_directions(Vector3::z(), nor, 1.0, -1.5).is_err());
        assert!(interaction_directions(Vector3::z(), nor, f64::NAN, 1.5).is_err());
        assert!(interaction_directions(Vector3::zeros(), nor, 1.0, 1.5).is_err());
        assert!(interaction_directions(Vector3::z(), Vector3::zeros(), 1.0, 1.5).is_err());
        assert!(
            interaction_directions(Vector3::new(f64::NAN, 0.0, 1.0), nor, 1.0, 1.5).is_err()
        );
    }
}
