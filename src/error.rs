#![warn(missing_docs)]
//! Optray specific error structures
use std::{error::Error, fmt::Display};

/// Optray crate specific Result type
pub type OptResult<T> = std::result::Result<T, OptrayError>;

/// Errors that can be returned by various optray functions.
///
/// Geometric degeneracies (a ray parallel to a plane, a tangent or missing
/// ray/sphere configuration) are *not* errors. They are frequent, expected
/// outcomes of ray tracing and are reported as an ordinary "no intersection"
/// result (`Ok(None)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptrayError {
    /// Snell's law has no real solution for the given incidence angle and
    /// index pair
    TotalInternalReflection,
    /// a surface description whose aperture diameter is inconsistent with its
    /// curvature
    InvalidAperture(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for OptrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TotalInternalReflection => {
                write!(f, "TotalInternalReflection")
            }
            Self::InvalidAperture(m) => {
                write!(f, "InvalidAperture:{m}")
            }
            Self::Other(m) => write!(f, "Optray Error:Other:{m}"),
        }
    }
}
impl Error for OptrayError {}

impl std::convert::From<String> for OptrayError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = OptrayError::from("test".to_string());
        assert_eq!(error, OptrayError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", OptrayError::TotalInternalReflection),
            "TotalInternalReflection"
        );
        assert_eq!(
            format!("{}", OptrayError::InvalidAperture("test".to_string())),
            "InvalidAperture:test"
        );
        assert_eq!(
            format!("{}", OptrayError::Other("test".to_string())),
            "Optray Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", OptrayError::InvalidAperture("test".to_string())),
            "InvalidAperture(\"test\")"
        );
    }
}
