//! This is the documentation for the **optray** crate: geometric ray–surface intersection and
//! refraction primitives for optical ray tracing.
//!
//! The crate answers two questions for a beam-tracing orchestrator:
//!
//! 1. Does a given [`Ray`] strike the physical extent of a single bounded optical surface — a
//!    flat [`Disk`](surface::Disk), a [`SphericalCap`](surface::SphericalCap) or the side wall
//!    of a finite [`Cylinder`](surface::Cylinder) — and if so, at which distance and point?
//! 2. Which reflected and refracted directions result from the interaction at an interface
//!    between two media ([`interaction_directions`])?
//!
//! All operations are pure, synchronous functions over value types. There is no shared state,
//! so they can be called from any number of threads without coordination. Geometric
//! degeneracies (parallel rays, tangent configurations, hits outside an aperture, hits behind
//! the ray origin) are ordinary "no intersection" results; only an inconsistent surface
//! description or total internal reflection is reported through
//! [`OptrayError`](error::OptrayError).
//!
//! ```rust
//! use nalgebra::Vector3;
//! use optray::surface::{Disk, Surface};
//! use optray::{interaction_directions, millimeter, Ray};
//!
//! let disk = Disk::new(
//!     millimeter!(0.0, 0.0, 10.0),
//!     Vector3::new(0.0, 0.0, -1.0),
//!     millimeter!(25.4),
//! )
//! .unwrap();
//! let ray = Ray::origin_along_z().unwrap();
//! let hit = disk.intersect(&ray).unwrap().expect("ray must hit the disk");
//! assert_eq!(hit.distance, millimeter!(10.0));
//!
//! // continue tracing behind the interface (vacuum -> glass)
//! let directions =
//!     interaction_directions(ray.direction(), Vector3::new(0.0, 0.0, -1.0), 1.0, 1.5).unwrap();
//! assert!(directions.refracted.is_some());
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod ray;
pub mod refraction;
pub mod surface;
pub mod utils;

pub use ray::Ray;
pub use refraction::{interaction_directions, refraction_angle, Directions};
pub use surface::{Intersection, Surface};
