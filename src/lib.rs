/*!
voxsurf3d
=========

**voxsurf3d** turns a dense voxel volume into an explicit, watertight, flat-shaded
triangle surface, and classifies arbitrary points as inside or outside that volume
under a caller-supplied affine transform.

The crate is organized around four pieces:

- [`shape::VoxelVolume`]: the immutable dense occupancy/material grid produced by
  an external decoder.
- [`VoxelVolume::to_trimesh`](shape::VoxelVolume::to_trimesh): the face-culling
  mesher producing a [`shape::VoxelMesh`].
- [`partitioning::UniformGrid`]: a uniform-grid acceleration structure over the
  occupied voxel centers.
- [`query::classify_points`]: the transform-aware containment query built on top of
  the grid.

[`scene::VoxelScene`] bundles the static artifacts derived from one volume so the
model transform can change freely without rebuilding anything.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
mod error;
pub mod partitioning;
pub mod query;
pub mod scene;
pub mod shape;
pub mod transformation;

pub use error::ConfigurationError;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Matrix4, Point3, Similarity3, Translation3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The rigid transformation type.
    pub use Isometry3 as Isometry;

    /// The translation type.
    pub use Translation3 as Translation;

    /// The homogeneous matrix type of a model transform.
    pub use Matrix4 as Matrix;

    /// A flat-shading color, red, green and blue in `[0, 1]`.
    ///
    /// Colors stay single precision whatever the scalar type of the geometry.
    pub type Color = [f32; 3];
}
