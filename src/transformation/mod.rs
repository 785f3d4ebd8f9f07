//! Conversions of voxel volumes and meshes to other representations.

#[cfg(feature = "std")]
pub use self::stl::StlError;

#[cfg(feature = "std")]
pub mod stl;
pub mod to_trimesh;
