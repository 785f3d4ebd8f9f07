//! Triangle mesh generation from voxel volumes.
//!
//! [`VoxelVolume::to_trimesh`](crate::shape::VoxelVolume::to_trimesh) converts the
//! boundary of the occupied voxels into a [`VoxelMesh`](crate::shape::VoxelMesh):
//!
//! - Each occupied voxel is visited in canonical order (`x` outermost, `z` innermost).
//! - Each of its six faces, tested in the order `+y, -y, +z, -z, +x, -x`, is emitted if
//!   the neighbor across it is empty or outside of the volume.
//! - An emitted face becomes two triangles wound counter-clockwise when seen from outside,
//!   flat-shaded with the palette color of the voxel.
//!
//! Coplanar faces are never merged: the triangle count is twice the number of exposed
//! voxel faces. The output is a closed, consistently oriented surface with no internal
//! faces, and running the extraction twice on the same volume yields the exact same
//! triangle sequence.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "f32")] {
//! use voxsurf3d::shape::{Palette, VoxelVolume};
//!
//! // Two adjacent voxels: the two faces they share are culled.
//! let volume = VoxelVolume::new([2, 1, 1], vec![1, 1], Palette::default()).unwrap();
//! let mesh = volume.to_trimesh();
//! assert_eq!(mesh.len(), 20);
//! # }
//! ```

mod voxel_volume_to_trimesh;
