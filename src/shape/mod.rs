//! Voxel volumes and the meshes extracted from them.

pub use self::palette::{Palette, Rgba};
pub use self::voxel_face::{FaceMask, VoxelFace, FACE_TRIANGLES};
pub use self::voxel_mesh::{ColoredTriangle, VoxelMesh};
pub use self::voxel_volume::{OccupiedVoxel, VoxelVolume, EMPTY_MATERIAL};

mod palette;
mod voxel_face;
mod voxel_mesh;
mod voxel_volume;
