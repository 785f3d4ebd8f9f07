#[macro_use]
extern crate approx;

mod boundary_convention;
mod containment_round_trip;
mod scene_publish;
#[cfg(feature = "std")]
mod stl_export;
mod surface_extraction;
mod transform_symmetry;

use voxsurf3d::shape::{Palette, Rgba, VoxelVolume};

/// A volume of the given dimensions where each voxel is occupied with probability `fill`,
/// using materials `1..=3`.
pub fn random_volume(rng: &mut oorandom::Rand32, dims: [usize; 3], fill: f32) -> VoxelVolume {
    let len = dims[0] * dims[1] * dims[2];
    let data = (0..len)
        .map(|_| {
            if rng.rand_float() < fill {
                rng.rand_range(1..4) as u8
            } else {
                0
            }
        })
        .collect();
    VoxelVolume::new(dims, data, test_palette()).unwrap()
}

pub fn test_palette() -> Palette {
    Palette::new(&[
        Rgba::new(0, 0, 0, 0),
        Rgba::new(255, 0, 0, 255),
        Rgba::new(0, 255, 0, 255),
        Rgba::new(0, 0, 255, 255),
    ])
    .unwrap()
}
