use crate::math::{Point, Real, Vector};
use crate::shape::{
    ColoredTriangle, OccupiedVoxel, VoxelFace, VoxelMesh, VoxelVolume, FACE_TRIANGLES,
};
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl VoxelVolume {
    /// Computes the boundary surface of this volume.
    ///
    /// Each free face of each occupied voxel results in two triangles. No effort is made to
    /// merge adjacent triangles on large flat areas.
    pub fn to_trimesh(&self) -> VoxelMesh {
        #[cfg(not(feature = "parallel"))]
        let triangles: Vec<_> = (0..self.dims()[0])
            .flat_map(|x| self.slab_triangles(x))
            .collect();

        // Slabs are collected in order, so the result matches the sequential path exactly.
        #[cfg(feature = "parallel")]
        let triangles: Vec<_> = (0..self.dims()[0])
            .into_par_iter()
            .map(|x| self.slab_triangles(x))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        log::debug!(
            "Extracted {} faces from a {:?} voxel volume.",
            triangles.len() / 2,
            self.dims()
        );

        VoxelMesh::from_triangles(triangles)
    }

    /// The number of voxel faces exposed to empty space, i.e., half the triangle count of
    /// [`VoxelVolume::to_trimesh`].
    pub fn num_free_faces(&self) -> usize {
        self.occupied()
            .map(|vox| self.free_faces(vox.key).bits().count_ones() as usize)
            .sum()
    }

    fn slab_triangles(&self, x: usize) -> Vec<ColoredTriangle> {
        let mut triangles = Vec::new();

        for vox in self.occupied_in_slab(x) {
            self.push_voxel_faces(&vox, &mut triangles);
        }

        triangles
    }

    fn push_voxel_faces(&self, vox: &OccupiedVoxel, out: &mut Vec<ColoredTriangle>) {
        let free = self.free_faces(vox.key);
        if free.is_empty() {
            return;
        }

        let center = self.voxel_center(vox.key);
        let color = self.palette().rgb(vox.material);

        for face in VoxelFace::ALL {
            if !free.contains(face.mask()) {
                continue;
            }

            let corners = face_corners(face, &center, self.voxel_size());
            for [i, j, k] in FACE_TRIANGLES {
                out.push(ColoredTriangle::new(
                    corners[i], corners[j], corners[k], color,
                ));
            }
        }
    }
}

fn face_corners(face: VoxelFace, center: &Point<Real>, voxel_size: Real) -> [Point<Real>; 4] {
    face.unit_corners()
        .map(|corner: Vector<Real>| center + corner * voxel_size)
}
