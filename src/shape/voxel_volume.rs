use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real, Vector};
use crate::shape::{FaceMask, Palette, VoxelFace};
use crate::ConfigurationError;
use alloc::vec::Vec;

/// The material index of empty voxels.
pub const EMPTY_MATERIAL: u8 = 0;

/// An occupied voxel, as yielded by [`VoxelVolume::occupied`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OccupiedVoxel {
    /// The flat index of the voxel in the volume data.
    pub index: usize,
    /// The integer coordinates of the voxel.
    pub key: [usize; 3],
    /// The non-zero material index of the voxel.
    pub material: u8,
}

/// A dense grid of voxels, each either empty or filled with a palette material.
///
/// The voxel with integer coordinates `(x, y, z)` is stored at the flat index
/// `x + y * nx + z * nx * ny`. It is a cube of side [`VoxelVolume::voxel_size`] centered at
/// `origin + voxel_size * (x, y, z)`. Any coordinate outside of `[0, nx) × [0, ny) × [0, nz)`
/// is considered empty: the volume has no implicit walls.
///
/// A volume is immutable once built. Derived artifacts (the mesh from
/// [`VoxelVolume::to_trimesh`], the [`UniformGrid`](crate::partitioning::UniformGrid)) are
/// rebuilt wholesale when a new volume is loaded.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::shape::{Palette, VoxelVolume};
///
/// let palette = Palette::from_rgba_bytes(&[[0, 0, 0, 0], [255, 0, 0, 255]]).unwrap();
/// let volume = VoxelVolume::new([2, 1, 1], vec![1, 0], palette).unwrap();
///
/// assert_eq!(volume.material([0, 0, 0]), 1);
/// assert_eq!(volume.material([1, 0, 0]), 0);
/// assert_eq!(volume.num_occupied(), 1);
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "RawVoxelVolume"))]
pub struct VoxelVolume {
    dims: [usize; 3],
    data: Vec<u8>,
    palette: Palette,
    voxel_size: Real,
    origin: Point<Real>,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawVoxelVolume {
    dims: [usize; 3],
    data: Vec<u8>,
    palette: Palette,
    voxel_size: Real,
    origin: Point<Real>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawVoxelVolume> for VoxelVolume {
    type Error = ConfigurationError;

    fn try_from(raw: RawVoxelVolume) -> Result<Self, Self::Error> {
        Ok(VoxelVolume::new(raw.dims, raw.data, raw.palette)?
            .with_voxel_size(raw.voxel_size)?
            .with_origin(raw.origin))
    }
}

impl Default for VoxelVolume {
    fn default() -> Self {
        Self::empty()
    }
}

impl VoxelVolume {
    /// Builds a volume from its dimensions, its flat material array, and its palette.
    ///
    /// Fails if `data.len()` differs from `dims[0] * dims[1] * dims[2]`. Zero dimensions
    /// are accepted and result in a volume without any voxel.
    pub fn new(
        dims: [usize; 3],
        data: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, ConfigurationError> {
        let expected = dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .ok_or(ConfigurationError::DimensionsOverflow(dims))?;

        if data.len() != expected {
            return Err(ConfigurationError::DataLengthMismatch {
                dims,
                expected,
                found: data.len(),
            });
        }

        let undefined = data
            .iter()
            .filter(|m| **m != EMPTY_MATERIAL && !palette.is_defined(**m))
            .count();
        if undefined > 0 {
            log::warn!(
                "{} voxels use palette entries that were not supplied; they will be shaded black.",
                undefined
            );
        }

        Ok(Self {
            dims,
            data,
            palette,
            voxel_size: 1.0,
            origin: Point::origin(),
        })
    }

    /// Builds a volume from the raw output of a voxel-container decoder.
    pub fn from_decoded(
        dims: [usize; 3],
        data: Vec<u8>,
        palette: &[[u8; 4]],
    ) -> Result<Self, ConfigurationError> {
        Self::new(dims, data, Palette::from_rgba_bytes(palette)?)
    }

    /// A volume with zero dimensions.
    pub fn empty() -> Self {
        Self {
            dims: [0; 3],
            data: Vec::new(),
            palette: Palette::default(),
            voxel_size: 1.0,
            origin: Point::origin(),
        }
    }

    /// Sets the side length of each voxel.
    pub fn with_voxel_size(mut self, voxel_size: Real) -> Result<Self, ConfigurationError> {
        if !(voxel_size > 0.0 && voxel_size.is_finite()) {
            return Err(ConfigurationError::NonPositiveVoxelSize(voxel_size));
        }

        self.voxel_size = voxel_size;
        Ok(self)
    }

    /// Sets the position of the center of the voxel `(0, 0, 0)`.
    #[must_use]
    pub fn with_origin(mut self, origin: Point<Real>) -> Self {
        self.origin = origin;
        self
    }

    /// Moves the origin of this volume so the bounding box of its occupied voxel centers
    /// is centered at `(0, 0, 0)`.
    ///
    /// The result only depends on the occupied voxels, so calling this on an already
    /// centered volume leaves it unchanged. A volume without occupied voxels is returned
    /// as-is.
    #[must_use]
    pub fn centered(mut self) -> Self {
        if let Some(aabb) = self.occupied_centers_aabb() {
            self.origin -= aabb.center().coords;
        }

        self
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The total number of voxels, empty or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Does this volume have no voxel at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat material array.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The palette of this volume.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The side length of each voxel.
    #[inline]
    pub fn voxel_size(&self) -> Real {
        self.voxel_size
    }

    /// The center of the voxel `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.origin
    }

    /// The flat index of the voxel `key`, or `None` if `key` is out of bounds.
    #[inline]
    pub fn linear_index(&self, key: [usize; 3]) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        let [x, y, z] = key;

        if x < nx && y < ny && z < nz {
            Some(x + y * nx + z * nx * ny)
        } else {
            None
        }
    }

    /// The integer coordinates of the voxel with the flat index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than [`VoxelVolume::len`].
    #[inline]
    pub fn key(&self, index: usize) -> [usize; 3] {
        assert!(
            index < self.data.len(),
            "voxel index {} out of bounds for a volume of {} voxels.",
            index,
            self.data.len()
        );
        let [nx, ny, _] = self.dims;
        [index % nx, (index / nx) % ny, index / (nx * ny)]
    }

    /// The material of the voxel `key`, or [`EMPTY_MATERIAL`] if `key` is out of bounds.
    #[inline]
    pub fn material(&self, key: [usize; 3]) -> u8 {
        self.linear_index(key)
            .map(|i| self.data[i])
            .unwrap_or(EMPTY_MATERIAL)
    }

    /// Is the voxel `key` occupied? Out-of-bounds voxels are never occupied.
    #[inline]
    pub fn is_occupied(&self, key: [usize; 3]) -> bool {
        self.material(key) != EMPTY_MATERIAL
    }

    /// The flat-shading color of the voxel `key`, or `None` if it is empty.
    pub fn color(&self, key: [usize; 3]) -> Option<Color> {
        let material = self.material(key);
        (material != EMPTY_MATERIAL).then(|| self.palette.rgb(material))
    }

    /// The center of the voxel `key`.
    ///
    /// This is defined for any coordinates, including out-of-bounds ones.
    #[inline]
    pub fn voxel_center(&self, key: [usize; 3]) -> Point<Real> {
        self.origin + Vector::new(key[0] as Real, key[1] as Real, key[2] as Real) * self.voxel_size
    }

    /// The half side length of each voxel.
    #[inline]
    pub fn voxel_half_extent(&self) -> Real {
        self.voxel_size * 0.5
    }

    /// The exact footprint of the voxel `key`.
    pub fn voxel_aabb(&self, key: [usize; 3]) -> Aabb {
        Aabb::from_half_extents(
            self.voxel_center(key),
            Vector::repeat(self.voxel_half_extent()),
        )
    }

    /// The faces of the voxel `key` that are not covered by an occupied neighbor.
    ///
    /// A face on the boundary of the volume is always free. The result is empty if the
    /// voxel itself is empty.
    pub fn free_faces(&self, key: [usize; 3]) -> FaceMask {
        if !self.is_occupied(key) {
            return FaceMask::empty();
        }

        let mut mask = FaceMask::empty();
        for face in VoxelFace::ALL {
            let covered = face
                .neighbor(key, self.dims)
                .is_some_and(|neighbor| self.is_occupied(neighbor));
            if !covered {
                mask |= face.mask();
            }
        }

        mask
    }

    /// Iterates through the occupied voxels in canonical order: `x` outermost, then `y`,
    /// then `z` innermost.
    pub fn occupied(&self) -> impl Iterator<Item = OccupiedVoxel> + '_ {
        (0..self.dims[0]).flat_map(move |x| self.occupied_in_slab(x))
    }

    /// Iterates through the occupied voxels with the `x` coordinate `x`, `y` outermost.
    pub fn occupied_in_slab(&self, x: usize) -> impl Iterator<Item = OccupiedVoxel> + '_ {
        let [nx, ny, nz] = self.dims;
        let slab = if x < nx { ny } else { 0 };

        (0..slab).flat_map(move |y| {
            (0..nz).filter_map(move |z| {
                let index = x + y * nx + z * nx * ny;
                let material = self.data[index];
                (material != EMPTY_MATERIAL).then_some(OccupiedVoxel {
                    index,
                    key: [x, y, z],
                    material,
                })
            })
        })
    }

    /// The number of occupied voxels.
    pub fn num_occupied(&self) -> usize {
        self.data.iter().filter(|m| **m != EMPTY_MATERIAL).count()
    }

    /// The bounding box of the centers of all occupied voxels, or `None` if no voxel is
    /// occupied.
    pub fn occupied_centers_aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.occupied().map(|vox| self.voxel_center(vox.key)))
    }

    /// The bounding box of the footprints of all occupied voxels, or `None` if no voxel is
    /// occupied.
    pub fn occupied_aabb(&self) -> Option<Aabb> {
        self.occupied_centers_aabb()
            .map(|aabb| aabb.loosened(self.voxel_half_extent()))
    }
}
