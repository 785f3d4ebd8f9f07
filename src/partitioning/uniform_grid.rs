use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::shape::VoxelVolume;
use crate::ConfigurationError;
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use na::ComplexField;

/// What to do when two voxels quantize to the same grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CollisionPolicy {
    /// Fail the build with [`ConfigurationError::CellCollision`].
    #[default]
    Reject,
    /// Keep the voxel inserted first, in canonical order.
    KeepFirst,
    /// Keep the voxel inserted last, in canonical order.
    KeepLast,
    /// Keep the voxel whose center is the closest to the center of the cell. Ties are won by
    /// the voxel inserted first.
    KeepNearest,
}

/// Parameters of a [`UniformGrid`] build.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::partitioning::{CollisionPolicy, GridConfig};
///
/// let config = GridConfig::new(0.5)
///     .with_padding(0.25)
///     .with_collision_policy(CollisionPolicy::KeepNearest);
/// assert!(config.validate().is_ok());
/// assert!(GridConfig::new(0.0).validate().is_err());
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// The side length of each cubic cell. Must be positive.
    pub cell_size: Real,
    /// The margin added around the bounding box of the voxel centers, as a fraction of
    /// `cell_size`. Must be non-negative.
    pub padding: Real,
    /// How voxels mapping to the same cell are resolved.
    pub collision_policy: CollisionPolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            padding: 0.1,
            collision_policy: CollisionPolicy::Reject,
        }
    }
}

impl GridConfig {
    /// The default configuration with the given cell size.
    pub fn new(cell_size: Real) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Sets the padding, as a fraction of the cell size.
    #[must_use]
    pub fn with_padding(mut self, padding: Real) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the collision policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Checks that the cell size is positive and the padding non-negative, both finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.cell_size > 0.0 && self.cell_size.is_finite()) {
            return Err(ConfigurationError::NonPositiveCellSize(self.cell_size));
        }

        if !(self.padding >= 0.0 && self.padding.is_finite()) {
            return Err(ConfigurationError::InvalidPadding(self.padding));
        }

        Ok(())
    }
}

/// A uniform grid over the occupied voxels of a [`VoxelVolume`].
///
/// Each cubic cell stores at most one voxel index. Point queries first gather the
/// cells that may hold a voxel containing the point, then run an exact box test against
/// the true footprint of each stored voxel. The box test is half-open on every axis:
/// a voxel centered at `c` with half-extent `h` contains `p` iff `c - h <= p < c + h`.
///
/// Unlike a lookup restricted to the cell containing the point, with an inclusion test
/// against `cell_size / 2`, the candidates include every cell overlapping the voxel-sized
/// box around the point, and the test uses the voxel half-extent `voxel_size / 2`. Both
/// agree when `cell_size == voxel_size` and the point lies within the padded grid box, but
/// this grid also finds points near the outer faces of the solid that fall outside of the
/// padded grid box, and stays exact when the cell size differs from the voxel size.
///
/// The grid is immutable once built and can be queried concurrently. It keeps the
/// placement of the volume (origin, voxel size, dimensions) but not its data, so it stays
/// valid for as long as the volume it was built from is not replaced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "RawUniformGrid"))]
pub struct UniformGrid {
    cell_size: Real,
    mins: Point<Real>,
    maxs: Point<Real>,
    dims: [usize; 3],
    cells: Vec<u32>,
    num_occupied_cells: usize,
    volume_dims: [usize; 3],
    volume_origin: Point<Real>,
    voxel_size: Real,
}

#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawUniformGrid {
    cell_size: Real,
    mins: Point<Real>,
    maxs: Point<Real>,
    dims: [usize; 3],
    cells: Vec<u32>,
    volume_dims: [usize; 3],
    volume_origin: Point<Real>,
    voxel_size: Real,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawUniformGrid> for UniformGrid {
    type Error = ConfigurationError;

    fn try_from(raw: RawUniformGrid) -> Result<Self, Self::Error> {
        GridConfig::new(raw.cell_size).validate()?;

        if !(raw.voxel_size > 0.0 && raw.voxel_size.is_finite()) {
            return Err(ConfigurationError::NonPositiveVoxelSize(raw.voxel_size));
        }

        let volume_len = raw
            .volume_dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .ok_or(ConfigurationError::DimensionsOverflow(raw.volume_dims))?;
        if volume_len >= UniformGrid::EMPTY_CELL as usize {
            return Err(ConfigurationError::VolumeTooLarge(volume_len));
        }

        let expected = raw
            .dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .ok_or(ConfigurationError::GridTooLarge(raw.dims))?;
        if raw.cells.len() != expected {
            return Err(ConfigurationError::CellCountMismatch {
                dims: raw.dims,
                expected,
                found: raw.cells.len(),
            });
        }

        let mut num_occupied_cells = 0;
        for stored in raw.cells.iter().filter(|c| **c != UniformGrid::EMPTY_CELL) {
            if *stored as usize >= volume_len {
                return Err(ConfigurationError::DanglingVoxelIndex(*stored as usize));
            }
            num_occupied_cells += 1;
        }

        Ok(UniformGrid {
            cell_size: raw.cell_size,
            mins: raw.mins,
            maxs: raw.maxs,
            dims: raw.dims,
            cells: raw.cells,
            num_occupied_cells,
            volume_dims: raw.volume_dims,
            volume_origin: raw.volume_origin,
            voxel_size: raw.voxel_size,
        })
    }
}

impl UniformGrid {
    /// The value of cells without any voxel.
    pub const EMPTY_CELL: u32 = u32::MAX;

    /// Builds the grid of the occupied voxels of `volume`.
    ///
    /// The grid covers the bounding box of the occupied voxel centers, grown by
    /// `config.padding * config.cell_size` on every side, and rounded up to a whole number
    /// of cells. A volume without occupied voxels results in a grid without any cell, on
    /// which every query fails.
    ///
    /// The configuration is validated before anything is allocated.
    pub fn build(volume: &VoxelVolume, config: &GridConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        if volume.len() >= Self::EMPTY_CELL as usize {
            return Err(ConfigurationError::VolumeTooLarge(volume.len()));
        }

        let mut result = UniformGrid {
            cell_size: config.cell_size,
            mins: Point::origin(),
            maxs: Point::origin(),
            dims: [0; 3],
            cells: Vec::new(),
            num_occupied_cells: 0,
            volume_dims: volume.dims(),
            volume_origin: volume.origin(),
            voxel_size: volume.voxel_size(),
        };

        let mut key_mins = [usize::MAX; DIM];
        let mut key_maxs = [0; DIM];
        for vox in volume.occupied() {
            for i in 0..DIM {
                key_mins[i] = key_mins[i].min(vox.key[i]);
                key_maxs[i] = key_maxs[i].max(vox.key[i]);
            }
        }

        if key_mins[0] == usize::MAX {
            log::debug!("Built an empty uniform grid: the volume has no occupied voxel.");
            return Ok(result);
        }

        // Cell coordinates are measured on the voxel lattice, in cells, from the grid
        // minimum. With `cell_size == voxel_size` the ratio is exactly one and every voxel
        // lands at an exact integer offset, regardless of the volume origin.
        let pitch = volume.voxel_size() / config.cell_size;
        let lattice_coord = |i: usize, k: usize| (k - key_mins[i]) as Real * pitch + config.padding;

        let mut dims = [0; DIM];
        for i in 0..DIM {
            // One more cell than fits entirely, so the last center never lands on `maxs`.
            let extent = (key_maxs[i] - key_mins[i]) as Real * pitch + config.padding * 2.0;
            // Saturates to `usize::MAX` for out-of-range counts.
            dims[i] = (extent.floor() + 1.0) as usize;
        }

        let num_cells = dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .filter(|n| *n <= isize::MAX as usize / (u32::BITS / 8) as usize)
            .ok_or(ConfigurationError::GridTooLarge(dims))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(num_cells)
            .map_err(|_| ConfigurationError::GridTooLarge(dims))?;
        cells.resize(num_cells, Self::EMPTY_CELL);

        let padding = Vector::repeat(config.padding * config.cell_size);
        result.mins = volume.voxel_center(key_mins) - padding;
        let grid_extents = Vector::new(dims[0] as Real, dims[1] as Real, dims[2] as Real);
        result.maxs = result.mins + grid_extents * config.cell_size;
        result.dims = dims;
        result.cells = cells;

        let mut num_collisions = 0;

        for vox in volume.occupied() {
            let center = volume.voxel_center(vox.key);
            let mut cell = [0; DIM];
            for i in 0..DIM {
                let k = lattice_coord(i, vox.key[i]).floor() as usize;
                cell[i] = k.min(dims[i] - 1);
            }
            let cell_id = result.cell_linear_index(cell);
            let stored = result.cells[cell_id];
            let voxel_id = vox.index as u32;

            if stored == Self::EMPTY_CELL {
                result.cells[cell_id] = voxel_id;
                result.num_occupied_cells += 1;
                continue;
            }

            num_collisions += 1;

            match config.collision_policy {
                CollisionPolicy::Reject => {
                    return Err(ConfigurationError::CellCollision {
                        cell,
                        first: stored as usize,
                        second: vox.index,
                    });
                }
                CollisionPolicy::KeepFirst => {}
                CollisionPolicy::KeepLast => result.cells[cell_id] = voxel_id,
                CollisionPolicy::KeepNearest => {
                    let cell_center = result.cell_center(cell);
                    let stored_center = result.voxel_center(stored as usize);
                    if na::distance_squared(&center, &cell_center)
                        < na::distance_squared(&stored_center, &cell_center)
                    {
                        result.cells[cell_id] = voxel_id;
                    }
                }
            }
        }

        if num_collisions > 0 {
            log::debug!(
                "Resolved {} cell collisions with the {:?} policy.",
                num_collisions,
                config.collision_policy
            );
        }

        log::debug!(
            "Built a {}x{}x{} uniform grid with {} occupied cells.",
            dims[0],
            dims[1],
            dims[2],
            result.num_occupied_cells
        );

        Ok(result)
    }

    /// The side length of each cell.
    #[inline]
    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// The number of cells holding a voxel.
    #[inline]
    pub fn num_occupied_cells(&self) -> usize {
        self.num_occupied_cells
    }

    /// Does this grid have no cell at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The region covered by the cells, or `None` if the grid has no cell.
    pub fn aabb(&self) -> Option<Aabb> {
        (!self.is_empty()).then(|| Aabb::new(self.mins, self.maxs))
    }

    /// The half side length of the indexed voxels.
    #[inline]
    pub fn voxel_half_extent(&self) -> Real {
        self.voxel_size * 0.5
    }

    /// The key of the cell containing `pt`, or `None` if `pt` is outside of the grid.
    ///
    /// Cells are half-open: the cell `k` covers `[mins + k * cell_size, mins + (k + 1) * cell_size)`
    /// along each axis.
    pub fn cell_key(&self, pt: &Point<Real>) -> Option<[usize; 3]> {
        let mut key = [0; DIM];

        for i in 0..DIM {
            let k = ((pt[i] - self.mins[i]) / self.cell_size).floor();

            // Also rejects NaN.
            if !(k >= 0.0 && k < self.dims[i] as Real) {
                return None;
            }

            key[i] = k as usize;
        }

        Some(key)
    }

    /// The voxel index stored in the cell `key`, or `None` if that cell is empty or
    /// outside of the grid.
    pub fn cell_voxel(&self, key: [usize; 3]) -> Option<usize> {
        if (0..DIM).any(|i| key[i] >= self.dims[i]) {
            return None;
        }

        let stored = self.cells[self.cell_linear_index(key)];
        (stored != Self::EMPTY_CELL).then_some(stored as usize)
    }

    /// The center of the cell `key`.
    pub fn cell_center(&self, key: [usize; 3]) -> Point<Real> {
        self.mins
            + Vector::new(
                key[0] as Real + 0.5,
                key[1] as Real + 0.5,
                key[2] as Real + 0.5,
            ) * self.cell_size
    }

    /// The center of the voxel with the flat index `voxel` in the indexed volume.
    ///
    /// # Panics
    ///
    /// Panics if `voxel` is out of the bounds of the indexed volume.
    pub fn voxel_center(&self, voxel: usize) -> Point<Real> {
        let [nx, ny, nz] = self.volume_dims;
        assert!(
            voxel < nx * ny * nz,
            "internal error: the grid references the voxel {} outside of a {:?} volume.",
            voxel,
            self.volume_dims
        );
        let key = [voxel % nx, (voxel / nx) % ny, voxel / (nx * ny)];
        self.volume_origin
            + Vector::new(key[0] as Real, key[1] as Real, key[2] as Real) * self.voxel_size
    }

    /// The exact footprint of the voxel with the flat index `voxel`.
    pub fn voxel_aabb(&self, voxel: usize) -> Aabb {
        Aabb::from_half_extents(
            self.voxel_center(voxel),
            Vector::repeat(self.voxel_half_extent()),
        )
    }

    /// Finds the indexed voxel containing `pt`, expressed in the local frame of the volume.
    ///
    /// Returns the flat index of that voxel, or `None` if no indexed voxel contains `pt`.
    pub fn locate_local_point(&self, pt: &Point<Real>) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        // A voxel containing `pt` has its center in `(pt - h, pt + h]`: only the cells
        // overlapping that range can store it. Voxels are inserted by their lattice
        // coordinates, which may round differently than `pt`, hence the extra cell on
        // each side.
        let h = self.voxel_half_extent();
        let mut range = [(0, 0); DIM];

        for i in 0..DIM {
            let lo = ((pt[i] - h - self.mins[i]) / self.cell_size).floor() - 1.0;
            let hi = ((pt[i] + h - self.mins[i]) / self.cell_size).floor() + 1.0;
            let last = (self.dims[i] - 1) as Real;

            if !(hi >= 0.0 && lo <= last) {
                return None;
            }

            range[i] = (lo.max(0.0) as usize, hi.min(last) as usize);
        }

        for z in range[2].0..=range[2].1 {
            for y in range[1].0..=range[1].1 {
                for x in range[0].0..=range[0].1 {
                    if let Some(voxel) = self.cell_voxel([x, y, z]) {
                        if self.voxel_aabb(voxel).contains_local_point_half_open(pt) {
                            return Some(voxel);
                        }
                    }
                }
            }
        }

        None
    }

    #[inline]
    fn cell_linear_index(&self, key: [usize; 3]) -> usize {
        key[0] + key[1] * self.dims[0] + key[2] * self.dims[0] * self.dims[1]
    }
}
