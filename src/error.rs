use crate::math::Real;

/// Indicates an inconsistency in the inputs used to build a volume, a grid, or a transform.
///
/// These are raised eagerly by the build steps, before any allocation proportional to the
/// input takes place. Queries never return them: a point that is not contained is
/// reported as `None`/`false`, not as an error.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// The flat voxel array does not have `nx * ny * nz` entries.
    #[error("the voxel data has {found} entries but the dimensions {dims:?} require {expected}.")]
    DataLengthMismatch {
        /// The declared dimensions of the volume.
        dims: [usize; 3],
        /// The number of entries implied by `dims`.
        expected: usize,
        /// The number of entries actually supplied.
        found: usize,
    },
    /// The product of the volume dimensions does not fit in a `usize`.
    #[error("the dimensions {0:?} overflow the addressable voxel count.")]
    DimensionsOverflow([usize; 3]),
    /// More than 256 palette colors were supplied.
    #[error("a palette holds at most 256 colors, got {0}.")]
    PaletteTooLarge(usize),
    /// The voxel pitch is zero, negative, or not finite.
    #[error("the voxel size must be positive and finite, got {0}.")]
    NonPositiveVoxelSize(Real),
    /// The grid cell size is zero, negative, or not finite.
    #[error("the cell size must be positive and finite, got {0}.")]
    NonPositiveCellSize(Real),
    /// The grid padding fraction is negative or not finite.
    #[error("the grid padding must be non-negative and finite, got {0}.")]
    InvalidPadding(Real),
    /// The grid would need more cells than can be addressed.
    #[error("a grid with {0:?} cells exceeds the addressable range.")]
    GridTooLarge([usize; 3]),
    /// The volume has too many cells for its voxel indices to be stored in the grid.
    #[error("a volume with {0} cells cannot be indexed by the grid.")]
    VolumeTooLarge(usize),
    /// Two voxels quantize to the same grid cell under [`CollisionPolicy::Reject`](crate::partitioning::CollisionPolicy::Reject).
    #[error("the voxels {first} and {second} both map to the grid cell {cell:?}.")]
    CellCollision {
        /// The grid cell both voxels fall into.
        cell: [usize; 3],
        /// The voxel inserted first.
        first: usize,
        /// The voxel that collided with `first`.
        second: usize,
    },
    /// The cell array of a deserialized grid does not match its dimensions.
    #[error("the grid has {found} cells but the dimensions {dims:?} require {expected}.")]
    CellCountMismatch {
        /// The declared number of cells along each axis.
        dims: [usize; 3],
        /// The number of cells implied by `dims`.
        expected: usize,
        /// The number of cells actually supplied.
        found: usize,
    },
    /// A deserialized grid references a voxel outside of the volume it indexes.
    #[error("the grid references the voxel {0} outside of its volume.")]
    DanglingVoxelIndex(usize),
    /// The last row of the model matrix is not `[0, 0, 0, 1]`.
    #[error("the model transform is not affine.")]
    NonAffineTransform,
    /// The model matrix cannot be inverted.
    #[error("the model transform is not invertible.")]
    SingularTransform,
    /// The sampling domain has reversed or non-finite bounds.
    #[error("the sampling domain bounds are reversed or not finite.")]
    InvalidSamplingDomain,
}
