use crate::math::{Point, Real};
use crate::partitioning::UniformGrid;
use crate::query::{ModelTransform, SamplingDomain};
use crate::ConfigurationError;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trait of spatial structures that can tell which voxel, if any, contains a point.
///
/// "Not found" is never an error: it is reported as `None` or `false`.
pub trait ContainmentQuery {
    /// Finds the voxel containing `pt`, expressed in the local space of the volume.
    ///
    /// Returns the flat index of that voxel in the volume data.
    fn locate_local_point(&self, pt: &Point<Real>) -> Option<usize>;

    /// Tests if `pt`, expressed in the local space of the volume, lies inside of a voxel.
    #[inline]
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.locate_local_point(pt).is_some()
    }

    /// Finds the voxel containing the world-space point `pt`, the volume being placed in
    /// the world by `pos`.
    #[inline]
    fn locate_point(&self, pos: &ModelTransform, pt: &Point<Real>) -> Option<usize> {
        self.locate_local_point(&pos.inverse_transform_point(pt))
    }

    /// Tests if the world-space point `pt` lies inside of a voxel of the volume placed in
    /// the world by `pos`.
    #[inline]
    fn contains_point(&self, pos: &ModelTransform, pt: &Point<Real>) -> bool {
        self.contains_local_point(&pos.inverse_transform_point(pt))
    }
}

impl ContainmentQuery for UniformGrid {
    #[inline]
    fn locate_local_point(&self, pt: &Point<Real>) -> Option<usize> {
        UniformGrid::locate_local_point(self, pt)
    }
}

/// Collects the world-space points lying inside of the volume indexed by `index`, placed in
/// the world by `pos`.
///
/// The output preserves the relative order of `points`, also when the `parallel` feature
/// is enabled. Neither `index` nor `pos` is modified, so this can be called repeatedly
/// with different transforms without rebuilding anything.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::math::{Point, Translation};
/// use voxsurf3d::partitioning::{GridConfig, UniformGrid};
/// use voxsurf3d::query::{classify_points, ModelTransform};
/// use voxsurf3d::shape::{Palette, VoxelVolume};
///
/// let volume = VoxelVolume::new([1, 1, 1], vec![1], Palette::default()).unwrap();
/// let grid = UniformGrid::build(&volume, &GridConfig::default()).unwrap();
/// let pos = ModelTransform::from(Translation::new(10.0, 0.0, 0.0));
///
/// let points = [Point::new(0.0, 0.0, 0.0), Point::new(10.2, 0.1, -0.3)];
/// assert_eq!(classify_points(&points, &pos, &grid), vec![points[1]]);
/// # }
/// ```
pub fn classify_points<Q>(
    points: &[Point<Real>],
    pos: &ModelTransform,
    index: &Q,
) -> Vec<Point<Real>>
where
    Q: ContainmentQuery + Sync + ?Sized,
{
    #[cfg(not(feature = "parallel"))]
    let result: Vec<_> = points
        .iter()
        .filter(|pt| index.contains_point(pos, pt))
        .copied()
        .collect();

    #[cfg(feature = "parallel")]
    let result: Vec<_> = points
        .par_iter()
        .filter(|pt| index.contains_point(pos, pt))
        .copied()
        .collect();

    log::trace!(
        "Classified {} points: {} contained.",
        points.len(),
        result.len()
    );

    result
}

/// A transform-aware containment classifier over a uniform grid.
///
/// This is a thin borrowed view: the grid is built once per volume while the transform is
/// supplied with each call.
#[derive(Copy, Clone, Debug)]
pub struct ContainmentClassifier<'a> {
    grid: &'a UniformGrid,
}

impl<'a> ContainmentClassifier<'a> {
    /// Creates a classifier over `grid`.
    pub fn new(grid: &'a UniformGrid) -> Self {
        Self { grid }
    }

    /// The grid this classifier queries.
    #[inline]
    pub fn grid(&self) -> &'a UniformGrid {
        self.grid
    }

    /// The flat index of the voxel containing the world-space point `pt`, if any.
    #[inline]
    pub fn locate(&self, pos: &ModelTransform, pt: &Point<Real>) -> Option<usize> {
        self.grid.locate_point(pos, pt)
    }

    /// Tests if the world-space point `pt` lies inside of the volume.
    #[inline]
    pub fn contains(&self, pos: &ModelTransform, pt: &Point<Real>) -> bool {
        self.grid.contains_point(pos, pt)
    }

    /// The points of `points` lying inside of the volume, in input order.
    pub fn classify(&self, pos: &ModelTransform, points: &[Point<Real>]) -> Vec<Point<Real>> {
        classify_points(points, pos, self.grid)
    }

    /// The lattice points of `domain` lying inside of the volume, in lattice order.
    ///
    /// The domain is expressed in world space.
    pub fn classify_domain(
        &self,
        pos: &ModelTransform,
        domain: &SamplingDomain,
    ) -> Result<Vec<Point<Real>>, ConfigurationError> {
        let points: Vec<_> = domain.points()?.collect();
        Ok(self.classify(pos, &points))
    }
}
