//! The static artifacts derived from one voxel volume.

use crate::math::{Point, Real};
use crate::partitioning::{GridConfig, UniformGrid};
use crate::query::{classify_points, ContainmentClassifier, ContainmentQuery, ModelTransform};
use crate::shape::{VoxelMesh, VoxelVolume};
use crate::ConfigurationError;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use parking_lot::RwLock;
#[cfg(feature = "std")]
use std::sync::Arc;

/// A voxel volume together with its surface mesh and its uniform grid.
///
/// The three are built together and never modified afterwards. The model transform is not
/// part of the scene: it is passed to each containment query, so moving the volume in the
/// world never requires a rebuild.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::math::{Point, Translation};
/// use voxsurf3d::partitioning::GridConfig;
/// use voxsurf3d::query::{ContainmentQuery, ModelTransform};
/// use voxsurf3d::scene::VoxelScene;
/// use voxsurf3d::shape::{Palette, VoxelVolume};
///
/// let volume = VoxelVolume::new([2, 1, 1], vec![1, 1], Palette::default()).unwrap();
/// let scene = VoxelScene::build(volume, &GridConfig::default()).unwrap();
/// assert_eq!(scene.mesh().len(), 20);
///
/// let pos = ModelTransform::from(Translation::new(0.0, 5.0, 0.0));
/// assert!(scene.contains_point(&pos, &Point::new(1.0, 5.0, 0.0)));
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelScene {
    volume: VoxelVolume,
    mesh: VoxelMesh,
    grid: UniformGrid,
}

impl VoxelScene {
    /// Extracts the surface of `volume` and indexes its occupied voxels.
    ///
    /// The grid configuration is validated before any work is done.
    pub fn build(volume: VoxelVolume, config: &GridConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let grid = UniformGrid::build(&volume, config)?;
        let mesh = volume.to_trimesh();

        Ok(Self { volume, mesh, grid })
    }

    /// The source volume.
    #[inline]
    pub fn volume(&self) -> &VoxelVolume {
        &self.volume
    }

    /// The surface of the volume, in the local space of the volume.
    #[inline]
    pub fn mesh(&self) -> &VoxelMesh {
        &self.mesh
    }

    /// The uniform grid over the occupied voxels.
    #[inline]
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    /// A containment classifier borrowing the grid of this scene.
    #[inline]
    pub fn classifier(&self) -> ContainmentClassifier<'_> {
        ContainmentClassifier::new(&self.grid)
    }

    /// The world-space points of `points` inside of the volume placed by `pos`, in input
    /// order.
    pub fn classify(&self, pos: &ModelTransform, points: &[Point<Real>]) -> Vec<Point<Real>> {
        classify_points(points, pos, &self.grid)
    }

    /// Consumes the scene and returns its parts.
    pub fn into_parts(self) -> (VoxelVolume, VoxelMesh, UniformGrid) {
        (self.volume, self.mesh, self.grid)
    }
}

impl ContainmentQuery for VoxelScene {
    #[inline]
    fn locate_local_point(&self, pt: &Point<Real>) -> Option<usize> {
        self.grid.locate_local_point(pt)
    }
}

/// A shared holder of the current [`VoxelScene`].
///
/// Readers get a cheap reference-counted handle to the scene that was current when they
/// asked, and keep using it even if a new scene is published meanwhile. Scenes are built
/// outside of the slot and swapped in whole, so readers never observe a partially built
/// scene.
///
/// This type is enabled by the `std` feature flag.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct SceneSlot {
    current: RwLock<(Arc<VoxelScene>, u64)>,
}

#[cfg(feature = "std")]
impl SceneSlot {
    /// Creates a slot holding `scene`, with the generation `0`.
    pub fn new(scene: VoxelScene) -> Self {
        Self {
            current: RwLock::new((Arc::new(scene), 0)),
        }
    }

    /// Replaces the current scene and returns the new generation.
    ///
    /// Handles obtained from [`SceneSlot::current`] before this call keep the old scene alive.
    pub fn publish(&self, scene: VoxelScene) -> u64 {
        let scene = Arc::new(scene);
        let mut current = self.current.write();
        current.0 = scene;
        current.1 += 1;
        log::debug!("Published scene generation {}.", current.1);
        current.1
    }

    /// Builds a scene from `volume` then publishes it.
    ///
    /// On error, the current scene is left untouched.
    pub fn rebuild(
        &self,
        volume: VoxelVolume,
        config: &GridConfig,
    ) -> Result<u64, ConfigurationError> {
        let scene = VoxelScene::build(volume, config)?;
        Ok(self.publish(scene))
    }

    /// The current scene.
    pub fn current(&self) -> Arc<VoxelScene> {
        self.current.read().0.clone()
    }

    /// The number of scenes published since this slot was created.
    pub fn generation(&self) -> u64 {
        self.current.read().1
    }
}
