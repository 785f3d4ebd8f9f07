use voxsurf3d::math::{Point, Real};
use voxsurf3d::partitioning::{CollisionPolicy, GridConfig, UniformGrid};
use voxsurf3d::query::{classify_points, ContainmentQuery, ModelTransform};
use voxsurf3d::shape::{Palette, VoxelVolume};
use voxsurf3d::ConfigurationError;

#[test]
fn every_center_finds_its_voxel() {
    let mut rng = oorandom::Rand32::new(1234);

    for voxel_size in [1.0, 0.5, 3.0] {
        let vol = super::random_volume(&mut rng, [7, 4, 5], 0.35)
            .with_voxel_size(voxel_size)
            .unwrap()
            .centered();
        let grid = UniformGrid::build(&vol, &GridConfig::new(voxel_size)).unwrap();
        assert_eq!(grid.num_occupied_cells(), vol.num_occupied());

        for vox in vol.occupied() {
            let center = vol.voxel_center(vox.key);
            assert_eq!(grid.locate_local_point(&center), Some(vox.index));
        }
    }
}

#[test]
fn empty_cells_are_not_found() {
    let mut rng = oorandom::Rand32::new(99);
    let vol = super::random_volume(&mut rng, [5, 5, 5], 0.5);
    let grid = UniformGrid::build(&vol, &GridConfig::default()).unwrap();

    for x in 0..5 {
        for y in 0..5 {
            for z in 0..5 {
                let key = [x, y, z];
                let found = grid.locate_local_point(&vol.voxel_center(key));
                assert_eq!(found.is_some(), vol.is_occupied(key));
            }
        }
    }
}

#[test]
fn empty_volume_contains_nothing() {
    let vol = VoxelVolume::new([4, 4, 4], vec![0; 64], Palette::default()).unwrap();
    let grid = UniformGrid::build(&vol, &GridConfig::default()).unwrap();
    let points: Vec<_> = (0..64)
        .map(|i| Point::new((i % 4) as Real, ((i / 4) % 4) as Real, (i / 16) as Real))
        .collect();

    assert!(classify_points(&points, &ModelTransform::identity(), &grid).is_empty());
    assert!(!grid.contains_local_point(&Point::origin()));
}

#[test]
fn non_positive_cell_size_is_a_configuration_error() {
    let vol = VoxelVolume::new([2, 2, 2], vec![1; 8], Palette::default()).unwrap();

    for cell_size in [0.0, -0.0, -1.0] {
        let result = UniformGrid::build(&vol, &GridConfig::new(cell_size));
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveCellSize(_))
        ));
    }
}

#[test]
fn coarse_cells_keep_nearest_voxel() {
    // With cells twice as large as the voxels, several voxels share each cell; the ones that
    // lost their cell are simply not found anymore.
    let vol = VoxelVolume::new([4, 4, 4], vec![1; 64], Palette::default()).unwrap();
    let reject = GridConfig::new(2.0);
    assert!(matches!(
        UniformGrid::build(&vol, &reject),
        Err(ConfigurationError::CellCollision { .. })
    ));

    let grid = UniformGrid::build(
        &vol,
        &reject.with_collision_policy(CollisionPolicy::KeepNearest),
    )
    .unwrap();
    let found = vol
        .occupied()
        .filter(|vox| grid.locate_local_point(&vol.voxel_center(vox.key)) == Some(vox.index))
        .count();
    assert_eq!(found, grid.num_occupied_cells());
    assert!(found < vol.num_occupied());
}
