// Each voxel is the half-open box `[c - h, c + h)` on every axis.

use voxsurf3d::math::Point;
use voxsurf3d::partitioning::{GridConfig, UniformGrid};
use voxsurf3d::query::{ContainmentQuery, ModelTransform};
use voxsurf3d::shape::{Palette, VoxelVolume};

fn two_voxel_grid() -> UniformGrid {
    // Voxel 0 spans [-0.5, 0.5) and voxel 1 spans [0.5, 1.5) along x.
    let vol = VoxelVolume::new([2, 1, 1], vec![1, 1], Palette::default()).unwrap();
    UniformGrid::build(&vol, &GridConfig::default()).unwrap()
}

#[test]
fn shared_face_belongs_to_the_positive_side() {
    let grid = two_voxel_grid();
    assert_eq!(grid.locate_local_point(&Point::new(0.5, 0.0, 0.0)), Some(1));
    assert_eq!(grid.locate_local_point(&Point::new(0.4999, 0.0, 0.0)), Some(0));
}

#[test]
fn outer_faces() {
    let grid = two_voxel_grid();

    // Minimum faces are inside.
    assert_eq!(grid.locate_local_point(&Point::new(-0.5, 0.0, 0.0)), Some(0));
    assert_eq!(grid.locate_local_point(&Point::new(0.0, -0.5, 0.0)), Some(0));
    assert_eq!(grid.locate_local_point(&Point::new(1.0, 0.0, -0.5)), Some(1));
    assert_eq!(
        grid.locate_local_point(&Point::new(-0.5, -0.5, -0.5)),
        Some(0)
    );

    // Maximum faces are outside.
    assert_eq!(grid.locate_local_point(&Point::new(1.5, 0.0, 0.0)), None);
    assert_eq!(grid.locate_local_point(&Point::new(0.0, 0.5, 0.0)), None);
    assert_eq!(grid.locate_local_point(&Point::new(1.0, 0.0, 0.5)), None);
    assert_eq!(grid.locate_local_point(&Point::new(1.0, 0.5, 0.5)), None);

    // Just outside of the minimum faces.
    assert_eq!(grid.locate_local_point(&Point::new(-0.5001, 0.0, 0.0)), None);
    assert_eq!(grid.locate_local_point(&Point::new(0.0, 0.0, -0.5001)), None);
}

#[test]
fn footprint_wider_than_padded_grid_box() {
    // The padded grid box only spans [-0.1, 1.1] along x, but the voxels reach further.
    let grid = two_voxel_grid();
    let aabb = grid.aabb().unwrap();
    assert!(aabb.mins.x > -0.5 && aabb.maxs.x < 1.5);

    assert!(grid.contains_local_point(&Point::new(-0.45, 0.4, -0.4)));
    assert!(grid.contains_local_point(&Point::new(1.45, -0.45, 0.45)));
}

#[test]
fn boundaries_follow_the_transform() {
    let grid = two_voxel_grid();
    let pos = ModelTransform::from(voxsurf3d::math::Translation::new(10.0, 0.0, 0.0));
    assert_eq!(grid.locate_point(&pos, &Point::new(10.5, 0.0, 0.0)), Some(1));
    assert_eq!(grid.locate_point(&pos, &Point::new(9.5, 0.0, 0.0)), Some(0));
    assert_eq!(grid.locate_point(&pos, &Point::new(11.5, 0.0, 0.0)), None);
}
