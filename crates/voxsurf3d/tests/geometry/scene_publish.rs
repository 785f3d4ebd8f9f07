use voxsurf3d::math::{Point, Real, Translation};
use voxsurf3d::partitioning::GridConfig;
use voxsurf3d::query::{ContainmentQuery, ModelTransform};
use voxsurf3d::scene::VoxelScene;
use voxsurf3d::shape::{Palette, VoxelVolume};

fn scene(num_voxels: usize) -> VoxelScene {
    let vol =
        VoxelVolume::new([num_voxels, 1, 1], vec![1; num_voxels], Palette::default()).unwrap();
    VoxelScene::build(vol, &GridConfig::default()).unwrap()
}

#[test]
fn moving_the_model_needs_no_rebuild() {
    let scene = scene(3);
    let mesh_before = scene.mesh().clone();
    let probe = Point::new(2.0, 0.0, 0.0);

    for shift in 0..5 {
        let pos = ModelTransform::from(Translation::new(shift as Real, 0.0, 0.0));
        assert_eq!(scene.contains_point(&pos, &probe), shift <= 2);
    }

    assert_eq!(scene.mesh(), &mesh_before);
}

#[cfg(feature = "std")]
#[test]
fn readers_never_see_a_partial_scene() {
    use voxsurf3d::scene::SceneSlot;

    let slot = SceneSlot::new(scene(1));

    std::thread::scope(|s| {
        for _ in 0..4 {
            let _ = s.spawn(|| {
                for _ in 0..200 {
                    let current = slot.current();
                    let n = current.grid().num_occupied_cells();
                    assert_eq!(current.mesh().len(), 8 * n + 4);
                    assert_eq!(current.volume().num_occupied(), n);
                }
            });
        }

        for i in 0..50 {
            let _ = slot.publish(scene(1 + i % 4));
        }
    });

    assert_eq!(slot.generation(), 50);
}
