use std::collections::HashMap;
use voxsurf3d::math::{Point, Real};
use voxsurf3d::shape::{Palette, VoxelMesh, VoxelVolume};

fn volume(dims: [usize; 3], data: &[u8]) -> VoxelVolume {
    VoxelVolume::new(dims, data.to_vec(), super::test_palette()).unwrap()
}

// Vertices all lie on a half-integer lattice for unit voxels.
fn lattice_key(pt: &Point<Real>) -> [i64; 3] {
    [
        (pt.x * 2.0).round() as i64,
        (pt.y * 2.0).round() as i64,
        (pt.z * 2.0).round() as i64,
    ]
}

// A closed, consistently oriented surface uses every directed edge as many times as its
// reverse.
fn assert_closed_and_oriented(mesh: &VoxelMesh) {
    let mut edges: HashMap<([i64; 3], [i64; 3]), i32> = HashMap::new();

    for tri in mesh.triangles() {
        let vtx = tri.vertices().map(|v| lattice_key(&v));
        for i in 0..3 {
            *edges.entry((vtx[i], vtx[(i + 1) % 3])).or_default() += 1;
        }
    }

    for ((a, b), count) in &edges {
        assert_eq!(
            edges.get(&(*b, *a)).copied().unwrap_or(0),
            *count,
            "unmatched edge {:?} -> {:?}",
            a,
            b
        );
    }
}

#[test]
fn empty_volume_has_empty_surface() {
    assert!(VoxelVolume::empty().to_trimesh().is_empty());
    assert!(volume([3, 2, 4], &[0; 24]).to_trimesh().is_empty());
    assert!(volume([0, 7, 1], &[]).to_trimesh().is_empty());
}

#[test]
fn single_voxel_has_twelve_outward_triangles() {
    let vol = volume([1, 1, 1], &[2]);
    let mesh = vol.to_trimesh();
    assert_eq!(mesh.len(), 12);

    let center = vol.voxel_center([0, 0, 0]);
    for tri in mesh.triangles() {
        let normal = tri.scaled_normal();
        assert!(normal.dot(&(tri.center() - center)) > 0.0);
        assert_eq!(tri.color, [0.0, 1.0, 0.0]);
    }

    let aabb = mesh.aabb().unwrap();
    assert_relative_eq!(aabb.mins, Point::new(-0.5, -0.5, -0.5));
    assert_relative_eq!(aabb.maxs, Point::new(0.5, 0.5, 0.5));
    assert_closed_and_oriented(&mesh);
}

#[test]
fn adjacent_voxels_share_no_face() {
    let both = volume([2, 1, 1], &[1, 1]).to_trimesh();
    assert_eq!(both.len(), 20);
    assert_closed_and_oriented(&both);

    // No triangle lies on the plane x = 0.5 between the two voxels.
    assert!(both
        .triangles()
        .iter()
        .all(|tri| tri.vertices().iter().any(|v| v.x != 0.5)));

    let first_only = volume([2, 1, 1], &[1, 0]).to_trimesh();
    assert_eq!(first_only.len(), 12);
    assert_eq!(first_only, volume([1, 1, 1], &[1]).to_trimesh());
}

#[test]
fn extraction_is_idempotent() {
    let mut rng = oorandom::Rand32::new(7);
    let vol = super::random_volume(&mut rng, [6, 5, 4], 0.5);
    assert_eq!(vol.to_trimesh(), vol.to_trimesh());
}

#[test]
fn random_volumes_are_watertight() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..20 {
        let dims = [
            rng.rand_range(1..7) as usize,
            rng.rand_range(1..7) as usize,
            rng.rand_range(1..7) as usize,
        ];
        let vol = super::random_volume(&mut rng, dims, 0.4);
        let mesh = vol.to_trimesh();

        assert_eq!(mesh.len(), vol.num_free_faces() * 2);
        assert_closed_and_oriented(&mesh);

        // Every triangle carries the color of the voxel it was extracted from.
        for tri in mesh.triangles() {
            let inner = tri.center() - tri.scaled_normal().normalize() * 0.5;
            let key = [
                inner.x.round() as usize,
                inner.y.round() as usize,
                inner.z.round() as usize,
            ];
            assert_eq!(Some(tri.color), vol.color(key));
        }
    }
}

#[test]
fn voxel_pitch_scales_the_surface() {
    let vol = VoxelVolume::new([2, 1, 1], vec![1, 1], Palette::default())
        .unwrap()
        .with_voxel_size(0.25)
        .unwrap()
        .centered();
    let mut mesh = vol.to_trimesh();
    let aabb = mesh.aabb().unwrap();
    assert_relative_eq!(aabb.mins, Point::new(-0.25, -0.125, -0.125));
    assert_relative_eq!(aabb.maxs, Point::new(0.25, 0.125, 0.125));

    // Already centered.
    assert_relative_eq!(mesh.recenter().norm(), 0.0);
}
