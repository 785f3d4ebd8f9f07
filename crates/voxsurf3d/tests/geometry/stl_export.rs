use voxsurf3d::shape::{Palette, VoxelMesh, VoxelVolume};
use voxsurf3d::transformation::StlError;

#[test]
fn stl_file_round_trip() {
    let vol = VoxelVolume::new([2, 1, 1], vec![1, 1], Palette::default()).unwrap();
    let mesh = vol.to_trimesh();
    let path = std::env::temp_dir().join(format!("voxsurf3d-test-{}.stl", std::process::id()));

    mesh.to_stl_file(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(bytes.len(), 80 + 4 + 20 * 50);
    assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 20);

    // Every record stores a unit normal matching the winding of its triangle.
    for (record, tri) in bytes[84..].chunks_exact(50).zip(mesh.triangles()) {
        let f = |i: usize| {
            f32::from_le_bytes([
                record[i * 4],
                record[i * 4 + 1],
                record[i * 4 + 2],
                record[i * 4 + 3],
            ])
        };
        let normal = tri.normal().unwrap();
        assert_relative_eq!(f(0), normal.x);
        assert_relative_eq!(f(1), normal.y);
        assert_relative_eq!(f(2), normal.z);
        assert_eq!(f(3), tri.a.x);
        assert_eq!(f(11), tri.c.z);
        assert_eq!(&record[48..], &[0, 0]);
    }
}

#[test]
fn empty_mesh_writes_no_file() {
    let path = std::env::temp_dir().join(format!("voxsurf3d-empty-{}.stl", std::process::id()));
    assert!(matches!(
        VoxelMesh::new().to_stl_file(&path),
        Err(StlError::EmptyMesh)
    ));
    assert!(!path.exists());
}
