use voxsurf3d::math::{Isometry, Point, Real, Vector};
use voxsurf3d::na::{Matrix4, Similarity3};
use voxsurf3d::partitioning::{GridConfig, UniformGrid};
use voxsurf3d::query::{classify_points, ContainmentQuery, ModelTransform};

fn rand_vector(rng: &mut oorandom::Rand32, scale: Real) -> Vector<Real> {
    Vector::from_fn(|_, _| (rng.rand_float() as Real * 2.0 - 1.0) * scale)
}

// Points at least 0.05 away from every voxel face, so that rounding errors introduced by
// the transform cannot move them across a boundary.
fn local_points(rng: &mut oorandom::Rand32, dims: [usize; 3], n: usize) -> Vec<Point<Real>> {
    (0..n)
        .map(|_| {
            let lattice = Point::new(
                rng.rand_range(0..dims[0] as u32 + 4) as Real - 2.0,
                rng.rand_range(0..dims[1] as u32 + 4) as Real - 2.0,
                rng.rand_range(0..dims[2] as u32 + 4) as Real - 2.0,
            );
            lattice + rand_vector(rng, 0.45)
        })
        .collect()
}

fn random_transforms(rng: &mut oorandom::Rand32) -> Vec<ModelTransform> {
    let mut result = vec![ModelTransform::identity()];

    for _ in 0..10 {
        let pos = Isometry::new(rand_vector(rng, 20.0), rand_vector(rng, 3.0));
        result.push(pos.into());

        let scale = 0.25 + rng.rand_float() as Real * 4.0;
        let sim = Similarity3::new(rand_vector(rng, 20.0), rand_vector(rng, 3.0), scale);
        result.push(sim.into());

        // Non-uniform scaling and shearing through a raw matrix.
        let mut m = Matrix4::<Real>::identity();
        m[(0, 0)] = 2.0;
        m[(1, 1)] = 0.5;
        m[(0, 1)] = rng.rand_float() as Real;
        m[(2, 3)] = rng.rand_float() as Real * 10.0;
        result.push(ModelTransform::new(pos.to_homogeneous() * m).unwrap());
    }

    result
}

#[test]
fn transformed_queries_match_local_queries() {
    let mut rng = oorandom::Rand32::new(2024);
    let dims = [6, 5, 7];
    let vol = super::random_volume(&mut rng, dims, 0.5);
    let grid = UniformGrid::build(&vol, &GridConfig::default()).unwrap();
    let points = local_points(&mut rng, dims, 500);
    let identity = ModelTransform::identity();

    for pos in random_transforms(&mut rng) {
        for pt in &points {
            let world = pos.transform_point(pt);
            assert_eq!(
                grid.locate_point(&pos, &world),
                grid.locate_point(&identity, pt),
                "mismatch at {} under {:?}",
                pt,
                pos.matrix()
            );
        }
    }
}

#[test]
fn classification_is_transform_invariant() {
    let mut rng = oorandom::Rand32::new(77);
    let dims = [4, 4, 4];
    let vol = super::random_volume(&mut rng, dims, 0.6);
    let grid = UniformGrid::build(&vol, &GridConfig::default()).unwrap();
    let points = local_points(&mut rng, dims, 300);
    let expected = classify_points(&points, &ModelTransform::identity(), &grid);
    assert!(!expected.is_empty());

    for pos in random_transforms(&mut rng) {
        let world: Vec<_> = points.iter().map(|pt| pos.transform_point(pt)).collect();
        let inside = classify_points(&world, &pos, &grid);
        let back: Vec<_> = inside
            .iter()
            .map(|pt| pos.inverse_transform_point(pt))
            .collect();

        assert_eq!(back.len(), expected.len());
        for (a, b) in back.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1.0e-3);
        }
    }
}
