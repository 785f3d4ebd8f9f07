use crate::bounding_volume::Aabb;
use crate::math::{Color, Point, Real, Vector};
use alloc::vec::Vec;

/// A flat-shaded triangle of a voxel surface.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ColoredTriangle {
    /// The first vertex of the triangle.
    pub a: Point<Real>,
    /// The second vertex of the triangle.
    pub b: Point<Real>,
    /// The third vertex of the triangle.
    pub c: Point<Real>,
    /// The color shared by the three vertices.
    pub color: Color,
}

impl ColoredTriangle {
    /// Creates a triangle from its vertices and its color.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>, color: Color) -> Self {
        Self { a, b, c, color }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The cross product `(b - a) × (c - a)`.
    ///
    /// Points away from the solid for every triangle emitted by the surface extraction.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// The unit normal of this triangle, or `None` if it is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Vector<Real>> {
        self.scaled_normal().try_normalize(Real::EPSILON)
    }

    /// The barycenter of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }
}

/// An ordered list of flat-shaded triangles.
///
/// The order of the triangles is the order in which they were emitted; it carries no meaning
/// besides making the output reproducible. Vertices are not shared nor deduplicated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelMesh {
    triangles: Vec<ColoredTriangle>,
}

impl VoxelMesh {
    /// The largest number of triangles [`VoxelMesh::to_trimesh_buffers`] can index with `u32`.
    pub const MAX_INDEXED_TRIANGLES: usize = u32::MAX as usize / 3;

    /// An empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from an ordered list of triangles.
    pub fn from_triangles(triangles: Vec<ColoredTriangle>) -> Self {
        Self { triangles }
    }

    /// The triangles of this mesh, in emission order.
    #[inline]
    pub fn triangles(&self) -> &[ColoredTriangle] {
        &self.triangles
    }

    /// Consumes this mesh and returns its triangles.
    pub fn into_triangles(self) -> Vec<ColoredTriangle> {
        self.triangles
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Does this mesh have no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a triangle.
    #[inline]
    pub fn push(&mut self, triangle: ColoredTriangle) {
        self.triangles.push(triangle);
    }

    /// Iterates through every vertex of every triangle.
    pub fn vertices(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices())
    }

    /// The bounding box of all the vertices, or `None` if the mesh is empty.
    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices())
    }

    /// Translates every vertex by `translation`.
    pub fn translate(&mut self, translation: &Vector<Real>) {
        for tri in &mut self.triangles {
            tri.a += translation;
            tri.b += translation;
            tri.c += translation;
        }
    }

    /// Translates every vertex so the bounding box of the mesh is centered at the origin.
    ///
    /// Returns the translation applied. This is not meant to be applied repeatedly: it only
    /// leaves an already-centered mesh unchanged up to rounding errors.
    pub fn recenter(&mut self) -> Vector<Real> {
        let translation = self
            .aabb()
            .map(|aabb| -aabb.center().coords)
            .unwrap_or_else(Vector::zeros);
        self.translate(&translation);
        translation
    }

    /// Flattens this mesh into a vertex buffer and an index buffer.
    ///
    /// Each triangle gets three fresh vertices; nothing is deduplicated, so the `i`-th index
    /// triple is always `[3i, 3i + 1, 3i + 2]`.
    ///
    /// Returns `None` if the mesh has more than [`VoxelMesh::MAX_INDEXED_TRIANGLES`]
    /// triangles, so that some vertex index would not fit in a `u32`.
    pub fn to_trimesh_buffers(&self) -> Option<(Vec<Point<Real>>, Vec<[u32; 3]>)> {
        if self.triangles.len() > Self::MAX_INDEXED_TRIANGLES {
            return None;
        }

        let vtx: Vec<_> = self.vertices().collect();
        let idx = (0..self.triangles.len() as u32)
            .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
            .collect();
        Some((vtx, idx))
    }
}

impl IntoIterator for VoxelMesh {
    type Item = ColoredTriangle;
    type IntoIter = alloc::vec::IntoIter<ColoredTriangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}

impl<'a> IntoIterator for &'a VoxelMesh {
    type Item = &'a ColoredTriangle;
    type IntoIter = core::slice::Iter<'a, ColoredTriangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

impl FromIterator<ColoredTriangle> for VoxelMesh {
    fn from_iter<I: IntoIterator<Item = ColoredTriangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}
