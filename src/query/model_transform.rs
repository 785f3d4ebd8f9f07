use crate::math::{Isometry, Matrix, Point, Real, Similarity3, Translation, DEFAULT_EPSILON};
use crate::ConfigurationError;

/// An affine transform from the local space of a voxel volume to world space.
///
/// The inverse is computed once, when the transform is created, so mapping world-space
/// points back into the volume costs a single matrix-point product.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::math::{Point, Translation};
/// use voxsurf3d::query::ModelTransform;
///
/// let pos = ModelTransform::from(Translation::new(1.0, 2.0, 3.0));
/// let world = pos.transform_point(&Point::origin());
/// assert_eq!(world, Point::new(1.0, 2.0, 3.0));
/// assert_eq!(pos.inverse_transform_point(&world), Point::origin());
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(try_from = "RawModelTransform"))]
pub struct ModelTransform {
    matrix: Matrix<Real>,
    inverse: Matrix<Real>,
}

// The stored inverse is recomputed rather than trusted.
#[cfg(feature = "serde-serialize")]
#[derive(Deserialize)]
struct RawModelTransform {
    matrix: Matrix<Real>,
}

#[cfg(feature = "serde-serialize")]
impl TryFrom<RawModelTransform> for ModelTransform {
    type Error = ConfigurationError;

    fn try_from(raw: RawModelTransform) -> Result<Self, Self::Error> {
        ModelTransform::new(raw.matrix)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ModelTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    /// Wraps a homogeneous 4x4 matrix.
    ///
    /// Fails if the matrix is not affine (its last row must be `[0, 0, 0, 1]` up to
    /// [`DEFAULT_EPSILON`]) or if it cannot be inverted.
    pub fn new(matrix: Matrix<Real>) -> Result<Self, ConfigurationError> {
        let last_row = matrix.row(3);
        let expected = [0.0, 0.0, 0.0, 1.0];

        for (val, expected) in last_row.iter().zip(expected) {
            if !relative_eq!(*val, expected, epsilon = DEFAULT_EPSILON) {
                return Err(ConfigurationError::NonAffineTransform);
            }
        }

        let inverse = matrix
            .try_inverse()
            .ok_or(ConfigurationError::SingularTransform)?;

        if !inverse.iter().all(|v| v.is_finite()) {
            return Err(ConfigurationError::SingularTransform);
        }

        Ok(Self { matrix, inverse })
    }

    /// The homogeneous matrix of this transform.
    #[inline]
    pub fn matrix(&self) -> &Matrix<Real> {
        &self.matrix
    }

    /// The homogeneous matrix of the inverse transform.
    #[inline]
    pub fn inverse_matrix(&self) -> &Matrix<Real> {
        &self.inverse
    }

    /// The inverse of this transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Maps a point from the local space of the volume to world space.
    #[inline]
    pub fn transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.matrix.transform_point(pt)
    }

    /// Maps a point from world space to the local space of the volume.
    #[inline]
    pub fn inverse_transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.inverse.transform_point(pt)
    }
}

impl From<Isometry<Real>> for ModelTransform {
    fn from(pos: Isometry<Real>) -> Self {
        Self {
            matrix: pos.to_homogeneous(),
            inverse: pos.inverse().to_homogeneous(),
        }
    }
}

impl From<Translation<Real>> for ModelTransform {
    fn from(tra: Translation<Real>) -> Self {
        Self {
            matrix: tra.to_homogeneous(),
            inverse: tra.inverse().to_homogeneous(),
        }
    }
}

impl From<Similarity3<Real>> for ModelTransform {
    /// The scaling factor of a `Similarity3` is never zero, so the conversion cannot fail.
    fn from(sim: Similarity3<Real>) -> Self {
        Self {
            matrix: sim.to_homogeneous(),
            inverse: sim.inverse().to_homogeneous(),
        }
    }
}
