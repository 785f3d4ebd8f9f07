//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners, with `mins[i] <= maxs[i]` on every axis for
/// any valid box. The "invalid" box returned by [`Aabb::new_invalid`] has reversed corners
/// and is the neutral element of [`Aabb::take_point`].
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use voxsurf3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::from_points([
///     Point3::new(1.0, 2.0, 3.0),
///     Point3::new(-1.0, 4.0, 2.0),
///     Point3::new(0.0, 0.0, 5.0),
/// ])
/// .unwrap();
///
/// assert_eq!(aabb.mins, Point3::new(-1.0, 0.0, 2.0));
/// assert_eq!(aabb.maxs, Point3::new(1.0, 4.0, 5.0));
/// assert_eq!(aabb.center(), Point3::new(0.0, 2.0, 3.5));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` set to `Real::MAX` and `maxs` set to `-Real::MAX`.
    ///
    /// Growing it with [`Aabb::take_point`] yields the bounding box of the points taken.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the tightest AABB enclosing the given points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut pts = pts.into_iter();
        let first = pts.next()?;
        let mut result = Aabb::new(first, first);

        for pt in pts {
            result.take_point(pt);
        }

        Some(result)
    }

    /// Is this AABB valid, i.e., are its `mins` smaller or equal to its `maxs` on every axis?
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..DIM).all(|i| self.mins[i] <= self.maxs[i])
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Computes the AABB grown by `amount` on each side of each axis.
    #[inline]
    #[must_use]
    pub fn loosened(self, amount: Real) -> Self {
        let margin = Vector::repeat(amount);
        Self::new(self.mins - margin, self.maxs + margin)
    }

    /// Does this AABB contain a point expressed in the same coordinate frame as `self`?
    ///
    /// Both faces of every axis are inclusive.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Does the half-open box `[mins, maxs)` contain a point expressed in the same
    /// coordinate frame as `self`?
    ///
    /// The minimum face of every axis is inclusive and the maximum face is exclusive, so
    /// two boxes sharing a face never both contain a point of that face.
    #[inline]
    pub fn contains_local_point_half_open(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if !(point[i] >= self.mins[i] && point[i] < self.maxs[i]) {
                return false;
            }
        }

        true
    }
}
