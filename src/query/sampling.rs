use crate::math::{Point, Real, Vector, DIM};
use crate::ConfigurationError;

/// A regular lattice of query points over an axis-aligned box.
///
/// The lattice splits `[mins, maxs]` into `resolution[i]` equal intervals along each axis
/// and places one point at the center of every resulting cell. Points are enumerated with
/// `x` outermost and `z` innermost.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SamplingDomain {
    /// The minimum corner of the sampled box.
    pub mins: Point<Real>,
    /// The maximum corner of the sampled box.
    pub maxs: Point<Real>,
    /// The number of points along each axis.
    pub resolution: [usize; 3],
}

impl Default for SamplingDomain {
    fn default() -> Self {
        Self {
            mins: Point::new(-1.0, -1.0, -1.0),
            maxs: Point::new(1.0, 1.0, 1.0),
            resolution: [16; 3],
        }
    }
}

impl SamplingDomain {
    /// Creates a sampling domain. It is validated when its points are generated.
    pub fn new(mins: Point<Real>, maxs: Point<Real>, resolution: [usize; 3]) -> Self {
        Self {
            mins,
            maxs,
            resolution,
        }
    }

    /// Sets the number of points along each axis.
    #[must_use]
    pub fn with_resolution(mut self, resolution: [usize; 3]) -> Self {
        self.resolution = resolution;
        self
    }

    /// Checks that the bounds are finite and not reversed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for i in 0..DIM {
            if !(self.mins[i].is_finite() && self.maxs[i].is_finite() && self.mins[i] <= self.maxs[i])
            {
                return Err(ConfigurationError::InvalidSamplingDomain);
            }
        }

        Ok(())
    }

    /// The number of points of the lattice.
    pub fn num_points(&self) -> usize {
        self.resolution.iter().product()
    }

    /// The distance between two consecutive points along each axis.
    ///
    /// Zero along the axes without any point.
    pub fn spacing(&self) -> Vector<Real> {
        Vector::from_fn(|i, _| {
            if self.resolution[i] == 0 {
                0.0
            } else {
                (self.maxs[i] - self.mins[i]) / self.resolution[i] as Real
            }
        })
    }

    /// Iterates through the points of the lattice, `x` outermost and `z` innermost.
    ///
    /// Yields nothing if any resolution is zero.
    pub fn points(&self) -> Result<impl Iterator<Item = Point<Real>>, ConfigurationError> {
        self.validate()?;

        let mins = self.mins;
        let spacing = self.spacing();
        let [rx, ry, rz] = self.resolution;
        let coord = move |i: usize, k: usize| mins[i] + (k as Real + 0.5) * spacing[i];

        Ok((0..rx).flat_map(move |x| {
            (0..ry).flat_map(move |y| {
                (0..rz).map(move |z| Point::new(coord(0, x), coord(1, y), coord(2, z)))
            })
        }))
    }
}
