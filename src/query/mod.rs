//! Non-persistent geometric queries.
//!
//! Point containment is the only query supported here. It is exposed at three levels:
//!
//! * [`ContainmentQuery`], the trait implemented by the spatial structures able to locate
//!   the voxel containing a point.
//! * [`classify_points()`] to filter a batch of world-space points down to the ones inside
//!   of a volume placed in the world by a [`ModelTransform`].
//! * [`ContainmentClassifier`], a borrowed view over a grid bundling the two above, that can
//!   also generate its query points from a [`SamplingDomain`].

pub use self::containment::{classify_points, ContainmentClassifier, ContainmentQuery};
pub use self::model_transform::ModelTransform;
pub use self::sampling::SamplingDomain;

mod containment;
mod model_transform;
mod sampling;
