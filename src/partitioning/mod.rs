//! Spatial partitioning tools.

pub use self::uniform_grid::{CollisionPolicy, GridConfig, UniformGrid};

mod uniform_grid;
