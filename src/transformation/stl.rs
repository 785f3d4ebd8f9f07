//! Binary STL export.

use crate::math::Vector;
use crate::shape::VoxelMesh;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The size of the header of a binary STL file.
pub const STL_HEADER_SIZE: usize = 80;
/// The size of each triangle record of a binary STL file.
pub const STL_TRIANGLE_SIZE: usize = 12 * 4 + 2;

/// Error raised while writing a binary STL file.
#[derive(thiserror::Error, Debug)]
pub enum StlError {
    /// A mesh without any triangle is not written.
    #[error("cannot write an STL file without any triangle.")]
    EmptyMesh,
    /// The triangle count does not fit in the 32-bit count field of the format.
    #[error("{0} triangles exceed the capacity of a binary STL file.")]
    TooManyTriangles(usize),
    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VoxelMesh {
    /// Writes this mesh as a binary STL stream.
    ///
    /// The header is left blank. Each triangle is written as its unit normal followed by its
    /// three vertices, all as little-endian `f32`, and a zero attribute word. Colors are not
    /// part of the format and are dropped.
    ///
    /// This function is enabled by the `std` feature flag.
    pub fn write_stl<W: Write>(&self, mut out: W) -> Result<(), StlError> {
        if self.is_empty() {
            return Err(StlError::EmptyMesh);
        }

        let num_triangles =
            u32::try_from(self.len()).map_err(|_| StlError::TooManyTriangles(self.len()))?;

        // Build the whole payload first so the writer only sees a few large writes.
        let mut buffer = Vec::with_capacity(self.len() * STL_TRIANGLE_SIZE);

        for tri in self.triangles() {
            let normal = tri.normal().unwrap_or_else(Vector::zeros);

            #[allow(clippy::unnecessary_cast)]
            for v in [normal.x, normal.y, normal.z] {
                buffer.extend_from_slice(&(v as f32).to_le_bytes());
            }

            #[allow(clippy::unnecessary_cast)]
            for pt in tri.vertices() {
                for v in [pt.x, pt.y, pt.z] {
                    buffer.extend_from_slice(&(v as f32).to_le_bytes());
                }
            }

            buffer.extend_from_slice(&0u16.to_le_bytes());
        }

        out.write_all(&[0u8; STL_HEADER_SIZE])?;
        out.write_all(&num_triangles.to_le_bytes())?;
        out.write_all(&buffer)?;
        out.flush()?;

        log::debug!(
            "Wrote {} triangles ({} bytes) of binary STL.",
            num_triangles,
            STL_HEADER_SIZE + 4 + buffer.len()
        );

        Ok(())
    }

    /// Outputs a binary STL file at the given path.
    ///
    /// This function is enabled by the `std` feature flag.
    pub fn to_stl_file(&self, path: impl AsRef<Path>) -> Result<(), StlError> {
        if self.is_empty() {
            return Err(StlError::EmptyMesh);
        }

        let file = std::fs::File::create(path)?;
        self.write_stl(BufWriter::new(file))
    }
}
