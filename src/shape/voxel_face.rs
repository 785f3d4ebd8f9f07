use crate::math::{Real, Vector};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// A set of voxel faces, or of signed directions along the coordinate axes.
pub struct FaceMask(u8);

bitflags::bitflags! {
    /// Flags for identifying signed directions along coordinate axes, or faces of a voxel.
    impl FaceMask: u8 {
        /// The direction or face along the `+x` coordinate axis.
        const X_POS = 1 << 0;
        /// The direction or face along the `-x` coordinate axis.
        const X_NEG = 1 << 1;
        /// The direction or face along the `+y` coordinate axis.
        const Y_POS = 1 << 2;
        /// The direction or face along the `-y` coordinate axis.
        const Y_NEG = 1 << 3;
        /// The direction or face along the `+z` coordinate axis.
        const Z_POS = 1 << 4;
        /// The direction or face along the `-z` coordinate axis.
        const Z_NEG = 1 << 5;
    }
}

/// One of the six axis-aligned faces of a voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum VoxelFace {
    /// The face with outward normal `+y`.
    PosY,
    /// The face with outward normal `-y`.
    NegY,
    /// The face with outward normal `+z`.
    PosZ,
    /// The face with outward normal `-z`.
    NegZ,
    /// The face with outward normal `+x`.
    PosX,
    /// The face with outward normal `-x`.
    NegX,
}

// Corners of each face of a voxel of unit size centered at the origin, listed so that
// the triangles `(0, 1, 2)` and `(0, 2, 3)` wind counter-clockwise seen from outside.
const FACE_CORNERS: [[[Real; 3]; 4]; 6] = [
    // +y
    [
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, 0.5, 0.5],
        [0.5, 0.5, 0.5],
    ],
    // -y
    [
        [0.5, -0.5, 0.5],
        [-0.5, -0.5, 0.5],
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
    ],
    // +z
    [
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
    ],
    // -z
    [
        [0.5, -0.5, -0.5],
        [-0.5, -0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
    ],
    // +x
    [
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, -0.5, -0.5],
    ],
    // -x
    [
        [-0.5, 0.5, 0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, -0.5],
        [-0.5, -0.5, 0.5],
    ],
];

/// Splits a face quad into two triangles, as indices into its corners.
pub const FACE_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];

impl VoxelFace {
    /// All the faces, in the order the surface extraction emits them.
    pub const ALL: [VoxelFace; 6] = [
        VoxelFace::PosY,
        VoxelFace::NegY,
        VoxelFace::PosZ,
        VoxelFace::NegZ,
        VoxelFace::PosX,
        VoxelFace::NegX,
    ];

    /// The position of this face in [`VoxelFace::ALL`].
    #[inline]
    pub const fn id(self) -> usize {
        self as usize
    }

    /// The coordinate axis this face is orthogonal to.
    #[inline]
    pub const fn axis(self) -> usize {
        match self {
            VoxelFace::PosX | VoxelFace::NegX => 0,
            VoxelFace::PosY | VoxelFace::NegY => 1,
            VoxelFace::PosZ | VoxelFace::NegZ => 2,
        }
    }

    /// The step, `+1` or `-1`, to the neighbor voxel across this face.
    #[inline]
    pub const fn step(self) -> isize {
        match self {
            VoxelFace::PosX | VoxelFace::PosY | VoxelFace::PosZ => 1,
            VoxelFace::NegX | VoxelFace::NegY | VoxelFace::NegZ => -1,
        }
    }

    /// The flag identifying this face in a [`FaceMask`].
    #[inline]
    pub const fn mask(self) -> FaceMask {
        match self {
            VoxelFace::PosX => FaceMask::X_POS,
            VoxelFace::NegX => FaceMask::X_NEG,
            VoxelFace::PosY => FaceMask::Y_POS,
            VoxelFace::NegY => FaceMask::Y_NEG,
            VoxelFace::PosZ => FaceMask::Z_POS,
            VoxelFace::NegZ => FaceMask::Z_NEG,
        }
    }

    /// The outward unit normal of this face.
    #[inline]
    pub fn normal(self) -> Vector<Real> {
        let mut normal = Vector::zeros();
        normal[self.axis()] = self.step() as Real;
        normal
    }

    /// The four corners of this face on a voxel of unit size centered at the origin.
    #[inline]
    pub fn unit_corners(self) -> [Vector<Real>; 4] {
        FACE_CORNERS[self.id()].map(|c| Vector::new(c[0], c[1], c[2]))
    }

    /// The coordinates of the neighbor across this face of the voxel `key`, if it lies
    /// inside a volume of dimensions `dims`.
    ///
    /// The step is bounds-checked before being applied: no coordinate ever wraps around.
    #[inline]
    pub fn neighbor(self, key: [usize; 3], dims: [usize; 3]) -> Option<[usize; 3]> {
        let axis = self.axis();
        let coord = key[axis].checked_add_signed(self.step())?;

        if coord < dims[axis] {
            let mut result = key;
            result[axis] = coord;
            Some(result)
        } else {
            None
        }
    }
}
