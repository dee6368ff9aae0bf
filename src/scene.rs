//! Scene-owned geometry and texture storage.
//!
//! The [`Scene`] is the arena: it owns every [`Mesh`], texture [`Buffer`]
//! and [`Object`], and hands out plain index ids. Objects reference their
//! mesh and texture by id, never by pointer, so nothing in the model can
//! dangle or cycle.

use thiserror::Error;
use vek::{Mat4, Vec2, Vec3};

use crate::buffer::Buffer;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("face {face} has {len} indices, expected an even count of at least 6")]
    MalformedFace { face: usize, len: usize },
    #[error("face {face} references position {index} but the mesh has {count}")]
    PositionOutOfRange { face: usize, index: usize, count: usize },
    #[error("face {face} references uv {index} but the mesh has {count}")]
    UvOutOfRange { face: usize, index: usize, count: usize },
}

/// One corner of a face: indices into the mesh's position and uv arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub uv: usize,
}

/// Triangulated-or-polygonal geometry: positions, uvs and faces indexing
/// into them. Faces may be triangles or larger convex polygons.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    positions: Vec<Vec3<f32>>,
    uvs: Vec<Vec2<f32>>,
    faces: Vec<Vec<FaceVertex>>,
}

impl Mesh {
    /// Build a mesh from loader-shaped arrays. Each face is a flat list
    /// `[pos0, uv0, pos1, uv1, ...]` of 0-based indices (OBJ-style loaders
    /// convert from 1-based before handing data over). Faces must have at
    /// least three corners and all indices must be in range.
    pub fn from_arrays(
        positions: Vec<Vec3<f32>>,
        uvs: Vec<Vec2<f32>>,
        packed_faces: &[Vec<usize>],
    ) -> Result<Self, MeshError> {
        let mut faces = Vec::with_capacity(packed_faces.len());

        for (f, packed) in packed_faces.iter().enumerate() {
            if packed.len() % 2 != 0 || packed.len() < 6 {
                return Err(MeshError::MalformedFace { face: f, len: packed.len() });
            }

            let mut face = Vec::with_capacity(packed.len() / 2);
            for pair in packed.chunks_exact(2) {
                let (position, uv) = (pair[0], pair[1]);
                if position >= positions.len() {
                    return Err(MeshError::PositionOutOfRange {
                        face: f,
                        index: position,
                        count: positions.len(),
                    });
                }
                if uv >= uvs.len() {
                    return Err(MeshError::UvOutOfRange { face: f, index: uv, count: uvs.len() });
                }
                face.push(FaceVertex { position, uv });
            }
            faces.push(face);
        }

        Ok(Self { positions, uvs, faces })
    }

    #[inline]
    pub fn faces(&self) -> &[Vec<FaceVertex>] {
        &self.faces
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3<f32> {
        self.positions[i]
    }

    #[inline]
    pub fn uv(&self, i: usize) -> Vec2<f32> {
        self.uvs[i]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(usize);

/// A placed instance: world translation, euler orientation, scale, and ids
/// of the mesh and texture it renders with. The optional flat color seeds
/// per-vertex color (picked up by the line and point rasterizers); polygon
/// color always comes from the texture.
#[derive(Copy, Clone, Debug)]
pub struct Object {
    pub translation: Vec3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub scale: Vec3<f32>,
    pub mesh: MeshId,
    pub texture: TextureId,
    pub color: Option<Vec3<f32>>,
}

impl Object {
    pub fn new(mesh: MeshId, texture: TextureId) -> Self {
        Self {
            translation: Vec3::zero(),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            scale: Vec3::one(),
            mesh,
            texture,
            color: None,
        }
    }

    /// Local-to-world transform: translate, then yaw/pitch/roll, then scale.
    pub fn local_matrix(&self) -> Mat4<f32> {
        Mat4::<f32>::translation_3d(self.translation)
            * Mat4::<f32>::rotation_y(self.yaw)
            * Mat4::<f32>::rotation_x(self.pitch)
            * Mat4::<f32>::rotation_z(self.roll)
            * Mat4::<f32>::scaling_3d(self.scale)
    }
}

/// Owns meshes, textures and objects for the lifetime of a run. Ids are
/// indices into the owning vectors and stay valid for the scene's lifetime
/// (nothing is ever removed).
#[derive(Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    textures: Vec<Buffer>,
    pub objects: Vec<Object>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Textures are 3-channel color buffers with values in [0, 1].
    pub fn add_texture(&mut self, texture: Buffer) -> TextureId {
        assert_eq!(texture.channels(), 3, "textures are 3-channel buffers");
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    #[inline]
    pub fn mesh(&self, id: MeshId) -> &Mesh {
        &self.meshes[id.0]
    }

    #[inline]
    pub fn texture(&self, id: TextureId) -> &Buffer {
        &self.textures[id.0]
    }
}
