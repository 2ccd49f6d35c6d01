//! Mesh storage: vertex positions, triangular faces and the per-mesh transform.
//!
//! Faces use 1-based vertex indices, the convention of OBJ files. Indices are
//! only converted to 0-based at lookup time, in [`Mesh::face_vertices`].

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use obj::raw::object::Polygon;

use crate::math::vec3::Vec3;

/// A triangle made of three 1-based indices into a mesh's vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

pub const CUBE_FACES: [Face; 12] = [
    // Front
    Face::new(1, 2, 3),
    Face::new(1, 3, 4),
    // Right
    Face::new(4, 3, 5),
    Face::new(4, 5, 6),
    // Back
    Face::new(6, 5, 7),
    Face::new(6, 7, 8),
    // Left
    Face::new(8, 7, 2),
    Face::new(8, 2, 1),
    // Top
    Face::new(2, 7, 5),
    Face::new(2, 5, 3),
    // Bottom
    Face::new(6, 8, 1),
    Face::new(6, 1, 4),
];

#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be opened or read.
    Io(std::io::Error),
    /// A record could not be parsed.
    Obj(obj::ObjError),
    /// The file parsed but contained no faces.
    Empty,
    /// A face record with fewer than three vertices.
    DegenerateFace { face: usize, arity: u32 },
    /// A face refers to a vertex that does not exist.
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "failed to read OBJ data: {}", err),
            LoadError::Obj(err) => write!(f, "failed to parse OBJ data: {}", err),
            LoadError::Empty => write!(f, "mesh has no faces"),
            LoadError::DegenerateFace { face, arity } => {
                write!(f, "face {} has only {} vertices", face, arity)
            }
            LoadError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} uses vertex index {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Obj(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<obj::ObjError> for LoadError {
    fn from(err: obj::ObjError) -> Self {
        LoadError::Obj(err)
    }
}

/// A triangle mesh plus the rotation, scale and translation applied to it
/// every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    rotation: Vec3, // Euler angles in radians
    scale: Vec3,
    translation: Vec3,
}

impl Mesh {
    /// Builds a mesh after checking every face index lies in `1..=vertices.len()`.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, LoadError> {
        if faces.is_empty() {
            return Err(LoadError::Empty);
        }

        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            for index in face.indices() {
                if index == 0 || index as usize > vertex_count {
                    return Err(LoadError::FaceIndexOutOfRange {
                        face: face_index,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            faces,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
        })
    }

    /// The built-in unit cube: 8 corners at ±1 and 12 triangles.
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
        }
    }

    /// Loads a mesh from an OBJ file on disk.
    pub fn from_obj<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path> + fmt::Debug,
    {
        let file = File::open(&path)?;
        let mesh = Self::from_obj_buf(&mut BufReader::new(file))?;
        log::info!(
            "Loaded {:?}: {} vertices, {} faces",
            path,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Loads a mesh from OBJ text. Material libraries are not read.
    ///
    /// Every `v` record becomes a vertex, in file order. Every `f` record
    /// becomes one face made of its first three position indices, exactly as
    /// written in the file; texture and normal indices are ignored.
    pub fn from_obj_buf<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        check_face_arity(&source)?;

        let raw = obj::raw::parse_obj(source.as_bytes())?;

        let vertices = raw
            .positions
            .iter()
            .map(|&(x, y, z, _)| Vec3::new(x, y, z))
            .collect();

        let mut faces = Vec::with_capacity(raw.polygons.len());
        for (face, polygon) in raw.polygons.iter().enumerate() {
            let corners = polygon_positions(polygon);
            let [a, b, c] = match corners[..] {
                [a, b, c, ..] => [a, b, c],
                _ => {
                    return Err(LoadError::DegenerateFace {
                        face,
                        arity: corners.len() as u32,
                    })
                }
            };
            faces.push(Face::new(one_based(a), one_based(b), one_based(c)));
        }

        Self::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Looks up a vertex by its 1-based index.
    pub fn vertex(&self, index: u32) -> Option<Vec3> {
        let zero_based = (index as usize).checked_sub(1)?;
        self.vertices.get(zero_based).copied()
    }

    /// The three corner positions of `face`.
    pub fn face_vertices(&self, face: &Face) -> Option<[Vec3; 3]> {
        Some([
            self.vertex(face.a)?,
            self.vertex(face.b)?,
            self.vertex(face.c)?,
        ])
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Adds `delta` to the rotation angles.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation = self.rotation + delta;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }
}

/// Rejects face records with fewer than three corners before parsing, so they
/// are reported as degenerate faces rather than generic syntax errors.
fn check_face_arity(source: &str) -> Result<(), LoadError> {
    let mut face = 0;
    for line in source.lines() {
        let record = line.split('#').next().unwrap_or("");
        let mut fields = record.split_whitespace();
        if fields.next() != Some("f") {
            continue;
        }

        let arity = fields.count();
        if arity < 3 {
            return Err(LoadError::DegenerateFace {
                face,
                arity: arity as u32,
            });
        }
        face += 1;
    }
    Ok(())
}

/// Position indices (0-based) of every corner of a face record.
fn polygon_positions(polygon: &Polygon) -> Vec<usize> {
    match polygon {
        Polygon::P(corners) => corners.clone(),
        Polygon::PT(corners) | Polygon::PN(corners) => {
            corners.iter().map(|&(position, _)| position).collect()
        }
        Polygon::PTN(corners) => corners.iter().map(|&(position, _, _)| position).collect(),
    }
}

/// Back to the 1-based numbering of the file. Indices that do not fit are
/// left for `Mesh::new` to reject.
fn one_based(index: usize) -> u32 {
    u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX)
}
