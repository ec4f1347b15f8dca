//! Triangle-mesh model provider backed by the `tobj` OBJ loader.
//!
//! The pipeline only ever asks for vertex positions, per-face vertex
//! indices, and per-face-vertex normals and UVs, so the loader flattens
//! every mesh in the file into one indexed soup up front.

use std::error::Error;
use std::path::Path;

use log::info;

use crate::math::{Vec2, Vec3};

pub struct Model {
    verts: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: Vec<[usize; 3]>,
}

impl Model {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let (models, _materials) = tobj::load_obj(
            path.as_ref(),
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut verts = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut faces = Vec::new();

        for m in models {
            let mesh = m.mesh;
            let base = verts.len();
            verts.extend(
                mesh.positions
                    .chunks(3)
                    .map(|v| Vec3::new(v[0], v[1], v[2])),
            );
            // Missing normals fall back to the position direction, which
            // is exact for a sphere around the origin and tolerable
            // elsewhere; missing UVs fall back to zero.
            for i in base..verts.len() {
                let local = i - base;
                let n = mesh
                    .normals
                    .chunks(3)
                    .nth(local)
                    .map(|n| Vec3::new(n[0], n[1], n[2]))
                    .unwrap_or_else(|| verts[i].normalize_or_zero());
                normals.push(n);
                let t = mesh
                    .texcoords
                    .chunks(2)
                    .nth(local)
                    .map(|t| Vec2::new(t[0], t[1]))
                    .unwrap_or(Vec2::ZERO);
                uvs.push(t);
            }
            faces.extend(mesh.indices.chunks(3).filter(|c| c.len() == 3).map(|c| {
                [
                    base + c[0] as usize,
                    base + c[1] as usize,
                    base + c[2] as usize,
                ]
            }));
        }

        info!(
            "loaded {:?}: {} vertices, {} faces",
            path.as_ref(),
            verts.len(),
            faces.len()
        );
        Ok(Self { verts, normals, uvs, faces })
    }

    /// A unit cube centered at the origin, used by the driver when no
    /// model file is available.
    pub fn cube() -> Self {
        let p = [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        let quads: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // back
            [5, 4, 7, 6], // front
            [4, 0, 3, 7], // left
            [1, 5, 6, 2], // right
            [3, 2, 6, 7], // top
            [4, 5, 1, 0], // bottom
        ];
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut verts = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut faces = Vec::new();
        for q in quads {
            let a = p[q[1]] - p[q[0]];
            let b = p[q[3]] - p[q[0]];
            let n = b.cross(a).normalize_or_zero();
            let base = verts.len();
            for (k, &vi) in q.iter().enumerate() {
                verts.push(p[vi]);
                normals.push(n);
                uvs.push(uv[k]);
            }
            faces.push([base, base + 1, base + 2]);
            faces.push([base, base + 2, base + 3]);
        }
        Self { verts, normals, uvs, faces }
    }

    pub fn nverts(&self) -> usize {
        self.verts.len()
    }

    pub fn nfaces(&self) -> usize {
        self.faces.len()
    }

    /// Object-space position of vertex `i`.
    pub fn vert(&self, i: usize) -> Vec3 {
        self.verts[i]
    }

    /// The three vertex indices of face `i`.
    pub fn face(&self, i: usize) -> [usize; 3] {
        self.faces[i]
    }

    pub fn normal(&self, iface: usize, nthvert: usize) -> Vec3 {
        self.normals[self.faces[iface][nthvert]]
    }

    pub fn uv(&self, iface: usize, nthvert: usize) -> Vec2 {
        self.uvs[self.faces[iface][nthvert]]
    }
}
