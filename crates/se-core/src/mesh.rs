//! Local-space geometry for drawables

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::math::{FaceCulling, TriangleHit, intersect_ray_triangle_with};
use crate::primitive::MeshData;

/// Mesh data as handed over by an asset importer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub normals: Option<Vec<[f32; 3]>>,
}

/// Mesh-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Index count {0} is not a multiple of 3")]
    IndexCount(usize),
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Got {normals} normals for {vertices} vertices")]
    NormalCount { normals: usize, vertices: usize },
}

/// Validated triangle mesh in model space
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: BoundingBox,
}

impl Geometry {
    /// Validate an importer record.
    ///
    /// Missing normals are filled with area-weighted vertex normals.
    pub fn from_record(record: MeshRecord) -> Result<Self, MeshError> {
        let MeshRecord {
            positions,
            indices,
            normals,
        } = record;

        if positions.is_empty() || indices.is_empty() {
            tracing::warn!("Rejected mesh record without geometry");
            return Err(MeshError::EmptyMesh);
        }
        if indices.len() % 3 != 0 {
            tracing::warn!(indices = indices.len(), "Rejected mesh record with partial triangle");
            return Err(MeshError::IndexCount(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            tracing::warn!(index, "Rejected mesh record with out-of-range index");
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        if let Some(normals) = &normals
            && normals.len() != positions.len()
        {
            tracing::warn!("Rejected mesh record with mismatched normals");
            return Err(MeshError::NormalCount {
                normals: normals.len(),
                vertices: positions.len(),
            });
        }

        let positions: Vec<Vec3> = positions.into_iter().map(Vec3::from_array).collect();
        let normals = match normals {
            Some(normals) => normals.into_iter().map(Vec3::from_array).collect(),
            None => vertex_normals(&positions, &indices),
        };
        Ok(Self::build(positions, normals, indices))
    }

    /// Wrap output of the built-in primitive generators
    pub fn from_primitive((positions, normals, indices): MeshData) -> Self {
        Self::build(
            positions.into_iter().map(Vec3::from_array).collect(),
            normals.into_iter().map(Vec3::from_array).collect(),
            indices,
        )
    }

    fn build(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = BoundingBox::from_points(positions.iter().copied());
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Bounding box center in model space
    pub fn local_centroid(&self) -> Vec3 {
        self.bounds.center()
    }

    /// Nearest triangle hit of a model-space ray
    pub fn intersect(&self, origin: Vec3, dir: Vec3, culling: FaceCulling) -> Option<TriangleHit> {
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.positions[i as usize]);
                intersect_ray_triangle_with(origin, dir, a, b, c, culling)
            })
            .fold(None, |best: Option<TriangleHit>, hit| match best {
                Some(b) if b.t <= hit.t => Some(b),
                _ => Some(hit),
            })
    }
}

/// Area-weighted vertex normals from triangle faces
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
        .collect()
}
