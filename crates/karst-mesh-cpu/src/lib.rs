//! CPU surface extraction: voxel grid in, culled triangle list out.
#![forbid(unsafe_code)]

use std::collections::HashMap;

use karst_blocks::{MaterialCatalog, MaterialId};
use karst_voxel::VoxelGrid;

mod face;

pub use face::Face;

/// UVs for the four quad corners returned by [`Face::corners`].
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Corner indices of the two triangles a quad decomposes into. Vertices are
/// duplicated on purpose: the mesh is an unindexed triangle list.
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Flat vertex arrays for one material. `pos`/`norm` hold three floats per
/// vertex, `uv` two; all are index-aligned and every three consecutive
/// vertices form one triangle.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
}

impl MeshBuild {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Emits one block face at grid cell `(x,y,z)`: two triangles, six
    /// vertices, face-constant normal, fixed unit-square UVs. Corner
    /// coordinates are exact small integers, so repeat extraction of the
    /// same grid is bit-identical.
    pub fn add_face(&mut self, face: Face, x: usize, y: usize, z: usize) {
        let corners = face.corners();
        let n = face.normal();
        for &ci in QUAD_TRIANGLES.iter() {
            let c = corners[ci];
            self.pos
                .extend_from_slice(&[x as f32 + c[0], y as f32 + c[1], z as f32 + c[2]]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&CORNER_UVS[ci]);
        }
    }
}

/// Extracted surface of one chunk, split per material.
#[derive(Default, Clone, Debug)]
pub struct ChunkMeshCpu {
    pub parts: HashMap<MaterialId, MeshBuild>,
}

impl ChunkMeshCpu {
    pub fn triangle_count(&self) -> usize {
        self.parts.values().map(|mb| mb.triangle_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.values().all(|mb| mb.is_empty())
    }
}

/// Whether the block face at `(x,y,z)` toward `face` is hidden by its
/// neighbor. Only an in-bounds, active neighbor culls; at the grid boundary
/// there is no neighbor lookup, so boundary faces are always emitted
/// (adjacent chunks mesh independently, seams and all).
#[inline]
fn occluded(grid: &VoxelGrid, x: usize, y: usize, z: usize, face: Face) -> bool {
    let (dx, dy, dz) = face.delta();
    let nx = x as i32 + dx;
    let ny = y as i32 + dy;
    let nz = z as i32 + dz;
    if nx < 0 || ny < 0 || nz < 0 {
        return false;
    }
    grid.get(nx as usize, ny as usize, nz as usize)
        .is_some_and(|b| b.active)
}

/// Builds the exposed surface of `grid` as per-material triangle lists.
///
/// Every active block contributes each of its six faces unless the face's
/// immediate neighbor occludes it. Pure function of grid content: unchanged
/// input yields an identical mesh. O(size^3) block visits with O(1) work
/// per face; runs inline on the calling thread once per chunk lifecycle
/// event, not per frame.
pub fn extract_surface(grid: &VoxelGrid, mats: &MaterialCatalog) -> ChunkMeshCpu {
    let mut parts: HashMap<MaterialId, MeshBuild> = HashMap::new();
    let size = grid.size();
    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                let Some(block) = grid.get(x, y, z) else {
                    continue;
                };
                if !block.active {
                    continue;
                }
                let mid = mats.material_for_kind(block.kind);
                for face in Face::ALL {
                    if !occluded(grid, x, y, z, face) {
                        parts.entry(mid).or_default().add_face(face, x, y, z);
                    }
                }
            }
        }
    }
    ChunkMeshCpu { parts }
}
