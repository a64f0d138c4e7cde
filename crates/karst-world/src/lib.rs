//! Chunk identity, ownership, and streaming around an observer.
#![forbid(unsafe_code)]

use hashbrown::{HashMap, HashSet};

use karst_blocks::{BlockKind, MaterialCatalog};
use karst_geom::{Aabb, Vec3};
use karst_mesh_cpu::{ChunkMeshCpu, extract_surface};
use karst_voxel::VoxelGrid;

/// Integer chunk-grid coordinate. Always chunk units; conversion to world
/// space happens once, when a chunk's placement origin is computed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.cx + dx, self.cy + dy, self.cz + dz)
    }

    /// Chunk containing the world-space position. Floors toward negative
    /// infinity, so observers at negative coordinates map correctly
    /// (truncation would collapse (-0.5, 0.5) onto chunk 0).
    #[inline]
    pub fn from_world(pos: Vec3, chunk_size: usize) -> Self {
        let s = chunk_size as f32;
        Self::new(
            (pos.x / s).floor() as i32,
            (pos.y / s).floor() as i32,
            (pos.z / s).floor() as i32,
        )
    }

    /// Copy with the vertical component pinned to the single chunk layer.
    #[inline]
    pub fn flattened(self) -> Self {
        Self::new(self.cx, 0, self.cz)
    }

    /// World-space origin of this chunk's placement.
    #[inline]
    pub fn world_origin(self, chunk_size: usize) -> Vec3 {
        let s = chunk_size as f32;
        Vec3::new(self.cx as f32 * s, self.cy as f32 * s, self.cz as f32 * s)
    }

    /// Chebyshev distance in the horizontal plane.
    #[inline]
    pub fn horizontal_chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }
}

/// One streamed region: a voxel grid, its extracted surface, and the
/// world placement computed once at creation.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    origin: Vec3,
    grid: VoxelGrid,
    mesh: ChunkMeshCpu,
    dirty: bool,
}

impl Chunk {
    /// Creates the chunk, seeds its floor slab, and extracts the initial
    /// mesh inline (synchronous by design; the cubic scan cost lands in
    /// the frame that first requires the chunk).
    pub fn generate(coord: ChunkCoord, chunk_size: usize, mats: &MaterialCatalog) -> Self {
        let mut grid = VoxelGrid::new(chunk_size);
        if coord.cy == 0 {
            grid.fill_floor(BlockKind::Default);
        }
        let mesh = extract_surface(&grid, mats);
        Self {
            coord,
            origin: coord.world_origin(chunk_size),
            grid,
            mesh,
            dirty: false,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    #[inline]
    pub fn mesh(&self) -> &ChunkMeshCpu {
        &self.mesh
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World-space bounds of the chunk volume.
    pub fn bounds(&self) -> Aabb {
        let s = self.grid.size() as f32;
        Aabb::new(Vec3::ZERO, Vec3::splat(s)).offset(self.origin)
    }

    /// Mutates one block and marks the mesh stale. The manager rebuilds
    /// stale meshes before the frame draws, keeping mesh and grid content
    /// consistent at every draw.
    pub fn set_active(&mut self, x: usize, y: usize, z: usize, active: bool) {
        self.grid.set_active(x, y, z, active);
        self.dirty = true;
    }

    /// Re-extracts the surface from current grid content and atomically
    /// replaces the previous mesh.
    pub fn regenerate_mesh(&mut self, mats: &MaterialCatalog) {
        self.mesh = extract_surface(&self.grid, mats);
        self.dirty = false;
    }
}

/// Coordinates created and evicted by one [`ChunkManager::update`] pass.
/// The render side drops or uploads GPU entries from these lists.
#[derive(Default, Clone, Debug)]
pub struct StreamUpdate {
    pub created: Vec<ChunkCoord>,
    pub evicted: Vec<ChunkCoord>,
}

impl StreamUpdate {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty()
    }
}

/// Owns every live chunk, keyed by coordinate. After `update` the present
/// key set is exactly the Chebyshev box of `render_distance` around the
/// observer's flattened chunk coordinate: missing chunks are created
/// inline, out-of-range chunks evicted by set difference.
pub struct ChunkManager {
    chunk_size: usize,
    render_distance: i32,
    chunks: HashMap<ChunkCoord, Chunk>,
    center: Option<ChunkCoord>,
}

impl ChunkManager {
    pub fn new(chunk_size: usize, render_distance: i32) -> Self {
        debug_assert!(chunk_size > 0);
        debug_assert!(render_distance >= 0);
        Self {
            chunk_size,
            render_distance,
            chunks: HashMap::new(),
            center: None,
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Iteration order is unspecified; chunk volumes are disjoint so draw
    /// order does not affect correctness.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Coordinates required around `center`: the inclusive Chebyshev box
    /// of `render_distance`, vertical coordinate pinned to the single layer.
    fn required_set(&self, center: ChunkCoord) -> HashSet<ChunkCoord> {
        let r = self.render_distance;
        let mut required = HashSet::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        for dz in -r..=r {
            for dx in -r..=r {
                required.insert(center.offset(dx, 0, dz));
            }
        }
        required
    }

    /// Re-evaluates the required set from the observer's position, creating
    /// missing chunks and evicting the out-of-range remainder. Idempotent
    /// for an unchanged observer cell: a repeat call creates and evicts
    /// nothing.
    pub fn update(&mut self, observer: Vec3, mats: &MaterialCatalog) -> StreamUpdate {
        let center = ChunkCoord::from_world(observer, self.chunk_size).flattened();
        if self.center == Some(center) {
            return StreamUpdate::default();
        }
        self.center = Some(center);

        let required = self.required_set(center);
        let mut update = StreamUpdate::default();

        for &coord in &required {
            if !self.chunks.contains_key(&coord) {
                let chunk = Chunk::generate(coord, self.chunk_size, mats);
                log::debug!(
                    "generated chunk ({},{},{}) with {} triangles",
                    coord.cx,
                    coord.cy,
                    coord.cz,
                    chunk.mesh().triangle_count()
                );
                self.chunks.insert(coord, chunk);
                update.created.push(coord);
            }
        }

        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|c| !required.contains(*c))
            .copied()
            .collect();
        for coord in stale {
            self.chunks.remove(&coord);
            update.evicted.push(coord);
        }

        if !update.is_noop() {
            log::info!(
                "stream center ({},{}) -> +{} / -{} chunks ({} live)",
                center.cx,
                center.cz,
                update.created.len(),
                update.evicted.len(),
                self.chunks.len()
            );
        }
        update
    }

    /// Regenerates every mesh invalidated by a grid mutation since the
    /// last pass and returns the affected coordinates for re-upload.
    pub fn rebuild_dirty(&mut self, mats: &MaterialCatalog) -> Vec<ChunkCoord> {
        let mut rebuilt = Vec::new();
        for (coord, chunk) in self.chunks.iter_mut() {
            if chunk.is_dirty() {
                chunk.regenerate_mesh(mats);
                rebuilt.push(*coord);
            }
        }
        rebuilt
    }
}
