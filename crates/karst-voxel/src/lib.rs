//! Chunk-local dense voxel storage.
#![forbid(unsafe_code)]

use karst_blocks::{Block, BlockKind};

/// Fixed-size cube of blocks, addressed by `(x, y, z)` each in `[0, size)`.
/// Every in-range address holds a defined block; there is no sparse form.
///
/// In-range addressing is a caller precondition. Debug builds assert it;
/// release builds index unchecked (out of range panics on the slice access).
/// Callers that cannot guarantee range use [`VoxelGrid::get`].
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    size: usize,
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// All-inactive grid with edge length `size`.
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "grid size must be positive");
        Self {
            size,
            blocks: vec![Block::EMPTY; size * size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            self.contains(x, y, z),
            "voxel address ({x},{y},{z}) outside [0,{})",
            self.size
        );
        (y * self.size + z) * self.size + x
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.size && y < self.size && z < self.size
    }

    #[inline]
    pub fn is_active(&self, x: usize, y: usize, z: usize) -> bool {
        self.blocks[self.idx(x, y, z)].active
    }

    #[inline]
    pub fn set_active(&mut self, x: usize, y: usize, z: usize, active: bool) {
        let i = self.idx(x, y, z);
        self.blocks[i].active = active;
    }

    #[inline]
    pub fn set_kind(&mut self, x: usize, y: usize, z: usize, kind: BlockKind) {
        let i = self.idx(x, y, z);
        self.blocks[i].kind = kind;
    }

    /// Checked read; `None` outside the grid. This is the neighbor probe
    /// the mesher uses at block faces.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Block> {
        if self.contains(x, y, z) {
            Some(self.blocks[(y * self.size + z) * self.size + x])
        } else {
            None
        }
    }

    /// Activates the whole `y == 0` layer. Chunk generation seeds new
    /// grids with this floor slab.
    pub fn fill_floor(&mut self, kind: BlockKind) {
        for z in 0..self.size {
            for x in 0..self.size {
                let i = self.idx(x, 0, z);
                self.blocks[i] = Block::solid(kind);
            }
        }
    }

    #[inline]
    pub fn is_all_inactive(&self) -> bool {
        self.blocks.iter().all(|b| !b.active)
    }
}
