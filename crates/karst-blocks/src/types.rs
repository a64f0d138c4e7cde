/// Identifies a material in the [`crate::MaterialCatalog`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

/// Block type tag. A single kind exists today; the enum is the extension
/// point for future block kinds, dispatched through the material table
/// rather than per-kind code paths.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum BlockKind {
    #[default]
    Default = 0,
}

impl BlockKind {
    /// Key used to look this kind up in the material table.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Default => "default",
        }
    }
}

/// Smallest voxel unit: occupies space when `active`, carries a kind tag
/// for appearance. Plain value type, mutated in place by its grid.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Block {
    pub active: bool,
    pub kind: BlockKind,
}

impl Block {
    pub const EMPTY: Block = Block {
        active: false,
        kind: BlockKind::Default,
    };

    #[inline]
    pub const fn solid(kind: BlockKind) -> Block {
        Block { active: true, kind }
    }
}
