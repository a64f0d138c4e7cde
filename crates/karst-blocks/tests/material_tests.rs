use karst_blocks::{Block, BlockKind, MaterialCatalog, MaterialId};

const CATALOG: &str = r#"
[materials]
default = "assets/blocks/default.png"
bare = {}

[kinds]
default = "default"
"#;

#[test]
fn ids_are_assigned_in_sorted_key_order() {
    let cat = MaterialCatalog::from_toml_str(CATALOG).unwrap();
    // "bare" < "default" lexicographically, so it gets id 0.
    assert_eq!(cat.get_id("bare"), Some(MaterialId(0)));
    assert_eq!(cat.get_id("default"), Some(MaterialId(1)));
    assert_eq!(cat.get_id("missing"), None);

    // Same input, same ids, regardless of map iteration order.
    let again = MaterialCatalog::from_toml_str(CATALOG).unwrap();
    assert_eq!(again.get_id("bare"), Some(MaterialId(0)));
    assert_eq!(again.get_id("default"), Some(MaterialId(1)));
}

#[test]
fn kind_table_resolves_to_mapped_material() {
    let cat = MaterialCatalog::from_toml_str(CATALOG).unwrap();
    let mid = cat.material_for_kind(BlockKind::Default);
    assert_eq!(mid, cat.get_id("default").unwrap());
    let mat = cat.get(mid).unwrap();
    assert_eq!(mat.key, "default");
    assert!(mat.texture.is_some());
    assert!(cat.get(MaterialId(0)).unwrap().texture.is_none());
}

#[test]
fn unmapped_kind_falls_back_to_material_zero() {
    let cat = MaterialCatalog::from_toml_str(
        r#"
[materials]
default = "assets/blocks/default.png"
"#,
    )
    .unwrap();
    assert_eq!(cat.material_for_kind(BlockKind::Default), MaterialId(0));
}

#[test]
fn kind_mapping_to_unknown_material_is_an_error() {
    let err = MaterialCatalog::from_toml_str(
        r#"
[materials]
default = "assets/blocks/default.png"

[kinds]
default = "nope"
"#,
    );
    assert!(err.is_err());
}

#[test]
fn block_defaults_are_inactive() {
    assert_eq!(Block::default(), Block::EMPTY);
    assert!(!Block::EMPTY.active);
    let b = Block::solid(BlockKind::Default);
    assert!(b.active);
    assert_eq!(b.kind, BlockKind::Default);
}
