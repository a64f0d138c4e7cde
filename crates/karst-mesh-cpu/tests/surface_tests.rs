use karst_blocks::{BlockKind, MaterialCatalog};
use karst_mesh_cpu::{Face, extract_surface};
use karst_voxel::VoxelGrid;

fn catalog() -> MaterialCatalog {
    MaterialCatalog::from_toml_str(
        r#"
[materials]
default = "assets/blocks/default.png"

[kinds]
default = "default"
"#,
    )
    .unwrap()
}

#[test]
fn lone_block_emits_all_six_faces() {
    let mut grid = VoxelGrid::new(4);
    grid.set_active(1, 1, 1, true);
    let mesh = extract_surface(&grid, &catalog());

    assert_eq!(mesh.triangle_count(), 12);
    let mb = mesh.parts.values().next().unwrap();
    assert_eq!(mb.vertex_count(), 36);
    assert_eq!(mb.pos.len(), 36 * 3);
    assert_eq!(mb.norm.len(), 36 * 3);
    assert_eq!(mb.uv.len(), 36 * 2);

    // Each axis direction appears as a face-constant normal on 6 vertices.
    for face in Face::ALL {
        let n = face.normal();
        let count = mb
            .norm
            .chunks_exact(3)
            .filter(|c| c[0] == n.x && c[1] == n.y && c[2] == n.z)
            .count();
        assert_eq!(count, 6, "face {:?}", face);
    }
}

#[test]
fn shared_face_between_neighbors_is_culled() {
    let mut grid = VoxelGrid::new(4);
    grid.set_active(0, 0, 0, true);
    grid.set_active(1, 0, 0, true);
    let mesh = extract_surface(&grid, &catalog());
    // Five exposed faces per block; the touching pair is hidden.
    assert_eq!(mesh.triangle_count(), 20);
}

#[test]
fn interior_blocks_of_a_solid_grid_emit_nothing() {
    let size = 4;
    let mut grid = VoxelGrid::new(size);
    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                grid.set_active(x, y, z, true);
            }
        }
    }
    let mesh = extract_surface(&grid, &catalog());
    // Only the outer shell survives: 6 * size^2 faces, 2 triangles each.
    assert_eq!(mesh.triangle_count(), 6 * size * size * 2);
}

#[test]
fn cavity_walls_face_inward() {
    let size = 3;
    let mut grid = VoxelGrid::new(size);
    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                grid.set_active(x, y, z, true);
            }
        }
    }
    // Hollow out the center: its six neighbors each gain exactly one face.
    grid.set_active(1, 1, 1, false);
    let mesh = extract_surface(&grid, &catalog());
    assert_eq!(mesh.triangle_count(), (6 * size * size + 6) * 2);
}

#[test]
fn extraction_is_idempotent() {
    let mut grid = VoxelGrid::new(8);
    grid.fill_floor(BlockKind::Default);
    grid.set_active(3, 1, 3, true);
    grid.set_active(3, 2, 3, true);
    grid.set_active(4, 1, 3, true);

    let mats = catalog();
    let first = extract_surface(&grid, &mats);
    let second = extract_surface(&grid, &mats);
    assert_eq!(first.parts.len(), second.parts.len());
    for (mid, mb) in &first.parts {
        let other = &second.parts[mid];
        assert_eq!(mb.pos, other.pos);
        assert_eq!(mb.norm, other.norm);
        assert_eq!(mb.uv, other.uv);
    }
}

#[test]
fn triangles_wind_outward() {
    let mut grid = VoxelGrid::new(2);
    grid.set_active(0, 0, 0, true);
    let mesh = extract_surface(&grid, &catalog());
    let mb = mesh.parts.values().next().unwrap();

    for t in 0..mb.triangle_count() {
        let v = |i: usize| {
            let o = (t * 3 + i) * 3;
            [mb.pos[o], mb.pos[o + 1], mb.pos[o + 2]]
        };
        let (a, b, c) = (v(0), v(1), v(2));
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let cross = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let o = t * 3 * 3;
        let n = [mb.norm[o], mb.norm[o + 1], mb.norm[o + 2]];
        let along = cross[0] * n[0] + cross[1] * n[1] + cross[2] * n[2];
        assert!(along > 0.0, "triangle {} winds against its normal", t);
    }
}

#[test]
fn uvs_stay_on_the_unit_square() {
    let mut grid = VoxelGrid::new(2);
    grid.set_active(1, 0, 1, true);
    let mesh = extract_surface(&grid, &catalog());
    let mb = mesh.parts.values().next().unwrap();
    assert!(mb.uv.iter().all(|&u| u == 0.0 || u == 1.0));
    // Every face carries the same two-triangle UV pattern.
    for face in mb.uv.chunks_exact(12) {
        assert_eq!(face, &[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }
}
