//! Raylib-based rendering collaborator: conversions, mesh upload, textures,
//! chunk drawing.
// Unsafe is required for Raylib mesh upload in this crate.

use raylib::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use karst_blocks::{MaterialCatalog, MaterialId};
use karst_mesh_cpu::MeshBuild;
use karst_world::{Chunk, ChunkCoord};

pub mod conv {
    use karst_geom::{Aabb, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn vec3_from_rl(v: raylib::prelude::Vector3) -> Vec3 {
        Vec3::new(v.x, v.y, v.z)
    }

    pub fn aabb_to_rl(bb: Aabb) -> raylib::core::math::BoundingBox {
        raylib::core::math::BoundingBox::new(vec3_to_rl(bb.min), vec3_to_rl(bb.max))
    }
}

/// Loaded textures keyed by catalog material key, shared across chunks so
/// every part of the same material binds one GPU texture.
pub struct TextureCache {
    pub map: HashMap<String, Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get_ref(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// One uploaded material batch of a chunk.
pub struct ChunkPart {
    pub mid: MaterialId,
    pub model: Model,
}

/// GPU-resident counterpart of one chunk: models per material plus the
/// placement computed from the chunk coordinate. Dropping the value
/// releases every GPU buffer exactly once (model ownership), which is the
/// whole unload contract.
pub struct ChunkRender {
    pub coord: ChunkCoord,
    pub origin: Vector3,
    pub bbox: raylib::core::math::BoundingBox,
    pub parts: Vec<ChunkPart>,
}

/// Uploads one part's triangle list. The mesh is unindexed (six vertices
/// per face), so the index pointer stays null and raylib draws sequential
/// triangles.
fn upload_part(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    mb: &MeshBuild,
) -> Option<Model> {
    let v_count = mb.vertex_count();
    if v_count == 0 {
        return None;
    }
    let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
    raw.vertexCount = v_count as i32;
    raw.triangleCount = mb.triangle_count() as i32;
    unsafe {
        let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
        let tbytes = (v_count * 2 * std::mem::size_of::<f32>()) as u32;
        raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
        raw.normals = raylib::ffi::MemAlloc(vbytes) as *mut f32;
        raw.texcoords = raylib::ffi::MemAlloc(tbytes) as *mut f32;
        std::ptr::copy_nonoverlapping(mb.pos.as_ptr(), raw.vertices, v_count * 3);
        std::ptr::copy_nonoverlapping(mb.norm.as_ptr(), raw.normals, v_count * 3);
        std::ptr::copy_nonoverlapping(mb.uv.as_ptr(), raw.texcoords, v_count * 2);
    }
    let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
    unsafe {
        mesh.upload(false);
    }
    rl.load_model_from_mesh(thread, unsafe { mesh.make_weak() }).ok()
}

/// Resolves the texture for a material: the configured file when it exists,
/// otherwise a generated checkerboard so a missing asset degrades the look
/// without blocking the chunk (load failures are non-fatal).
fn resolve_texture<'a>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    tex_cache: &'a mut TextureCache,
    mats: &MaterialCatalog,
    mid: MaterialId,
) -> Option<&'a Texture2D> {
    let mat = mats.get(mid)?;
    let key = mat.key.clone();
    if !tex_cache.map.contains_key(&key) {
        let loaded = match &mat.texture {
            Some(path) if Path::new(path).exists() => {
                rl.load_texture(thread, &path.to_string_lossy()).ok()
            }
            _ => None,
        };
        let tex = match loaded {
            Some(t) => t,
            None => {
                log::warn!(
                    "material {:?} has no loadable texture, using checkerboard",
                    key
                );
                let img = Image::gen_image_checked(64, 64, 8, 8, Color::LIGHTGRAY, Color::GRAY);
                rl.load_texture_from_image(thread, &img).ok()?
            }
        };
        tex.set_texture_filter(thread, raylib::consts::TextureFilter::TEXTURE_FILTER_POINT);
        tex.set_texture_wrap(thread, raylib::consts::TextureWrap::TEXTURE_WRAP_REPEAT);
        tex_cache.map.insert(key.clone(), tex);
    }
    tex_cache.get_ref(&key)
}

/// Uploads a chunk's CPU mesh as one model per material and binds each
/// material's albedo texture.
pub fn upload_chunk_mesh(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    chunk: &Chunk,
    tex_cache: &mut TextureCache,
    mats: &MaterialCatalog,
) -> Option<ChunkRender> {
    let mut parts: Vec<ChunkPart> = Vec::new();
    for (&mid, mb) in chunk.mesh().parts.iter() {
        let Some(mut model) = upload_part(rl, thread, mb) else {
            continue;
        };
        if let Some(mat) = model.materials_mut().get_mut(0) {
            if let Some(tex) = resolve_texture(rl, thread, tex_cache, mats, mid) {
                mat.set_material_texture(
                    raylib::consts::MaterialMapIndex::MATERIAL_MAP_ALBEDO,
                    tex,
                );
            }
        }
        parts.push(ChunkPart { mid, model });
    }
    Some(ChunkRender {
        coord: chunk.coord(),
        origin: conv::vec3_to_rl(chunk.origin()),
        bbox: conv::aabb_to_rl(chunk.bounds()),
        parts,
    })
}

/// Issues every uploaded chunk at its placement origin. Order does not
/// matter: chunk volumes are disjoint.
pub fn draw_chunks<'a, D: RaylibDraw3D>(
    d3: &mut D,
    renders: impl Iterator<Item = &'a ChunkRender>,
) {
    for cr in renders {
        for part in &cr.parts {
            d3.draw_model(&part.model, cr.origin, 1.0, Color::WHITE);
        }
    }
}
