use std::error::Error;

use hashbrown::HashMap;
use raylib::prelude::*;

use karst_blocks::MaterialCatalog;
use karst_geom::Vec3;
use karst_physics::{PlayerController, PlayerParams};
use karst_render_raylib::conv::vec3_to_rl;
use karst_render_raylib::{ChunkRender, TextureCache, draw_chunks, upload_chunk_mesh};
use karst_world::{ChunkCoord, ChunkManager};

use crate::config::AppConfig;
use crate::input;

pub struct App {
    mats: MaterialCatalog,
    manager: ChunkManager,
    player: PlayerController,
    renders: HashMap<ChunkCoord, ChunkRender>,
    tex_cache: TextureCache,
    captured: bool,
    show_grid: bool,
}

impl App {
    pub fn new(cfg: &AppConfig) -> Result<Self, Box<dyn Error>> {
        // A broken or missing material table degrades the look, it does not
        // block the world.
        let mats = match MaterialCatalog::from_path(&cfg.assets.materials) {
            Ok(m) => m,
            Err(e) => {
                log::warn!(
                    "failed to load materials {}: {}; rendering untextured",
                    cfg.assets.materials.display(),
                    e
                );
                MaterialCatalog::new()
            }
        };

        let s = cfg.player.spawn;
        let player = PlayerController::new(PlayerParams {
            mass: cfg.player.mass,
            spawn: Vec3::new(s[0], s[1], s[2]),
            gravity: cfg.player.gravity,
            jump_scale: cfg.player.jump_scale,
            move_force: cfg.player.move_force,
            mouse_sensitivity: cfg.player.mouse_sensitivity,
            eye_height: cfg.player.eye_height,
        })?;

        Ok(Self {
            mats,
            manager: ChunkManager::new(cfg.world.chunk_size, cfg.world.render_distance),
            player,
            renders: HashMap::new(),
            tex_cache: TextureCache::new(),
            captured: true,
            show_grid: true,
        })
    }

    /// One simulation step: input, player physics, chunk streaming from
    /// the new position, then GPU sync of whatever changed. Everything
    /// runs inline on this thread before the frame presents.
    pub fn step(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, dt: f32) {
        if rl.is_key_pressed(KeyboardKey::KEY_TAB) {
            self.captured = !self.captured;
            if self.captured {
                rl.disable_cursor();
            } else {
                rl.enable_cursor();
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_G) {
            self.show_grid = !self.show_grid;
        }

        let frame = input::gather(rl, self.captured);
        self.player.update(&frame, dt);

        let update = self.manager.update(self.player.position(), &self.mats);
        for coord in &update.evicted {
            // Dropping the render entry releases its GPU buffers.
            self.renders.remove(coord);
        }

        let mut stale = update.created;
        stale.extend(self.manager.rebuild_dirty(&self.mats));
        for coord in stale {
            let Some(chunk) = self.manager.chunk(coord) else {
                continue;
            };
            if let Some(cr) = upload_chunk_mesh(rl, thread, chunk, &mut self.tex_cache, &self.mats)
            {
                // Insert replaces (and thereby releases) any prior upload.
                self.renders.insert(coord, cr);
            }
        }
    }

    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let camera = Camera3D::perspective(
            vec3_to_rl(self.player.eye_position()),
            vec3_to_rl(self.player.look_target()),
            Vector3::up(),
            70.0,
        );

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::SKYBLUE);
        {
            let mut d3 = d.begin_mode3D(camera);
            if self.show_grid {
                d3.draw_grid(64, 1.0);
            }
            draw_chunks(&mut d3, self.renders.values());
        }

        let pos = self.player.position();
        d.draw_text(
            &format!(
                "pos {:6.1} {:6.1} {:6.1}  {:?}  chunks {}",
                pos.x,
                pos.y,
                pos.z,
                self.player.state(),
                self.manager.len()
            ),
            12,
            12,
            20,
            Color::DARKGRAY,
        );
        d.draw_fps(12, 40);
    }
}
