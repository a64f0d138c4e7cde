use std::path::PathBuf;

use clap::Parser;

mod app;
mod config;
mod input;

#[derive(Parser, Debug)]
#[command(name = "karst", about = "Streamed voxel world with a first-person physics controller")]
struct Args {
    /// Config file path
    #[arg(long, default_value = "karst.toml")]
    config: PathBuf,
    /// Override the render distance in chunks
    #[arg(long)]
    render_distance: Option<i32>,
    /// Override the window title
    #[arg(long)]
    title: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("failed to load config {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(rd) = args.render_distance {
        cfg.world.render_distance = rd;
    }
    if let Some(title) = args.title {
        cfg.window.title = title;
    }

    let (mut rl, thread) = raylib::init()
        .size(cfg.window.width, cfg.window.height)
        .title(&cfg.window.title)
        .msaa_4x()
        .build();
    rl.set_target_fps(cfg.window.target_fps);
    rl.disable_cursor();

    let mut app = match app::App::new(&cfg) {
        Ok(app) => app,
        Err(e) => {
            log::error!("failed to initialize: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "karst up: chunk size {}, render distance {}",
        cfg.world.chunk_size,
        cfg.world.render_distance
    );

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        app.step(&mut rl, &thread, dt);
        app.render(&mut rl, &thread);
    }
}
