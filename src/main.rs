use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use raylib::core::audio::RaylibAudio;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod audio;
mod config;
mod confetti;
mod constants;
mod error;
mod input;
mod layout;
mod page;
mod presentation;
mod render;
mod slide;
mod slider;
mod state;
mod texture_loader;
mod timer;
mod typewriter;

use crate::audio::MusicTrack;
use crate::config::Settings;
use crate::constants::*;
use crate::input::{InputPoller, InputRouter};
use crate::layout::Layout;
use crate::presentation::Presentation;
use crate::render::Renderer;
use crate::texture_loader::load_gallery;

/// Interactive greeting presentation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Settings file (defaults to ./greeting.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the gallery images
    #[arg(short, long)]
    gallery: Option<PathBuf>,

    /// Background music file
    #[arg(short, long)]
    music: Option<PathBuf>,

    /// Start in fullscreen
    #[arg(short, long)]
    fullscreen: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    if let Some(gallery) = args.gallery {
        settings.gallery_dir = gallery;
    }
    if let Some(music) = args.music {
        settings.music = Some(music);
    }
    settings.fullscreen |= args.fullscreen;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&settings.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if settings.fullscreen {
        rl.toggle_fullscreen();
    }

    // --- Load Gallery and Music ---
    let gallery = load_gallery(&mut rl, &thread, &settings.gallery_dir);

    let audio_device = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("audio device unavailable: {:?}", e);
            None
        }
    };
    let track = match (audio_device.as_ref(), settings.music.as_deref()) {
        (Some(device), Some(path)) => MusicTrack::open(device, path)
            .inspect_err(|e| warn!("{e}"))
            .ok(),
        _ => None,
    };

    let renderer = Renderer::new(gallery.textures);
    let mut presentation = Presentation::new(&settings, gallery.sources, track);
    let mut router = InputRouter::new(Layout::default());
    let mut poller = InputPoller::default();

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;

    presentation.start();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        for event in poller.poll(&rl) {
            router.handle(event, &mut presentation);
        }
        presentation.update(dt);

        // --- Render each frame into fixed size "framebuffer" ---
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            renderer.draw(&mut d, &presentation, router.layout());
        });

        // Draw inverted copy of framebuffer scaled to the window
        let mut d2 = rl.begin_drawing(&thread);
        let sw = d2.get_screen_width() as f32;
        let sh = d2.get_screen_height() as f32;
        d2.clear_background(Color::BLACK);
        d2.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, -(RENDER_HEIGHT as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!("window closed");
    Ok(())
}
