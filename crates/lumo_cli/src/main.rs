//! Lumo - render the moving-lights demo to PNG files

mod cli;
mod demo;

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumo_core::RenderConfig;
use lumo_renderer::Renderer;

use cli::{init_logger, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<RenderConfig>(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    args.apply_overrides(&mut config);

    let renderer = Renderer::new(config).context("Invalid render settings")?;
    log::info!(
        "Rendering {} frame(s) at {}x{} with {} workers",
        args.frames,
        args.width,
        args.height,
        renderer.worker_count()
    );

    let camera = demo::camera()?;
    let frame = demo::frame(args.width, args.height)?;
    let mut total_rays = 0u64;

    for n in 0..args.frames {
        let scene = demo::build_scene(demo::light_for_frame(n), args.show_lights, args.extras)?;

        let start = Instant::now();
        let output = renderer
            .render(&scene, &camera, &frame)
            .with_context(|| format!("Frame {n} failed"))?;

        let path = args.frame_path(n);
        output
            .raster
            .to_image()
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        log::info!(
            "Frame {} written to {} in {:.2?} ({} rays)",
            n,
            path.display(),
            start.elapsed(),
            output.stats.total()
        );
        total_rays += output.stats.total();
    }

    log::info!("Done: {total_rays} rays over {} frame(s)", args.frames);
    Ok(())
}
