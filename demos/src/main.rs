// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a scroll through the standard story and writes every frame as SVG.
//!
//! ```text
//! RUST_LOG=scrolly_story=debug cargo run -p scrolly_demos -- --out frames
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::{Point, Size};
use scrolly_scene::to_svg;
use scrolly_story::{
    Environment, HostEvent, Orchestrator, PanelTag, StoryConfig, StoryModel, load_features,
    load_rows,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a scroll through a story and dump SVG frames")]
struct Args {
    /// GeoJSON feature collection
    #[arg(long, default_value = "demos/data/regions.geojson")]
    features: PathBuf,

    /// JSON array of rows
    #[arg(long, default_value = "demos/data/ratings.json")]
    rows: PathBuf,

    /// Optional JSON story config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "target/scrolly_frames")]
    out: PathBuf,

    /// Viewport width
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Scroll distance per frame, in viewport heights
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Host time between frames, in milliseconds
    #[arg(long, default_value_t = 400.0)]
    frame_ms: f64,

    /// Row to select once the bar is visible
    #[arg(long)]
    select: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("scroll_replay=info".parse()?),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.step > 0.0, "--step must be positive");

    let config = match &args.config {
        Some(path) => StoryConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => StoryConfig::default(),
    };
    let features = load_features(&args.features)
        .with_context(|| format!("reading features {}", args.features.display()))?;
    let rows =
        load_rows(&args.rows).with_context(|| format!("reading rows {}", args.rows.display()))?;
    let model = StoryModel::new(features, rows)?;

    let viewport = Size::new(args.width, args.height);
    let mut story = Orchestrator::standard(model, &config)?;
    story.init(Environment::new(viewport), 0.0);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let mut now = 0.0;
    let mut y = 0.0;
    let mut frame = 0_usize;
    let mut selected = false;
    let end = story.container_height() - viewport.height;
    while y <= end {
        let report = story.handle_event(HostEvent::Scroll { y }, now);
        for (tag, transition) in &report.transitions {
            info!(
                frame,
                y,
                panel = tag.as_str(),
                from = transition.from,
                to = transition.to,
                "transition"
            );
        }

        if let Some(index) = args.select {
            if !selected && story.state_of(PanelTag::MAP) == Some("splitbar") {
                story.select(index, now)?;
                selected = true;
                info!(frame, row = index, "selected row");
            }
        }
        if story.state_of(PanelTag::MAP) == Some("hover") {
            let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
            if story
                .handle_event(HostEvent::PointerMove { position: center }, now)
                .hover_changed
            {
                info!(frame, hovered = ?story.model().hovered(), "pointer moved");
            }
        }

        write_frame(&story, &args.out, frame, now)?;
        frame += 1;
        now += args.frame_ms;
        y += viewport.height * args.step;
    }

    for marker in story.markers() {
        info!(
            panel = marker.tag.as_str(),
            display_point = marker.display_point,
            major = marker.major,
            "marker"
        );
    }
    info!(frames = frame, out = %args.out.display(), "done");
    Ok(())
}

fn write_frame(story: &Orchestrator, out: &Path, index: usize, now: f64) -> Result<()> {
    let frame = story.render(now);
    for (tag, scene) in &frame.scenes {
        let path = out.join(format!("frame_{index:04}_{}.svg", tag.as_str()));
        fs::write(&path, to_svg(scene)).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
