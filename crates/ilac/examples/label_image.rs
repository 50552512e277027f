//! Label an image from a JSON config holding pre-detected corners and marker
//! centers.
//!
//! ```text
//! cargo run -p ilac --example label_image -- config.json
//! ```

use std::{env, fs};

use ilac::core::{FixedCorners, FixedMarkers, Point2};
use ilac::detect::hue_plane_from_rgb;
use ilac::{BoardLabeler, LabelerParams};
use image::ImageReader;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ExampleConfig {
    image_path: String,
    params: LabelerParams,
    /// Row-major inner corners from an external detector.
    corners: Vec<[f32; 2]>,
    /// Reference-sphere centers; leave empty to skip the ordering.
    #[serde(default)]
    markers: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
struct LabelOutput {
    identifier: String,
    words: Vec<u16>,
    cell_hues: Vec<f32>,
    reference: Option<[[f32; 2]; 4]>,
}

fn points(raw: &[[f32; 2]]) -> Vec<Point2<f32>> {
    raw.iter().map(|&[x, y]| Point2::new(x, y)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let Some(config_path) = env::args().nth(1) else {
        eprintln!("Usage: label_image <config.json>");
        return Ok(());
    };
    let cfg: ExampleConfig = serde_json::from_str(&fs::read_to_string(&config_path)?)?;

    let img = ImageReader::open(&cfg.image_path)?.decode()?.to_rgb8();
    let hue = hue_plane_from_rgb(&img);
    let view = hue.as_view();

    let labeler = BoardLabeler::new(cfg.params);
    let corners = FixedCorners(points(&cfg.corners));
    let labeled = if cfg.markers.is_empty() {
        labeler.label(&view, &corners)
    } else {
        labeler.label_with_reference(&view, &corners, &FixedMarkers(points(&cfg.markers)))
    };

    let labeled = match labeled {
        Ok(l) => l,
        Err(e) if e.is_retryable() => {
            eprintln!("labeling failed, retake the image: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let out = LabelOutput {
        identifier: labeled.identifier.to_string(),
        words: labeled.identifier.words().to_vec(),
        cell_hues: labeled.board.cells().iter().map(|c| c.hue()).collect(),
        reference: labeled
            .reference
            .map(|r| r.points().map(|p| [p.x, p.y])),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn init_logging() -> Result<(), log::SetLoggerError> {
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        Ok(())
    }
    #[cfg(not(feature = "tracing"))]
    {
        ilac::core::init_with_level(log::LevelFilter::Info)
    }
}
