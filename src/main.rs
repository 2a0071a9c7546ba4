use anyhow::{Context, bail};
use clap::Parser;
use detection_overlay_rs::annotations::read_detections_from_json;
use detection_overlay_rs::batch::{RenderJob, collect_jobs};
use detection_overlay_rs::config::RenderConfig;
use detection_overlay_rs::image_utils::decode::{ImageReference, decode_image};
use detection_overlay_rs::image_utils::image_io::save_png;
use detection_overlay_rs::render::{RasterSurface, bundled_font, load_font};
use detection_overlay_rs::view::{DecodeStatus, OverlayView};
use log::{error, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Draw detection polygons and labels over crop images")]
struct Args {
    /// Image to annotate
    #[arg(long, requires_all = ["detections", "output"], conflicts_with = "input_dir")]
    image: Option<PathBuf>,
    /// Detections JSON for --image
    #[arg(long)]
    detections: Option<PathBuf>,
    /// Where to write the PNG overlay of --image
    #[arg(long)]
    output: Option<PathBuf>,
    /// Render every image under this directory that has a sidecar <stem>.json
    #[arg(long, requires = "output_dir")]
    input_dir: Option<PathBuf>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Load layout and style from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    container_width: Option<f32>,
    #[arg(long)]
    max_height: Option<f32>,
    /// TrueType/OpenType font for label text, instead of the bundled DejaVu Sans
    #[arg(long)]
    font: Option<PathBuf>,
    /// Index of the detection to emphasize
    #[arg(long)]
    selected: Option<usize>,
}

async fn run_job(
    view: &mut OverlayView,
    surface: &mut RasterSurface,
    job: &RenderJob,
    selected: Option<usize>,
) -> anyhow::Result<()> {
    let ticket = view.set_image(ImageReference::new(job.image.to_string_lossy()));
    let outcome = decode_image(ticket).await;
    if view.complete_decode(outcome) != DecodeStatus::Committed {
        bail!("could not decode {}", job.image.display());
    }
    let detections = read_detections_from_json(&job.detections)
        .with_context(|| format!("reading detections for {}", job.image.display()))?;
    view.set_detections(detections);
    if !view.select(selected) {
        warn!(
            "selected index {:?} is out of range for {} detections",
            selected,
            view.detections().len()
        );
    }

    let report = view.redraw(surface);
    info!(
        "{} -> {}: {:?}, {} drawn, {} skipped",
        job.image.display(),
        job.output.display(),
        report.status,
        report.drawn,
        report.skipped
    );
    save_png(surface.image(), &job.output)
        .with_context(|| format!("writing overlay {}", job.output.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.container_width {
        config.container_width = width;
    }
    if let Some(height) = args.max_height {
        config.max_height = height;
    }
    if args.font.is_some() {
        config.font_path = args.font.clone();
    }

    let font = match &config.font_path {
        Some(path) => load_font(path)?,
        None => bundled_font()?,
    };
    let mut surface = RasterSurface::new(1, 1, font);
    let mut view = OverlayView::new(config.container_width, config.max_height, config.style);

    let jobs = match (args.image, args.detections, args.output, args.input_dir, args.output_dir) {
        (Some(image), Some(detections), Some(output), _, _) => {
            vec![RenderJob { image, detections, output }]
        }
        (None, _, _, Some(input_dir), Some(output_dir)) => {
            let jobs = collect_jobs(&input_dir, &output_dir);
            info!("found {} images with detections under {}", jobs.len(), input_dir.display());
            jobs
        }
        _ => bail!("pass either --image/--detections/--output or --input-dir/--output-dir"),
    };

    let mut failures = 0;
    for job in &jobs {
        if let Err(err) = run_job(&mut view, &mut surface, job, args.selected).await {
            error!("{err:#}");
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} of {} overlays failed", jobs.len());
    }
    Ok(())
}
