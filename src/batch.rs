use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "webp", "tif", "tiff"];

/// One image to render, with its detections file and where the overlay goes.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    pub image: PathBuf,
    pub detections: PathBuf,
    pub output: PathBuf,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Where the overlay of `image` is written: `<stem>_overlay.png`, mirroring the input tree.
pub fn overlay_output_path(input_dir: &Path, image: &Path, output_dir: &Path) -> PathBuf {
    let relative = image.strip_prefix(input_dir).unwrap_or(image);
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut output = output_dir.join(relative);
    output.set_file_name(format!("{stem}_overlay.png"));
    output
}

/// Finds every image under `input_dir` that has a sidecar `<stem>.json` detections file.
///
/// Jobs come back sorted by image path so runs are reproducible.
pub fn collect_jobs(input_dir: &Path, output_dir: &Path) -> Vec<RenderJob> {
    let mut jobs: Vec<RenderJob> = WalkDir::new(input_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_image(entry.path()))
        .filter_map(|entry| {
            let image = entry.into_path();
            let detections = image.with_extension("json");
            if !detections.is_file() {
                debug!("no detections next to {}, skipping", image.display());
                return None;
            }
            let output = overlay_output_path(input_dir, &image, output_dir);
            Some(RenderJob { image, detections, output })
        })
        .collect();
    jobs.sort_by(|a, b| a.image.cmp(&b.image));
    jobs
}
