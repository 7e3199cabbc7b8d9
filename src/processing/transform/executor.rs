//! Transform executor contract and the built-in `image` crate implementation.
//!
//! Executors are synchronous: `transform` returns once the output file is
//! fully written or the attempt has definitively failed. The worker pool
//! calls them from tokio's blocking thread pool, possibly from several
//! threads at once with different tasks.

use std::io::Cursor;
use std::path::Path;
use image::ImageReader;
use tracing::debug;

use crate::core::ImageTask;
use crate::utils::{
    ImageFormat, TaskError, TaskResult, effective_quality, ensure_dir, extract_filename,
    output_file_path,
};

use super::formats::encode_image;
use super::resize::apply_resize;

/// Performs one image transform and writes its output file.
///
/// Implementations must be safe to call concurrently for different tasks
/// and must not mutate state visible to other calls.
pub trait TransformExecutor: Send + Sync {
    fn transform(&self, task: &ImageTask, output_dir: &Path) -> TaskResult<()>;
}

impl<F> TransformExecutor for F
where
    F: Fn(&ImageTask, &Path) -> TaskResult<()> + Send + Sync,
{
    fn transform(&self, task: &ImageTask, output_dir: &Path) -> TaskResult<()> {
        self(task, output_dir)
    }
}

/// Decodes, optionally resizes and re-encodes images with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageTransformer;

impl ImageTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl TransformExecutor for ImageTransformer {
    fn transform(&self, task: &ImageTask, output_dir: &Path) -> TaskResult<()> {
        let output_path = output_file_path(task, output_dir)?;

        let data = std::fs::read(&task.path).map_err(|e| TaskError::read(&task.path, e))?;

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| TaskError::read(&task.path, e))?;
        let source_format = reader.format();
        let image = reader.decode()?;

        debug!(
            "Loaded '{}': {}×{}",
            extract_filename(&task.path),
            image.width(),
            image.height()
        );

        let target_format = resolve_output_format(task, source_format)?;
        let image = apply_resize(image, task)?;
        let encoded = encode_image(&image, target_format, effective_quality(task.quality))?;

        ensure_dir(output_dir)?;
        std::fs::write(&output_path, &encoded).map_err(|e| TaskError::write(&output_path, e))?;

        debug!(
            "'{}' → {} ({} bytes)",
            task.name,
            output_path.display(),
            encoded.len()
        );
        Ok(())
    }
}

/// Picks the encoding format: the requested one when converting, otherwise
/// the format the source was decoded from.
fn resolve_output_format(
    task: &ImageTask,
    source: Option<image::ImageFormat>,
) -> TaskResult<ImageFormat> {
    if task.convert_format {
        return task.output_format.parse();
    }

    source
        .and_then(ImageFormat::from_codec)
        .ok_or_else(|| TaskError::unsupported_format(extract_filename(&task.path)))
}
