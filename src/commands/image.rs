//! Command handlers for image batches.

use std::path::Path;
use std::sync::Arc;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::core::{BatchRequest, FileInfo, ImageTask, NotificationSink};
use crate::processing::{BatchProcessor, ImageTransformer};
use crate::utils::{TaskResult, extract_filename, has_supported_extension};

/// Runs a batch with the built-in image transformer.
///
/// # Events Emitted
/// * `process-progress` - once per task, before it is transformed
/// * `process-error` - once per failed task
/// * `process-complete` - once, after every task reported
///
/// # Returns
/// `Ok(())` when every task succeeded, otherwise one of the failures.
pub async fn process_images(request: BatchRequest, sink: Arc<dyn NotificationSink>) -> TaskResult<()> {
    debug!("Received process_images command for {} images", request.tasks.len());
    BatchProcessor::new(Arc::new(ImageTransformer::new()), sink)
        .process(request)
        .await
        .into_result()
}

/// Collects metadata for the given paths.
///
/// Paths that cannot be stat'ed, are not regular files, or do not carry a
/// supported image extension are skipped with a warning.
pub fn inspect_files<P: AsRef<Path>>(paths: &[P]) -> Vec<FileInfo> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if !has_supported_extension(path) {
            warn!("Skipping {}: not a supported image type", path.display());
            continue;
        }

        let metadata = match std::fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => {
                warn!("Skipping {}: not a file", path.display());
                continue;
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let path = path.to_string_lossy().to_string();
        files.push(FileInfo {
            id: uuid::Uuid::new_v4().to_string(),
            name: extract_filename(&path).to_string(),
            size: metadata.len(),
            path,
        });
    }

    files
}

/// Options shared by every task built from a file list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskTemplate {
    pub output_format: Option<String>,
    pub quality: i32,
    pub width: u32,
    pub height: u32,
}

/// Builds one task per file from `template`.
///
/// Conversion is requested when the template names an output format;
/// resizing when it sets a width or a height.
pub fn tasks_from_files(files: &[FileInfo], template: &TaskTemplate) -> Vec<ImageTask> {
    files
        .iter()
        .map(|file| ImageTask {
            name: file.name.clone(),
            path: file.path.clone(),
            output_format: template.output_format.clone().unwrap_or_default(),
            quality: template.quality,
            convert_format: template.output_format.is_some(),
            width: template.width,
            height: template.height,
            keep_original_size: template.width == 0 && template.height == 0,
        })
        .collect()
}
