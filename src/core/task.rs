//! Task and batch request definitions.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Worker count used when a manifest does not specify one.
pub const DEFAULT_WORKERS: i64 = 4;

/// Represents a single image transformation task.
///
/// Field names follow the manifest JSON (`outputFormat`, `keepOriginalSize`, ...).
/// A task is never mutated once submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageTask {
    /// Display name, also used as the output file name
    pub name: String,
    /// Path to the source image file
    pub path: String,
    /// Target format when converting; empty keeps the source format
    pub output_format: String,
    /// Compression quality hint (1-100, 0 for the encoder default)
    pub quality: i32,
    /// Whether `output_format` should be applied
    pub convert_format: bool,
    /// Target width in pixels, 0 to derive from height
    pub width: u32,
    /// Target height in pixels, 0 to derive from width
    pub height: u32,
    /// Skip resizing entirely
    pub keep_original_size: bool,
}

/// One invocation of the batch runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub tasks: Vec<ImageTask>,
    pub output_path: PathBuf,
    #[serde(default = "default_workers")]
    pub workers: i64,
}

fn default_workers() -> i64 {
    DEFAULT_WORKERS
}

impl BatchRequest {
    pub fn new(tasks: Vec<ImageTask>, output_path: impl Into<PathBuf>, workers: i64) -> Self {
        Self {
            tasks,
            output_path: output_path.into(),
            workers,
        }
    }
}

/// File picked for processing, with the metadata a caller shows before
/// building tasks.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_json() {
        let json = r#"{
            "tasks": [{
                "name": "a.png",
                "path": "/in/a.png",
                "outputFormat": "webp",
                "quality": 80,
                "convertFormat": true,
                "width": 640,
                "height": 0,
                "keepOriginalSize": false
            }],
            "outputPath": "/out"
        }"#;

        let request: BatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.workers, DEFAULT_WORKERS);
        assert_eq!(request.output_path, PathBuf::from("/out"));
        let task = &request.tasks[0];
        assert_eq!(task.output_format, "webp");
        assert!(task.convert_format);
        assert_eq!((task.width, task.height), (640, 0));
    }

    #[test]
    fn missing_task_fields_default() {
        let task: ImageTask = serde_json::from_str(r#"{"name": "b.jpg", "path": "/in/b.jpg"}"#).unwrap();
        assert_eq!(task.quality, 0);
        assert!(!task.convert_format);
        assert!(!task.keep_original_size);
        assert!(task.output_format.is_empty());
    }
}
