use std::path::{Component, Path, PathBuf};
use crate::core::ImageTask;
use crate::utils::{TaskError, TaskResult};

/// Returns the final path component, or the whole string when there is none.
pub fn extract_filename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// File name the task's output is written under.
///
/// Uses the task's display name (falling back to the source file name).
/// When format conversion is requested the extension is replaced by the
/// requested format, verbatim and lowercased.
pub fn output_file_name(task: &ImageTask) -> String {
    let name = if task.name.is_empty() {
        extract_filename(&task.path)
    } else {
        task.name.as_str()
    };

    if !task.convert_format {
        return name.to_string();
    }

    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{stem}.{}", task.output_format.trim().to_lowercase())
}

/// Joins the output directory with the task's output file name.
///
/// The name must be a single plain path component, so the output always
/// lands directly inside `output_dir`.
pub fn output_file_path(task: &ImageTask, output_dir: &Path) -> TaskResult<PathBuf> {
    let name = output_file_name(task);
    let mut components = Path::new(&name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(output_dir.join(&name)),
        _ => Err(TaskError::Write {
            path: output_dir.join(&name),
            reason: "output name must be a plain file name".to_string(),
        }),
    }
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> TaskResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| TaskError::write(dir, e))
}
