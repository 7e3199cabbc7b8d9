pub mod error;
pub mod formats;
pub mod fs;

pub use error::{TaskError, TaskResult};
pub use formats::{ImageFormat, effective_quality, has_supported_extension};
pub use fs::{
    extract_filename,
    output_file_name,
    output_file_path,
    ensure_dir,
};
