//! Application-facing commands.
//!
//! - [`process_images`]: run a batch with the built-in transformer
//! - [`inspect_files`]: turn picked paths into [`FileInfo`](crate::core::FileInfo)
//! - [`tasks_from_files`]: build tasks sharing one set of options

mod image;

pub use self::image::*;
