//! Image transformation: the opaque "transform one image" step.
//!
//! - [`TransformExecutor`]: the contract the worker pool calls into.
//! - [`ImageTransformer`]: built-in executor on top of the `image` crate.
//! - [`resize`]: maps task dimensions to resize operations.
//! - [`formats`]: encodes into the target format.

mod executor;
mod formats;
mod resize;

pub use executor::{ImageTransformer, TransformExecutor};
