//! GPU device + surface management.
//!
//! Creates the wgpu device and queue, configures the window surface,
//! acquires cleared frames and uploads decoded textures.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
