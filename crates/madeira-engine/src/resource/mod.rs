//! Typed resource library.
//!
//! - [`Load`]: type-specific load primitive (decode + construct)
//! - [`Loader`]: per-type cache in front of a `Load`
//! - [`Library`]: registry of loaders keyed by asset type, with path search
//!
//! Default loaders decode images into [`Texture`]s and WAVE files into
//! [`Sound`]s.

mod library;
mod loader;
mod locate;
mod sound;
mod texture;
mod wave;

pub use library::Library;
pub use loader::{Load, Loader};
pub use locate::{SearchPaths, RESOURCES_DIR};
pub use sound::{AudioDevice, SilentAudio, Sound, SoundLoader, SourceId};
pub use texture::{decode_image, Texture, TextureId, TextureLoader};
pub use wave::{decode_wave, SoundFormat, WaveData, WaveError};
