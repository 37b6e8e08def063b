//! # scionlib
//!
//! Shared helpers for SCION services. The centrepiece is [`Raw`], a
//! bounds-checked cursor used to decode certificates, keys and other binary
//! records. Around it sit the small utilities those services keep reaching
//! for: topology [`paths`], whole-file and JSON loading in [`files`], an
//! injectable [`time::Clock`] with latency budget warnings, and a
//! [`signals::ShutdownListener`] for the process boundary.

mod errors;

pub mod cache;
pub mod files;
pub mod paths;
pub mod raw;
pub mod signals;
pub mod time;

pub use errors::{Result, ScionError};
pub use raw::{Bounds, Field, LenMode, Raw, RawData};
