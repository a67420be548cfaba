//! # Brainstem Serde
//! Bounds-checked, little-endian binary codec used for every section of the
//! frame exchanged between the host simulation and the behavior runtime.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod compact_name;
mod error;
mod frame_buffer;
mod geometry;
mod primitives;
mod serde;
mod string;
mod wire_reader;
mod wire_writer;

pub use compact_name::CompactName;
pub use error::WireErr;
pub use frame_buffer::FrameBuffer;
pub use geometry::{Color, Quat, Vec3};
pub use serde::{ConstByteLength, Serde};
pub use wire_reader::WireReader;
pub use wire_writer::WireWriter;
