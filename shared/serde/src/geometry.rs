use serde::{Deserialize, Serialize};

use crate::{
    error::WireErr,
    serde::{ConstByteLength, Serde},
    wire_reader::WireReader,
    wire_writer::WireWriter,
};

/// Three packed `f32`s: x, y, z
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Four packed `f32`s: x, y, z, w
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Four packed `f32`s: r, g, b, a
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

// Packed float groups are written in one call so a short buffer never ends
// up holding half a vector.
fn write_floats<const N: usize>(writer: &mut WireWriter, floats: [f32; N]) -> Result<(), WireErr> {
    writer.reserve(4 * N)?;
    for value in floats {
        writer.write_f32(value)?;
    }
    Ok(())
}

fn read_floats<const N: usize>(reader: &mut WireReader) -> Result<[f32; N], WireErr> {
    let bytes = reader.read_bytes(4 * N)?;
    let mut output = [0f32; N];
    for (value, chunk) in output.iter_mut().zip(bytes.chunks_exact(4)) {
        *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Ok(output)
}

impl Serde for Vec3 {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_floats(writer, [self.x, self.y, self.z])
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let [x, y, z] = read_floats(reader)?;
        Ok(Self { x, y, z })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for Vec3 {
    fn const_byte_length() -> usize {
        12
    }
}

impl Serde for Quat {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_floats(writer, [self.x, self.y, self.z, self.w])
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let [x, y, z, w] = read_floats(reader)?;
        Ok(Self { x, y, z, w })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for Quat {
    fn const_byte_length() -> usize {
        16
    }
}

impl Serde for Color {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_floats(writer, [self.r, self.g, self.b, self.a])
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let [r, g, b, a] = read_floats(reader)?;
        Ok(Self { r, g, b, a })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for Color {
    fn const_byte_length() -> usize {
        16
    }
}
