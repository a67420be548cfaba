use brainstem_serde::{ConstByteLength, Serde, WireErr, WireReader, WireWriter};

use crate::wire::{
    error::ProtocolError,
    list::{read_marked_list, write_marked_list},
};

pub const COLLISION_SANITY_MARKER: i32 = 536;
pub const TERRAIN_SANITY_MARKER: i32 = 451;

/// A physics contact reported to `receiver`. The host reports each side of
/// a contact separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEntry {
    pub receiver: u16,
    pub other: u16,
    pub is_enter: bool,
}

impl CollisionEntry {
    pub fn new(receiver: u16, other: u16, is_enter: bool) -> Self {
        Self {
            receiver,
            other,
            is_enter,
        }
    }
}

impl Serde for CollisionEntry {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.reserve(Self::const_byte_length())?;
        writer.write_u16(self.receiver)?;
        writer.write_u16(self.other)?;
        writer.write_bool(self.is_enter)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        Ok(Self {
            receiver: reader.read_u16()?,
            other: reader.read_u16()?,
            is_enter: reader.read_bool()?,
        })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for CollisionEntry {
    fn const_byte_length() -> usize {
        5
    }
}

/// Contact between an actor and a terrain block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainCollisionEntry {
    pub receiver: u16,
    pub block_style: u16,
}

impl TerrainCollisionEntry {
    pub fn new(receiver: u16, block_style: u16) -> Self {
        Self {
            receiver,
            block_style,
        }
    }
}

impl Serde for TerrainCollisionEntry {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.reserve(Self::const_byte_length())?;
        writer.write_u16(self.receiver)?;
        writer.write_u16(self.block_style)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        Ok(Self {
            receiver: reader.read_u16()?,
            block_style: reader.read_u16()?,
        })
    }

    fn byte_length(&self) -> usize {
        Self::const_byte_length()
    }
}

impl ConstByteLength for TerrainCollisionEntry {
    fn const_byte_length() -> usize {
        4
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollisionSection {
    pub entries: Vec<CollisionEntry>,
}

impl CollisionSection {
    pub fn new(entries: Vec<CollisionEntry>) -> Self {
        Self { entries }
    }

    pub fn write(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_marked_list(writer, &self.entries, COLLISION_SANITY_MARKER)
    }

    pub fn read(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        Ok(Self {
            entries: read_marked_list(reader, "collision", COLLISION_SANITY_MARKER)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrainSection {
    pub entries: Vec<TerrainCollisionEntry>,
}

impl TerrainSection {
    pub fn new(entries: Vec<TerrainCollisionEntry>) -> Self {
        Self { entries }
    }

    pub fn write(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_marked_list(writer, &self.entries, TERRAIN_SANITY_MARKER)
    }

    pub fn read(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        Ok(Self {
            entries: read_marked_list(reader, "terrain collision", TERRAIN_SANITY_MARKER)?,
        })
    }
}
