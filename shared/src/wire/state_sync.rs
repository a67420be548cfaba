use brainstem_serde::{ConstByteLength, Quat, Serde, Vec3, WireErr, WireReader, WireWriter};

use crate::wire::list::{read_short_list, write_short_list};

const FLAG_ONSTAGE: u8 = 1;
const FLAG_PLAYER_CONTROLLABLE: u8 = 1 << 1;
const FLAG_REMOTE: u8 = 1 << 2;

/// Host-owned state for one actor, addressed by temp id
#[derive(Debug, Clone, PartialEq)]
pub struct StateSyncEntry {
    pub temp_id: u16,
    pub onstage: bool,
    pub player_controllable: bool,
    pub remote: bool,
    pub position: Vec3,
    pub rotation: Quat,
    pub brain: String,
}

impl StateSyncEntry {
    pub fn new(temp_id: u16, brain: impl Into<String>) -> Self {
        Self {
            temp_id,
            onstage: true,
            player_controllable: false,
            remote: false,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            brain: brain.into(),
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.onstage {
            flags |= FLAG_ONSTAGE;
        }
        if self.player_controllable {
            flags |= FLAG_PLAYER_CONTROLLABLE;
        }
        if self.remote {
            flags |= FLAG_REMOTE;
        }
        flags
    }
}

impl Serde for StateSyncEntry {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.write_u16(self.temp_id)?;
        writer.write_u8(self.flags())?;
        writer.write(&self.position)?;
        writer.write(&self.rotation)?;
        writer.write(&self.brain)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let temp_id = reader.read_u16()?;
        let flags = reader.read_u8()?;
        let position = reader.read()?;
        let rotation = reader.read()?;
        let brain = reader.read()?;
        Ok(Self {
            temp_id,
            onstage: flags & FLAG_ONSTAGE != 0,
            player_controllable: flags & FLAG_PLAYER_CONTROLLABLE != 0,
            remote: flags & FLAG_REMOTE != 0,
            position,
            rotation,
            brain,
        })
    }

    fn byte_length(&self) -> usize {
        2 + 1 + Vec3::const_byte_length() + Quat::const_byte_length() + self.brain.byte_length()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateSyncSection {
    pub entries: Vec<StateSyncEntry>,
}

impl StateSyncSection {
    pub fn new(entries: Vec<StateSyncEntry>) -> Self {
        Self { entries }
    }
}

impl Serde for StateSyncSection {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_short_list(writer, &self.entries)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        Ok(Self {
            entries: read_short_list(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        2 + self.entries.iter().map(Serde::byte_length).sum::<usize>()
    }
}
