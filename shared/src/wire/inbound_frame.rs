use std::collections::HashSet;

use brainstem_serde::{WireErr, WireReader, WireWriter};

use crate::wire::{
    collisions::{CollisionSection, TerrainSection},
    error::ProtocolError,
    roster::RosterSection,
    state_sync::StateSyncSection,
};

/// Everything the host writes into the frame before a tick, in frame order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InboundFrame {
    pub roster: RosterSection,
    pub state_sync: StateSyncSection,
    pub collisions: CollisionSection,
    pub terrain: TerrainSection,
}

impl InboundFrame {
    /// Reads and validates every section. Nothing is applied here, so a
    /// failure leaves the caller's state as it was.
    pub fn read(reader: &mut WireReader) -> Result<Self, ProtocolError> {
        let frame = Self {
            roster: reader.read()?,
            state_sync: reader.read()?,
            collisions: CollisionSection::read(reader)?,
            terrain: TerrainSection::read(reader)?,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn write(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.write(&self.roster)?;
        writer.write(&self.state_sync)?;
        self.collisions.write(writer)?;
        self.terrain.write(writer)
    }

    /// Checks the roster for duplicates and that state sync only refers to
    /// temp ids the roster assigns
    pub fn validate(&self) -> Result<(), ProtocolError> {
        let mut names = HashSet::new();
        let mut temp_ids = HashSet::new();
        for entry in &self.roster.entries {
            if !names.insert(entry.name.as_str()) {
                return Err(ProtocolError::MalformedRoster {
                    reason: format!("actor {:?} is listed twice", entry.name),
                });
            }
            if !temp_ids.insert(entry.temp_id) {
                return Err(ProtocolError::MalformedRoster {
                    reason: format!("temp id {} is assigned twice", entry.temp_id),
                });
            }
        }
        for entry in &self.state_sync.entries {
            if !temp_ids.contains(&entry.temp_id) {
                return Err(ProtocolError::UnknownTempId {
                    temp_id: entry.temp_id,
                });
            }
        }
        Ok(())
    }
}
