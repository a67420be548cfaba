use brainstem_serde::{CompactName, Serde, WireErr, WireReader, WireWriter};

use crate::wire::list::{read_short_list, write_short_list};

/// One actor in the host's roster, with the temp id it goes by this tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub temp_id: u16,
    pub name: String,
}

impl RosterEntry {
    pub fn new(temp_id: u16, name: impl Into<String>) -> Self {
        Self {
            temp_id,
            name: name.into(),
        }
    }
}

impl Serde for RosterEntry {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.write_u16(self.temp_id)?;
        CompactName::ser_str(&self.name, writer)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let temp_id = reader.read_u16()?;
        let name = reader.read::<CompactName>()?.into_inner();
        Ok(Self { temp_id, name })
    }

    fn byte_length(&self) -> usize {
        2 + CompactName::byte_length_of(&self.name)
    }
}

/// The full, ordered list of live actors. Sent every tick; any actor the
/// runtime knows that is missing from it has been destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RosterSection {
    pub entries: Vec<RosterEntry>,
}

impl RosterSection {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }
}

impl Serde for RosterSection {
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
