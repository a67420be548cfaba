use brainstem_serde::{CompactName, Serde, WireErr, WireReader, WireWriter};

use crate::wire::list::{read_short_list, write_short_list};

/// Instance memory of one use, as JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyUseRecord {
    pub use_id: String,
    pub memory_json: String,
}

impl Serde for DirtyUseRecord {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        writer.write(&self.use_id)?;
        writer.write(&self.memory_json)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        Ok(Self {
            use_id: reader.read()?,
            memory_json: reader.read()?,
        })
    }

    fn byte_length(&self) -> usize {
        self.use_id.byte_length() + self.memory_json.byte_length()
    }
}

/// Everything that changed on one actor this tick. `actor_memory_json` is
/// only present when the actor tier itself changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyActorRecord {
    pub name: String,
    pub actor_memory_json: Option<String>,
    pub uses: Vec<DirtyUseRecord>,
}

impl Serde for DirtyActorRecord {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        CompactName::ser_str(&self.name, writer)?;
        writer.write_bool(self.actor_memory_json.is_some())?;
        if let Some(json) = &self.actor_memory_json {
            writer.write(json)?;
        }
        write_short_list(writer, &self.uses)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        let name = reader.read::<CompactName>()?.into_inner();
        let actor_memory_json = if reader.read_bool()? {
            Some(reader.read()?)
        } else {
            None
        };
        let uses = read_short_list(reader)?;
        Ok(Self {
            name,
            actor_memory_json,
            uses,
        })
    }

    fn byte_length(&self) -> usize {
        CompactName::byte_length_of(&self.name)
            + 1
            + self.actor_memory_json.as_ref().map_or(0, Serde::byte_length)
            + 2
            + self.uses.iter().map(Serde::byte_length).sum::<usize>()
    }
}

/// The outbound section written back into the frame after every tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirtyMemorySection {
    pub actors: Vec<DirtyActorRecord>,
}

impl DirtyMemorySection {
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn actor(&self, name: &str) -> Option<&DirtyActorRecord> {
        self.actors.iter().find(|record| record.name == name)
    }
}

impl Serde for DirtyMemorySection {
    fn ser(&self, writer: &mut WireWriter) -> Result<(), WireErr> {
        write_short_list(writer, &self.actors)
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireErr> {
        Ok(Self {
            actors: read_short_list(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        2 + self.actors.iter().map(Serde::byte_length).sum::<usize>()
    }
}
