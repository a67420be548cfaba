use serde_json::{json, Value};

use brainstem_shared::BehaviorDefinition;

use crate::helpers::journal::{Journal, JournalEntry};

/// A behavior that journals every listed message it receives
pub fn recorder(uri: &str, messages: &[&str], journal: &Journal) -> BehaviorDefinition {
    let mut builder = BehaviorDefinition::builder(uri);
    for message in messages {
        let journal = journal.clone();
        builder = builder.on(message, move |context, message| {
            journal.record(JournalEntry {
                actor: context.actor_name().to_string(),
                use_id: context.use_id().to_string(),
                message: message.name.clone(),
                args: message.args.clone(),
            });
            Ok(Value::Null)
        });
    }
    builder.build()
}

/// A behavior that counts `TouchEnter`s in actor memory under `touches`
pub fn remember_touches(uri: &str) -> BehaviorDefinition {
    BehaviorDefinition::builder(uri)
        .on("TouchEnter", |context, message| {
            let other = message.arg("other").cloned().unwrap_or(Value::Null);
            let memory = context.mem_mut()?;
            let touches = memory.get("touches").and_then(Value::as_u64).unwrap_or(0);
            memory.insert("touches".to_string(), json!(touches + 1));
            memory.insert("lastTouched".to_string(), other);
            Ok(Value::Null)
        })
        .build()
}
