//! Console commands: parsed through the parser registry and applied to a
//! single hopper.
//!
//! ```text
//! cooldown get
//! cooldown set <ticks>
//! cooldown remove
//! name <text...>
//! keys
//! tree
//! help
//! quit
//! ```

use eyre::{Result, bail};
use mc_command::{ArgumentReader, CommandTree, ParserRegistry, StringReader, keys};
use mc_key::ResourceKey;
use mc_value::{
    BlockEntity, CooldownProcessor, DataTransactionResult, Hopper, ImmutableBoundedValue,
    ResultKind, ValueProcessor,
};
use tracing::debug;

const HELP: &str = "\
Commands:
  cooldown get           - Show the hopper's transfer cooldown
  cooldown set <ticks>   - Set the transfer cooldown
  cooldown remove        - Clear the transfer cooldown
  name <text...>         - Rename the hopper
  keys                   - List registered argument parsers
  tree                   - Describe the encoded command tree
  help                   - Show this help
  quit                   - Exit";

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// The command tree announced for the console's commands.
pub fn command_tree(registry: &ParserRegistry) -> Result<CommandTree> {
    let Some(integer) = registry.get(&keys::INTEGER) else {
        bail!("No parser registered for {}", keys::INTEGER);
    };
    let Some(text) = registry.get(&keys::REMAINING_JOINED_STRINGS) else {
        bail!("No parser registered for {}", keys::REMAINING_JOINED_STRINGS);
    };

    let mut tree = CommandTree::new();

    let cooldown = tree.literal(CommandTree::ROOT, "cooldown")?;
    let get = tree.literal(cooldown, "get")?;
    tree.executable(get)?;
    let set = tree.literal(cooldown, "set")?;
    let ticks = tree.registered_argument(set, "ticks", integer)?;
    tree.executable(ticks)?;
    let remove = tree.literal(cooldown, "remove")?;
    tree.executable(remove)?;

    let name = tree.literal(CommandTree::ROOT, "name")?;
    let new_name = tree.registered_argument(name, "text", text)?;
    tree.executable(new_name)?;

    for literal in ["keys", "tree", "help", "quit"] {
        let node = tree.literal(CommandTree::ROOT, literal)?;
        tree.executable(node)?;
    }

    Ok(tree)
}

/// Console state: one hopper and the registry arguments are parsed with.
pub struct Console<'r> {
    registry: &'r ParserRegistry,
    processor: CooldownProcessor,
    hopper: BlockEntity,
}

impl<'r> Console<'r> {
    pub fn new(registry: &'r ParserRegistry, hopper: Hopper) -> Self {
        Self {
            registry,
            processor: CooldownProcessor::new(),
            hopper: BlockEntity::Hopper(hopper),
        }
    }

    pub fn hopper(&self) -> &BlockEntity {
        &self.hopper
    }

    /// Run one input line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let view = ArgumentReader::new(line.trim_end(), 0)?;
        let mut reader = view.to_mutable();
        reader.skip_whitespace();

        if !reader.can_read() {
            return Ok(Outcome::Reply(String::new()));
        }

        let command = reader.read_unquoted_string();
        debug!("Command '{}' with arguments '{}'", command, reader.remaining());

        let outcome = match command {
            "cooldown" => Outcome::Reply(self.cooldown(&mut reader)?),
            "name" => Outcome::Reply(self.rename(&mut reader)?),
            "keys" => Outcome::Reply(self.list_keys()),
            "tree" => Outcome::Reply(self.describe_tree()?),
            "help" | "?" => Outcome::Reply(HELP.to_string()),
            "quit" | "exit" => Outcome::Quit,
            _ => {
                let mut at_command = view.to_mutable();
                at_command.skip_whitespace();
                return Err(at_command.create_error("Unknown command").into());
            }
        };

        expect_end(&mut reader)?;
        Ok(outcome)
    }

    fn cooldown(&mut self, reader: &mut StringReader<'_>) -> Result<String> {
        reader.skip_whitespace();
        let action = reader.read_unquoted_string();

        match action {
            "get" => Ok(match self.processor.get_value(&self.hopper) {
                Some(ticks) => format!("Cooldown: {ticks} ticks"),
                None => "Cooldown: not set".to_string(),
            }),
            "set" => {
                reader.skip_whitespace();
                let ticks: i32 = self.registry.parse(&keys::INTEGER, reader)?;
                let result = self.processor.offer(&mut self.hopper, ticks);
                Ok(describe_offer(&result))
            }
            "remove" => {
                let result = self.processor.remove_from(&mut self.hopper);
                Ok(describe_removal(&result))
            }
            _ => Err(reader.create_error("Expected one of get, set, remove").into()),
        }
    }

    fn rename(&mut self, reader: &mut StringReader<'_>) -> Result<String> {
        reader.skip_whitespace();
        let name: String = self.registry.parse(&keys::REMAINING_JOINED_STRINGS, reader)?;
        if name.is_empty() {
            return Err(reader.create_error("Expected a name").into());
        }

        let BlockEntity::Hopper(hopper) = &mut self.hopper else {
            bail!("Console target is not a hopper");
        };
        let reply = match hopper.custom_name.replace(name.clone()) {
            Some(old) => format!("Renamed '{old}' to '{name}'"),
            None => format!("Named hopper '{name}'"),
        };
        Ok(reply)
    }

    fn list_keys(&self) -> String {
        let mut keys: Vec<&ResourceKey> = self.registry.keys().collect();
        keys.sort_by_key(|key| key.to_string());

        let lines = keys.iter().map(|key| {
            let native = self
                .registry
                .get(key)
                .is_some_and(|parser| parser.has_client_native_completions());
            let origin = if native { "client" } else { "server" };
            format!("  - {key} ({origin} completions)")
        });

        std::iter::once(format!("Parsers ({}):", keys.len()))
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn describe_tree(&self) -> Result<String> {
        let tree = command_tree(self.registry)?;
        Ok(format!(
            "Command tree: {} nodes, {} bytes",
            tree.len(),
            tree.encode().len()
        ))
    }
}

fn expect_end(reader: &mut StringReader<'_>) -> Result<()> {
    reader.skip_whitespace();
    if reader.can_read() {
        return Err(reader.create_error("Incorrect argument for command").into());
    }
    Ok(())
}

fn describe_offer(result: &DataTransactionResult<ImmutableBoundedValue<i32>>) -> String {
    if result.is_no_data() {
        return "Hopper has no cooldown to set".to_string();
    }

    match (result.kind(), result.success_data(), result.rejected_data()) {
        (ResultKind::Success, [new, ..], _) => match result.replaced_data() {
            [old, ..] => format!("Cooldown set to {} (was {})", new.get(), old.get()),
            [] => format!("Cooldown set to {}", new.get()),
        },
        (_, _, [rejected, ..]) => format!(
            "Rejected cooldown {}: must be at least {}",
            rejected.get(),
            rejected.min()
        ),
        (kind, _, _) => format!("Cooldown unchanged ({kind:?})"),
    }
}

fn describe_removal(result: &DataTransactionResult<ImmutableBoundedValue<i32>>) -> String {
    match result.replaced_data() {
        [removed, ..] if result.is_successful() => {
            format!("Removed cooldown of {} ticks", removed.get())
        }
        _ => "No cooldown to remove".to_string(),
    }
}
