//! Line-oriented console for the command and value layers.
//!
//! This binary:
//! 1. Installs the standard argument parsers as the global registry
//! 2. Builds the command tree announced for its commands
//! 3. Reads commands from stdin and applies them to a single hopper
//!
//! Type `help` for the command list.

use std::io::{self, BufRead, Write};

use mc_command::{ParserRegistryBuilder, install_global};
use mc_value::Hopper;
use tracing::{debug, info};

mod commands;
mod config;

use commands::{Console, Outcome};
use config::ConsoleConfig;

fn main() -> eyre::Result<()> {
    // Logs go to stderr; stdout carries replies
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mc_console=info".parse()?)
                .add_directive("mc_command=info".parse()?),
        )
        .init();

    let config = ConsoleConfig::from_env();
    info!("Starting console with {:?}", config);

    let registry = install_global(ParserRegistryBuilder::standard()?.build())?;

    let tree = commands::command_tree(registry)?;
    if config.echo_tree {
        info!(
            "Command tree: {} nodes, encoded {:02x?}",
            tree.len(),
            tree.encode().as_ref()
        );
    }

    let hopper = Hopper {
        transfer_cooldown: config.initial_cooldown,
        custom_name: None,
    };
    let mut console = Console::new(registry, hopper);

    print_prompt(&config.prompt);
    for line in io::stdin().lock().lines() {
        let line = line?;
        match console.execute(&line) {
            Ok(Outcome::Reply(reply)) => print_reply(&reply),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                debug!("Command failed: {:?}", e);
                print_reply(&e.to_string());
            }
        }
        print_prompt(&config.prompt);
    }

    info!("Shutting down with {:?}", console.hopper());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_reply(reply: &str) {
    if !reply.is_empty() {
        println!("{reply}");
    }
}

#[allow(clippy::print_stdout)]
fn print_prompt(prompt: &str) {
    print!("{prompt}");
    io::stdout().flush().ok();
}
