//! Command argument plumbing for the plugin layer.
//!
//! - [`ArgumentReader`]: a read-only cursor view over command input, and its
//!   mutable counterpart [`StringReader`] used by grammar types.
//! - [`ArgumentType`]: grammar types that scan one argument.
//! - [`ClientNativeParser`] / [`StandardParser`]: bindings that tag a grammar
//!   with a key and convert its output.
//! - [`ParserRegistry`]: keyed, immutable parser lookup, optionally installed
//!   process-wide.
//! - [`CommandTree`]: the command tree announced to clients.
//!
//! # Example
//!
//! ```
//! use mc_command::{ArgumentReader, ParserRegistryBuilder, keys};
//!
//! let registry = ParserRegistryBuilder::standard().unwrap().build();
//!
//! let view = ArgumentReader::new("cooldown 20", 9).unwrap();
//! let mut reader = view.to_mutable();
//! let ticks: i32 = registry.parse(&keys::INTEGER, &mut reader).unwrap();
//!
//! assert_eq!(ticks, 20);
//! assert_eq!(view.remaining(), "20");
//! ```

mod error;
mod grammar;
mod parser;
mod reader;
mod registry;
mod string_reader;
mod tree;

pub use error::{ArgumentParseError, ParseErrorKind, ParseResult, ReaderError};
pub use grammar::{
    ArgumentType, BoolArgument, ClientParser, DoubleArgument, FloatArgument, IntegerArgument,
    LongArgument, StringArgument, StringKind,
};
pub use parser::{ClientNativeParser, StandardParser, ValueParser};
pub use reader::ArgumentReader;
pub use registry::{
    ParserRegistry, ParserRegistryBuilder, RegisteredParser, RegistryError, global,
    install_global, keys,
};
pub use string_reader::StringReader;
pub use tree::{ASK_SERVER, CommandTree, NodeId, TreeError};
