//! Command tree announced to clients.
//!
//! Builds the body of the clientbound Commands packet. Argument nodes carry
//! the parser the client should use; when a binding has no client-native
//! completions the node also asks the client to request suggestions from the
//! server.

use bytes::{BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::grammar::ClientParser;
use crate::parser::ValueParser;
use crate::registry::RegisteredParser;

/// Command node flags
const NODE_TYPE_ROOT: u8 = 0;
const NODE_TYPE_LITERAL: u8 = 1;
const NODE_TYPE_ARGUMENT: u8 = 2;
const FLAG_EXECUTABLE: u8 = 0x04;
const FLAG_HAS_SUGGESTIONS: u8 = 0x10;

/// Suggestion provider that makes the client ask the server.
pub const ASK_SERVER: &str = "minecraft:ask_server";

/// Longest protocol string, in UTF-16 units.
const MAX_STRING_LENGTH: usize = 32767;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no node with index {0}")]
    UnknownNode(usize),
    #[error("node name too long: {len} > {max}")]
    NameTooLong { len: usize, max: usize },
}

/// Index of a node in a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Literal,
    Argument {
        parser: ClientParser,
        ask_server: bool,
    },
}

#[derive(Debug, Clone)]
struct CommandNode {
    kind: NodeKind,
    name: String,
    executable: bool,
    children: Vec<usize>,
}

/// A tree of literal and argument nodes under a single root.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl Default for CommandTree {
    fn default() -> Self {
        Self::new()
    }
}

// The root node always exists, so a tree is never empty.
#[allow(clippy::len_without_is_empty)]
impl CommandTree {
    pub const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![CommandNode {
                kind: NodeKind::Root,
                name: String::new(),
                executable: false,
                children: Vec::new(),
            }],
        }
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn literal(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.push(parent, name, NodeKind::Literal)
    }

    /// Add an argument node parsed by `parser`.
    pub fn argument<T>(
        &mut self,
        parent: NodeId,
        name: &str,
        parser: &dyn ValueParser<T>,
    ) -> Result<NodeId, TreeError> {
        let kind = NodeKind::Argument {
            parser: parser.client_parser(),
            ask_server: !parser.has_client_native_completions(),
        };
        self.push(parent, name, kind)
    }

    /// Add an argument node for a parser taken from a registry.
    pub fn registered_argument(
        &mut self,
        parent: NodeId,
        name: &str,
        parser: &dyn RegisteredParser,
    ) -> Result<NodeId, TreeError> {
        let kind = NodeKind::Argument {
            parser: parser.client_parser(),
            ask_server: !parser.has_client_native_completions(),
        };
        self.push(parent, name, kind)
    }

    /// Mark a node as a complete command.
    pub fn executable(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.node_mut(node)?.executable = true;
        Ok(())
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut CommandNode, TreeError> {
        self.nodes
            .get_mut(node.0)
            .ok_or(TreeError::UnknownNode(node.0))
    }

    fn push(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId, TreeError> {
        let len = name.encode_utf16().count();
        if len > MAX_STRING_LENGTH {
            return Err(TreeError::NameTooLong {
                len,
                max: MAX_STRING_LENGTH,
            });
        }

        let index = self.nodes.len();
        self.node_mut(parent)?.children.push(index);
        self.nodes.push(CommandNode {
            kind,
            name: name.to_string(),
            executable: false,
            children: Vec::new(),
        });
        Ok(NodeId(index))
    }

    /// Encode as the Commands packet body: nodes, then the root index.
    #[must_use]
    pub fn encode(&self) -> Bytes {
        let mut data = BytesMut::new();
        put_varint(&mut data, self.nodes.len() as i32);

        for node in &self.nodes {
            let mut flags = match node.kind {
                NodeKind::Root => NODE_TYPE_ROOT,
                NodeKind::Literal => NODE_TYPE_LITERAL,
                NodeKind::Argument { ask_server, .. } => {
                    NODE_TYPE_ARGUMENT | if ask_server { FLAG_HAS_SUGGESTIONS } else { 0 }
                }
            };
            if node.executable {
                flags |= FLAG_EXECUTABLE;
            }
            data.put_u8(flags);

            put_varint(&mut data, node.children.len() as i32);
            for &child in &node.children {
                put_varint(&mut data, child as i32);
            }

            if matches!(node.kind, NodeKind::Root) {
                continue;
            }
            put_string(&mut data, &node.name);

            if let NodeKind::Argument { parser, ask_server } = node.kind {
                put_varint(&mut data, parser.id());
                parser.write_properties(&mut data);
                if ask_server {
                    put_string(&mut data, ASK_SERVER);
                }
            }
        }

        put_varint(&mut data, Self::ROOT.0 as i32);
        data.freeze()
    }
}

pub fn put_varint(data: &mut BytesMut, mut value: i32) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value = ((value as u32) >> 7) as i32;
        if value != 0 {
            byte |= 0x80;
        }
        data.put_u8(byte);
        if value == 0 {
            break;
        }
    }
}

fn put_string(data: &mut BytesMut, value: &str) {
    put_varint(data, value.len() as i32);
    data.extend_from_slice(value.as_bytes());
}
