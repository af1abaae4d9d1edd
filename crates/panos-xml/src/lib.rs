//! Owned XML element trees for PAN-OS API payloads, backed by quick-xml.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, ParseError};
pub use tree::Element;
pub use writer::{write, WriteError};
