//! Versioned parameter tables mapped to and from PAN-OS configuration XML.
//!
//! A [`Schema`] is an ordered list of [`ParamSpec`] declarations. Each
//! declaration names a caller-facing parameter and the XML path its value
//! lives at, possibly different across device versions. One generic engine
//! turns a value map into an `<entry>` element tree ([`Schema::build`]) and
//! back ([`Schema::parse`]).

pub mod param;
pub mod path;
pub mod schema;
pub mod value;
pub mod version;

pub use param::{ParamSpec, VersionProfile};
pub use path::{PathSegment, PathTemplate};
pub use schema::{Schema, SchemaError};
pub use value::{Value, ValueKind};
pub use version::{PanOsVersion, VersionParseError};
