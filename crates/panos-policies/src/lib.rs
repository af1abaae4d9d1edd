//! PAN-OS policy configuration: security, NAT, and policy-based-forwarding
//! rules, the rulebases that hold them, and operational state readers for
//! rule hit counts and audit comments.
//!
//! Rules are plain data. [`Rule::element`] renders a rule as the `<entry>`
//! tree the configuration API expects for a given device version, and
//! [`Rule::update_from`] reads one back. Operational state flows through a
//! caller-provided [`XapiSession`], the only seam to the network.

pub mod nat;
pub mod opstate;
pub mod pbf;
pub mod rulebase;
pub mod rules;
pub mod security;
pub mod session;

use panos_schema::{PanOsVersion, SchemaError};
use thiserror::Error;

pub use opstate::{AuditCommentLog, HitCount, LogDirection, LogTimestamp, RuleOpState};
pub use rulebase::{AuditComment, HitCountSelection, Rulebase, RulebaseKind};
pub use rules::{Rule, RuleKind};
pub use session::{XapiError, XapiSession};

/// Error type produced by policy operations.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The operation needs a newer PAN-OS than the device runs.
    #[error("requires PAN-OS {needed}+, device is {have}")]
    Unsupported {
        needed: PanOsVersion,
        have: PanOsVersion,
    },
    /// The named rule is not attached to this rulebase.
    #[error("rule not found in rulebase: {0}")]
    RuleNotFound(String),
    /// Rendering or reading rule XML failed.
    #[error("schema: {0}")]
    Schema(#[from] SchemaError),
    /// The XML API transport failed.
    #[error("xapi: {0}")]
    Xapi(#[from] XapiError),
}
