//! PAN-OS management API client core.
//!
//! This facade re-exports the workspace crates under one roof: [`xml`] for
//! element trees, [`schema`] for the versioned parameter engine, and
//! [`policies`] for rules, rulebases, and their operational state.
//!
//! Rules are plain data. Building configuration XML needs no connection,
//! only the target device version:
//!
//! ```rust
//! use panos::{PanOsVersion, Rule};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rule = Rule::security("allow-dns");
//! rule.set("source", ["10.0.0.0/24"])?;
//! rule.set("application", ["dns"])?;
//! rule.set("action", "allow")?;
//!
//! let version: PanOsVersion = "10.1.3".parse()?;
//! let entry = rule.element(version)?;
//! assert_eq!(entry.find_text("action"), Some("allow"));
//! println!("{}", panos::xml::write(&entry)?);
//! # Ok(())
//! # }
//! ```
//!
//! Operational state flows through a caller-provided [`XapiSession`], the
//! only seam to the network:
//!
//! ```rust,no_run
//! use panos::{HitCountSelection, Rule, RuleKind, Rulebase};
//! # use panos::{Element, PanOsVersion, XapiError, XapiSession};
//! # struct Session;
//! # impl XapiSession for Session {
//! #     fn panos_version(&self) -> PanOsVersion {
//! #         PanOsVersion::new(10, 1, 0)
//! #     }
//! #     fn vsys(&self) -> Option<&str> {
//! #         None
//! #     }
//! #     fn op(&self, _cmd: &Element) -> Result<Element, XapiError> {
//! #         unimplemented!("issue the operational command")
//! #     }
//! #     fn log(
//! #         &self,
//! #         _log_type: &str,
//! #         _count: usize,
//! #         _filter: &str,
//! #         _extra_qs: &[(String, String)],
//! #     ) -> Result<Element, XapiError> {
//! #         unimplemented!("query the log database")
//! #     }
//! # }
//! # fn connect() -> Session {
//! #     Session
//! # }
//! # fn main() -> Result<(), panos::PolicyError> {
//! let session = connect();
//! let mut rulebase = Rulebase::default();
//! rulebase.push(Rule::security("allow-dns"));
//!
//! let counts =
//!     rulebase.refresh_hit_counts(&session, RuleKind::Security, HitCountSelection::Attached)?;
//! for (name, hit_count) in &counts {
//!     println!("{name}: {:?}", hit_count.hit_count);
//! }
//!
//! let audit = rulebase.audit_comment("allow-dns")?;
//! audit.update(&session, "reviewed")?;
//! # Ok(())
//! # }
//! ```

pub use panos_policies as policies;
pub use panos_schema as schema;
pub use panos_xml as xml;

pub use panos_policies::{
    AuditComment, AuditCommentLog, HitCount, HitCountSelection, LogDirection, LogTimestamp,
    PolicyError, Rule, RuleKind, RuleOpState, Rulebase, RulebaseKind, XapiError, XapiSession,
};
pub use panos_schema::{PanOsVersion, ParamSpec, Schema, SchemaError, Value, ValueKind};
pub use panos_xml::Element;
