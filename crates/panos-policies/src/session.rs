use panos_schema::PanOsVersion;
use panos_xml::Element;
use thiserror::Error;

/// Error type produced by an [`XapiSession`] implementation.
#[derive(Debug, Error)]
pub enum XapiError {
    /// The request never produced a usable response.
    #[error("transport: {0}")]
    Transport(String),
    /// The device answered with an API-level error status.
    #[error("api error: {0}")]
    Api(String),
}

/// Access to a device's XML management API.
///
/// Implementations own connection, authentication, and retry concerns;
/// this crate only issues operational commands and log queries through the
/// trait and never suspends or retries on its own.
pub trait XapiSession {
    /// Software version of the connected device.
    fn panos_version(&self) -> PanOsVersion;

    /// The vsys this session is scoped to, if any.
    fn vsys(&self) -> Option<&str>;

    /// Execute an operational command and return the parsed `<response>`
    /// document.
    fn op(&self, cmd: &Element) -> Result<Element, XapiError>;

    /// Query the log database: `log_type` selects the log, `count` caps the
    /// number of entries, `filter` narrows them, and `extra_qs` carries
    /// additional query parameters. Returns the parsed `<response>`
    /// document.
    fn log(
        &self,
        log_type: &str,
        count: usize,
        filter: &str,
        extra_qs: &[(String, String)],
    ) -> Result<Element, XapiError>;
}
