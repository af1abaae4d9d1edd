//! Parameter table for security rules.

use std::sync::OnceLock;

use panos_schema::{PanOsVersion, ParamSpec, Schema, SchemaError, ValueKind};

const V9: PanOsVersion = PanOsVersion::new(9, 0, 0);
const V10: PanOsVersion = PanOsVersion::new(10, 0, 0);

/// The security rule schema. Built once, on first use.
pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| table().expect("security rule table is valid"))
}

fn table() -> Result<Schema, SchemaError> {
    let mut params = Vec::new();

    for (name, path) in [
        ("fromzone", "from"),
        ("tozone", "to"),
        ("source", "source"),
        ("source_user", "source-user"),
        ("hip_profiles", "hip-profiles"),
        ("destination", "destination"),
        ("application", "application"),
    ] {
        params.push(ParamSpec::new(name, ValueKind::Member, path).with_default(["any"]));
    }

    params.push(
        ParamSpec::new("service", ValueKind::Member, "service")
            .with_default(["application-default"]),
    );
    params.push(ParamSpec::new("category", ValueKind::Member, "category").with_default(["any"]));
    params.push(ParamSpec::new("action", ValueKind::Scalar, "action"));
    params.push(ParamSpec::new("log_setting", ValueKind::Scalar, "log-setting"));
    params.push(ParamSpec::new("log_start", ValueKind::YesNo, "log-start"));
    params.push(ParamSpec::new("log_end", ValueKind::YesNo, "log-end"));
    params.push(ParamSpec::new("description", ValueKind::Scalar, "description"));
    params.push(ParamSpec::new("type", ValueKind::Scalar, "rule-type").with_default("universal"));
    params.push(ParamSpec::new("tag", ValueKind::Member, "tag"));
    params.push(ParamSpec::new("negate_source", ValueKind::YesNo, "negate-source"));
    params.push(ParamSpec::new(
        "negate_destination",
        ValueKind::YesNo,
        "negate-destination",
    ));
    params.push(ParamSpec::new("disabled", ValueKind::YesNo, "disabled"));
    params.push(ParamSpec::new("schedule", ValueKind::Scalar, "schedule"));
    params.push(ParamSpec::new(
        "icmp_unreachable",
        ValueKind::YesNo,
        "icmp-unreachable",
    ));
    params.push(ParamSpec::new(
        "disable_server_response_inspection",
        ValueKind::YesNo,
        "option/disable-server-response-inspection",
    ));
    params.push(ParamSpec::new(
        "group",
        ValueKind::Member,
        "profile-setting/group",
    ));
    params.push(ParamSpec::new("negate_target", ValueKind::YesNo, "target/negate"));
    params.push(ParamSpec::new("target", ValueKind::Entry, "target/devices"));

    for profile in [
        "virus",
        "spyware",
        "vulnerability",
        "url-filtering",
        "file-blocking",
        "wildfire-analysis",
        "data-filtering",
    ] {
        let path = format!("profile-setting/profiles/{profile}");
        params.push(ParamSpec::new(profile, ValueKind::Member, &path));
    }

    params.push(ParamSpec::excluded("uuid").since(V9, ValueKind::Attrib, "uuid"));
    params.push(
        ParamSpec::excluded("source_devices")
            .since(V10, ValueKind::Member, "source-hip")
            .with_default(["any"]),
    );
    params.push(
        ParamSpec::excluded("destination_devices")
            .since(V10, ValueKind::Member, "destination-hip")
            .with_default(["any"]),
    );
    params.push(ParamSpec::excluded("group_tag").since(V9, ValueKind::Scalar, "group-tag"));

    Schema::new("security-rule", params)
}
