//! Parameter table for policy-based-forwarding rules.

use std::sync::OnceLock;

use panos_schema::{PanOsVersion, ParamSpec, Schema, SchemaError, ValueKind};

const V9: PanOsVersion = PanOsVersion::new(9, 0, 0);

/// The PBF rule schema. Built once, on first use.
pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| table().expect("pbf rule table is valid"))
}

fn table() -> Result<Schema, SchemaError> {
    let mut params = Vec::new();

    params.push(ParamSpec::new("description", ValueKind::Scalar, "description"));
    params.push(ParamSpec::new("tags", ValueKind::Member, "tag"));
    params.push(
        ParamSpec::new("from_type", ValueKind::Scalar, "from/{from_type}")
            .values(&["zone", "interface"])
            .with_default("zone"),
    );
    params.push(ParamSpec::new("from_value", ValueKind::Member, "from/{from_type}"));
    params.push(ParamSpec::new("source_addresses", ValueKind::Member, "source"));
    params.push(ParamSpec::new("source_users", ValueKind::Member, "source-user"));
    params.push(ParamSpec::new("negate_source", ValueKind::YesNo, "negate-source"));
    params.push(ParamSpec::new(
        "destination_addresses",
        ValueKind::Member,
        "destination",
    ));
    params.push(ParamSpec::new(
        "negate_destination",
        ValueKind::YesNo,
        "negate-destination",
    ));
    params.push(ParamSpec::new("applications", ValueKind::Member, "application"));
    params.push(ParamSpec::new("services", ValueKind::Member, "service"));
    params.push(ParamSpec::new("schedule", ValueKind::Scalar, "schedule"));
    params.push(ParamSpec::new("disabled", ValueKind::YesNo, "disabled"));

    params.push(
        ParamSpec::new("action", ValueKind::Scalar, "action/{action}")
            .values(&["forward", "forward-to-vsys", "discard", "no-pbf"])
            .with_default("forward"),
    );
    params.push(
        ParamSpec::new(
            "forward_vsys",
            ValueKind::Scalar,
            "action/{action}/forward-to-vsys",
        )
        .when("action", &["forward-to-vsys"]),
    );
    params.push(
        ParamSpec::new(
            "forward_egress_interface",
            ValueKind::Scalar,
            "action/{action}/egress-interface",
        )
        .when("action", &["forward"]),
    );
    params.push(
        ParamSpec::new(
            "forward_next_hop_type",
            ValueKind::Scalar,
            "action/{action}/nexthop/{forward_next_hop_type}",
        )
        .values(&["ip-address", "fqdn"])
        .when("action", &["forward"]),
    );
    params.push(
        ParamSpec::new(
            "forward_next_hop_value",
            ValueKind::Scalar,
            "action/{action}/nexthop/{forward_next_hop_type}",
        )
        .when("action", &["forward"])
        .when("forward_next_hop_type", &["ip-address", "fqdn"]),
    );
    params.push(
        ParamSpec::new(
            "forward_monitor_profile",
            ValueKind::Scalar,
            "action/{action}/monitor/profile",
        )
        .when("action", &["forward"]),
    );
    params.push(
        ParamSpec::new(
            "forward_monitor_ip_address",
            ValueKind::Scalar,
            "action/{action}/monitor/ip-address",
        )
        .when("action", &["forward"]),
    );
    params.push(
        ParamSpec::new(
            "forward_monitor_disable_if_unreachable",
            ValueKind::YesNo,
            "action/{action}/monitor/disable-if-unreachable",
        )
        .when("action", &["forward"]),
    );

    params.push(ParamSpec::new(
        "enable_enforce_symmetric_return",
        ValueKind::YesNo,
        "enforce-symmetric-return/enabled",
    ));
    params.push(ParamSpec::new(
        "symmetric_return_addresses",
        ValueKind::Entry,
        "enforce-symmetric-return/nexthop-address-list",
    ));
    params.push(ParamSpec::new(
        "active_active_device_binding",
        ValueKind::Scalar,
        "active-active-device-binding",
    ));
    params.push(ParamSpec::new("target", ValueKind::Entry, "target/devices"));
    params.push(ParamSpec::new("negate_target", ValueKind::YesNo, "target/negate"));

    params.push(ParamSpec::excluded("uuid").since(V9, ValueKind::Attrib, "uuid"));
    params.push(ParamSpec::excluded("group_tag").since(V9, ValueKind::Scalar, "group-tag"));

    Schema::new("pbf-rule", params)
}
