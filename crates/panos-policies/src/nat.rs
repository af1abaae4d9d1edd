//! Parameter table for NAT rules.
//!
//! The source translation family nests under an element named after
//! `source_translation_type`, so most of its parameters carry placeholder
//! paths and conditions on the parameters before them.

use std::sync::OnceLock;

use panos_schema::{PanOsVersion, ParamSpec, Schema, SchemaError, ValueKind};

const V8_1: PanOsVersion = PanOsVersion::new(8, 1, 0);
const V9: PanOsVersion = PanOsVersion::new(9, 0, 0);

/// The NAT rule schema. Built once, on first use.
pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| table().expect("nat rule table is valid"))
}

fn table() -> Result<Schema, SchemaError> {
    let mut params = Vec::new();

    params.push(ParamSpec::new("description", ValueKind::Scalar, "description"));
    params.push(
        ParamSpec::new("nat_type", ValueKind::Scalar, "nat-type")
            .values(&["ipv4", "nat64", "nptv6"])
            .with_default("ipv4"),
    );
    params.push(ParamSpec::new("fromzone", ValueKind::Member, "from").with_default(["any"]));
    params.push(ParamSpec::new("tozone", ValueKind::Member, "to"));
    params.push(ParamSpec::new("to_interface", ValueKind::Scalar, "to-interface"));
    params.push(ParamSpec::new("service", ValueKind::Scalar, "service").with_default("any"));
    params.push(ParamSpec::new("source", ValueKind::Member, "source").with_default(["any"]));
    params.push(ParamSpec::new("destination", ValueKind::Member, "destination").with_default(["any"]));

    params.push(
        ParamSpec::new(
            "source_translation_type",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}",
        )
        .values(&["dynamic-ip-and-port", "dynamic-ip", "static-ip"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_address_type",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/{source_translation_address_type}",
        )
        .values(&["interface-address", "translated-address"])
        .when("source_translation_type", &["dynamic-ip-and-port", "dynamic-ip"])
        .with_default("translated-address"),
    );
    params.push(
        ParamSpec::new(
            "source_translation_interface",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/{source_translation_address_type}/interface",
        )
        .when("source_translation_type", &["dynamic-ip-and-port"])
        .when("source_translation_address_type", &["interface-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_ip_address",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/{source_translation_address_type}/ip",
        )
        .when("source_translation_type", &["dynamic-ip-and-port"])
        .when("source_translation_address_type", &["interface-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_translated_addresses",
            ValueKind::Member,
            "source-translation/{source_translation_type}/{source_translation_address_type}",
        )
        .when("source_translation_type", &["dynamic-ip-and-port", "dynamic-ip"])
        .when("source_translation_address_type", &["translated-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_fallback_type",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/fallback/{source_translation_fallback_type}",
        )
        .values(&["translated-address", "interface-address"])
        .when("source_translation_type", &["dynamic-ip"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_fallback_translated_addresses",
            ValueKind::Member,
            "source-translation/{source_translation_type}/fallback/{source_translation_fallback_type}",
        )
        .when("source_translation_type", &["dynamic-ip"])
        .when("source_translation_fallback_type", &["translated-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_fallback_interface",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/fallback/{source_translation_fallback_type}/interface",
        )
        .when("source_translation_type", &["dynamic-ip"])
        .when("source_translation_fallback_type", &["interface-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_fallback_ip_type",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/fallback/{source_translation_fallback_type}/{source_translation_fallback_ip_type}",
        )
        .values(&["ip", "floating-ip"])
        .when("source_translation_type", &["dynamic-ip"])
        .when("source_translation_fallback_type", &["interface-address"])
        .with_default("ip"),
    );
    params.push(
        ParamSpec::new(
            "source_translation_fallback_ip_address",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/fallback/{source_translation_fallback_type}/{source_translation_fallback_ip_type}",
        )
        .when("source_translation_type", &["dynamic-ip"])
        .when("source_translation_fallback_type", &["interface-address"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_static_translated_address",
            ValueKind::Scalar,
            "source-translation/{source_translation_type}/translated-address",
        )
        .when("source_translation_type", &["static-ip"]),
    );
    params.push(
        ParamSpec::new(
            "source_translation_static_bi_directional",
            ValueKind::YesNo,
            "source-translation/{source_translation_type}/bi-directional",
        )
        .when("source_translation_type", &["static-ip"]),
    );

    params.push(ParamSpec::new(
        "destination_translated_address",
        ValueKind::Scalar,
        "destination-translation/translated-address",
    ));
    params.push(ParamSpec::new(
        "destination_translated_port",
        ValueKind::Int,
        "destination-translation/translated-port",
    ));
    params.push(
        ParamSpec::new("ha_binding", ValueKind::Scalar, "active-active-device-binding")
            .values(&["primary", "both", "0", "1"]),
    );
    params.push(ParamSpec::new("disabled", ValueKind::YesNo, "disabled"));
    params.push(ParamSpec::new("negate_target", ValueKind::YesNo, "target/negate"));
    params.push(ParamSpec::new("target", ValueKind::Entry, "target/devices"));
    params.push(ParamSpec::new("tag", ValueKind::Member, "tag"));

    params.push(ParamSpec::excluded("destination_dynamic_translated_address").since(
        V8_1,
        ValueKind::Scalar,
        "dynamic-destination-translation/translated-address",
    ));
    params.push(ParamSpec::excluded("destination_dynamic_translated_port").since(
        V8_1,
        ValueKind::Int,
        "dynamic-destination-translation/translated-port",
    ));
    params.push(
        ParamSpec::excluded("destination_dynamic_translated_distribution")
            .since(V8_1, ValueKind::Scalar, "dynamic-destination-translation/distribution")
            .values(&["round-robin"]),
    );
    params.push(ParamSpec::excluded("uuid").since(V9, ValueKind::Attrib, "uuid"));
    params.push(ParamSpec::excluded("group_tag").since(V9, ValueKind::Scalar, "group-tag"));

    Schema::new("nat-rule", params)
}

#[cfg(test)]
mod tests {
    use panos_schema::{PanOsVersion, Value};
    use pretty_assertions::assert_eq;

    use super::{schema, table};

    const V8_0: PanOsVersion = PanOsVersion::new(8, 0, 1);
    const V8_1: PanOsVersion = PanOsVersion::new(8, 1, 0);
    const V10: PanOsVersion = PanOsVersion::new(10, 0, 0);

    #[test]
    fn table_passes_validation() {
        table().expect("valid table");
    }

    #[test]
    fn interface_translation_renders_nested_family() {
        let mut values = schema().defaults();
        values.insert(
            "source_translation_type".to_string(),
            Value::from("dynamic-ip-and-port"),
        );
        values.insert(
            "source_translation_address_type".to_string(),
            Value::from("interface-address"),
        );
        values.insert(
            "source_translation_interface".to_string(),
            Value::from("ethernet1/1"),
        );
        values.insert(
            "source_translation_ip_address".to_string(),
            Value::from("10.5.5.5"),
        );

        let entry = schema().build("n1", &values, V10).expect("build");
        let expected = "\
<entry name=\"n1\">
  <nat-type>ipv4</nat-type>
  <from>
    <member>any</member>
  </from>
  <service>any</service>
  <source>
    <member>any</member>
  </source>
  <destination>
    <member>any</member>
  </destination>
  <source-translation>
    <dynamic-ip-and-port>
      <interface-address>
        <interface>ethernet1/1</interface>
        <ip>10.5.5.5</ip>
      </interface-address>
    </dynamic-ip-and-port>
  </source-translation>
</entry>";
        assert_eq!(panos_xml::write(&entry).expect("write"), expected);
    }

    #[test]
    fn static_translation_skips_dynamic_only_params() {
        let mut values = schema().defaults();
        values.insert("source_translation_type".to_string(), Value::from("static-ip"));
        values.insert(
            "source_translation_static_translated_address".to_string(),
            Value::from("192.0.2.10"),
        );
        values.insert(
            "source_translation_static_bi_directional".to_string(),
            Value::from(true),
        );

        let entry = schema().build("n1", &values, V10).expect("build");
        let static_ip = entry.find("source-translation/static-ip").expect("static-ip");
        assert_eq!(static_ip.find_text("translated-address"), Some("192.0.2.10"));
        assert_eq!(static_ip.find_text("bi-directional"), Some("yes"));
        // The address-type default only applies to the dynamic types.
        assert!(static_ip.child("interface-address").is_none());
    }

    #[test]
    fn fallback_chain_round_trips() {
        let mut values = schema().defaults();
        values.insert("source_translation_type".to_string(), Value::from("dynamic-ip"));
        values.insert(
            "source_translation_fallback_type".to_string(),
            Value::from("interface-address"),
        );
        values.insert(
            "source_translation_fallback_interface".to_string(),
            Value::from("ethernet1/2"),
        );
        values.insert(
            "source_translation_fallback_ip_address".to_string(),
            Value::from("172.16.0.1"),
        );

        let entry = schema().build("n1", &values, V10).expect("build");
        let fallback = entry
            .find("source-translation/dynamic-ip/fallback/interface-address")
            .expect("fallback");
        assert_eq!(fallback.find_text("interface"), Some("ethernet1/2"));
        assert_eq!(fallback.find_text("ip"), Some("172.16.0.1"));

        let parsed = schema().parse(&entry, V10).expect("parse");
        assert_eq!(
            parsed.get("source_translation_type"),
            Some(&Value::from("dynamic-ip"))
        );
        assert_eq!(
            parsed.get("source_translation_fallback_type"),
            Some(&Value::from("interface-address"))
        );
        assert_eq!(
            parsed.get("source_translation_fallback_ip_type"),
            Some(&Value::from("ip"))
        );
        assert_eq!(
            parsed.get("source_translation_fallback_ip_address"),
            Some(&Value::from("172.16.0.1"))
        );
    }

    #[test]
    fn dynamic_destination_translation_starts_at_eight_one() {
        let mut values = schema().defaults();
        values.insert(
            "destination_dynamic_translated_address".to_string(),
            Value::from("198.51.100.7"),
        );
        values.insert(
            "destination_dynamic_translated_port".to_string(),
            Value::from(8080_i64),
        );

        let old = schema().build("n1", &values, V8_0).expect("build 8.0");
        assert!(old.child("dynamic-destination-translation").is_none());

        let new = schema().build("n1", &values, V8_1).expect("build 8.1");
        assert_eq!(
            new.find_text("dynamic-destination-translation/translated-address"),
            Some("198.51.100.7")
        );
        assert_eq!(
            new.find_text("dynamic-destination-translation/translated-port"),
            Some("8080")
        );
    }
}
