use std::error::Error;

use panos::{PanOsVersion, Rule};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let mut rule = Rule::security("allow-dns");
    rule.set("fromzone", ["trust"])?;
    rule.set("tozone", ["untrust"])?;
    rule.set("source", ["10.0.0.0/24"])?;
    rule.set("application", ["dns"])?;
    rule.set("action", "allow")?;
    rule.set("log_end", true)?;
    rule.set("group_tag", "dns-maintenance")?;

    // The same rule renders differently per device version: group_tag only
    // exists from PAN-OS 9.0 on.
    for version in ["8.1.0", "10.1.3"] {
        let version: PanOsVersion = version.parse()?;
        let entry = rule.element(version)?;
        println!("PAN-OS {version}:\n{}\n", panos::xml::write(&entry)?);
    }

    let mut nat = Rule::nat("outbound-snat");
    nat.set("source_translation_type", "dynamic-ip-and-port")?;
    nat.set("source_translation_address_type", "interface-address")?;
    nat.set("source_translation_interface", "ethernet1/1")?;
    println!("NAT rule:\n{}", panos::xml::write(&nat.element("10.1.3".parse()?)?)?);

    Ok(())
}
