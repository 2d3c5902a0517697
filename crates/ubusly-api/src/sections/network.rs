//! `/etc/config/network`.

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "network";

section_options! {
    /// VLAN on a DSA bridge.
    pub struct BridgeVlanOptions {
        "device" => device: String,
        /// Members as `port[:t][*]`.
        "ports" => ports: UciList,
        "vlan" => vlan: UciInt,
    }
}

section_options! {
    /// L2 device (bridge, VLAN, MAC override).
    pub struct DeviceOptions {
        "autoneg" => autoneg: String,
        "ifname" => ifname: String,
        "macaddr" => macaddr: String,
        "name" => name: String,
        "ports" => ports: UciList,
        "rxpause" => rxpause: String,
        "table" => table: String,
        "type" => device_type: String,
        "txpause" => txpause: String,
    }
}

section_options! {
    pub struct GlobalsOptions {
        "packet_steering" => packet_steering: UciInt,
        "tcp_l3mdev" => tcp_l3mdev: UciBool,
        "udp_l3mdev" => udp_l3mdev: UciBool,
        "ula_prefix" => ula_prefix: String,
    }
}

section_options! {
    /// Logical interface. The bridge options apply when `device` is a bridge.
    pub struct InterfaceOptions {
        "auto" => auto: UciBool,
        "disabled" => disabled: UciBool,
        "device" => device: String,
        "force_link" => force_link: UciBool,
        "ipv6" => ipv6: UciBool,
        "ip4table" => ip4table: String,
        "ip6table" => ip6table: String,
        "mtu" => mtu: UciInt,
        "proto" => proto: String,
        "ipaddr" => ipaddr: UciList,
        "netmask" => netmask: String,
        "gateway" => gateway: String,
        "dns" => dns: UciList,
        "ip6assign" => ip6assign: UciInt,
        "ageing_time" => ageing_time: UciInt,
        "bridge_empty" => bridge_empty: UciBool,
        "forward_delay" => forward_delay: UciInt,
        "hash_max" => hash_max: UciInt,
        "hello_time" => hello_time: UciInt,
        "igmp_snooping" => igmp_snooping: UciBool,
        "multicast_querier" => multicast_querier: UciBool,
        "max_age" => max_age: UciInt,
        "priority" => priority: UciInt,
        "last_member_interval" => last_member_interval: UciInt,
        "query_interval" => query_interval: UciInt,
        "query_response_interval" => query_response_interval: UciInt,
        "robustness" => robustness: UciInt,
        "stp" => stp: UciBool,
        "vlan_filtering" => vlan_filtering: UciBool,
    }
}

section_options! {
    /// swconfig switch.
    pub struct SwitchOptions {
        "arl_age_time" => arl_age_time: UciInt,
        "enable_vlan" => enable_vlan: UciBool,
        "enable_mirror_rx" => enable_mirror_rx: UciBool,
        "enable_mirror_tx" => enable_mirror_tx: UciBool,
        "igmp_snooping" => igmp_snooping: UciBool,
        "igmp_v3" => igmp_v3: UciBool,
        "mirror_monitor_port" => mirror_monitor_port: UciInt,
        "mirror_source_port" => mirror_source_port: UciInt,
        "name" => name: String,
        "reset" => reset: UciBool,
    }
}

section_options! {
    pub struct SwitchPortOptions {
        "enable_eee" => enable_eee: UciBool,
        "igmp_snooping" => igmp_snooping: UciBool,
        "igmp_v3" => igmp_v3: UciBool,
        "device" => device: String,
        "port" => port: UciInt,
        "pvid" => pvid: UciInt,
    }
}

section_options! {
    pub struct SwitchVlanOptions {
        "description" => description: String,
        "device" => device: String,
        /// Space separated, `t` suffix marks tagged ports.
        "ports" => ports: String,
        "vid" => vid: UciInt,
        "vlan" => vlan: UciInt,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn interface_from_a_stock_lan() {
        let lan: InterfaceOptions = serde_json::from_value(json!({
            "device": "br-lan",
            "proto": "static",
            "ipaddr": "192.168.1.1",
            "netmask": "255.255.255.0",
            "ip6assign": "60"
        }))
        .unwrap();

        assert_eq!(lan.device.as_deref(), Some("br-lan"));
        assert_eq!(lan.ipaddr, Some(UciList::from("192.168.1.1")));
        assert_eq!(lan.ip6assign, Some(UciInt(60)));
    }
}
