//! Sections of `/etc/config/firewall`.

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "firewall";

/// ICMP type names accepted by `rule.icmp_type` besides numeric types.
pub const ICMP_TYPES: &[&str] = &[
    "address-mask-reply",
    "address-mask-request",
    "any",
    "bad-header",
    "communication-prohibited",
    "destination-unreachable",
    "echo-reply",
    "echo-request",
    "fragmentation-needed",
    "host-precedence-violation",
    "host-prohibited",
    "host-redirect",
    "host-unknown",
    "host-unreachable",
    "ip-header-bad",
    "neighbour-advertisement",
    "network-prohibited",
    "network-redirect",
    "network-unknown",
    "network-unreachable",
    "packet-too-big",
    "parameter-problem",
    "ping",
    "pong",
    "port-unreachable",
    "precedence-cutoff",
    "protocol-unreachable",
    "redirect",
    "required-option-missing",
    "router-advertisement",
    "router-solicitation",
    "source-quench",
    "source-route-failed",
    "time-exceeded",
    "timestamp-reply",
    "timestamp-request",
    "TOS-host-redirect",
    "TOS-host-unreachable",
    "TOS-network-redirect",
    "TOS-network-unreachable",
    "ttl-exceeded",
    "ttl-zero-during-reassembly",
    "ttl-zero-during-transit",
    "unknown-header-type",
];

/// Direction-qualified datatypes for `ipset.match`.
pub const IPSET_MATCH_TYPES: &[&str] = &[
    "dest_ip", "dest_port", "dest_mac", "dest_net", "dest_set", "src_ip", "src_port", "src_mac",
    "src_net", "src_set",
];

section_options! {
    /// Global firewall policy (`config defaults`).
    pub struct DefaultsOptions {
        "accept_redirects" => accept_redirects: UciBool,
        "accept_source_route" => accept_source_route: UciBool,
        /// Reject code for non-TCP traffic.
        "any_reject_code" => any_reject_code: UciInt,
        /// Conntrack helpers.
        "auto_helper" => auto_helper: UciBool,
        /// fw4: automatic includes from `/usr/share/nftables.d/`.
        "auto_includes" => auto_includes: UciBool,
        "custom_chains" => custom_chains: UciBool,
        "disable_ipv6" => disable_ipv6: UciBool,
        "drop_invalid" => drop_invalid: UciBool,
        "flow_offloading" => flow_offloading: UciBool,
        "flow_offloading_hw" => flow_offloading_hw: UciBool,
        /// Policy of the FORWARD chain.
        "forward" => forward: String,
        /// Policy of the INPUT chain.
        "input" => input: String,
        /// Policy of the OUTPUT chain.
        "output" => output: String,
        /// Superseded by `synflood_protect`.
        "syn_flood" => syn_flood: UciBool,
        "synflood_protect" => synflood_protect: UciBool,
        "synflood_rate" => synflood_rate: String,
        "synflood_burst" => synflood_burst: String,
        /// 0 off, 1 on, 2 only when requested by ingress.
        "tcp_ecn" => tcp_ecn: UciInt,
        "tcp_syncookies" => tcp_syncookies: UciBool,
        "tcp_reject_code" => tcp_reject_code: UciInt,
        "tcp_window_scaling" => tcp_window_scaling: UciBool,
    }
}

section_options! {
    /// Allowed traffic flow between two zones.
    pub struct ForwardingOptions {
        "dest" => dest: String,
        "enabled" => enabled: UciBool,
        "family" => family: String,
        "ipset" => ipset: String,
        "name" => name: String,
        "src" => src: String,
    }
}

section_options! {
    /// Named IP set referenced from rules and redirects.
    pub struct IpSetOptions {
        "entry" => entry: UciList,
        "enabled" => enabled: UciBool,
        /// Reference an existing set by name instead of creating one.
        "external" => external: String,
        "family" => family: String,
        "hashsize" => hashsize: UciInt,
        "iprange" => iprange: String,
        /// File on the device holding one CIDR per line.
        "loadfile" => loadfile: String,
        /// Datatypes to match, see [`IPSET_MATCH_TYPES`].
        "match" => match_types: UciList,
        "maxelem" => maxelem: UciInt,
        "name" => name: String,
        "netmask" => netmask: UciInt,
        "portrange" => portrange: String,
        /// fw3 only.
        "storage" => storage: String,
        "timeout" => timeout: UciInt,
    }
}

section_options! {
    /// External script or nftables snippet.
    pub struct IncludeOptions {
        "chain" => chain: String,
        "enabled" => enabled: UciBool,
        "path" => path: String,
        "position" => position: String,
        /// `script` or `nftables`.
        "type" => include_type: String,
    }
}

section_options! {
    /// Port forward or NAT rule.
    pub struct RedirectOptions {
        "dest" => dest: String,
        "dest_ip" => dest_ip: String,
        "dest_port" => dest_port: String,
        "enabled" => enabled: UciBool,
        "family" => family: String,
        "helper" => helper: String,
        "ipset" => ipset: String,
        "limit" => limit: String,
        "limit_burst" => limit_burst: UciInt,
        "mark" => mark: String,
        "monthdays" => monthdays: String,
        "name" => name: String,
        "proto" => proto: String,
        /// NAT reflection for DNAT targets.
        "reflection" => reflection: UciBool,
        "reflection_src" => reflection_src: String,
        "reflection_zone" => reflection_zone: UciList,
        "src" => src: String,
        "src_dip" => src_dip: String,
        "src_dport" => src_dport: String,
        "src_ip" => src_ip: String,
        "src_mac" => src_mac: String,
        "src_port" => src_port: String,
        "start_date" => start_date: String,
        "start_time" => start_time: String,
        "stop_date" => stop_date: String,
        "stop_time" => stop_time: String,
        "weekdays" => weekdays: String,
        "target" => target: String,
        "utc_time" => utc_time: UciBool,
    }
}

section_options! {
    /// Traffic rule.
    pub struct RuleOptions {
        "dest" => dest: String,
        "dest_ip" => dest_ip: String,
        /// Port, range or space separated list.
        "dest_port" => dest_port: String,
        "device" => device: String,
        "direction" => direction: String,
        "enabled" => enabled: UciBool,
        "family" => family: String,
        "helper" => helper: String,
        "icmp_type" => icmp_type: UciList,
        "ipset" => ipset: String,
        "limit" => limit: String,
        "limit_burst" => limit_burst: UciInt,
        "mark" => mark: String,
        "monthdays" => monthdays: String,
        "name" => name: String,
        "proto" => proto: UciList,
        "set_mark" => set_mark: String,
        "set_helper" => set_helper: String,
        "set_xmark" => set_xmark: String,
        "src" => src: String,
        "src_ip" => src_ip: String,
        "src_mac" => src_mac: String,
        "src_port" => src_port: String,
        "start_date" => start_date: String,
        "start_time" => start_time: String,
        "stop_date" => stop_date: String,
        "stop_time" => stop_time: String,
        "target" => target: String,
        "utc_time" => utc_time: UciBool,
        "weekdays" => weekdays: String,
    }
}

section_options! {
    /// Firewall zone grouping interfaces under one policy.
    pub struct ZoneOptions {
        "auto_helper" => auto_helper: UciBool,
        "custom_chains" => custom_chains: UciBool,
        "device" => device: UciList,
        "enabled" => enabled: UciBool,
        "family" => family: String,
        "forward" => forward: String,
        "helper" => helper: UciList,
        "input" => input: String,
        /// Bit 0 filter table, bit 1 mangle table.
        "log" => log: UciInt,
        "log_limit" => log_limit: String,
        "masq" => masq: UciBool,
        "masq6" => masq6: UciBool,
        "masq_allow_invalid" => masq_allow_invalid: UciBool,
        "masq_dest" => masq_dest: UciList,
        "masq_src" => masq_src: UciList,
        "mtu_fix" => mtu_fix: UciBool,
        /// At most 11 characters.
        "name" => name: String,
        "network" => network: UciList,
        "output" => output: String,
        "subnet" => subnet: UciList,
    }
}
