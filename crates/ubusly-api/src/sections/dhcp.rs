//! Sections of `/etc/config/dhcp` (dnsmasq and odhcpd).

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "dhcp";

section_options! {
    /// PXE boot server handed out to clients.
    pub struct BootOptions {
        "dhcp_option" => dhcp_option: UciList,
        "filename" => filename: String,
        "force" => force: UciBool,
        "instance" => instance: String,
        "networkid" => networkid: String,
        "serveraddress" => serveraddress: String,
        "servername" => servername: String,
    }
}

section_options! {
    pub struct CircuitIdOptions {
        "circuitid" => circuitid: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    /// Address pool for one interface.
    pub struct DhcpOptions {
        "dhcpv4" => dhcpv4: String,
        "dhcpv6" => dhcpv6: String,
        "dhcp_option" => dhcp_option: UciList,
        "dhcp_option_force" => dhcp_option_force: UciList,
        "dns" => dns: UciList,
        "dns_service" => dns_service: UciBool,
        "dynamicdhcp" => dynamicdhcp: UciBool,
        "force" => force: UciBool,
        "ignore" => ignore: UciBool,
        "instance" => instance: String,
        "interface" => interface: String,
        "leasetime" => leasetime: String,
        "limit" => limit: String,
        "master" => master: UciBool,
        "networkid" => networkid: String,
        "ndp" => ndp: String,
        "ndproxy_slave" => ndproxy_slave: UciBool,
        "ndproxy_routing" => ndproxy_routing: UciBool,
        "ra" => ra: String,
        "ra_default" => ra_default: UciInt,
        "ra_flags" => ra_flags: UciList,
        "ra_hoplimit" => ra_hoplimit: UciInt,
        "ra_mtu" => ra_mtu: UciInt,
        "ra_management" => ra_management: UciInt,
        "ra_maxinterval" => ra_maxinterval: UciInt,
        "ra_mininterval" => ra_mininterval: UciInt,
        "ra_offlink" => ra_offlink: UciBool,
        "ra_preference" => ra_preference: String,
        "ra_reachabletime" => ra_reachabletime: UciInt,
        "ra_retranstime" => ra_retranstime: UciInt,
        "ra_dns" => ra_dns: UciBool,
        "ra_slaac" => ra_slaac: UciBool,
        "ra_lifetime" => ra_lifetime: UciInt,
        "ra_useleasetime" => ra_useleasetime: UciBool,
        "start" => start: String,
        "tag" => tag: UciList,
    }
}

section_options! {
    /// dnsmasq instance settings.
    pub struct DnsmasqOptions {
        "address" => address: UciList,
        "add_local_domain" => add_local_domain: UciBool,
        "add_local_hostname" => add_local_hostname: UciBool,
        "add_local_fqdn" => add_local_fqdn: UciInt,
        "addmac" => addmac: String,
        "add_wan_fqdn" => add_wan_fqdn: UciInt,
        "addnhosts" => addnhosts: UciList,
        "addnmount" => addnmount: UciList,
        "allservers" => allservers: UciBool,
        "authoritative" => authoritative: UciBool,
        "bogusnxdomain" => bogusnxdomain: UciList,
        "boguspriv" => boguspriv: UciBool,
        "cachelocal" => cachelocal: UciBool,
        "cachesize" => cachesize: String,
        "confdir" => confdir: String,
        "dbus" => dbus: UciBool,
        "dhcp_boot" => dhcp_boot: String,
        "dnsforwardmax" => dnsforwardmax: UciInt,
        "dhcphostsfile" => dhcphostsfile: String,
        "dhcpleasemax" => dhcpleasemax: UciInt,
        "dhcpscript" => dhcpscript: String,
        "domain" => domain: String,
        "domainneeded" => domainneeded: UciBool,
        "ednspacket_max" => ednspacket_max: String,
        "enable_tftp" => enable_tftp: UciBool,
        "expandhosts" => expandhosts: UciBool,
        "filterwin2k" => filterwin2k: UciBool,
        "fqdn" => fqdn: UciBool,
        "interface" => interface: UciList,
        "leasefile" => leasefile: String,
        "listen_address" => listen_address: UciList,
        "local" => local: String,
        "localise_queries" => localise_queries: UciBool,
        "localservice" => localservice: UciBool,
        "local_ttl" => local_ttl: UciInt,
        "localuse" => localuse: UciBool,
        "logdhcp" => logdhcp: UciBool,
        "logfacility" => logfacility: String,
        "logqueries" => logqueries: UciBool,
        "max_cache_ttl" => max_cache_ttl: UciInt,
        "maxport" => maxport: UciInt,
        "max_ttl" => max_ttl: UciInt,
        "min_cache_ttl" => min_cache_ttl: UciInt,
        "minport" => minport: UciInt,
        "nodaemon" => nodaemon: UciBool,
        "nohosts" => nohosts: UciBool,
        "nonegcache" => nonegcache: UciBool,
        "noping" => noping: UciBool,
        "noresolv" => noresolv: UciBool,
        "nonwildcard" => nonwildcard: UciBool,
        "notinterface" => notinterface: UciList,
        "port" => port: UciInt,
        "queryport" => queryport: UciInt,
        "quietdhcp" => quietdhcp: UciBool,
        "rapidcommit" => rapidcommit: UciBool,
        "readethers" => readethers: UciBool,
        "rebind_protection" => rebind_protection: UciBool,
        "rebind_localhost" => rebind_localhost: UciBool,
        "rebind_domain" => rebind_domain: UciList,
        "resolvfile" => resolvfile: String,
        "rev_server" => rev_server: UciList,
        "sequential_ip" => sequential_ip: UciBool,
        "server" => server: UciList,
        "serverlist" => serverlist: String,
        "strictorder" => strictorder: UciBool,
        "tftp_root" => tftp_root: String,
    }
}

section_options! {
    /// Static lease.
    pub struct HostOptions {
        "broadcast" => broadcast: UciBool,
        "dns" => dns: UciBool,
        "duid" => duid: String,
        "hostid" => hostid: String,
        "ip" => ip: String,
        "instance" => instance: String,
        "leasetime" => leasetime: String,
        "mac" => mac: UciList,
        "match_tag" => match_tag: UciList,
        "name" => name: String,
        "tag" => tag: String,
    }
}

section_options! {
    pub struct HostRecordOptions {
        "name" => name: String,
        "ip" => ip: String,
    }
}

section_options! {
    pub struct MacOptions {
        "mac" => mac: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    pub struct OdhcpdOptions {
        "maindhcp" => maindhcp: UciBool,
        "leasefile" => leasefile: String,
        "leasetrigger" => leasetrigger: String,
        "legacy" => legacy: UciBool,
        "loglevel" => loglevel: UciInt,
    }
}

section_options! {
    pub struct RelayOptions {
        "id" => id: String,
        "interface" => interface: String,
        "local_addr" => local_addr: String,
        "server_addr" => server_addr: String,
    }
}

section_options! {
    pub struct RemoteIdOptions {
        "remoteid" => remoteid: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    pub struct SubscrIdOptions {
        "subscrid" => subscrid: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    pub struct TagOptions {
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    pub struct UserClassOptions {
        "userclass" => userclass: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}

section_options! {
    pub struct VendorClassOptions {
        "vendorclass" => vendorclass: String,
        "networkid" => networkid: String,
        "dhcp_option" => dhcp_option: UciList,
        "force" => force: UciBool,
    }
}
