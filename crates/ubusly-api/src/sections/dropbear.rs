//! `/etc/config/dropbear`. Option names are CamelCase on the device.

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "dropbear";

section_options! {
    /// One SSH server instance.
    pub struct DropbearOptions {
        "BannerFile" => banner_file: String,
        "PasswordAuth" => password_auth: UciBool,
        "Port" => port: UciInt,
        "RootPasswordAuth" => root_password_auth: UciBool,
        "RootLogin" => root_login: UciBool,
        "GatewayPorts" => gateway_ports: UciBool,
        /// Listen only on this logical interface.
        "Interface" => interface: String,
        "IdleTimeout" => idle_timeout: UciInt,
        "keyfile" => keyfile: UciList,
        "mdns" => mdns: UciInt,
        "MaxAuthTries" => max_auth_tries: UciInt,
        "enable" => enable: UciBool,
        "RecvWindowSize" => recv_window_size: UciInt,
        "rsakeyfile" => rsakeyfile: String,
        "SSHKeepAlive" => ssh_keep_alive: UciInt,
        "verbose" => verbose: UciBool,
    }
}
