//! `/etc/config/system`.

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "system";

section_options! {
    /// Hostname, logging and time zone.
    pub struct SystemOptions {
        "buffersize" => buffersize: UciInt,
        "conloglevel" => conloglevel: UciInt,
        "cronloglevel" => cronloglevel: UciInt,
        "description" => description: String,
        "hostname" => hostname: String,
        "klogconloglevel" => klogconloglevel: UciInt,
        "log_buffer_size" => log_buffer_size: UciInt,
        "log_file" => log_file: String,
        "log_hostname" => log_hostname: String,
        "log_ip" => log_ip: String,
        "log_port" => log_port: UciInt,
        "log_prefix" => log_prefix: String,
        "log_proto" => log_proto: String,
        "log_remote" => log_remote: UciBool,
        "log_size" => log_size: UciInt,
        "log_trailer_null" => log_trailer_null: UciBool,
        "log_type" => log_type: String,
        "notes" => notes: String,
        "ttylogin" => ttylogin: UciBool,
        "urandom_seed" => urandom_seed: String,
        /// POSIX TZ string, e.g. `UTC` or `CET-1CEST,M3.5.0,M10.5.0/3`.
        "timezone" => timezone: String,
        "zonename" => zonename: String,
        "zram_comp_algo" => zram_comp_algo: String,
        "zram_size_mb" => zram_size_mb: UciInt,
    }
}

section_options! {
    /// NTP client and server.
    pub struct TimeserverOptions {
        "enabled" => enabled: UciBool,
        "enable_server" => enable_server: UciBool,
        "server" => server: UciList,
    }
}
