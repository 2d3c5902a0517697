//! `/etc/config/uhttpd`.

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "uhttpd";

section_options! {
    /// Parameters for the self-signed certificate generated on first boot.
    pub struct CertOptions {
        "bits" => bits: UciInt,
        "commonname" => commonname: String,
        "country" => country: String,
        "days" => days: UciInt,
        "ec_curve" => ec_curve: String,
        "key_type" => key_type: String,
        "location" => location: String,
        "organization" => organization: String,
        "state" => state: String,
    }
}

section_options! {
    /// One web server instance. `ubus_prefix` exposes the JSON-RPC endpoint.
    pub struct UhttpdOptions {
        "cert" => cert: String,
        "cgi_prefix" => cgi_prefix: String,
        "config" => config: String,
        "error_page" => error_page: String,
        "home" => home: String,
        "http_keepalive" => http_keepalive: UciInt,
        "index_file" => index_file: String,
        "index_page" => index_page: UciList,
        "key" => key: String,
        "listen_http" => listen_http: UciList,
        "listen_https" => listen_https: UciList,
        "lua_handler" => lua_handler: String,
        "lua_prefix" => lua_prefix: UciList,
        "max_connections" => max_connections: UciInt,
        "max_requests" => max_requests: UciInt,
        "network_timeout" => network_timeout: UciInt,
        "no_dirlists" => no_dirlists: UciBool,
        "no_symlinks" => no_symlinks: UciBool,
        "realm" => realm: String,
        "redirect_https" => redirect_https: UciBool,
        "rfc1918_filter" => rfc1918_filter: UciBool,
        "script_timeout" => script_timeout: UciInt,
        "tcp_keepalive" => tcp_keepalive: UciInt,
        "ubus_cors" => ubus_cors: UciBool,
        "ubus_noauth" => ubus_noauth: UciBool,
        "ubus_prefix" => ubus_prefix: String,
        "ubus_socket" => ubus_socket: String,
    }
}
