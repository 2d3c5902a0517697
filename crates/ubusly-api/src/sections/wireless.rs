//! `/etc/config/wireless`.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{UciBool, UciInt, UciList};

pub const CONFIG: &str = "wireless";

/// Radio channel: `"auto"` or a decimal channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    #[default]
    Auto,
    Fixed(u16),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(n) => n.fmt(f),
        }
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChannelVisitor;

        impl Visitor<'_> for ChannelVisitor {
            type Value = Channel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(r#""auto" or a channel number as a string"#)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Channel, E> {
                if v == "auto" {
                    return Ok(Channel::Auto);
                }
                v.parse()
                    .map(Channel::Fixed)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(ChannelVisitor)
    }
}

section_options! {
    /// Physical radio.
    pub struct WifiDeviceOptions {
        "basic_rate" => basic_rate: UciList,
        "beacon_int" => beacon_int: UciInt,
        /// `2g`, `5g`, `6g` or `60g`.
        "band" => band: String,
        "cell_density" => cell_density: UciInt,
        "chanbw" => chanbw: UciInt,
        "channel" => channel: Channel,
        "channels" => channels: UciList,
        "country" => country: String,
        "country_ie" => country_ie: UciBool,
        "distance" => distance: String,
        "disabled" => disabled: UciBool,
        "diversity" => diversity: UciBool,
        "ht_capab" => ht_capab: String,
        "htmode" => htmode: String,
        "hwmode" => hwmode: String,
        "hostapd_options" => hostapd_options: UciList,
        "macaddr" => macaddr: String,
        "log_level" => log_level: UciInt,
        "legacy_rates" => legacy_rates: UciBool,
        "require_mode" => require_mode: String,
        "rxantenna" => rxantenna: UciInt,
        "supported_rates" => supported_rates: UciList,
        "type" => device_type: String,
        "txpower" => txpower: UciInt,
        "txantenna" => txantenna: UciInt,
        "phy" => phy: String,
        "antenna_gain" => antenna_gain: UciInt,
        "frag" => frag: UciInt,
        "ht_coex" => ht_coex: UciInt,
        "noscan" => noscan: UciBool,
        "path" => path: String,
        "rts" => rts: UciInt,
        "frameburst" => frameburst: UciBool,
        "maxassoc" => maxassoc: UciInt,
        "slottime" => slottime: UciInt,
        "antenna" => antenna: String,
    }
}

section_options! {
    /// Virtual interface (SSID) on a radio.
    pub struct WifiIfaceOptions {
        "device" => device: String,
        "network" => network: UciList,
        /// `ap`, `sta`, `adhoc`, `mesh`, `monitor`.
        "mode" => mode: String,
        "ssid" => ssid: String,
        "bssid" => bssid: String,
        "encryption" => encryption: String,
        "key" => key: String,
        "hidden" => hidden: UciBool,
        "isolate" => isolate: UciBool,
        "disabled" => disabled: UciBool,
        "macaddr" => macaddr: String,
        "ifname" => ifname: String,
        "wds" => wds: UciBool,
        "wmm" => wmm: UciBool,
        "ieee80211r" => ieee80211r: UciBool,
        "ieee80211w" => ieee80211w: UciInt,
        "mobility_domain" => mobility_domain: String,
        "ft_over_ds" => ft_over_ds: UciBool,
        "maxassoc" => maxassoc: UciInt,
        "macfilter" => macfilter: String,
        "maclist" => maclist: UciList,
        "short_preamble" => short_preamble: UciBool,
        "dtim_period" => dtim_period: UciInt,
        "max_inactivity" => max_inactivity: UciInt,
        "disassoc_low_ack" => disassoc_low_ack: UciBool,
        "multicast_to_unicast" => multicast_to_unicast: UciBool,
        "ocv" => ocv: UciInt,
        "sae_pwe" => sae_pwe: UciInt,
        "wps_pushbutton" => wps_pushbutton: UciBool,
        "auth_server" => auth_server: String,
        "auth_port" => auth_port: UciInt,
        "auth_secret" => auth_secret: String,
        "acct_server" => acct_server: String,
    }
}
