//! Static table of known section types.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{dhcp, dropbear, firewall, network, system, uhttpd, wireless};
use crate::error::Error;

/// One registered section type.
#[derive(Debug)]
pub struct SectionKind {
    config: &'static str,
    type_name: &'static str,
    fields: &'static [&'static str],
    decode: fn(Value) -> Result<SectionOptions, serde_json::Error>,
}

impl SectionKind {
    pub fn config(&self) -> &'static str {
        self.config
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Option names declared for this type.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn declares(&self, option: &str) -> bool {
        self.fields.contains(&option)
    }

    /// Decode an object of option keys, ignoring names this type does not declare.
    pub fn decode(&self, options: Value) -> Result<SectionOptions, Error> {
        (self.decode)(options).map_err(|e| Error::decode(e.to_string()))
    }

    /// Like [`decode`](Self::decode) but rejects undeclared and reserved keys.
    pub fn decode_strict(&self, options: Value) -> Result<SectionOptions, Error> {
        let Value::Object(map) = &options else {
            return Err(Error::decode(format!(
                "{} options must be a JSON object",
                self.type_name
            )));
        };
        if let Some(unknown) = map.keys().find(|k| !self.declares(k)) {
            return Err(Error::decode(format!(
                "unknown option '{unknown}' for section type '{}'",
                self.type_name
            )));
        }
        self.decode(options)
    }
}

macro_rules! section_registry {
    (
        $(
            $config:literal => {
                $( $type_name:literal => $variant:ident($opts:ty) ),* $(,)?
            }
        ),* $(,)?
    ) => {
        /// Typed options of any registered section type.
        #[derive(Debug, Clone, PartialEq)]
        pub enum SectionOptions {
            $($( $variant($opts), )*)*
        }

        impl SectionOptions {
            /// The `.type` this record belongs to.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $($( Self::$variant(_) => $type_name, )*)*
                }
            }

            /// The config file this type lives in.
            pub fn config(&self) -> &'static str {
                match self {
                    $($( Self::$variant(_) => $config, )*)*
                }
            }
        }

        impl Serialize for SectionOptions {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $($( Self::$variant(opts) => opts.serialize(serializer), )*)*
                }
            }
        }

        $($(
            impl From<$opts> for SectionOptions {
                fn from(opts: $opts) -> Self {
                    Self::$variant(opts)
                }
            }
        )*)*

        static BUILTIN_KINDS: &[SectionKind] = &[
            $($(
                SectionKind {
                    config: $config,
                    type_name: $type_name,
                    fields: <$opts>::FIELDS,
                    decode: |raw| serde_json::from_value::<$opts>(raw).map(SectionOptions::$variant),
                },
            )*)*
        ];
    };
}

section_registry! {
    "dhcp" => {
        "boot" => Boot(dhcp::BootOptions),
        "circuitid" => CircuitId(dhcp::CircuitIdOptions),
        "dhcp" => Dhcp(dhcp::DhcpOptions),
        "dnsmasq" => Dnsmasq(dhcp::DnsmasqOptions),
        "host" => Host(dhcp::HostOptions),
        "hostrecord" => HostRecord(dhcp::HostRecordOptions),
        "mac" => Mac(dhcp::MacOptions),
        "odhcpd" => Odhcpd(dhcp::OdhcpdOptions),
        "relay" => Relay(dhcp::RelayOptions),
        "remoteid" => RemoteId(dhcp::RemoteIdOptions),
        "subscrid" => SubscrId(dhcp::SubscrIdOptions),
        "tag" => Tag(dhcp::TagOptions),
        "userclass" => UserClass(dhcp::UserClassOptions),
        "vendorclass" => VendorClass(dhcp::VendorClassOptions),
    },
    "dropbear" => {
        "dropbear" => Dropbear(dropbear::DropbearOptions),
    },
    "firewall" => {
        "defaults" => Defaults(firewall::DefaultsOptions),
        "forwarding" => Forwarding(firewall::ForwardingOptions),
        "ipset" => IpSet(firewall::IpSetOptions),
        "include" => Include(firewall::IncludeOptions),
        "redirect" => Redirect(firewall::RedirectOptions),
        "rule" => Rule(firewall::RuleOptions),
        "zone" => Zone(firewall::ZoneOptions),
    },
    "network" => {
        "bridge-vlan" => BridgeVlan(network::BridgeVlanOptions),
        "device" => Device(network::DeviceOptions),
        "globals" => Globals(network::GlobalsOptions),
        "interface" => Interface(network::InterfaceOptions),
        "switch" => Switch(network::SwitchOptions),
        "switch_port" => SwitchPort(network::SwitchPortOptions),
        "switch_vlan" => SwitchVlan(network::SwitchVlanOptions),
    },
    "system" => {
        "system" => System(system::SystemOptions),
        "timeserver" => Timeserver(system::TimeserverOptions),
    },
    "uhttpd" => {
        "cert" => Cert(uhttpd::CertOptions),
        "uhttpd" => Uhttpd(uhttpd::UhttpdOptions),
    },
    "wireless" => {
        "wifi-device" => WifiDevice(wireless::WifiDeviceOptions),
        "wifi-iface" => WifiIface(wireless::WifiIfaceOptions),
    },
}

static BUILTIN: SectionRegistry = SectionRegistry {
    kinds: BUILTIN_KINDS,
};

/// Lookup table from `.type` name to option record.
///
/// Built once as a constant and passed by reference to whatever needs to
/// decode sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionRegistry {
    kinds: &'static [SectionKind],
}

impl SectionRegistry {
    /// Every section type this crate knows about.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// A registry restricted to a custom table.
    pub const fn new(kinds: &'static [SectionKind]) -> Self {
        Self { kinds }
    }

    pub fn resolve(&self, type_name: &str) -> Option<&'static SectionKind> {
        self.kinds.iter().find(|k| k.type_name == type_name)
    }

    pub fn kinds(&self) -> &'static [SectionKind] {
        self.kinds
    }

    /// Config names in registration order, without duplicates.
    pub fn configs(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for kind in self.kinds {
            if !out.contains(&kind.config) {
                out.push(kind.config);
            }
        }
        out
    }

    pub fn is_known_config(&self, config: &str) -> bool {
        self.kinds.iter().any(|k| k.config == config)
    }

    /// Section types belonging to `config`.
    pub fn types_in<'a>(&'a self, config: &'a str) -> impl Iterator<Item = &'static SectionKind> + 'a {
        self.kinds.iter().filter(move |k| k.config == config)
    }

    /// Strictly decode user-supplied option JSON for `type_name`.
    pub fn decode_options_strict(&self, type_name: &str, options: Value) -> Result<SectionOptions, Error> {
        let kind = self.resolve(type_name).ok_or_else(|| Error::UnknownSectionType {
            type_name: type_name.to_owned(),
        })?;
        kind.decode_strict(options)
    }
}
