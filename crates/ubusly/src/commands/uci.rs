//! `ubusly uci ...`: verbs of the `uci` bus object.

use std::fmt::Write;

use serde_json::Value;
use tabled::Tabled;
use tracing::warn;

use ubusly_api::uci::{
    AddOptions, ApplyOptions, ChangesOptions, ConfigsOptions, DeleteOptions, GetOptions,
    RevertOptions, SetOptions,
};
use ubusly_api::{
    Change, ConfigSection, SectionOptions, SectionRegistry, SessionStatus,
    UbusClient,
};
use ubusly_config::{self as config, ClientState};

use crate::cli::{GlobalOpts, UciArgs, UciCommand};
use crate::commands::{active_profile, state_path, transport_config};
use crate::error::CliError;
use crate::output;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    section_type: String,
    #[tabled(rename = "Index")]
    index: u32,
    #[tabled(rename = "Options")]
    options: String,
}

impl SectionRow {
    fn new(s: &ConfigSection) -> Self {
        Self {
            name: if s.is_anonymous() {
                format!("@{}[{}]", s.section_type(), s.index())
            } else {
                s.name().to_owned()
            },
            section_type: s.section_type().to_owned(),
            index: s.index(),
            options: option_summary(s.options()),
        }
    }
}

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Config")]
    config: String,
    #[tabled(rename = "Op")]
    operation: String,
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Option")]
    option: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl ChangeRow {
    fn new(config: &str, change: &Change) -> Self {
        Self {
            config: config.to_owned(),
            operation: change.operation.to_string(),
            section: change.section.clone(),
            option: change
                .option
                .clone()
                .or_else(|| change.section_type.clone())
                .unwrap_or_default(),
            value: change.value.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct KeyValueRow {
    #[tabled(rename = "Option")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Config")]
    name: String,
}

/// `key=value` pairs of the options that are set, in declaration order.
fn option_summary(options: &SectionOptions) -> String {
    let Ok(Value::Object(map)) = serde_json::to_value(options) else {
        return String::new();
    };
    map.iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}={s}"),
            Value::Array(items) => {
                let items: Vec<_> = items.iter().filter_map(Value::as_str).collect();
                format!("{k}={}", items.join(","))
            }
            other => format!("{k}={other}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Validation ───────────────────────────────────────────────────────

fn known_config(name: &str) -> Result<(), CliError> {
    let registry = SectionRegistry::builtin();
    if registry.is_known_config(name) {
        Ok(())
    } else {
        Err(CliError::UnknownConfig {
            name: name.into(),
            available: registry.configs().join(", "),
        })
    }
}

/// Decode `--values` for `section_type`, rejecting options the type does not declare.
fn parse_values(config: &str, section_type: &str, json: &str) -> Result<SectionOptions, CliError> {
    let registry = SectionRegistry::builtin();
    let kind = registry.resolve(section_type).ok_or_else(|| CliError::Validation {
        field: "type".into(),
        reason: format!(
            "unknown section type '{section_type}' (known in {config}: {})",
            registry
                .types_in(config)
                .map(|k| k.type_name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    })?;
    if kind.config() != config {
        return Err(CliError::Validation {
            field: "type".into(),
            reason: format!("'{section_type}' sections live in {}, not {config}", kind.config()),
        });
    }

    let raw: Value = serde_json::from_str(json)?;
    kind.decode_strict(raw).map_err(|e| CliError::Validation {
        field: "values".into(),
        reason: e.to_string(),
    })
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(args: UciArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = state_path(global);
    let state = ClientState::load(&path)?;

    let cfg = config::load_config_or_default();
    let profile = active_profile(global, &cfg)?.map(|(_, p)| p);
    let transport = transport_config(global, &cfg, profile.as_ref());
    let client =
        UbusClient::from_url(&state.url, &transport)?.with_session(state.session.id().clone());

    let result = run(args.command, &client, global).await;

    if client.status() == SessionStatus::Expired {
        warn!(path = %path.display(), "discarding rejected session");
        ClientState::remove(&path)?;
    }
    result
}

#[allow(clippy::too_many_lines)]
async fn run(cmd: UciCommand, client: &UbusClient, global: &GlobalOpts) -> Result<(), CliError> {
    let uci = client.uci();
    let format = global.output;

    let out = match cmd {
        UciCommand::Add {
            config,
            section_type,
            name,
            values,
        } => {
            known_config(&config)?;
            let values = values
                .map(|json| parse_values(&config, &section_type, &json))
                .transpose()?;
            let opts = AddOptions {
                name,
                values,
                ..AddOptions::new(config, section_type)
            };
            let result = opts.result(&uci.add(&opts).await?)?;
            output::render_single(
                format,
                &result,
                |r| format!("Created {}.{}", opts.config, r.section),
                |r| r.section.clone(),
            )
        }

        UciCommand::Apply { rollback, timeout } => {
            let opts = ApplyOptions {
                rollback: rollback.then_some(true),
                timeout,
            };
            uci.apply(&opts).await?.check()?;
            String::new()
        }

        UciCommand::Changes { config } => {
            if let Some(ref name) = config {
                known_config(name)?;
            }
            let opts = ChangesOptions { config };
            let result = opts.result(&uci.changes(&opts).await?)?;
            output::render_single(
                format,
                &result.changes,
                |changes| {
                    let rows: Vec<_> = changes
                        .iter()
                        .flat_map(|(config, list)| list.iter().map(move |c| ChangeRow::new(config, c)))
                        .collect();
                    output::render_table(&rows)
                },
                |changes| {
                    changes
                        .iter()
                        .flat_map(|(config, list)| list.iter().map(move |c| plain_change(config, c)))
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )
        }

        UciCommand::Configs => {
            let opts = ConfigsOptions {};
            let result = opts.result(&uci.configs(&opts).await?)?;
            output::render_list(
                format,
                &result.configs,
                |c| ConfigRow { name: c.clone() },
                Clone::clone,
            )
        }

        UciCommand::Delete {
            config,
            section,
            section_type,
            option,
        } => {
            known_config(&config)?;
            let opts = DeleteOptions {
                config,
                section,
                section_type,
                option,
            };
            uci.delete(&opts).await?.check()?;
            String::new()
        }

        UciCommand::Get {
            config,
            section,
            section_type,
            option,
        } => {
            known_config(&config)?;
            let opts = GetOptions {
                config,
                section,
                section_type,
                option,
            };
            let result = opts.result(&uci.get(&opts).await?)?;
            if result.option.is_empty() {
                output::render_list(format, &result.sections, SectionRow::new, |s| {
                    s.name().to_owned()
                })
            } else {
                output::render_single(
                    format,
                    &result.option,
                    |option| {
                        let rows: Vec<_> = option
                            .iter()
                            .map(|(key, value)| KeyValueRow {
                                key: key.clone(),
                                value: value.join(" "),
                            })
                            .collect();
                        output::render_table(&rows)
                    },
                    |option| {
                        option
                            .values()
                            .flat_map(|v| v.iter().cloned())
                            .collect::<Vec<_>>()
                            .join("\n")
                    },
                )
            }
        }

        UciCommand::Revert { config } => {
            known_config(&config)?;
            uci.revert(&RevertOptions { config }).await?.check()?;
            String::new()
        }

        UciCommand::Set {
            config,
            section,
            section_type,
            values,
        } => {
            known_config(&config)?;
            let values = parse_values(&config, &section_type, &values)?;
            let opts = SetOptions {
                config,
                section,
                values,
            };
            uci.set(&opts).await?.check()?;
            String::new()
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

fn plain_change(config: &str, change: &Change) -> String {
    let mut line = format!("{config} {} {}", change.operation, change.section);
    if let Some(ref ty) = change.section_type {
        let _ = write!(line, " {ty}");
    }
    if let Some(ref option) = change.option {
        let _ = write!(line, ".{option}");
    }
    if let Some(ref value) = change.value {
        let _ = write!(line, "={value}");
    }
    line
}
