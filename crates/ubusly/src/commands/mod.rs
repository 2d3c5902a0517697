//! Command handlers and the plumbing they share.

pub mod completions;
pub mod config_cmd;
pub mod login;
pub mod uci;

use std::path::PathBuf;
use std::time::Duration;

use ubusly_api::{TlsMode, TransportConfig};
use ubusly_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// `--state-file`, or `session.json` next to the config file.
pub(crate) fn state_path(global: &GlobalOpts) -> PathBuf {
    global
        .state_file
        .clone()
        .unwrap_or_else(ubusly_config::state_path)
}

/// The selected profile. Naming a profile that does not exist is an error;
/// a missing default profile is not.
pub(crate) fn active_profile(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<Option<(String, Profile)>, CliError> {
    match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => Ok(Some((name.to_owned(), profile.clone()))),
        Err(_) if global.profile.is_none() => Ok(None),
        Err(_) => {
            let mut names: Vec<_> = cfg.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            Err(CliError::ProfileNotFound {
                name: global.profile.clone().unwrap_or_default(),
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            })
        }
    }
}

/// Profile transport settings with `--insecure` and `--timeout` applied on top.
pub(crate) fn transport_config(global: &GlobalOpts, cfg: &Config, profile: Option<&Profile>) -> TransportConfig {
    let mut transport = profile
        .map_or_else(|| Profile::default().transport(&cfg.defaults), |p| p.transport(&cfg.defaults));

    if global.insecure {
        transport = transport.with_tls(TlsMode::DangerAcceptInvalid);
    }
    if let Some(secs) = global.timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }
    transport
}
