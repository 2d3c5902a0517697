//! `ubusly login`: authenticate and persist the session.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;
use url::Url;

use ubusly_api::{LoginOptions, Session, UbusClient};
use ubusly_config::{self as config, ClientState, Profile};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::commands::{active_profile, state_path, transport_config};
use crate::error::CliError;
use crate::output;

/// What `login` reports. The token itself is never printed.
#[derive(Debug, Serialize)]
struct LoginSummary {
    username: String,
    url: String,
    timeout: u64,
    expires_in: String,
    state_file: String,
}

impl LoginSummary {
    fn new(session: &Session, url: &Url, state_file: String) -> Self {
        Self {
            username: session.username().to_owned(),
            url: url.to_string(),
            timeout: session.timeout,
            expires_in: expiry_label(session),
            state_file,
        }
    }
}

fn expiry_label(session: &Session) -> String {
    if session.never_expires() {
        "never".into()
    } else {
        humantime::format_duration(Duration::from_secs(session.expires)).to_string()
    }
}

pub async fn handle(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let (profile_name, profile) =
        active_profile(global, &cfg)?.unwrap_or_else(|| ("default".into(), Profile::default()));

    let url = args
        .url
        .or_else(|| (!profile.url.is_empty()).then(|| profile.url.clone()))
        .ok_or_else(|| CliError::Validation {
            field: "url".into(),
            reason: "pass --url or configure a profile with `ubusly config init`".into(),
        })?;
    let endpoint: Url = url.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url}"),
    })?;

    let username = args
        .username
        .or_else(|| profile.username.clone())
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = match args.password {
        Some(pw) => SecretString::from(pw),
        None => stored_password(&profile, &profile_name, &username)
            .map_or_else(|| prompt_password(&username), Ok)?,
    };

    let mut opts = LoginOptions::new(username, password);
    if let Some(timeout) = args.session_timeout.or(profile.session_timeout) {
        opts = opts.with_timeout(timeout);
    }

    let transport = transport_config(global, &cfg, Some(&profile));
    let client = UbusClient::new(endpoint.clone(), &transport)?;
    let session = client.login(&opts).await.map_err(|e| {
        if e.is_session_expired() {
            CliError::AuthFailed
        } else {
            e.into()
        }
    })?;

    let path = state_path(global);
    ClientState::new(session.clone(), endpoint.as_str()).save(&path)?;
    debug!(path = %path.display(), "session stored");

    let summary = LoginSummary::new(&session, &endpoint, path.display().to_string());
    let out = output::render_single(
        global.output,
        &summary,
        |s| {
            format!(
                "Logged in as {} at {}\nSession expires after {} idle\nState: {}",
                s.username, s.url, s.expires_in, s.state_file
            )
        },
        |s| s.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Password from the environment or the profile, if either provides one.
fn stored_password(profile: &Profile, profile_name: &str, username: &str) -> Option<SecretString> {
    let profile = Profile {
        username: Some(username.to_owned()),
        ..profile.clone()
    };
    config::resolve_credentials(&profile, profile_name)
        .ok()
        .map(|(_, pw)| pw)
}

fn prompt_password(username: &str) -> Result<SecretString, CliError> {
    let pw = rpassword::prompt_password(format!("Password for {username}: "))?;
    Ok(SecretString::from(pw))
}
