//! Clap derive structures for the `ubusly` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ubusly -- talk to an OpenWrt device over ubus JSON-RPC
#[derive(Debug, Parser)]
#[command(
    name = "ubusly",
    version,
    about = "Read and change OpenWrt UCI configuration over ubus JSON-RPC",
    long_about = "Read and change OpenWrt UCI configuration over ubus JSON-RPC.\n\n\
        Log in once with `ubusly login`; the session is kept in a state file\n\
        and reused by every `ubusly uci` command until the device expires it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Session state file (defaults to session.json in the config directory)
    #[arg(long, env = "UBUSLY_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Device profile to use
    #[arg(long, short = 'p', env = "UBUSLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "UBUSLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "UBUSLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "UBUSLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session for later commands
    Login(LoginArgs),

    /// Read and change UCI configuration
    Uci(UciArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Device endpoint, e.g. http://192.168.1.1/ubus (overrides profile)
    #[arg(long, short = 'u', env = "UBUSLY_URL")]
    pub url: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, env = "UBUSLY_USERNAME")]
    pub username: Option<String>,

    /// Password; prompted for when neither this nor the profile provides one
    #[arg(long, env = "UBUSLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Idle timeout to request, in seconds (0 = never expire)
    #[arg(long)]
    pub session_timeout: Option<u64>,
}

// ── uci ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UciArgs {
    #[command(subcommand)]
    pub command: UciCommand,
}

#[derive(Debug, Subcommand)]
pub enum UciCommand {
    /// Create a section
    Add {
        /// Config file, e.g. "firewall"
        #[arg(long, short = 'c')]
        config: String,

        /// Section type, e.g. "rule"
        #[arg(long = "type", short = 't')]
        section_type: String,

        /// Name for a named section (anonymous when omitted)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Initial options as a JSON object
        #[arg(long)]
        values: Option<String>,
    },

    /// Commit pending changes and reload services
    Apply {
        /// Roll back unless confirmed within the timeout
        #[arg(long)]
        rollback: bool,

        /// Rollback timeout in seconds
        #[arg(long)]
        timeout: Option<u32>,
    },

    /// Show pending changes
    Changes {
        /// Only this config (all configs when omitted)
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// List config files on the device
    Configs,

    /// Delete a section, all sections of a type, or one option
    Delete {
        #[arg(long, short = 'c')]
        config: String,

        #[arg(long, short = 's')]
        section: Option<String>,

        #[arg(long = "type", short = 't')]
        section_type: Option<String>,

        #[arg(long)]
        option: Option<String>,
    },

    /// Read a config, matching sections, or one option
    Get {
        #[arg(long, short = 'c')]
        config: String,

        #[arg(long, short = 's')]
        section: Option<String>,

        #[arg(long = "type", short = 't')]
        section_type: Option<String>,

        #[arg(long)]
        option: Option<String>,
    },

    /// Drop pending changes of a config
    Revert {
        #[arg(long, short = 'c')]
        config: String,
    },

    /// Set options on an existing section
    Set {
        #[arg(long, short = 'c')]
        config: String,

        #[arg(long, short = 's')]
        section: String,

        /// Section type, used to validate --values
        #[arg(long = "type", short = 't')]
        section_type: String,

        /// Options as a JSON object
        #[arg(long)]
        values: String,
    },
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a profile
    Init {
        /// Device endpoint, e.g. http://192.168.1.1/ubus
        #[arg(long, short = 'u')]
        url: String,

        /// Login user
        #[arg(long, default_value = "root")]
        username: String,

        /// Requested session timeout in seconds
        #[arg(long)]
        session_timeout: Option<u64>,

        /// Replace an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config and state file locations
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
