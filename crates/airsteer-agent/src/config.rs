//! Agent configuration from environment variables.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Verbose logging.
pub const ENV_DEBUG: &str = "DEBUG";
/// Node site file.
pub const ENV_SRC_FILE: &str = "SRC_FILE";
/// Access point site file.
pub const ENV_TGT_FILE: &str = "TGT_FILE";
/// Compute and log steering actions without performing them.
pub const ENV_DRY_RUN: &str = "DRY_RUN";
/// Seconds between cycles.
pub const ENV_INTERVAL_SECS: &str = "INTERVAL_SECS";
/// Run one cycle and exit.
pub const ENV_ONE_SHOT: &str = "ONE_SHOT";
/// Machine id override.
pub const ENV_NODE_ID: &str = "NODE_ID";
/// NetworkManager connection profile to steer.
pub const ENV_WIFI_CONNECTION: &str = "WIFI_CONNECTION";
/// Fixed per-AP capacity.
pub const ENV_AP_CAPACITY: &str = "AP_CAPACITY";

/// Configuration for the steering agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Verbose logging
    pub debug: bool,

    /// CSV file listing the client nodes
    pub src_file: PathBuf,

    /// CSV file listing the access points
    pub tgt_file: PathBuf,

    /// Suppress real association requests
    pub dry_run: bool,

    /// Sleep between cycles
    pub interval: Duration,

    /// Exit after the first cycle
    pub one_shot: bool,

    /// Use this id instead of asking the hardware
    pub node_id: Option<String>,

    /// NetworkManager connection to steer (first active Wi-Fi if unset)
    pub connection: Option<String>,

    /// Per-AP capacity override (default ceil(N / M))
    pub ap_capacity: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            debug: false,
            src_file: PathBuf::from("sources.csv"),
            tgt_file: PathBuf::from("targets.csv"),
            dry_run: false,
            interval: Duration::from_secs(30),
            one_shot: false,
            node_id: None,
            connection: None,
            ap_capacity: None,
        }
    }
}

impl AgentConfig {
    /// Create config from the process environment, with defaults for anything
    /// unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unset and empty variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let debug = match get(ENV_DEBUG) {
            Some(v) => parse_flag(ENV_DEBUG, &v)?,
            None => defaults.debug,
        };
        let dry_run = match get(ENV_DRY_RUN) {
            Some(v) => parse_flag(ENV_DRY_RUN, &v)?,
            None => defaults.dry_run,
        };
        let one_shot = match get(ENV_ONE_SHOT) {
            Some(v) => parse_flag(ENV_ONE_SHOT, &v)?,
            None => defaults.one_shot,
        };
        let interval = match get(ENV_INTERVAL_SECS) {
            Some(v) => parse_interval(&v)?,
            None => defaults.interval,
        };
        let ap_capacity = match get(ENV_AP_CAPACITY) {
            Some(v) => Some(v.parse::<usize>().map_err(|e| Error::Env {
                var: ENV_AP_CAPACITY,
                value: v.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            debug,
            src_file: get(ENV_SRC_FILE).map(PathBuf::from).unwrap_or(defaults.src_file),
            tgt_file: get(ENV_TGT_FILE).map(PathBuf::from).unwrap_or(defaults.tgt_file),
            dry_run,
            interval,
            one_shot,
            node_id: get(ENV_NODE_ID),
            connection: get(ENV_WIFI_CONNECTION),
            ap_capacity,
        })
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::Env {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_interval(value: &str) -> Result<Duration> {
    let invalid = |reason: String| Error::Env {
        var: ENV_INTERVAL_SECS,
        value: value.to_string(),
        reason,
    };
    let secs: f64 = value.parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    Duration::try_from_secs_f64(secs).map_err(|e| invalid(e.to_string()))
}
