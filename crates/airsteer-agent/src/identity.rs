//! Machine identity: the stable id this machine is listed under in the
//! node file.

use crate::config::AgentConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Where the kernel exposes the SMBIOS system UUID.
pub const SYSFS_PRODUCT_UUID: &str = "/sys/class/dmi/id/product_uuid";

/// Source of this machine's stable hardware identifier.
#[async_trait]
pub trait HardwareIdentity: Send + Sync {
    /// The id this machine is listed under in the node file.
    async fn machine_id(&self) -> Result<String>;
}

/// A fixed id, from configuration.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub String);

#[async_trait]
impl HardwareIdentity for StaticIdentity {
    async fn machine_id(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// SMBIOS system UUID, via `dmidecode` with a sysfs fallback.
///
/// Both sources usually need root.
#[derive(Debug, Clone)]
pub struct DmiIdentity {
    sysfs_path: PathBuf,
}

impl Default for DmiIdentity {
    fn default() -> Self {
        Self {
            sysfs_path: PathBuf::from(SYSFS_PRODUCT_UUID),
        }
    }
}

impl DmiIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    async fn from_dmidecode() -> Result<String> {
        let output = Command::new("dmidecode")
            .args(["-s", "system-uuid"])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Identity(format!("dmidecode: {e}")))?;

        if !output.status.success() {
            return Err(Error::Identity(format!(
                "dmidecode exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        non_empty(&String::from_utf8_lossy(&output.stdout), "dmidecode")
    }

    async fn from_sysfs(&self) -> Result<String> {
        let contents = tokio::fs::read_to_string(&self.sysfs_path)
            .await
            .map_err(|e| Error::Identity(format!("{}: {e}", self.sysfs_path.display())))?;
        non_empty(&contents, &self.sysfs_path.display().to_string())
    }
}

#[async_trait]
impl HardwareIdentity for DmiIdentity {
    async fn machine_id(&self) -> Result<String> {
        match Self::from_dmidecode().await {
            Ok(id) => Ok(id),
            Err(e) => {
                debug!("{}; trying {}", e, self.sysfs_path.display());
                self.from_sysfs().await
            }
        }
    }
}

/// The identity source selected by configuration.
#[derive(Debug, Clone)]
pub enum MachineIdentity {
    Static(StaticIdentity),
    Dmi(DmiIdentity),
}

impl MachineIdentity {
    /// `NODE_ID` if set, otherwise the SMBIOS UUID.
    pub fn from_config(config: &AgentConfig) -> Self {
        match &config.node_id {
            Some(id) => Self::Static(StaticIdentity(id.clone())),
            None => Self::Dmi(DmiIdentity::new()),
        }
    }
}

#[async_trait]
impl HardwareIdentity for MachineIdentity {
    async fn machine_id(&self) -> Result<String> {
        match self {
            Self::Static(identity) => identity.machine_id().await,
            Self::Dmi(identity) => identity.machine_id().await,
        }
    }
}

fn non_empty(raw: &str, source: &str) -> Result<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(Error::Identity(format!("{source} returned an empty id")));
    }
    Ok(id.to_string())
}
