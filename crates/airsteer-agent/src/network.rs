//! Network manager access: read the live association, scan, and steer.
//!
//! The controller only sees [`NetworkControl`]. The production backend,
//! [`NmcliNetwork`], drives NetworkManager through `nmcli`; tests plug in a
//! fake.

use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// NetworkManager connection type for Wi-Fi profiles.
pub const WIFI_CONNECTION_TYPE: &str = "802-11-wireless";

/// Operations the controller needs from the host's network manager.
///
/// Every call may fail with [`Error::SteeringTransport`]; the controller
/// treats that as a skipped cycle.
#[async_trait]
pub trait NetworkControl: Send + Sync {
    /// BSSID the managed interface is associated with, if any.
    async fn current_bssid(&self) -> Result<Option<String>>;

    /// BSSIDs currently broadcasting the managed SSID.
    async fn visible_bssids(&self) -> Result<Vec<String>>;

    /// Pin the managed connection to `bssid` and (re)activate it.
    async fn associate(&self, bssid: &str) -> Result<()>;

    /// Drop any BSSID pin so the host roams on its own again.
    async fn release(&self) -> Result<()>;
}

/// NetworkManager backend built on `nmcli`.
#[derive(Debug, Clone)]
pub struct NmcliNetwork {
    connection: String,
    device: String,
    ssid: String,
}

impl NmcliNetwork {
    /// Resolve the managed connection, its device and its SSID.
    ///
    /// With `connection == None` the first active Wi-Fi connection is used.
    pub async fn connect(connection: Option<&str>) -> Result<Self> {
        let connection = match connection {
            Some(name) => name.to_string(),
            None => {
                let active =
                    nmcli(&["-t", "-f", "NAME,TYPE,DEVICE", "connection", "show", "--active"])
                        .await?;
                first_active_wifi(&active)
                    .map(|(name, _)| name)
                    .ok_or_else(|| {
                        Error::SteeringTransport("no active Wi-Fi connection".to_string())
                    })?
            }
        };

        let device = match connection_field(&connection, "GENERAL.DEVICES").await {
            Ok(device) if !device.is_empty() => device,
            _ => connection_field(&connection, "connection.interface-name").await?,
        };
        if device.is_empty() {
            return Err(Error::SteeringTransport(format!(
                "connection {connection:?} is not bound to an interface"
            )));
        }

        let ssid = connection_field(&connection, "802-11-wireless.ssid").await?;
        if ssid.is_empty() {
            return Err(Error::SteeringTransport(format!(
                "connection {connection:?} has no SSID"
            )));
        }

        info!(
            "Managing connection {:?} on {} (SSID {:?})",
            connection, device, ssid
        );
        Ok(Self {
            connection,
            device,
            ssid,
        })
    }

    async fn pin_bssid(&self, bssid: &str) -> Result<()> {
        nmcli(&[
            "connection",
            "modify",
            "--temporary",
            &self.connection,
            "802-11-wireless.bssid",
            bssid,
        ])
        .await?;
        nmcli(&["connection", "up", &self.connection]).await?;
        Ok(())
    }
}

#[async_trait]
impl NetworkControl for NmcliNetwork {
    async fn current_bssid(&self) -> Result<Option<String>> {
        let list = nmcli(&[
            "-t", "-f", "ACTIVE,BSSID", "device", "wifi", "list", "ifname", &self.device,
            "--rescan", "no",
        ])
        .await?;
        Ok(active_bssid(&list))
    }

    async fn visible_bssids(&self) -> Result<Vec<String>> {
        let list = nmcli(&[
            "-t", "-f", "SSID,BSSID,RATE", "device", "wifi", "list", "ifname", &self.device,
            "--rescan", "yes",
        ])
        .await?;
        let bssids = fastest_bssids(&list, &self.ssid);
        debug!("Visible BSSIDs for {:?}: {:?}", self.ssid, bssids);
        Ok(bssids)
    }

    async fn associate(&self, bssid: &str) -> Result<()> {
        self.pin_bssid(bssid).await
    }

    async fn release(&self) -> Result<()> {
        self.pin_bssid("").await
    }
}

/// Run `nmcli` and return its stdout.
async fn nmcli(args: &[&str]) -> Result<String> {
    let output = Command::new("nmcli")
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| Error::SteeringTransport(format!("nmcli: {e}")))?;

    if !output.status.success() {
        return Err(Error::SteeringTransport(format!(
            "nmcli {} exited with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

async fn connection_field(connection: &str, field: &str) -> Result<String> {
    let value = nmcli(&["-t", "-g", field, "connection", "show", connection]).await?;
    Ok(unescape(value.lines().next().unwrap_or_default().trim()))
}

/// Split one line of `nmcli -t` output on unescaped colons.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn unescape(value: &str) -> String {
    split_terse(value).join(":")
}

/// Name and device of the first active Wi-Fi connection.
fn first_active_wifi(output: &str) -> Option<(String, String)> {
    output
        .lines()
        .map(split_terse)
        .find(|f| f.len() >= 3 && f[1] == WIFI_CONNECTION_TYPE)
        .map(|f| (f[0].clone(), f[2].clone()))
}

/// BSSID of the row marked active.
fn active_bssid(output: &str) -> Option<String> {
    output
        .lines()
        .map(split_terse)
        .find(|f| f.len() >= 2 && f[0] == "yes" && !f[1].is_empty())
        .map(|f| f[1].clone())
}

/// BSSIDs on `ssid` advertising the best max bitrate, sorted and deduplicated.
fn fastest_bssids(output: &str, ssid: &str) -> Vec<String> {
    let entries: Vec<(String, u32)> = output
        .lines()
        .map(split_terse)
        .filter(|f| f.len() >= 3 && f[0] == ssid)
        .filter_map(|f| {
            let rate = f[2].split_whitespace().next()?.parse::<u32>().ok()?;
            Some((f[1].clone(), rate))
        })
        .collect();

    let Some(best) = entries.iter().map(|(_, rate)| *rate).max() else {
        return Vec::new();
    };
    let mut bssids: Vec<String> = entries
        .into_iter()
        .filter(|(_, rate)| *rate == best)
        .map(|(bssid, _)| bssid)
        .collect();
    bssids.sort();
    bssids.dedup();
    bssids
}
