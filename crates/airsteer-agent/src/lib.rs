//! Airsteer Agent - keeps this machine on its assigned access point
//!
//! Runs on every Wi-Fi client in a site. Each agent reads the same node and
//! AP files, computes the same fleet-wide assignment, picks out its own entry,
//! and asks the local network manager to associate with that AP.
//!
//! # Architecture
//!
//! - **Config**: environment variables ([`AgentConfig`])
//! - **Sites**: CSV node / AP files, re-read every cycle
//! - **Identity**: which node this machine is ([`HardwareIdentity`])
//! - **Network**: live association, scans, steering ([`NetworkControl`])
//! - **Controller**: the evaluate → steer → sleep loop ([`SteeringController`])
//!
//! # Example
//!
//! ```no_run
//! use airsteer_agent::{AgentConfig, MachineIdentity, NmcliNetwork, SteeringController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AgentConfig::from_env()?;
//!     let identity = MachineIdentity::from_config(&config);
//!     let network = NmcliNetwork::connect(config.connection.as_deref()).await?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     SteeringController::new(config, identity, network)
//!         .run(shutdown_rx)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod identity;
pub mod network;
pub mod sites;

pub use config::AgentConfig;
pub use controller::{ControllerState, CycleReport, SteerAction, SteeringController};
pub use error::{Error, Result};
pub use identity::{DmiIdentity, HardwareIdentity, MachineIdentity, StaticIdentity};
pub use network::{NetworkControl, NmcliNetwork};
