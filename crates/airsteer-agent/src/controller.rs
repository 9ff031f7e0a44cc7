//! Steering controller: the evaluate → steer → sleep loop.
//!
//! ```text
//! Idle ──► Evaluating ──► Steering ──► Sleeping ──► Evaluating ...
//!              │                           │
//!              └── skipped cycle ──────────┤
//!                                          └──► Terminated (one-shot / shutdown)
//! ```
//!
//! Every cycle starts from scratch: both site files are re-read, the whole
//! assignment is recomputed, and only then is the live association compared
//! against it. Nothing carries over between cycles except the counter.
//!
//! Shutdown is only observed between cycles. A signal that lands while a
//! reassociation is in flight lets it finish; one that lands during the sleep
//! ends the sleep at once.

use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::identity::HardwareIdentity;
use crate::network::NetworkControl;
use crate::sites;
use airsteer_assign::{assign, assign_with_capacity, resolve_local, Assignment};
use airsteer_geometry::{candidate_aps, Bssid};
use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Where the controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Created, no cycle run yet
    Idle,
    /// Loading site files and computing the assignment
    Evaluating,
    /// Comparing against the live association and acting on it
    Steering,
    /// Waiting for the next cycle
    Sleeping,
    /// Done; `run` has returned or is about to
    Terminated,
}

/// What the steering step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SteerAction {
    /// The live association already belongs to the assigned AP
    AlreadyAssociated,
    /// An association request was issued and accepted
    Reassociated,
    /// An association was due but dry-run suppressed it
    Suppressed,
}

/// Outcome of one successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// This machine's node id
    pub node_id: String,
    /// Assigned AP id, as written in the AP file
    pub target_ap: String,
    /// BSSID requested (or that would have been requested)
    pub bssid: Option<String>,
    /// Live BSSID observed before acting
    pub live_bssid: Option<String>,
    pub action: SteerAction,
    /// This node was placed without a capacity guarantee
    pub degraded: bool,
}

/// Result of the evaluation step.
#[derive(Debug, Clone)]
struct Target {
    node_id: String,
    target_ap: String,
    /// Every configured AP id, for attributing BSSIDs
    ap_ids: Vec<String>,
    degraded: bool,
}

/// Keeps this machine associated with its assigned access point.
pub struct SteeringController<I, N> {
    config: AgentConfig,
    identity: I,
    network: N,
    state: ControllerState,
    cycle: u64,
}

impl<I, N> SteeringController<I, N>
where
    I: HardwareIdentity,
    N: NetworkControl,
{
    /// Create a controller. The network handle lives as long as the
    /// controller does.
    pub fn new(config: AgentConfig, identity: I, network: N) -> Self {
        Self {
            config,
            identity,
            network,
            state: ControllerState::Idle,
            cycle: 0,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    fn transition(&mut self, next: ControllerState) {
        if self.state != next {
            debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Run cycles until shutdown is signalled, or once in one-shot mode.
    ///
    /// Recoverable errors are logged and the cycle is skipped. In one-shot
    /// mode the first error is returned instead. Closing the `shutdown`
    /// sender counts as a shutdown request.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(
            "Steering every {:?} (sources {:?}, targets {:?}{}{})",
            self.config.interval,
            self.config.src_file,
            self.config.tgt_file,
            if self.config.dry_run { ", dry run" } else { "" },
            if self.config.one_shot { ", one shot" } else { "" },
        );

        loop {
            let span = info_span!("cycle", n = self.cycle + 1);
            let outcome = self.run_cycle().instrument(span.clone()).await;

            if let Err(e) = outcome {
                span.in_scope(|| log_skipped(&e));
                if self.config.one_shot || !e.is_recoverable() {
                    self.transition(ControllerState::Terminated);
                    return Err(e);
                }
            }

            if self.config.one_shot {
                self.transition(ControllerState::Terminated);
                return Ok(());
            }
            if *shutdown.borrow() {
                info!("Shutdown requested; exiting after cycle {}", self.cycle);
                self.transition(ControllerState::Terminated);
                return Ok(());
            }

            self.transition(ControllerState::Sleeping);
            debug!("Waiting for {:?}...", self.config.interval);
            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                _ = shutdown.changed() => {
                    info!("Shutdown requested; exiting");
                    self.transition(ControllerState::Terminated);
                    return Ok(());
                }
            }
        }
    }

    /// Run one evaluate + steer cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        self.cycle += 1;

        self.transition(ControllerState::Evaluating);
        let target = self.evaluate().await?;

        self.transition(ControllerState::Steering);
        self.steer(target).await
    }

    async fn evaluate(&mut self) -> Result<Target> {
        let nodes = sites::load_nodes(&self.config.src_file)?;
        let aps = sites::load_access_points(&self.config.tgt_file)?;
        debug!(
            "Loaded {} nodes from {:?} and {} APs from {:?}",
            nodes.len(),
            self.config.src_file,
            aps.len(),
            self.config.tgt_file
        );

        let assignment = match self.config.ap_capacity {
            Some(capacity) => assign_with_capacity(&nodes, &aps, capacity)?,
            None => assign(&nodes, &aps)?,
        };
        log_assignment(&assignment);

        let machine_id = match self.identity.machine_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!("{}", e);
                return Err(Error::LocalNodeNotFound { id: None });
            }
        };
        let local = resolve_local(&nodes, &machine_id)?;
        let target_ap = assignment
            .target_of(&local.id)
            .ok_or_else(|| Error::LocalNodeNotFound {
                id: Some(local.id.clone()),
            })?
            .to_string();

        info!(
            "Node {} ({}) at {} is assigned to {}",
            local.id, local.kind, local.position, target_ap
        );

        Ok(Target {
            node_id: local.id.clone(),
            degraded: assignment.is_fallback(&local.id),
            target_ap,
            ap_ids: aps.iter().map(|ap| ap.id.clone()).collect(),
        })
    }

    async fn steer(&mut self, target: Target) -> Result<CycleReport> {
        let live_bssid = self.network.current_bssid().await?;
        let report = |action, bssid| CycleReport {
            node_id: target.node_id.clone(),
            target_ap: target.target_ap.clone(),
            bssid,
            live_bssid: live_bssid.clone(),
            action,
            degraded: target.degraded,
        };

        if let Some(live) = live_bssid.as_deref() {
            if owning_ap(live, &target.ap_ids) == Some(target.target_ap.as_str()) {
                info!(
                    "Already associated with {} via {}; no change",
                    target.target_ap, live
                );
                return Ok(report(SteerAction::AlreadyAssociated, None));
            }
        }

        let visible = self.network.visible_bssids().await?;
        let bssid = select_bssid(&target.target_ap, &target.ap_ids, &visible);
        info!(
            "Steering from {} to {} via {}",
            live_bssid.as_deref().unwrap_or("<none>"),
            target.target_ap,
            bssid
        );

        if self.config.dry_run {
            info!("Dry run: not associating with {}", bssid);
            return Ok(report(SteerAction::Suppressed, Some(bssid)));
        }

        if let Err(e) = self.network.associate(&bssid).await {
            warn!("Association with {} failed; releasing BSSID pin", bssid);
            if let Err(release) = self.network.release().await {
                error!("Failed to release BSSID pin: {}", release);
            }
            return Err(e);
        }

        info!("Associated with {}", bssid);
        Ok(report(SteerAction::Reassociated, Some(bssid)))
    }
}

/// The configured AP a scanned or live BSSID belongs to.
///
/// Each BSSID is attributed to exactly one AP: its own id if configured,
/// otherwise the first radio family in id order.
fn owning_ap<'a>(bssid: &str, ap_ids: &'a [String]) -> Option<&'a str> {
    let candidates = candidate_aps(bssid, ap_ids.iter().map(String::as_str));
    if candidates.len() > 1 {
        warn!(
            "{} matches several APs ({}); attributing it to {}",
            bssid,
            candidates.join(", "),
            candidates[0]
        );
    }
    candidates.first().copied()
}

/// Pick the BSSID to request for `target_ap`.
///
/// The lowest visible BSSID attributed to the assigned AP wins; if none is
/// visible, the configured id is requested as-is.
fn select_bssid(target_ap: &str, ap_ids: &[String], visible: &[String]) -> String {
    let selected = visible
        .iter()
        .filter(|v| owning_ap(v, ap_ids) == Some(target_ap))
        .map(|v| match Bssid::parse(v) {
            Ok(bssid) => bssid.to_string(),
            Err(_) => v.clone(),
        })
        .min();

    match selected {
        Some(bssid) => bssid,
        None => {
            warn!(
                "{} not among {} visible BSSIDs; requesting it directly",
                target_ap,
                visible.len()
            );
            target_ap.to_string()
        }
    }
}

fn log_assignment(assignment: &Assignment) {
    for (node, ap) in assignment.iter() {
        debug!("  {} -> {}", node, ap);
    }
    for (ap, load) in assignment.loads() {
        debug!("  {}: {} nodes", ap, load);
    }
}

fn log_skipped(e: &Error) {
    match e {
        Error::NoTargetsAvailable | Error::LocalNodeNotFound { .. } => {
            warn!("Skipping cycle: {}", e)
        }
        _ => error!("Skipping cycle: {}", e),
    }
}
