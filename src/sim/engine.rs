use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::error::RejectReason;
use super::extrapolate::{
    derive_telemetry, extrapolate_position, DEFAULT_DOPPLER_BAND,
};
use super::gate::validate_fix;
use super::params::{derive_parameters, OrbitalParameters};
use super::stats::TickStats;
use super::types::{ExtrapolatedState, FixSet, MarkerPosition};

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Period of the extrapolation timer.
    pub tick: Duration,
    /// Minimum interval between marker-position publications. Bounds how
    /// often the expensive marker rendering path is driven.
    pub marker_interval: Duration,
    /// Doppler factors are clamped into this band.
    pub doppler_band: (f64, f64),
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            marker_interval: Duration::from_millis(100),
            doppler_band: DEFAULT_DOPPLER_BAND,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema, strum_macros::Display)]
pub enum SimulatorMode {
    Idle,
    Running {
        started: DateTime<Utc>,
        reference_timestamp: DateTime<Utc>,
        objects: usize,
    },
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SimulatorStatus {
    pub mode: SimulatorMode,
    pub stats: TickStats,
}

/// One tick's full output: every successfully extrapolated object, computed
/// against a single time sample. Published atomically, never in parts.
#[derive(Debug, Clone)]
pub struct TickSet {
    pub generated_at: DateTime<Utc>,
    pub states: Arc<Vec<ExtrapolatedState>>,
}

impl Default for TickSet {
    fn default() -> Self {
        Self {
            generated_at: DateTime::<Utc>::MIN_UTC,
            states: Arc::new(Vec::new()),
        }
    }
}

#[derive(Debug)]
struct Shared {
    status: SimulatorStatus,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// The update scheduler. Owns the tracked fix set, the per-fix parameter
/// cache and the single timer; consumers only ever see immutable snapshots
/// through the two watch channels.
pub struct Simulator {
    config: SimulatorConfig,
    shared: Arc<StdMutex<Shared>>,
    tick_tx: watch::Sender<TickSet>,
    marker_tx: watch::Sender<Arc<Vec<MarkerPosition>>>,
    worker: Option<WorkerHandle>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let (tick_tx, _) = watch::channel(TickSet::default());
        let (marker_tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            config,
            shared: Arc::new(StdMutex::new(Shared {
                status: SimulatorStatus {
                    mode: SimulatorMode::Idle,
                    stats: TickStats::default(),
                },
            })),
            tick_tx,
            marker_tx,
            worker: None,
        }
    }

    pub fn status(&self) -> SimulatorStatus {
        self.shared.lock().unwrap().status.clone()
    }

    /// Full-set output: a new value every tick.
    pub fn subscribe_ticks(&self) -> watch::Receiver<TickSet> {
        self.tick_tx.subscribe()
    }

    /// Position-only output, rate-limited to the configured marker interval.
    pub fn subscribe_markers(&self) -> watch::Receiver<Arc<Vec<MarkerPosition>>> {
        self.marker_tx.subscribe()
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        let mut locked = self.shared.lock().unwrap();
        locked.status.mode = SimulatorMode::Idle;
    }

    /// Replaces the tracked set with a fresh one and restarts the timer.
    /// The previous worker is always stopped first so two timers never run
    /// against different elapsed-time bases. An empty set transitions the
    /// scheduler to Idle and publishes an empty output so consumers clear.
    pub async fn load_fixes(&mut self, set: FixSet) {
        self.stop().await;

        if set.is_empty() {
            log::info!("fix refresh returned no objects, scheduler idle");
            let _ = self.tick_tx.send(TickSet {
                generated_at: Utc::now(),
                states: Arc::new(Vec::new()),
            });
            let _ = self.marker_tx.send(Arc::new(Vec::new()));
            let mut locked = self.shared.lock().unwrap();
            locked.status.stats = TickStats::default();
            return;
        }

        let started = Utc::now();
        let mode = SimulatorMode::Running {
            started,
            reference_timestamp: set.reference_timestamp,
            objects: set.fixes.len(),
        };
        log::info!(
            "tracking {} objects from reference {}",
            set.fixes.len(),
            set.reference_timestamp
        );

        // Recorded before the worker spawns: a watchdog reset to Idle from a
        // worker that dies immediately must not be overwritten.
        {
            let mut locked = self.shared.lock().unwrap();
            locked.status.mode = mode;
        }

        let shared = self.shared.clone();
        let config = self.config.clone();
        let tick_tx = self.tick_tx.clone();
        let marker_tx = self.marker_tx.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        let join = tokio::spawn(async move {
            let worker = tokio::spawn(run_simulation_loop(
                shared.clone(),
                config,
                set,
                tick_tx,
                marker_tx,
                stop_rx,
            ));
            // A worker that dies abnormally must not leave the status stuck
            // on Running with stale stats.
            if let Err(e) = worker.await {
                log::error!("simulation worker failed: {e}");
                let mut locked = shared.lock().unwrap();
                locked.status.mode = SimulatorMode::Idle;
                locked.status.stats = TickStats::default();
            }
        });
        self.worker = Some(WorkerHandle { stop_tx, join });
    }
}

async fn run_simulation_loop(
    shared: Arc<StdMutex<Shared>>,
    config: SimulatorConfig,
    set: FixSet,
    tick_tx: watch::Sender<TickSet>,
    marker_tx: watch::Sender<Arc<Vec<MarkerPosition>>>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    // Parameters are a pure function of (id, altitude) and live exactly as
    // long as this fix set does.
    let mut params: HashMap<String, OrbitalParameters> = HashMap::new();
    // Previous tick's position per object, seeding heading derivation.
    let mut previous: HashMap<String, (f64, f64)> = set
        .fixes
        .iter()
        .map(|f| (f.id.clone(), (f.latitude_deg, f.longitude_deg)))
        .collect();

    let mut interval = tokio::time::interval(config.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_marker_push: Option<Instant> = None;

    loop {
        let stopped = tokio::select! {
            _ = interval.tick() => false,
            _ = &mut stop_rx => true,
        };
        if stopped {
            return;
        }

        // One time sample for the whole tick: every object in the published
        // set is extrapolated against the same now.
        let now = Utc::now();
        let mut states = Vec::with_capacity(set.fixes.len());
        let mut skipped = 0;

        for fix in &set.fixes {
            if !validate_fix(fix) {
                skipped += 1;
                continue;
            }

            let p = *params
                .entry(fix.id.clone())
                .or_insert_with(|| derive_parameters(&fix.id, fix.height_km));
            if !p.period_seconds.is_finite() || p.period_seconds <= 0.0 {
                log::warn!(
                    "skipping fix {}: {}",
                    fix.id,
                    RejectReason::DegeneratePeriod(p.period_seconds)
                );
                skipped += 1;
                continue;
            }

            let elapsed_seconds =
                ((now - fix.fix_timestamp).num_milliseconds() as f64 / 1000.0).max(0.0);
            let position = extrapolate_position(fix, &p, elapsed_seconds);
            let (prev_lat, prev_lon) = previous
                .get(&fix.id)
                .copied()
                .unwrap_or((fix.latitude_deg, fix.longitude_deg));
            let state =
                derive_telemetry(prev_lat, prev_lon, &position, fix, config.doppler_band);
            previous.insert(fix.id.clone(), (position.latitude_deg, position.longitude_deg));
            states.push(state);
        }

        let stats = TickStats::from_states(&states, skipped);
        let states = Arc::new(states);
        let _ = tick_tx.send(TickSet {
            generated_at: now,
            states: states.clone(),
        });

        let marker_due = last_marker_push
            .map_or(true, |pushed| pushed.elapsed() >= config.marker_interval);
        if marker_due {
            let markers: Vec<MarkerPosition> =
                states.iter().map(MarkerPosition::from_state).collect();
            let _ = marker_tx.send(Arc::new(markers));
            last_marker_push = Some(Instant::now());
        }

        shared.lock().unwrap().status.stats = stats;
    }
}
