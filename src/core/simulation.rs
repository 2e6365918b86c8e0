//! Simulation loop - Start/stop lifecycle, periodic ticks and diagnostics
//!
//! Commands run on the UI thread and mutate the [`DisplaySurface`] directly. Background
//! timers never touch the surface: they send [`SimEvent`]s over a channel which the UI
//! thread applies in [`Simulation::drain`]. A tick is applied only if the core is still
//! running in the same start epoch that produced it, so nothing from a previous run can
//! land after a Stop. Log lines for background events are stamped when drained, so the
//! console stays in wall-clock order.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use super::console::{
    LogEntry, MSG_DIAGNOSTICS_COMPLETE, MSG_DIAGNOSTICS_RUNNING, MSG_STARTING, MSG_STOPPING,
};
use super::error::Result;
use super::reading::{ReadingRanges, ReadingSet};
use super::settings::Settings;
use super::surface::DisplaySurface;

/// Whether the tick sequence is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Running => "Running",
        }
    }

    fn from_u8(value: u8) -> Self {
        if value == RUNNING {
            Self::Running
        } else {
            Self::Stopped
        }
    }
}

const STOPPED: u8 = 0;
const RUNNING: u8 = 1;

/// Run state shared between the UI thread and the tick task
#[derive(Debug, Default)]
struct SharedRunState {
    state: AtomicU8,
    /// Incremented on every effective start
    epoch: AtomicU64,
}

impl SharedRunState {
    fn get(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Stopped -> Running. Returns the new epoch, or `None` if already running.
    fn begin(&self) -> Option<u64> {
        self.state
            .compare_exchange(STOPPED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(self.epoch.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Running -> Stopped. Returns false if already stopped.
    fn end(&self) -> bool {
        self.state
            .compare_exchange(RUNNING, STOPPED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// True while running in the given epoch
    fn is_current(&self, epoch: u64) -> bool {
        self.get().is_running() && self.epoch.load(Ordering::Acquire) == epoch
    }
}

/// Messages from background timers to the UI thread
#[derive(Debug, Clone)]
enum SimEvent {
    Tick { epoch: u64, reading: ReadingSet },
    DiagnosticsComplete,
}

/// Callback invoked after a background event is queued, e.g. to request a repaint
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// The quantum core state machine
pub struct Simulation {
    runtime: Handle,
    shared: Arc<SharedRunState>,
    tx: UnboundedSender<SimEvent>,
    rx: UnboundedReceiver<SimEvent>,
    tick_task: Option<JoinHandle<()>>,
    tick_interval: Duration,
    diagnostics_delay: Duration,
    ranges: ReadingRanges,
    waker: Option<Waker>,
}

impl Simulation {
    pub fn new(runtime: Handle, settings: &Settings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            shared: Arc::new(SharedRunState::default()),
            tx,
            rx,
            tick_task: None,
            tick_interval: settings.tick_interval(),
            diagnostics_delay: settings.diagnostics_delay(),
            ranges: settings.ranges,
            waker: None,
        }
    }

    /// Install a callback run whenever a background event is queued
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn run_state(&self) -> RunState {
        self.shared.get()
    }

    /// Start the core. Ignored if already running.
    pub fn start(&mut self, surface: &mut DisplaySurface) -> bool {
        let Some(epoch) = self.shared.begin() else {
            debug!("Start ignored: core already running");
            return false;
        };

        surface.append_log(LogEntry::now(MSG_STARTING));
        info!(epoch, interval_ms = self.tick_interval.as_millis() as u64, "Quantum core started");

        let task = tick_loop(
            Arc::clone(&self.shared),
            epoch,
            self.tick_interval,
            self.ranges,
            self.tx.clone(),
            self.waker.clone(),
        );
        self.tick_task = Some(self.runtime.spawn(task));
        true
    }

    /// Stop the core and reset the readings. Ignored if already stopped.
    pub fn stop(&mut self, surface: &mut DisplaySurface) -> bool {
        if !self.run_state().is_running() {
            debug!("Stop ignored: core not running");
            return false;
        }

        // Ticks that fired before the stop still belong on screen
        self.drain(surface);

        if !self.shared.end() {
            return false;
        }
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }

        surface.append_log(LogEntry::now(MSG_STOPPING));
        surface.reset_to_baseline();
        info!("Quantum core stopped");
        true
    }

    /// Log a diagnostics run and schedule its completion. Always allowed.
    pub fn run_diagnostics(&self, surface: &mut DisplaySurface) {
        surface.append_log(LogEntry::now(MSG_DIAGNOSTICS_RUNNING));
        debug!(delay_ms = self.diagnostics_delay.as_millis() as u64, "Diagnostics scheduled");

        let tx = self.tx.clone();
        let waker = self.waker.clone();
        let delay = self.diagnostics_delay;
        self.runtime.spawn(async move {
            time::sleep(delay).await;
            if tx.send(SimEvent::DiagnosticsComplete).is_ok() {
                wake(&waker);
            }
        });
    }

    /// Apply queued background events to the surface. Returns how many were applied.
    pub fn drain(&mut self, surface: &mut DisplaySurface) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                SimEvent::Tick { epoch, reading } => {
                    if !self.shared.is_current(epoch) {
                        trace!(epoch, "Discarding tick from a stopped run");
                        continue;
                    }
                    surface.render_reading(reading);
                    surface.append_log(LogEntry::now(reading.summary()));
                }
                SimEvent::DiagnosticsComplete => {
                    surface.append_log(LogEntry::now(MSG_DIAGNOSTICS_COMPLETE));
                    info!("Diagnostics complete");
                }
            }
            applied += 1;
        }
        if applied > 0 {
            trace!(applied, "Applied simulation events");
        }
        applied
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }
}

/// Build the runtime that hosts the tick and diagnostics timers
pub fn build_runtime() -> Result<Runtime> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("quantum-core-sim")
        .enable_all()
        .build()?;
    Ok(runtime)
}

fn wake(waker: &Option<Waker>) {
    if let Some(waker) = waker {
        waker();
    }
}

/// Periodic tick task. Exits the first time it observes the run has ended.
async fn tick_loop(
    shared: Arc<SharedRunState>,
    epoch: u64,
    period: Duration,
    ranges: ReadingRanges,
    tx: UnboundedSender<SimEvent>,
    waker: Option<Waker>,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !shared.is_current(epoch) {
            debug!(epoch, "Tick loop exiting");
            break;
        }

        let reading = ReadingSet::generate(&mut rand::thread_rng(), &ranges);
        trace!(epoch, ?reading, "Tick");

        if tx.send(SimEvent::Tick { epoch, reading }).is_err() {
            break;
        }
        wake(&waker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::MSG_INITIALIZED;
    use std::sync::atomic::AtomicUsize;

    const UPDATE_PREFIX: &str = "System Update - ";

    fn setup() -> (Simulation, DisplaySurface) {
        (
            Simulation::new(Handle::current(), &Settings::default()),
            DisplaySurface::new(),
        )
    }

    async fn advance(secs: f64) {
        time::sleep(Duration::from_secs_f64(secs)).await;
    }

    fn messages(surface: &DisplaySurface) -> Vec<String> {
        surface
            .log()
            .entries()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn start_wait_five_seconds_stop() {
        let (mut sim, mut surface) = setup();

        assert!(sim.start(&mut surface));
        assert_eq!(sim.run_state(), RunState::Running);
        advance(5.0).await;
        assert!(sim.stop(&mut surface));
        assert_eq!(sim.run_state(), RunState::Stopped);

        advance(10.0).await;
        sim.drain(&mut surface);

        let log = surface.log();
        assert_eq!(log.count(MSG_STARTING), 1);
        assert_eq!(log.count(MSG_STOPPING), 1);
        assert_eq!(log.count_prefixed(UPDATE_PREFIX), 2);

        let messages = messages(&surface);
        assert_eq!(messages[0], MSG_INITIALIZED);
        assert_eq!(messages[1], MSG_STARTING);
        assert!(messages[2].starts_with(UPDATE_PREFIX));
        assert!(messages[3].starts_with(UPDATE_PREFIX));
        assert_eq!(messages[4], MSG_STOPPING);
        assert_eq!(messages.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_arrives_after_one_period() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);

        advance(1.9).await;
        assert_eq!(sim.drain(&mut surface), 0);

        advance(0.2).await;
        assert_eq!(sim.drain(&mut surface), 1);
        assert_eq!(surface.log().count_prefixed(UPDATE_PREFIX), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_readings_are_rendered_and_in_range() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);
        advance(1.0).await;

        for _ in 0..20 {
            advance(2.0).await;
            sim.drain(&mut surface);
            assert!(ReadingRanges::default().contains(&surface.reading()));
            let last = surface.log().last().unwrap();
            assert_eq!(last.message, surface.reading().summary());
            assert!(last.timestamp.is_some());
        }
        assert_eq!(surface.log().count_prefixed(UPDATE_PREFIX), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_is_ignored_and_keeps_cadence() {
        let (mut sim, mut surface) = setup();
        assert!(sim.start(&mut surface));

        advance(1.0).await;
        assert!(!sim.start(&mut surface));

        // A restarted cadence would put the first tick at t=3
        advance(1.5).await;
        assert_eq!(sim.drain(&mut surface), 1);
        assert_eq!(surface.log().count(MSG_STARTING), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_while_stopped_is_ignored() {
        let (mut sim, mut surface) = setup();
        let before = messages(&surface);

        assert!(!sim.stop(&mut surface));
        assert_eq!(messages(&surface), before);
        assert_eq!(surface.reading(), ReadingSet::BASELINE);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_readings_to_baseline() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);
        advance(2.5).await;
        sim.drain(&mut surface);
        assert_ne!(surface.reading(), ReadingSet::BASELINE);

        sim.stop(&mut surface);
        assert_eq!(surface.reading().cpu_percent, 0);
        assert_eq!(surface.reading().memory_percent, 0);
        assert_eq!(surface.temperature_label(), "Core Temperature: 0°C");
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_previous_run() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);
        advance(1.0).await;
        sim.stop(&mut surface);
        sim.start(&mut surface);

        // Old run would have ticked at t=2, new run ticks at t=3
        advance(1.5).await;
        assert_eq!(sim.drain(&mut surface), 0);
        advance(1.0).await;
        assert_eq!(sim.drain(&mut surface), 1);
        assert_eq!(surface.log().count(MSG_STARTING), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_ticks_are_not_applied() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);
        sim.stop(&mut surface);

        let stale = SimEvent::Tick {
            epoch: 1,
            reading: ReadingSet {
                cpu_percent: 50,
                memory_percent: 50,
                temperature_c: 50,
            },
        };
        sim.tx.send(stale).unwrap();

        assert_eq!(sim.drain(&mut surface), 0);
        assert_eq!(surface.reading(), ReadingSet::BASELINE);
        assert_eq!(surface.log().count_prefixed(UPDATE_PREFIX), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn diagnostics_complete_after_delay() {
        let (mut sim, mut surface) = setup();

        sim.run_diagnostics(&mut surface);
        assert_eq!(surface.log().last().unwrap().message, MSG_DIAGNOSTICS_RUNNING);
        assert_eq!(sim.run_state(), RunState::Stopped);

        advance(1.9).await;
        sim.drain(&mut surface);
        assert_eq!(surface.log().count(MSG_DIAGNOSTICS_COMPLETE), 0);

        advance(0.2).await;
        sim.drain(&mut surface);
        assert_eq!(surface.log().count(MSG_DIAGNOSTICS_COMPLETE), 1);
        assert_eq!(surface.reading(), ReadingSet::BASELINE);
    }

    #[tokio::test(start_paused = true)]
    async fn queued_tick_is_logged_after_later_command() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);

        // Tick fires at t=2 but is not drained until after the diagnostics command
        advance(2.5).await;
        sim.run_diagnostics(&mut surface);
        assert_eq!(sim.drain(&mut surface), 1);

        let messages = messages(&surface);
        assert_eq!(messages[messages.len() - 2], MSG_DIAGNOSTICS_RUNNING);
        assert!(messages[messages.len() - 1].starts_with(UPDATE_PREFIX));

        let stamps: Vec<_> = surface
            .log()
            .entries()
            .iter()
            .filter_map(|e| e.timestamp)
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "{:?}", stamps);
    }

    #[tokio::test(start_paused = true)]
    async fn diagnostics_runs_independently_of_run_state() {
        let (mut sim, mut surface) = setup();
        sim.start(&mut surface);
        sim.run_diagnostics(&mut surface);
        sim.stop(&mut surface);

        advance(2.5).await;
        sim.drain(&mut surface);
        assert_eq!(surface.log().count(MSG_DIAGNOSTICS_COMPLETE), 1);
        assert_eq!(surface.log().count_prefixed(UPDATE_PREFIX), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_diagnostics_each_complete() {
        let (mut sim, mut surface) = setup();
        sim.run_diagnostics(&mut surface);
        advance(0.5).await;
        sim.run_diagnostics(&mut surface);

        advance(3.0).await;
        sim.drain(&mut surface);
        assert_eq!(surface.log().count(MSG_DIAGNOSTICS_RUNNING), 2);
        assert_eq!(surface.log().count(MSG_DIAGNOSTICS_COMPLETE), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn waker_fires_for_background_events() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        let mut sim = Simulation::new(Handle::current(), &Settings::default())
            .with_waker(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        let mut surface = DisplaySurface::new();

        sim.start(&mut surface);
        sim.run_diagnostics(&mut surface);
        advance(4.5).await;

        // Two ticks plus one diagnostics completion
        assert_eq!(wakes.load(Ordering::SeqCst), 3);
        sim.stop(&mut surface);
    }
}
