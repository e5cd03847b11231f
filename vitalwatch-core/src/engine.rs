//! Simulation engine
//!
//! `VitalsEngine` is the one owned simulation context. It holds the vitals
//! snapshot, the emergency state and every component, and it is the only
//! writer of any of them. The host drives it with a monotonic clock:
//!
//! ```text
//! loop {
//!     for event in engine.tick(now_ms, &mut rng) { ... }
//! }
//! ```
//!
//! Each tick runs the due tasks in a fixed order (frame, scenario poll,
//! display jitter, ambient jitter, clock) and returns what happened.

use heapless::Vec;
use rand::Rng;

use crate::alert::{AlertDispatcher, AlertRequest, EmergencyState, StatusDisplay};
use crate::config::EngineConfig;
use crate::display::{jittered_bpm, watch_status, StatusText};
use crate::ecg::{EcgSynthesizer, StrokeColor};
use crate::ramp::RampController;
use crate::scenario::{
    ArmOutcome, ScenarioAction, ScenarioDriver, ScenarioError, ScenarioKind, ScenarioRun,
};
use crate::scheduler::{TaskId, TaskSet};
use crate::severity::{Assessment, SeverityClassifier};
use crate::vitals::{Activity, DerivedVitalsModel, InputError, VitalsSnapshot};

/// Maximum events a single tick can produce
pub const MAX_ENGINE_EVENTS: usize = 10;

/// Why a scenario ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Operator stop command
    Manual,
    /// Hold time after arrival elapsed
    AutoStop,
    /// Operator armed the other kind
    Replaced,
    /// Manual reset to the resting baseline
    Reset,
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Heart rate or secondary vitals changed; resync the display
    VitalsChanged,
    /// Displayed heart rate re-jittered
    DisplayBpm(f32),
    /// Alert ready for payload assembly and dispatch
    Alert(AlertRequest),
    /// Scenario reached its target
    ScenarioArrived {
        kind: ScenarioKind,
        target_bpm: u16,
    },
    /// Scenario ended
    ScenarioStopped {
        kind: ScenarioKind,
        reason: StopReason,
    },
    /// Latched emergency cleared on its own
    Recovered,
    /// Watch-face clock tick
    Clock,
}

/// Events produced by one tick
pub type EngineEvents = Vec<EngineEvent, MAX_ENGINE_EVENTS>;

/// The owned simulation context
#[derive(Debug, Clone)]
pub struct VitalsEngine {
    config: EngineConfig,
    snapshot: VitalsSnapshot,
    classifier: SeverityClassifier,
    derived: DerivedVitalsModel,
    ramp: RampController,
    scenario: ScenarioDriver,
    dispatcher: AlertDispatcher,
    ecg: EcgSynthesizer,
    tasks: TaskSet,
    display_bpm: f32,
    last_frame_ms: Option<u64>,
}

impl VitalsEngine {
    /// Create an engine at the resting baseline
    ///
    /// # Arguments
    /// - `ecg_width`: Width of the ECG trace in columns
    /// - `start_ms`: Clock value the task cadences start from
    pub fn new(config: EngineConfig, ecg_width: u32, start_ms: u64) -> Self {
        let snapshot = VitalsSnapshot::resting();
        Self {
            classifier: SeverityClassifier::new(config.heart_rate, config.oxygen),
            derived: DerivedVitalsModel::new(config.jitter),
            ramp: RampController::new(&config.ramp),
            scenario: ScenarioDriver::new(config.scenario),
            dispatcher: AlertDispatcher::new(&config.alert),
            ecg: EcgSynthesizer::new(config.ecg, ecg_width),
            tasks: TaskSet::new(&config.cadence, start_ms),
            display_bpm: snapshot.bpm,
            last_frame_ms: None,
            snapshot,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &VitalsSnapshot {
        &self.snapshot
    }

    /// Classify the current snapshot
    pub fn assessment(&self) -> Assessment {
        self.classifier.assess(&self.snapshot)
    }

    pub fn emergency(&self) -> EmergencyState {
        self.dispatcher.state()
    }

    pub fn status_display(&self) -> StatusDisplay {
        self.dispatcher.status_display()
    }

    /// The live scenario, if any
    pub fn scenario(&self) -> Option<&ScenarioRun> {
        self.scenario.current()
    }

    /// Heart rate as shown on the watch face (jittered)
    pub fn display_bpm(&self) -> f32 {
        self.display_bpm
    }

    pub fn ecg(&self) -> &EcgSynthesizer {
        &self.ecg
    }

    /// Status line for the watch face
    pub fn watch_status(&self) -> StatusText {
        watch_status(&self.assessment())
    }

    /// Run every task due at `now_ms`
    pub fn tick<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> EngineEvents {
        let mut events = EngineEvents::new();

        for task in self.tasks.due(now_ms) {
            match task {
                TaskId::Frame => self.run_frame(now_ms, &mut events),
                TaskId::ScenarioPoll => self.run_scenario_poll(now_ms, &mut events),
                TaskId::DisplayJitter => {
                    self.display_bpm =
                        jittered_bpm(self.snapshot.bpm, self.config.jitter.display_bpm, rng);
                    push(&mut events, EngineEvent::DisplayBpm(self.display_bpm));
                }
                TaskId::AmbientJitter => {
                    self.derived.apply_ambient_jitter(&mut self.snapshot, rng);
                    push(&mut events, EngineEvent::VitalsChanged);
                }
                TaskId::Clock => push(&mut events, EngineEvent::Clock),
            }
        }

        events
    }

    /// Ramp the heart rate, scroll the ECG, evaluate alerts
    fn run_frame(&mut self, now_ms: u64, events: &mut EngineEvents) {
        let elapsed_ms = match self.last_frame_ms {
            Some(prev) => now_ms.saturating_sub(prev) as f32,
            None => self.config.ramp.nominal_tick_ms(),
        };
        self.last_frame_ms = Some(now_ms);

        if self.ramp.step_elapsed(&mut self.snapshot, elapsed_ms) {
            self.display_bpm = self.snapshot.bpm;
            push(events, EngineEvent::VitalsChanged);
        }
        self.ecg.advance_frame();
        self.evaluate(now_ms, events);
    }

    fn evaluate(&mut self, now_ms: u64, events: &mut EngineEvents) {
        let assessment = self.assessment();
        let evaluation = self.dispatcher.evaluate(
            &self.snapshot,
            &assessment,
            self.scenario.is_active(),
            now_ms,
        );

        if let Some(alert) = evaluation.alert {
            push(events, EngineEvent::Alert(alert));
        }
        if evaluation.recovered {
            push(events, EngineEvent::Recovered);
        }
    }

    fn run_scenario_poll(&mut self, now_ms: u64, events: &mut EngineEvents) {
        match self.scenario.poll(&mut self.snapshot, now_ms) {
            Some(ScenarioAction::Arrived { kind, target_bpm }) => {
                self.derived.apply_stress(&mut self.snapshot, target_bpm as f32);
                self.display_bpm = self.snapshot.bpm;
                push(events, EngineEvent::VitalsChanged);

                let assessment = self.assessment();
                let alert = self
                    .dispatcher
                    .force(kind, target_bpm, &self.snapshot, &assessment, now_ms);
                push(events, EngineEvent::ScenarioArrived { kind, target_bpm });
                push(events, EngineEvent::Alert(alert));
            }
            Some(ScenarioAction::AutoStopped { kind }) => {
                self.finish_scenario();
                push(
                    events,
                    EngineEvent::ScenarioStopped {
                        kind,
                        reason: StopReason::AutoStop,
                    },
                );
            }
            None => {}
        }
    }

    /// Arm a scenario with a random target
    ///
    /// Arming the live kind is a no-op; arming the other kind replaces it.
    pub fn arm<R: Rng + ?Sized>(
        &mut self,
        kind: ScenarioKind,
        now_ms: u64,
        rng: &mut R,
    ) -> Result<ArmOutcome, ScenarioError> {
        let outcome = self.scenario.arm(kind, &mut self.snapshot, now_ms, rng)?;
        self.on_armed(&outcome);
        Ok(outcome)
    }

    /// Arm a scenario with an explicit target
    pub fn arm_with_target(
        &mut self,
        kind: ScenarioKind,
        target_bpm: u16,
        now_ms: u64,
    ) -> Result<ArmOutcome, ScenarioError> {
        let outcome = self
            .scenario
            .arm_with_target(kind, target_bpm, &mut self.snapshot, now_ms)?;
        self.on_armed(&outcome);
        Ok(outcome)
    }

    fn on_armed(&mut self, outcome: &ArmOutcome) {
        match outcome {
            ArmOutcome::AlreadyRunning(_) => {}
            ArmOutcome::Started(run) => {
                self.derived.reset_bounds();
                self.ramp.engage(run.ramp_speed);
            }
            ArmOutcome::Replaced { run, .. } => {
                self.finish_scenario();
                self.derived.reset_bounds();
                self.ramp.engage(run.ramp_speed);
            }
        }
    }

    /// Stop the live scenario
    ///
    /// Heart rate and target stay where they are. Returns None when no
    /// scenario was alive.
    pub fn stop(&mut self) -> Option<ScenarioRun> {
        let run = self.scenario.stop()?;
        self.finish_scenario();
        Some(run)
    }

    fn finish_scenario(&mut self) {
        self.ramp.release();
        self.dispatcher.clear_latch();
    }

    /// Manual target heart rate
    ///
    /// Rejected while a scenario owns the target.
    pub fn set_target_bpm(&mut self, bpm: f32) -> Result<(), InputError> {
        if self.scenario.is_active() {
            return Err(InputError::ScenarioActive);
        }
        self.snapshot.set_target_bpm(bpm)
    }

    /// Manual oxygen saturation; evaluated on the next frame
    pub fn set_spo2(&mut self, spo2: u8) {
        self.snapshot.set_spo2(spo2);
    }

    pub fn set_activity(&mut self, activity: Activity) {
        self.snapshot.activity = activity;
    }

    /// Return to the resting baseline
    ///
    /// Stops any scenario, clears the latch and restores the resting band.
    /// The alert cooldown clock is kept.
    pub fn reset(&mut self) -> Option<ScenarioRun> {
        let stopped = self.stop();
        self.snapshot = VitalsSnapshot::resting();
        self.derived.reset_bounds();
        self.ramp.release();
        self.dispatcher.clear_latch();
        self.display_bpm = self.snapshot.bpm;
        stopped
    }

    /// Fill `trace` with the current ECG frame
    ///
    /// Returns the stroke colour for the current heart-rate severity.
    pub fn render_ecg<R: Rng + ?Sized>(&self, rng: &mut R, trace: &mut [f32]) -> StrokeColor {
        self.ecg.render(self.snapshot.bpm, rng, trace);
        StrokeColor::for_severity(self.assessment().heart_rate.severity)
    }
}

fn push(events: &mut EngineEvents, event: EngineEvent) {
    // Capacity covers the worst case of one tick
    let _ = events.push(event);
}
