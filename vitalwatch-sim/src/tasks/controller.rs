//! Main controller task
//!
//! Owns the vitals engine. Receives operator commands and tick signals,
//! runs the engine, and fans its events out to the dispatch and watch
//! tasks.

use embassy_futures::select::{select, Either};
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use vitalwatch_core::engine::{EngineEvent, StopReason, VitalsEngine};
use vitalwatch_core::scenario::ArmOutcome;

use crate::channels::{ALERT_CHANNEL, COMMAND_CHANNEL, TICK_SIGNAL, WATCH_UPDATE};
use crate::command::ControlCommand;
use crate::display::WatchFrame;

/// Controller task - main coordination loop
pub async fn controller_task(mut engine: VitalsEngine, mut rng: SmallRng, sparkline_width: usize) {
    info!("Controller task started");

    let mut trace_buf = vec![0.0f32; engine.ecg().width() as usize];
    // Commands take the time of the latest frame so engine time never
    // runs backwards
    let mut now_ms = 0u64;

    loop {
        match select(COMMAND_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(command) => {
                handle_command(&mut engine, command, now_ms, &mut rng);
            }
            Either::Second(tick_ms) => {
                now_ms = tick_ms.max(now_ms);
                for event in engine.tick(now_ms, &mut rng) {
                    match event {
                        EngineEvent::VitalsChanged => {
                            trace!(bpm = engine.snapshot().bpm, "vitals changed");
                        }
                        EngineEvent::DisplayBpm(bpm) => {
                            trace!(bpm, "display bpm");
                        }
                        EngineEvent::Alert(request) => {
                            info!(
                                message = request.message.as_str(),
                                status = %request.status(),
                                "alert raised"
                            );
                            if ALERT_CHANNEL.try_send(request).is_err() {
                                warn!("Alert queue full, alert dropped");
                            }
                        }
                        EngineEvent::ScenarioArrived { kind, target_bpm } => {
                            info!(%kind, target_bpm, "scenario reached target");
                        }
                        EngineEvent::ScenarioStopped { kind, reason } => {
                            log_stop(kind, reason);
                        }
                        EngineEvent::Recovered => {
                            info!(system = %engine.status_display(), "vitals recovered");
                        }
                        EngineEvent::Clock => {
                            let clock = chrono::Local::now().format("%H:%M").to_string();
                            let frame = WatchFrame::capture(
                                &engine,
                                &clock,
                                &mut rng,
                                &mut trace_buf,
                                sparkline_width,
                            );
                            WATCH_UPDATE.signal(frame);
                        }
                    }
                }
            }
        }
    }
}

fn log_stop(kind: impl core::fmt::Display, reason: StopReason) {
    match reason {
        StopReason::AutoStop => info!(%kind, "scenario finished"),
        StopReason::Manual => info!(%kind, "scenario stopped"),
        StopReason::Replaced => info!(%kind, "scenario replaced"),
        StopReason::Reset => info!(%kind, "scenario cancelled by reset"),
    }
}

/// Apply one operator command to the engine
pub fn handle_command<R: Rng + ?Sized>(
    engine: &mut VitalsEngine,
    command: ControlCommand,
    now_ms: u64,
    rng: &mut R,
) {
    debug!(?command, now_ms, "command");

    match command {
        ControlCommand::Arm(kind) => match engine.arm(kind, now_ms, rng) {
            Ok(ArmOutcome::Started(run)) => {
                info!(%kind, target_bpm = run.target_bpm, "scenario armed");
            }
            Ok(ArmOutcome::AlreadyRunning(run)) => {
                debug!(%kind, target_bpm = run.target_bpm, "scenario already running");
            }
            Ok(ArmOutcome::Replaced { stopped, run }) => {
                log_stop(stopped, StopReason::Replaced);
                info!(%kind, target_bpm = run.target_bpm, "scenario armed");
            }
            Err(e) => warn!(%kind, "cannot arm scenario: {}", e),
        },
        ControlCommand::Stop => match engine.stop() {
            Some(run) => log_stop(run.kind, StopReason::Manual),
            None => debug!("no scenario to stop"),
        },
        ControlCommand::SetTargetBpm(bpm) => match engine.set_target_bpm(bpm) {
            Ok(()) => info!(target_bpm = engine.snapshot().target_bpm, "target set"),
            Err(e) => warn!(bpm, "target rejected: {}", e),
        },
        ControlCommand::SetSpo2(spo2) => {
            engine.set_spo2(spo2);
            info!(spo2 = engine.snapshot().spo2, "oxygen set");
        }
        ControlCommand::SetActivity(activity) => {
            engine.set_activity(activity);
            info!(%activity, "activity set");
        }
        ControlCommand::Reset => {
            if let Some(run) = engine.reset() {
                log_stop(run.kind, StopReason::Reset);
            }
            info!("vitals reset to resting baseline");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use vitalwatch_core::config::EngineConfig;
    use vitalwatch_core::scenario::ScenarioKind;
    use vitalwatch_core::vitals::Activity;

    fn engine() -> VitalsEngine {
        VitalsEngine::new(EngineConfig::default(), 240, 0)
    }

    #[test]
    fn test_arm_and_stop() {
        let mut engine = engine();
        let mut rng = SmallRng::seed_from_u64(1);

        handle_command(&mut engine, ControlCommand::Arm(ScenarioKind::Hazard), 0, &mut rng);
        let run = *engine.scenario().unwrap();
        assert_eq!(run.kind, ScenarioKind::Hazard);
        assert!((151..=195).contains(&run.target_bpm));

        handle_command(&mut engine, ControlCommand::Stop, 100, &mut rng);
        assert!(engine.scenario().is_none());
    }

    #[test]
    fn test_target_locked_during_scenario() {
        let mut engine = engine();
        let mut rng = SmallRng::seed_from_u64(1);

        handle_command(&mut engine, ControlCommand::Arm(ScenarioKind::Monitor), 0, &mut rng);
        let target = engine.snapshot().target_bpm;
        handle_command(&mut engine, ControlCommand::SetTargetBpm(60.0), 10, &mut rng);
        assert_eq!(engine.snapshot().target_bpm, target);
    }

    #[test]
    fn test_manual_inputs() {
        let mut engine = engine();
        let mut rng = SmallRng::seed_from_u64(1);

        handle_command(&mut engine, ControlCommand::SetTargetBpm(300.0), 0, &mut rng);
        assert_eq!(engine.snapshot().target_bpm, 220.0);

        handle_command(&mut engine, ControlCommand::SetSpo2(50), 0, &mut rng);
        assert_eq!(engine.snapshot().spo2, 85);

        handle_command(
            &mut engine,
            ControlCommand::SetActivity(Activity::Walking),
            0,
            &mut rng,
        );
        assert_eq!(engine.snapshot().activity, Activity::Walking);
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut engine = engine();
        let mut rng = SmallRng::seed_from_u64(1);

        handle_command(&mut engine, ControlCommand::Arm(ScenarioKind::Hazard), 0, &mut rng);
        handle_command(&mut engine, ControlCommand::SetSpo2(88), 0, &mut rng);
        handle_command(&mut engine, ControlCommand::Reset, 50, &mut rng);

        assert!(engine.scenario().is_none());
        assert_eq!(engine.snapshot().spo2, 98);
        assert_eq!(engine.snapshot().target_bpm, 65.0);
    }
}
