//! Operator commands
//!
//! One command per line on stdin:
//!
//! ```text
//! arm monitor | arm hazard | stop | reset
//! bpm <20-220> | spo2 <85-100> | activity <resting|walking|running|sleeping>
//! ```

use thiserror::Error;

use vitalwatch_core::scenario::ScenarioKind;
use vitalwatch_core::vitals::Activity;

/// Command for the controller task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    /// Arm a scripted scenario
    Arm(ScenarioKind),
    /// Stop the live scenario
    Stop,
    /// Manual target heart rate
    SetTargetBpm(f32),
    /// Manual oxygen saturation
    SetSpo2(u8),
    SetActivity(Activity),
    /// Back to the resting baseline
    Reset,
}

/// Unparseable command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("unknown scenario '{0}' (monitor or hazard)")]
    UnknownScenario(String),
    #[error("unknown activity '{0}'")]
    UnknownActivity(String),
}

/// Parse a scenario name
pub fn parse_scenario(name: &str) -> Option<ScenarioKind> {
    match name.to_ascii_lowercase().as_str() {
        "monitor" => Some(ScenarioKind::Monitor),
        "hazard" => Some(ScenarioKind::Hazard),
        _ => None,
    }
}

/// Parse one command line
///
/// Range clamping is left to the engine; only syntax is checked here.
pub fn parse_command(line: &str) -> Result<ControlCommand, CommandError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
    let arg = words.next();

    match verb.as_str() {
        "arm" => {
            let name = arg.ok_or(CommandError::MissingArgument("arm"))?;
            parse_scenario(name)
                .map(ControlCommand::Arm)
                .ok_or_else(|| CommandError::UnknownScenario(name.to_string()))
        }
        "stop" => Ok(ControlCommand::Stop),
        "reset" => Ok(ControlCommand::Reset),
        "bpm" => {
            let value = arg.ok_or(CommandError::MissingArgument("bpm"))?;
            value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ControlCommand::SetTargetBpm)
                .ok_or_else(|| CommandError::InvalidNumber(value.to_string()))
        }
        "spo2" => {
            let value = arg.ok_or(CommandError::MissingArgument("spo2"))?;
            value
                .parse::<u8>()
                .map(ControlCommand::SetSpo2)
                .map_err(|_| CommandError::InvalidNumber(value.to_string()))
        }
        "activity" => {
            let name = arg.ok_or(CommandError::MissingArgument("activity"))?;
            Activity::parse(name)
                .map(ControlCommand::SetActivity)
                .ok_or_else(|| CommandError::UnknownActivity(name.to_string()))
        }
        _ => Err(CommandError::Unknown(verb)),
    }
}
