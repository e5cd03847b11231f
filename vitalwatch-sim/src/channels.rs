//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared by the tasks. The controller is
//! the only task that touches the engine; everything else talks to it
//! through these.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use vitalwatch_core::alert::AlertRequest;

use crate::command::ControlCommand;
use crate::display::WatchFrame;
use crate::tasks::location::LocationContext;

/// Channel capacity for operator commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for alerts awaiting dispatch
const ALERT_CHANNEL_SIZE: usize = 4;

/// Operator commands (stdin, scripted scenario)
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, ControlCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Alerts raised by the engine, consumed by the dispatch task
pub static ALERT_CHANNEL: Channel<CriticalSectionRawMutex, AlertRequest, ALERT_CHANNEL_SIZE> =
    Channel::new();

/// Engine time of the latest frame (ms since start)
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Latest watch face, published on each clock tick
pub static WATCH_UPDATE: Signal<CriticalSectionRawMutex, WatchFrame> = Signal::new();

/// Wearer position and nearest hospitals, read by the dispatch task
pub static LOCATION_CONTEXT: Mutex<CriticalSectionRawMutex, LocationContext> =
    Mutex::new(LocationContext::pending());
