//! Async tasks
//!
//! Each task runs independently and communicates via channels/signals.
//! All of them share one current-thread runtime.

pub mod controller;
pub mod dispatch;
pub mod input;
pub mod location;
pub mod script;
pub mod tick;
pub mod watch;

pub use controller::controller_task;
pub use dispatch::{dispatch_task, DispatchSettings};
pub use input::input_task;
pub use location::location_task;
pub use script::script_task;
pub use tick::tick_task;
pub use watch::watch_task;
