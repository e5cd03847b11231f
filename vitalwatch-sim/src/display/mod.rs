//! Console watch face
//!
//! The host has no screen; the watch face is rendered as a log line with an
//! ECG sparkline.

pub mod watch_face;

pub use watch_face::WatchFrame;
