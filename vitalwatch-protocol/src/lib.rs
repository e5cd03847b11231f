//! Vitalwatch alert protocol
//!
//! This crate defines the JSON body posted to the emergency endpoint when
//! the engine raises an alert. The engine decides *when*; this crate
//! decides *what* goes on the wire.
//!
//! # Payload Overview
//!
//! ```text
//! {
//!   message, event_id, status, severity,
//!   device:   { id, battery },
//!   vitals:   { hr, hr_status, hr_severity, ox, ox_status,
//!               temperature, temperature_unit,
//!               blood_pressure_systolic, blood_pressure_diastolic,
//!               blood_pressure_unit, respiratory_rate,
//!               respiratory_rate_unit, activity },
//!   location: { lat, lon, timestamp, available },
//!   nearest_hospitals: [ { name, city, village, address, distance, lat?, lon? } ]
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod encode;
pub mod payload;

pub use encode::{decode, encode, event_id, EncodeError};
pub use payload::{
    AlertPayload, DeviceInfo, DispatchContext, HospitalReport, LocationReport, VitalsReport,
};
