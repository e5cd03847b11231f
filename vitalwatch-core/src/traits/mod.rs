//! Collaborator traits
//!
//! These traits define the interface between the engine and the outside
//! world: where the wearer is, which hospitals are near, and how an alert
//! leaves the device. Implementations live with the host.

pub mod directory;
pub mod geolocation;
pub mod transport;

pub use directory::{DirectoryError, HospitalDirectory};
pub use geolocation::{GeoError, GeolocationProvider};
pub use transport::{AlertTransport, TransportError};
