//! Host implementations of the core collaborator traits

pub mod directory;
pub mod geolocation;
pub mod transport;

pub use directory::ConfiguredHospitalDirectory;
pub use geolocation::FixedGeolocation;
pub use transport::LogTransport;
