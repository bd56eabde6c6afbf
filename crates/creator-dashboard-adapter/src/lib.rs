/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public creator backend adapter surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;

// Re-export commonly used types from http
pub use http::{ClientConfig, CreatorClient, DashboardError, Result};

// Re-export all types
pub use types::*;
