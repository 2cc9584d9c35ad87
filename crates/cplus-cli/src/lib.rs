//! Library components of the CPLUS dataset validator CLI.

pub mod logging;
pub mod manifest;
