//! Wiki browsing: backend port and overview use case

pub mod ports;
pub mod service;
