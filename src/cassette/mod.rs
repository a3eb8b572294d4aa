//! Record/replay infrastructure for running downloads without a network.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
