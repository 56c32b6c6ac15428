//! # minitel-server
//!
//! The front end that puts Minitel terminals on line: a TCP accept loop with
//! one blocking session per client, serial-port probing for a locally wired
//! terminal, `.VDT` page export and the TOML configuration shared by all three.

pub mod config;
pub mod export;
#[cfg(unix)]
pub mod probe;
pub mod serve;
pub mod welcome;
