//! # zulu-core
//!
//! Process-level plumbing shared by binaries hosting the Zulu conversation store:
//! tracing initialization via [`init_tracing`].

pub mod logger;

pub use logger::init_tracing;
