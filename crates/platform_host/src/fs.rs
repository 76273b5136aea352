//! File-manager host contract: wire types, service trait, and adapters.

pub mod memory;
pub mod path;
pub mod service;
pub mod types;
