//! Clipstack binary support: CLI definition, process bootstrap and the
//! presentation adapters that sit on top of the history engine.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
