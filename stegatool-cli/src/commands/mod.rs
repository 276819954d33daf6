//! Subcommand implementations.

pub mod createwm;
pub mod verifywm;
