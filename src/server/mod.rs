//! TCP listener and connection spawning.

pub mod listener;
