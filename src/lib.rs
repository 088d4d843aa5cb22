//! Shoal - Minimal Asynchronous HTTP/1.1 Server
//!
//! Core library for the codec, connection handling and routing layers.

pub mod config;
pub mod handler;
pub mod http;
pub mod server;
