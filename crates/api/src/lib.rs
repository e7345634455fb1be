//! HTTP gate: resolves `mk8_token` identities and guards `/admin`.

pub mod account;
pub mod app;
pub mod config;
pub mod context;
pub mod gate;
pub mod middleware;
pub mod resolver;
