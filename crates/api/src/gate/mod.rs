//! The request gate: route selection, access decision, response decoration.

pub mod decision;
pub mod headers;
pub mod host;
pub mod matcher;

pub use decision::{CookieChange, Decision, Outcome, Resolution, decide, logout};
pub use host::RequestHost;
pub use matcher::RouteMatcher;
