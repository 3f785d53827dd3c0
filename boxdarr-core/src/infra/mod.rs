//! Outbound HTTP and the upstream provider clients.

/// Fetch capability and its `reqwest` implementation.
pub mod http;
pub mod providers;
