//! Records flowing through the pipeline and the per-call result type.

/// Stage records and the output shape.
pub mod records;
/// Per-call outcome type.
pub mod service_result;

pub use records::*;
pub use service_result::{ServiceError, ServiceResult, guarded, service};
