//! Port traits at the seams between the pipeline, the session layer,
//! and the hosting shell.

pub mod bearer;
pub mod gateway;
pub mod navigator;
pub mod notifier;
pub mod sink;
pub mod storage;

pub use bearer::BearerSource;
pub use gateway::AuthGateway;
pub use navigator::Navigator;
pub use notifier::{FailureNotifier, TracingNotifier};
pub use sink::SessionSink;
pub use storage::CredentialStorage;
