//! The remote call boundary.
//!
//! The core never owns a network client. It is handed something that can
//! carry a [`MutationRequest`] to the server and eventually produce either a
//! typed payload or a transport error. Timeouts, retries at the wire level,
//! and serialization are the implementation's concern.

use async_trait::async_trait;
use huddle_core::{MutationPayload, MutationRequest, TransportError};

/// An opaque asynchronous call: `invoke(request)` eventually resolves to a
/// payload (possibly carrying an application-level error field) or fails at
/// the transport level.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, request: &MutationRequest) -> Result<MutationPayload, TransportError>;
}
