//! Out-of-band approval notification seam
//!
//! The registry only requires that a trusted out-of-band channel exists and
//! can be told about new pending requests; delivery of the message content is
//! entirely the implementer's concern. Notification is fire-and-forget:
//! failures are logged and never fail `create`.

use async_trait::async_trait;

use crate::{Error, login_request::LoginRequest};

/// A channel capable of alerting an operator to a pending login request.
#[async_trait]
pub trait ApprovalNotifier: Send + Sync + 'static {
    /// Deliver a notification for a newly created pending request.
    ///
    /// Errors are tolerated by the caller; returning one only produces a log
    /// entry.
    async fn notify_pending(&self, request: &LoginRequest) -> Result<(), Error>;
}
