use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use gpui::SharedString;

use crate::schema::{RecordId, RecordPayload, ResourceKind, Route};

pub type BoxedTransportFuture =
    Pin<Box<dyn Future<Output = Result<RecordPayload, TransportFailure>> + Send + 'static>>;

// Finer-grained failure detail (status codes, retryability) belongs to the
// transport itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportFailure {
    message: SharedString,
}

impl TransportFailure {
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &SharedString {
        &self.message
    }
}

impl Display for TransportFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_ref())
    }
}

impl std::error::Error for TransportFailure {}

pub trait RecordTransport: Send + Sync + 'static {
    fn create(&self, kind: ResourceKind, payload: RecordPayload) -> BoxedTransportFuture;

    fn update(
        &self,
        kind: ResourceKind,
        id: RecordId,
        payload: RecordPayload,
    ) -> BoxedTransportFuture;
}

pub trait ListCache: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn invalidate(&self, kind: ResourceKind) -> Result<(), Self::Error>;
}

pub trait Navigator: Send + Sync + 'static {
    fn go_to(&self, route: &Route);
}

impl<F> Navigator for F
where
    F: Fn(&Route) + Send + Sync + 'static,
{
    fn go_to(&self, route: &Route) {
        (self)(route)
    }
}

/// Synchronous confirmation gate asked before destructive updates.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &SharedString) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&SharedString) -> bool + Send + Sync,
{
    fn confirm(&self, message: &SharedString) -> bool {
        (self)(message)
    }
}
