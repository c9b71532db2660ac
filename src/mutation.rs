use std::sync::{Arc, RwLock};

use crate::contracts::RecordTransport;
use crate::schema::{RecordId, RecordPayload, ResourceKind};
use crate::session::{FormError, FormResult, read_lock, write_lock};
use crate::validation::ErrorKind;

/// Lifecycle of the one mutation a coordinator may run at a time; the single
/// source of truth for UI gating.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Succeeded,
    Failed(ErrorKind),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationStatus::Succeeded | MutationStatus::Failed(_))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MutationTarget {
    Create,
    Update { id: RecordId },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MutationRequest {
    pub kind: ResourceKind,
    pub target: MutationTarget,
    pub payload: RecordPayload,
}

impl MutationRequest {
    pub fn is_edit(&self) -> bool {
        matches!(self.target, MutationTarget::Update { .. })
    }
}

struct MutationState {
    status: MutationStatus,
    attempts: u32,
    alive: bool,
}

/// Runs at most one submission at a time against the transport collaborator.
/// A duplicate submit while pending is rejected without a transport call; a
/// late result arriving after [`detach`](MutationCoordinator::detach) is
/// dropped without touching the status.
pub struct MutationCoordinator<X>
where
    X: RecordTransport,
{
    transport: X,
    state: Arc<RwLock<MutationState>>,
}

impl<X> MutationCoordinator<X>
where
    X: RecordTransport,
{
    pub fn new(transport: X) -> Self {
        Self {
            transport,
            state: Arc::new(RwLock::new(MutationState {
                status: MutationStatus::Idle,
                attempts: 0,
                alive: true,
            })),
        }
    }

    pub fn status(&self) -> FormResult<MutationStatus> {
        Ok(read_lock(&self.state, "reading mutation status")?.status.clone())
    }

    pub fn attempts(&self) -> FormResult<u32> {
        Ok(read_lock(&self.state, "reading mutation attempts")?.attempts)
    }

    /// Marks the owning form as gone; a result still in flight no longer
    /// transitions the status.
    pub fn detach(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "detaching coordinator")?;
        state.alive = false;
        Ok(())
    }

    pub fn reset(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting mutation status")?;
        transition(&mut state, MutationStatus::Idle)
    }

    pub async fn submit(&self, request: MutationRequest) -> FormResult<MutationStatus> {
        {
            let mut state = write_lock(&self.state, "starting mutation")?;
            if state.status.is_pending() {
                return Err(FormError::AlreadyInFlight);
            }
            transition(&mut state, MutationStatus::Pending)?;
            state.attempts = state.attempts.saturating_add(1);
        }

        let kind = request.kind;
        let operation = if request.is_edit() { "update" } else { "create" };
        log::debug!("submitting {operation} for {kind}");

        let future = match request.target {
            MutationTarget::Create => self.transport.create(request.kind, request.payload),
            MutationTarget::Update { id } => {
                self.transport.update(request.kind, id, request.payload)
            }
        };
        let result = future.await;

        let mut state = write_lock(&self.state, "completing mutation")?;
        if !state.alive {
            log::debug!("dropping {operation} result for {kind}: form is gone");
            return Err(FormError::SessionDetached);
        }
        let next = match result {
            Ok(_) => MutationStatus::Succeeded,
            Err(failure) => {
                log::warn!("{operation} for {kind} failed: {failure}");
                MutationStatus::Failed(ErrorKind::Transport(failure.message().clone()))
            }
        };
        transition(&mut state, next.clone())?;
        Ok(next)
    }
}

fn transition(state: &mut MutationState, next: MutationStatus) -> FormResult<()> {
    let current = state.status.clone();
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (&current, &next),
        (MutationStatus::Idle, MutationStatus::Pending)
            | (MutationStatus::Succeeded, MutationStatus::Pending)
            | (MutationStatus::Failed(_), MutationStatus::Pending)
            | (MutationStatus::Pending, MutationStatus::Succeeded)
            | (MutationStatus::Pending, MutationStatus::Failed(_))
            | (_, MutationStatus::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.status = next;
    Ok(())
}
