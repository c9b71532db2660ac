use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::SharedString;

use crate::composite::CompositeFieldStore;
use crate::contracts::{ConfirmPrompt, RecordTransport};
use crate::mutation::{MutationCoordinator, MutationRequest, MutationStatus, MutationTarget};
use crate::record::RecordModel;
use crate::schema::{DraftRecord, DraftValue, FieldKey, FieldKind, FormSchema, RecordId};
use crate::validation::{self, ErrorKind};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormMode {
    Create,
    Edit { id: RecordId },
}

impl FormMode {
    pub const fn is_edit(self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
    InvalidStateTransition {
        from: MutationStatus,
        to: MutationStatus,
    },
    AlreadyInFlight,
    StepOutOfRange {
        index: usize,
        len: usize,
    },
    UnknownField(FieldKey),
    FieldKindMismatch {
        key: FieldKey,
        kind: FieldKind,
    },
    SessionDetached,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid mutation status transition: {from:?} -> {to:?}")
            }
            FormError::AlreadyInFlight => f.write_str("a mutation is already in flight"),
            FormError::StepOutOfRange { index, len } => {
                write!(f, "step index {index} is out of range for {len} steps")
            }
            FormError::UnknownField(key) => {
                write!(f, "field {key} is not declared by the schema")
            }
            FormError::FieldKindMismatch { key, kind } => {
                write!(f, "field {key} is declared as {kind:?} and cannot take this value")
            }
            FormError::SessionDetached => {
                f.write_str("form session was detached before the mutation resolved")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

/// Result of one end-to-end submit attempt driven by [`FormSession::submit`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    Declined,
    Invalid,
    Completed(MutationStatus),
}

#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub mode: FormMode,
    pub hydrated: bool,
    pub submit_count: u32,
    pub draft: DraftRecord,
    pub errors: BTreeMap<FieldKey, ErrorKind>,
}

impl SessionSnapshot {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

struct SessionState {
    id: FormId,
    mode: FormMode,
    scalars: BTreeMap<FieldKey, DraftValue>,
    composites: CompositeFieldStore,
    hydrated: bool,
    submit_count: u32,
    errors: BTreeMap<FieldKey, ErrorKind>,
}

/// Owns the in-progress record for one form instance: scalar bindings, the
/// composite store and the one-shot prefill seed, merged into a draft on
/// demand.
#[derive(Clone)]
pub struct FormSession {
    schema: FormSchema,
    state: Arc<RwLock<SessionState>>,
}

impl FormSession {
    pub fn new(schema: FormSchema, mode: FormMode) -> Self {
        let mut scalars = BTreeMap::new();
        let mut composites = CompositeFieldStore::new();
        for field in schema.fields() {
            let Some(default) = field.default_value() else {
                continue;
            };
            match default {
                DraftValue::Text(_) | DraftValue::Toggle(_) => {
                    scalars.insert(field.key(), default.clone());
                }
                DraftValue::Selection(items) => {
                    composites.set_selection(field.key(), items.clone());
                }
                DraftValue::Steps(items) => {
                    composites.set_steps(field.key(), items.clone());
                }
            }
        }

        Self {
            schema,
            state: Arc::new(RwLock::new(SessionState {
                id: FormId::next(),
                mode,
                scalars,
                composites,
                hydrated: false,
                submit_count: 0,
                errors: BTreeMap::new(),
            })),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn mode(&self) -> FormResult<FormMode> {
        Ok(read_lock(&self.state, "reading form mode")?.mode)
    }

    /// Applies the prefill seed exactly once per session; later calls are
    /// no-ops reporting `false`, so a refetched seed never clobbers edits.
    pub fn hydrate<R>(&self, seed: &R) -> FormResult<bool>
    where
        R: RecordModel,
    {
        let draft = seed.to_draft();
        let mut state = write_lock(&self.state, "hydrating from seed")?;
        if state.hydrated {
            return Ok(false);
        }
        state.hydrated = true;

        for (key, value) in draft.iter() {
            let Some(field) = self.schema.field_schema(*key) else {
                continue;
            };
            match (field.kind(), value) {
                (FieldKind::Text | FieldKind::Number, DraftValue::Text(_)) => {
                    state.scalars.insert(*key, value.clone());
                }
                (FieldKind::Flag, DraftValue::Toggle(_)) => {
                    state.scalars.insert(*key, value.clone());
                }
                (
                    FieldKind::SelectionSet,
                    DraftValue::Selection(items) | DraftValue::Steps(items),
                ) => {
                    state.composites.set_selection(*key, items.clone());
                }
                (FieldKind::StepList, DraftValue::Selection(items) | DraftValue::Steps(items)) => {
                    state.composites.set_steps(*key, items.clone());
                }
                _ => {}
            }
        }
        Ok(true)
    }

    pub fn set_text(&self, key: FieldKey, value: impl Into<SharedString>) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::Text, FieldKind::Number])?;
        let mut state = write_lock(&self.state, "writing text field")?;
        state.scalars.insert(key, DraftValue::Text(value.into()));
        state.errors.remove(&key);
        Ok(())
    }

    pub fn set_flag(&self, key: FieldKey, value: bool) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::Flag])?;
        let mut state = write_lock(&self.state, "writing flag field")?;
        state.scalars.insert(key, DraftValue::Toggle(value));
        state.errors.remove(&key);
        Ok(())
    }

    pub fn toggle_selection(
        &self,
        key: FieldKey,
        item: impl Into<SharedString>,
    ) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::SelectionSet])?;
        let mut state = write_lock(&self.state, "toggling selection item")?;
        state.composites.toggle(key, item);
        state.errors.remove(&key);
        Ok(())
    }

    pub fn selection(&self, key: FieldKey) -> FormResult<Vec<SharedString>> {
        self.expect_kind(key, &[FieldKind::SelectionSet])?;
        let state = read_lock(&self.state, "reading selection snapshot")?;
        Ok(state.composites.selection(key).to_vec())
    }

    pub fn append_step(&self, key: FieldKey) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::StepList])?;
        let mut state = write_lock(&self.state, "appending step")?;
        state.composites.append_step(key);
        state.errors.remove(&key);
        Ok(())
    }

    pub fn update_step(
        &self,
        key: FieldKey,
        index: usize,
        value: impl Into<SharedString>,
    ) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::StepList])?;
        let mut state = write_lock(&self.state, "updating step")?;
        state.composites.update_step(key, index, value)?;
        state.errors.remove(&key);
        Ok(())
    }

    pub fn remove_step(&self, key: FieldKey, index: usize) -> FormResult<()> {
        self.expect_kind(key, &[FieldKind::StepList])?;
        let mut state = write_lock(&self.state, "removing step")?;
        state.composites.remove_step(key, index)?;
        state.errors.remove(&key);
        Ok(())
    }

    pub fn steps(&self, key: FieldKey) -> FormResult<Vec<SharedString>> {
        self.expect_kind(key, &[FieldKind::StepList])?;
        let state = read_lock(&self.state, "reading step snapshot")?;
        Ok(state.composites.steps(key).to_vec())
    }

    pub fn current_draft(&self) -> FormResult<DraftRecord> {
        let state = read_lock(&self.state, "merging current draft")?;
        let mut draft = DraftRecord::new();
        for (key, value) in &state.scalars {
            draft.insert(*key, value.clone());
        }
        state.composites.merge_into(&mut draft);
        Ok(draft)
    }

    pub fn validate(&self) -> FormResult<bool> {
        let draft = self.current_draft()?;
        let errors = validation::validate(&self.schema, &draft);
        let mut state = write_lock(&self.state, "storing validation result")?;
        let valid = errors.is_empty();
        state.errors = errors;
        Ok(valid)
    }

    pub fn field_error(&self, key: FieldKey) -> FormResult<Option<ErrorKind>> {
        let state = read_lock(&self.state, "reading field error")?;
        Ok(state.errors.get(&key).cloned())
    }

    pub fn error_message(&self, key: FieldKey) -> FormResult<Option<SharedString>> {
        let Some(field) = self.schema.field_schema(key) else {
            return Ok(None);
        };
        let state = read_lock(&self.state, "reading field error message")?;
        Ok(state
            .errors
            .get(&key)
            .map(|kind| kind.message(field.label())))
    }

    pub fn snapshot(&self) -> FormResult<SessionSnapshot> {
        let draft = self.current_draft()?;
        let state = read_lock(&self.state, "creating session snapshot")?;
        Ok(SessionSnapshot {
            mode: state.mode,
            hydrated: state.hydrated,
            submit_count: state.submit_count,
            draft,
            errors: state.errors.clone(),
        })
    }

    /// Drives one full submit: the edit-mode confirmation gate, the
    /// validation gate, then the coordinator. A declined confirmation or a
    /// failed validation never reaches the transport.
    pub async fn submit<X, C>(
        &self,
        coordinator: &MutationCoordinator<X>,
        confirm: &C,
    ) -> FormResult<SubmitOutcome>
    where
        X: RecordTransport,
        C: ConfirmPrompt,
    {
        let mode = self.mode()?;
        if mode.is_edit() && !confirm.confirm(self.schema.update_prompt()) {
            log::debug!("update of {} declined by the user", self.schema.kind());
            return Ok(SubmitOutcome::Declined);
        }

        {
            let mut state = write_lock(&self.state, "counting submit attempt")?;
            state.submit_count = state.submit_count.saturating_add(1);
        }

        let draft = self.current_draft()?;
        let payload = match validation::resolve_payload(&self.schema, &draft) {
            Ok(payload) => {
                let mut state = write_lock(&self.state, "clearing validation errors")?;
                state.errors.clear();
                payload
            }
            Err(errors) => {
                let mut state = write_lock(&self.state, "storing submit validation errors")?;
                state.errors = errors;
                return Ok(SubmitOutcome::Invalid);
            }
        };

        let target = match mode {
            FormMode::Create => MutationTarget::Create,
            FormMode::Edit { id } => MutationTarget::Update { id },
        };
        let request = MutationRequest {
            kind: self.schema.kind(),
            target,
            payload,
        };
        let status = coordinator.submit(request).await?;
        Ok(SubmitOutcome::Completed(status))
    }

    fn expect_kind(&self, key: FieldKey, accepted: &[FieldKind]) -> FormResult<()> {
        let Some(field) = self.schema.field_schema(key) else {
            return Err(FormError::UnknownField(key));
        };
        if accepted.contains(&field.kind()) {
            Ok(())
        } else {
            Err(FormError::FieldKindMismatch {
                key,
                kind: field.kind(),
            })
        }
    }
}

pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
