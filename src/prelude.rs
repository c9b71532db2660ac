pub use crate::cache::InMemoryListCache;
pub use crate::composite::CompositeFieldStore;
pub use crate::contracts::{
    BoxedTransportFuture, ConfirmPrompt, ListCache, Navigator, RecordTransport, TransportFailure,
};
pub use crate::effect::PostMutationEffect;
pub use crate::mutation::{
    MutationCoordinator, MutationRequest, MutationStatus, MutationTarget,
};
pub use crate::record::{FieldCodec, RecordModel};
pub use crate::schema::{
    DraftRecord, DraftValue, FieldKey, FieldKind, FieldSchema, FieldValue, FormSchema, RecordId,
    RecordPayload, ResourceKind, Route,
};
pub use crate::session::{
    FormError, FormId, FormMode, FormResult, FormSession, SessionSnapshot, SubmitOutcome,
};
pub use crate::validation::{ErrorKind, integer, non_negative, one_of, resolve_payload, validate, within};
pub use recordform_model_derive::RecordModel;
