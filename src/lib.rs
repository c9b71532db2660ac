pub mod cache;
pub mod composite;
pub mod contracts;
pub mod effect;
pub mod mutation;
pub mod prelude;
pub mod record;
pub mod resources;
pub mod schema;
pub mod session;
pub mod validation;


pub use record::{FieldCodec, RecordModel};
pub use recordform_model_derive::RecordModel;
pub use session::{FormError, FormMode, FormResult, FormSession, SubmitOutcome};
