use gpui::SharedString;
use rust_decimal::Decimal;

use crate::record::RecordModel;
use crate::schema::{FieldSchema, FormSchema, ResourceKind, Route};
use crate::validation::integer;

pub const KIND: ResourceKind = ResourceKind::new("todos");

#[derive(Clone, Debug, PartialEq, recordform_model_derive::RecordModel)]
pub struct Todo {
    pub todo: SharedString,
    pub completed: bool,
    pub user_id: Decimal,
}

pub fn list_route() -> Route {
    Route::new("/todos")
}

pub fn schema() -> FormSchema {
    let fields = Todo::fields();
    FormSchema::new(
        KIND,
        "Are you sure you want to update the todo?",
        list_route(),
    )
    .field(FieldSchema::text(fields.todo(), "Task").required())
    .field(FieldSchema::flag(fields.completed(), "Completed").default_flag(false))
    .field(
        FieldSchema::number(fields.user_id(), "User ID")
            .required()
            .rule(integer())
            .default_text("1"),
    )
}
