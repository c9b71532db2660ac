use gpui::SharedString;
use rust_decimal::Decimal;

use crate::record::RecordModel;
use crate::schema::{FieldSchema, FormSchema, ResourceKind, Route};
use crate::validation::integer;

pub const KIND: ResourceKind = ResourceKind::new("comments");

#[derive(Clone, Debug, PartialEq, recordform_model_derive::RecordModel)]
pub struct Comment {
    pub body: SharedString,
    pub user_id: Decimal,
}

pub fn list_route() -> Route {
    Route::new("/comments")
}

pub fn schema() -> FormSchema {
    let fields = Comment::fields();
    FormSchema::new(
        KIND,
        "Are you sure you want to update the comment?",
        list_route(),
    )
    .field(FieldSchema::text(fields.body(), "Comment").required())
    .field(
        FieldSchema::number(fields.user_id(), "User ID")
            .required()
            .rule(integer())
            .default_text("1"),
    )
}
