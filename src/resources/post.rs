use gpui::SharedString;
use rust_decimal::Decimal;

use crate::record::RecordModel;
use crate::schema::{FieldSchema, FormSchema, ResourceKind, Route};
use crate::validation::integer;

pub const KIND: ResourceKind = ResourceKind::new("posts");

#[derive(Clone, Debug, PartialEq, recordform_model_derive::RecordModel)]
pub struct Post {
    pub title: SharedString,
    pub body: SharedString,
    pub tags: Vec<SharedString>,
    pub views: Decimal,
    pub likes: Decimal,
    pub dislikes: Decimal,
    pub user_id: Decimal,
}

pub fn list_route() -> Route {
    Route::new("/posts")
}

pub fn schema() -> FormSchema {
    let fields = Post::fields();
    FormSchema::new(
        KIND,
        "Are you sure you want to update the post?",
        list_route(),
    )
    .field(FieldSchema::text(fields.title(), "Title").required())
    .field(FieldSchema::text(fields.body(), "Body").required())
    .field(FieldSchema::selection(fields.tags(), "Tags"))
    .field(
        FieldSchema::number(fields.views(), "Views")
            .rule(integer())
            .default_text("0"),
    )
    .field(
        FieldSchema::number(fields.likes(), "Likes")
            .rule(integer())
            .default_text("0"),
    )
    .field(
        FieldSchema::number(fields.dislikes(), "Dislikes")
            .rule(integer())
            .default_text("0"),
    )
    .field(
        FieldSchema::number(fields.user_id(), "User ID")
            .required()
            .rule(integer())
            .default_text("1"),
    )
}
