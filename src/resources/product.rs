use gpui::SharedString;
use rust_decimal::Decimal;

use crate::record::RecordModel;
use crate::schema::{FieldSchema, FormSchema, ResourceKind, Route};
use crate::validation::{non_negative, one_of, within};

pub const KIND: ResourceKind = ResourceKind::new("products");

pub const CATEGORY_OPTIONS: &[&str] = &["beauty", "fragrance", "furniture"];

#[derive(Clone, Debug, PartialEq, recordform_model_derive::RecordModel)]
pub struct Product {
    pub title: SharedString,
    pub description: SharedString,
    pub price: Decimal,
    pub category: SharedString,
    pub discount_percentage: Decimal,
}

pub fn list_route() -> Route {
    Route::new("/products")
}

pub fn schema() -> FormSchema {
    let fields = Product::fields();
    FormSchema::new(
        KIND,
        "Are you sure you want to update the product data?",
        list_route(),
    )
    .field(FieldSchema::text(fields.title(), "Title").required())
    .field(FieldSchema::text(fields.description(), "Description").required())
    .field(
        FieldSchema::number(fields.price(), "Price")
            .required()
            .rule(non_negative()),
    )
    .field(
        FieldSchema::text(fields.category(), "Category")
            .required()
            .rule(one_of(CATEGORY_OPTIONS))
            .default_text("beauty"),
    )
    .field(
        FieldSchema::number(fields.discount_percentage(), "Discount")
            .required()
            .rule(within(Decimal::ZERO, Decimal::ONE_HUNDRED)),
    )
}
