use gpui::SharedString;
use rust_decimal::Decimal;

use crate::record::RecordModel;
use crate::schema::{FieldSchema, FormSchema, ResourceKind, Route};
use crate::validation::{non_negative, one_of};

pub const KIND: ResourceKind = ResourceKind::new("recipes");

pub const DIFFICULTY_OPTIONS: &[&str] = &["Easy", "Medium", "Hard"];

pub const INGREDIENT_OPTIONS: &[&str] = &[
    "Salt", "Sugar", "Flour", "Eggs", "Milk", "Butter", "Cheese", "Chicken", "Beef", "Fish",
    "Garlic", "Onion", "Pepper", "Olive Oil",
];

#[derive(Clone, Debug, PartialEq, recordform_model_derive::RecordModel)]
pub struct Recipe {
    pub name: SharedString,
    pub ingredients: Vec<SharedString>,
    pub instructions: Vec<SharedString>,
    pub prep_time_minutes: Decimal,
    pub cook_time_minutes: Decimal,
    pub servings: Decimal,
    pub difficulty: SharedString,
    pub cuisine: SharedString,
}

pub fn list_route() -> Route {
    Route::new("/recipes")
}

pub fn schema() -> FormSchema {
    let fields = Recipe::fields();
    FormSchema::new(
        KIND,
        "Are you sure you want to update the recipe?",
        list_route(),
    )
    .field(FieldSchema::text(fields.name(), "Recipe Name").required())
    .field(FieldSchema::selection(fields.ingredients(), "Ingredients"))
    .field(FieldSchema::steps(fields.instructions(), "Instructions"))
    .field(
        FieldSchema::number(fields.prep_time_minutes(), "Prep Time")
            .required()
            .rule(non_negative()),
    )
    .field(
        FieldSchema::number(fields.cook_time_minutes(), "Cook Time")
            .required()
            .rule(non_negative()),
    )
    .field(FieldSchema::number(fields.servings(), "Servings").default_text("1"))
    .field(
        FieldSchema::text(fields.difficulty(), "Difficulty")
            .required()
            .rule(one_of(DIFFICULTY_OPTIONS))
            .default_text("Easy"),
    )
    .field(FieldSchema::text(fields.cuisine(), "Cuisine"))
}
