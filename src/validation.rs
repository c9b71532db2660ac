use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use gpui::SharedString;
use rust_decimal::Decimal;

use crate::schema::{
    DraftRecord, DraftValue, FieldKey, FieldKind, FieldSchema, FieldValue, FormSchema,
    RecordPayload, RuleFn,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    MissingValue,
    InvalidFormat,
    Transport(SharedString),
}

impl ErrorKind {
    pub fn message(&self, label: &SharedString) -> SharedString {
        match self {
            ErrorKind::MissingValue => format!("{label} is required.").into(),
            ErrorKind::InvalidFormat => format!("{label} is not valid.").into(),
            ErrorKind::Transport(message) => message.clone(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingValue => f.write_str("value is missing"),
            ErrorKind::InvalidFormat => f.write_str("value has an invalid format"),
            ErrorKind::Transport(message) => write!(f, "transport failed: {message}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Accumulates every failing field; an empty map means submittable.
pub fn validate(schema: &FormSchema, draft: &DraftRecord) -> BTreeMap<FieldKey, ErrorKind> {
    let mut errors = BTreeMap::new();
    for field in schema.fields() {
        if let Err(kind) = evaluate_field(field, draft) {
            errors.insert(field.key(), kind);
        }
    }
    errors
}

/// Same pass as [`validate`], returning the typed payload when the draft is
/// valid. Optional scalars the user left blank are omitted.
pub fn resolve_payload(
    schema: &FormSchema,
    draft: &DraftRecord,
) -> Result<RecordPayload, BTreeMap<FieldKey, ErrorKind>> {
    let mut errors = BTreeMap::new();
    let mut payload = RecordPayload::new();
    for field in schema.fields() {
        match evaluate_field(field, draft) {
            Ok(Some(value)) => payload.insert(field.key(), value),
            Ok(None) => {}
            Err(kind) => {
                errors.insert(field.key(), kind);
            }
        }
    }
    if errors.is_empty() { Ok(payload) } else { Err(errors) }
}

fn evaluate_field(
    field: &FieldSchema,
    draft: &DraftRecord,
) -> Result<Option<FieldValue>, ErrorKind> {
    let value = match field.kind() {
        FieldKind::Text | FieldKind::Number => {
            let raw = match draft.get(field.key()) {
                Some(DraftValue::Text(value)) => value.as_ref(),
                _ => "",
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return if field.is_required() {
                    Err(ErrorKind::MissingValue)
                } else {
                    Ok(None)
                };
            }
            field.parse(trimmed).ok_or(ErrorKind::InvalidFormat)?
        }
        FieldKind::Flag => {
            let value = match draft.get(field.key()) {
                Some(DraftValue::Toggle(value)) => *value,
                _ => false,
            };
            FieldValue::Flag(value)
        }
        FieldKind::SelectionSet | FieldKind::StepList => {
            let items = match draft.get(field.key()) {
                Some(DraftValue::Selection(items)) | Some(DraftValue::Steps(items)) => {
                    items.clone()
                }
                _ => Vec::new(),
            };
            if items.is_empty() && field.is_required() {
                return Err(ErrorKind::MissingValue);
            }
            FieldValue::Items(items)
        }
    };

    if let Some(kind) = field.check_rule(&value) {
        return Err(kind);
    }
    Ok(Some(value))
}

pub fn non_negative() -> RuleFn {
    Arc::new(|value| match value {
        FieldValue::Number(number) if number.is_sign_negative() => Some(ErrorKind::InvalidFormat),
        _ => None,
    })
}

pub fn within(min: Decimal, max: Decimal) -> RuleFn {
    Arc::new(move |value| match value {
        FieldValue::Number(number) if *number < min || *number > max => {
            Some(ErrorKind::InvalidFormat)
        }
        _ => None,
    })
}

pub fn integer() -> RuleFn {
    Arc::new(|value| match value {
        FieldValue::Number(number) if !number.is_integer() => Some(ErrorKind::InvalidFormat),
        _ => None,
    })
}

pub fn one_of(options: &'static [&'static str]) -> RuleFn {
    Arc::new(move |value| match value {
        FieldValue::Text(text) if !options.iter().any(|option| *option == text.as_ref()) => {
            Some(ErrorKind::InvalidFormat)
        }
        _ => None,
    })
}
