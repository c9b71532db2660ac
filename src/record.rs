use gpui::SharedString;
use rust_decimal::Decimal;

use crate::schema::{DraftRecord, DraftValue, FieldValue, RecordPayload};

/// A typed record a form can edit. Derivable with `#[derive(RecordModel)]`
/// for structs of [`FieldCodec`] fields.
pub trait RecordModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;

    fn to_draft(&self) -> DraftRecord;

    fn to_payload(&self) -> RecordPayload;

    fn from_payload(payload: &RecordPayload) -> Option<Self>;
}

pub trait FieldCodec: Sized {
    fn encode_draft(&self) -> DraftValue;

    fn encode_value(&self) -> FieldValue;

    fn decode_value(value: &FieldValue) -> Option<Self>;
}

impl FieldCodec for SharedString {
    fn encode_draft(&self) -> DraftValue {
        DraftValue::Text(self.clone())
    }

    fn encode_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn decode_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FieldCodec for String {
    fn encode_draft(&self) -> DraftValue {
        DraftValue::Text(self.clone().into())
    }

    fn encode_value(&self) -> FieldValue {
        FieldValue::Text(self.clone().into())
    }

    fn decode_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(text) => Some(text.to_string()),
            _ => None,
        }
    }
}

impl FieldCodec for Decimal {
    fn encode_draft(&self) -> DraftValue {
        DraftValue::Text(self.normalize().to_string().into())
    }

    fn encode_value(&self) -> FieldValue {
        FieldValue::Number(*self)
    }

    fn decode_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

impl FieldCodec for bool {
    fn encode_draft(&self) -> DraftValue {
        DraftValue::Toggle(*self)
    }

    fn encode_value(&self) -> FieldValue {
        FieldValue::Flag(*self)
    }

    fn decode_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

// Collection fields encode as selections; the session re-homes them onto the
// step store when the schema declares the key as a step list.
impl FieldCodec for Vec<SharedString> {
    fn encode_draft(&self) -> DraftValue {
        DraftValue::Selection(self.clone())
    }

    fn encode_value(&self) -> FieldValue {
        FieldValue::Items(self.clone())
    }

    fn decode_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Items(items) => Some(items.clone()),
            _ => None,
        }
    }
}
