use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use gpui::SharedString;
use rust_decimal::Decimal;

use crate::validation::ErrorKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ResourceKind(&'static str);

impl ResourceKind {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordId(pub u64);

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route(SharedString);

impl Route {
    pub fn new(value: impl Into<SharedString>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_ref())
    }
}

// Scalar text stays raw until validation; composite values mirror the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DraftValue {
    Text(SharedString),
    Toggle(bool),
    Selection(Vec<SharedString>),
    Steps(Vec<SharedString>),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DraftRecord {
    values: BTreeMap<FieldKey, DraftValue>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, value: DraftValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: FieldKey) -> Option<&DraftValue> {
        self.values.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &DraftValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Text(SharedString),
    Number(Decimal),
    Flag(bool),
    Items(Vec<SharedString>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&SharedString> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[SharedString]> {
        match self {
            FieldValue::Items(values) => Some(values),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordPayload {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl RecordPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, value: FieldValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    SelectionSet,
    StepList,
}

impl FieldKind {
    pub const fn is_composite(self) -> bool {
        matches!(self, FieldKind::SelectionSet | FieldKind::StepList)
    }
}

pub type ParseFn = Arc<dyn Fn(&str) -> Option<FieldValue> + Send + Sync>;
pub type RuleFn = Arc<dyn Fn(&FieldValue) -> Option<ErrorKind> + Send + Sync>;

#[derive(Clone)]
pub struct FieldSchema {
    key: FieldKey,
    label: SharedString,
    kind: FieldKind,
    required: bool,
    default: Option<DraftValue>,
    parse: Option<ParseFn>,
    rule: Option<RuleFn>,
}

impl FieldSchema {
    fn new(key: FieldKey, label: impl Into<SharedString>, kind: FieldKind) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            required: false,
            default: None,
            parse: None,
            rule: None,
        }
    }

    pub fn text(key: FieldKey, label: impl Into<SharedString>) -> Self {
        let mut field = Self::new(key, label, FieldKind::Text);
        field.parse = Some(Arc::new(|raw| {
            Some(FieldValue::Text(raw.to_string().into()))
        }));
        field
    }

    pub fn number(key: FieldKey, label: impl Into<SharedString>) -> Self {
        let mut field = Self::new(key, label, FieldKind::Number);
        field.parse = Some(Arc::new(|raw| {
            Decimal::from_str(raw).ok().map(FieldValue::Number)
        }));
        field
    }

    pub fn flag(key: FieldKey, label: impl Into<SharedString>) -> Self {
        Self::new(key, label, FieldKind::Flag)
    }

    pub fn selection(key: FieldKey, label: impl Into<SharedString>) -> Self {
        Self::new(key, label, FieldKind::SelectionSet)
    }

    pub fn steps(key: FieldKey, label: impl Into<SharedString>) -> Self {
        Self::new(key, label, FieldKind::StepList)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_text(mut self, value: impl Into<SharedString>) -> Self {
        self.default = Some(DraftValue::Text(value.into()));
        self
    }

    pub fn default_flag(mut self, value: bool) -> Self {
        self.default = Some(DraftValue::Toggle(value));
        self
    }

    pub fn rule(mut self, rule: RuleFn) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn key(&self) -> FieldKey {
        self.key
    }

    pub fn label(&self) -> &SharedString {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&DraftValue> {
        self.default.as_ref()
    }

    pub(crate) fn parse(&self, raw: &str) -> Option<FieldValue> {
        match &self.parse {
            Some(parse) => parse(raw),
            None => None,
        }
    }

    pub(crate) fn check_rule(&self, value: &FieldValue) -> Option<ErrorKind> {
        self.rule.as_ref().and_then(|rule| rule(value))
    }
}

/// Ordered field declarations for one resource kind, unique by key.
#[derive(Clone)]
pub struct FormSchema {
    kind: ResourceKind,
    update_prompt: SharedString,
    destination: Route,
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(
        kind: ResourceKind,
        update_prompt: impl Into<SharedString>,
        destination: Route,
    ) -> Self {
        Self {
            kind,
            update_prompt: update_prompt.into(),
            destination,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        debug_assert!(
            !self.fields.iter().any(|existing| existing.key() == field.key()),
            "duplicate field key {} in schema for {}",
            field.key(),
            self.kind,
        );
        self.fields.push(field);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn update_prompt(&self) -> &SharedString {
        &self.update_prompt
    }

    pub fn destination(&self) -> &Route {
        &self.destination
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field_schema(&self, key: FieldKey) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.key() == key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.field_schema(key).is_some()
    }
}
