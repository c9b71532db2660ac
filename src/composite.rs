use std::collections::BTreeMap;

use gpui::SharedString;

use crate::schema::{DraftRecord, DraftValue, FieldKey};
use crate::session::{FormError, FormResult};

/// Sub-state for fields a single bound input cannot hold: selection sets
/// (membership toggles, no duplicates) and step lists (contiguous indices).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompositeFieldStore {
    selections: BTreeMap<FieldKey, Vec<SharedString>>,
    steps: BTreeMap<FieldKey, Vec<SharedString>>,
}

impl CompositeFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, key: FieldKey, item: impl Into<SharedString>) {
        let items = self.selections.entry(key).or_default();
        let item = item.into();
        if let Some(index) = items.iter().position(|candidate| candidate == &item) {
            items.remove(index);
        } else {
            items.push(item);
        }
    }

    pub fn selection(&self, key: FieldKey) -> &[SharedString] {
        self.selections.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn append_step(&mut self, key: FieldKey) {
        self.steps.entry(key).or_default().push(SharedString::default());
    }

    pub fn update_step(
        &mut self,
        key: FieldKey,
        index: usize,
        value: impl Into<SharedString>,
    ) -> FormResult<()> {
        let steps = self.steps.entry(key).or_default();
        match steps.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(FormError::StepOutOfRange {
                index,
                len: steps.len(),
            }),
        }
    }

    pub fn remove_step(&mut self, key: FieldKey, index: usize) -> FormResult<()> {
        let steps = self.steps.entry(key).or_default();
        if index >= steps.len() {
            return Err(FormError::StepOutOfRange {
                index,
                len: steps.len(),
            });
        }
        steps.remove(index);
        Ok(())
    }

    pub fn steps(&self, key: FieldKey) -> &[SharedString] {
        self.steps.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn set_selection(&mut self, key: FieldKey, items: Vec<SharedString>) {
        self.selections.insert(key, items);
    }

    pub(crate) fn set_steps(&mut self, key: FieldKey, items: Vec<SharedString>) {
        self.steps.insert(key, items);
    }

    pub(crate) fn merge_into(&self, draft: &mut DraftRecord) {
        for (key, items) in &self.selections {
            draft.insert(*key, DraftValue::Selection(items.clone()));
        }
        for (key, items) in &self.steps {
            draft.insert(*key, DraftValue::Steps(items.clone()));
        }
    }
}
