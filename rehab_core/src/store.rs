//! Ordered store of schedule items.

use crate::{Error, Exercise, ItemKind, Medication, Result, ScheduleItem};

/// Items tracked for the current period, in display order
#[derive(Clone, Debug, Default)]
pub struct ScheduleStore {
    items: Vec<ScheduleItem>,
}

impl ScheduleStore {
    /// Build a store from seed items
    ///
    /// Callers are expected to have validated id uniqueness.
    pub fn new(items: Vec<ScheduleItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn medications(&self) -> impl Iterator<Item = &Medication> {
        self.items.iter().filter_map(ScheduleItem::as_medication)
    }

    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.items.iter().filter_map(ScheduleItem::as_exercise)
    }

    /// Look up a medication for mutation
    pub fn medication_mut(&mut self, id: &str) -> Result<&mut Medication> {
        match self.get_mut(id)? {
            ScheduleItem::Medication(m) => Ok(m),
            ScheduleItem::Exercise(_) => Err(Error::KindMismatch {
                id: id.to_string(),
                expected: ItemKind::Medication,
                found: ItemKind::Exercise,
            }),
        }
    }

    /// Look up an exercise for mutation
    pub fn exercise_mut(&mut self, id: &str) -> Result<&mut Exercise> {
        match self.get_mut(id)? {
            ScheduleItem::Exercise(e) => Ok(e),
            ScheduleItem::Medication(_) => Err(Error::KindMismatch {
                id: id.to_string(),
                expected: ItemKind::Exercise,
                found: ItemKind::Medication,
            }),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ScheduleItem> {
        self.items.iter_mut()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut ScheduleItem> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }
}
