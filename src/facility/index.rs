use std::collections::BTreeMap;

use super::{Patient, UHealthId};

/// Patient names keyed by id, iterated in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientIndex {
    names: BTreeMap<UHealthId, String>,
}

impl PatientIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `"First Last"` for the patient's id, replacing any previous name.
    pub fn add_patient(&mut self, patient: &Patient) {
        self.names.insert(patient.id.clone(), patient.full_name());
    }

    pub fn remove_patient(&mut self, patient: &Patient) -> bool {
        self.names.remove(&patient.id).is_some()
    }

    pub fn name(&self, id: &UHealthId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UHealthId, &str)> + '_ {
        self.names.iter().map(|(id, name)| (id, name.as_str()))
    }
}
