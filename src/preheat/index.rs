use std::collections::HashMap;
use tracing::warn;

use crate::models::{IdScheme, IdentifiableObject, MetadataIdentifier};

/// Objects of one metadata type keyed by every identifier that addresses them
#[derive(Debug)]
pub(super) struct SchemeIndex<T> {
    objects: Vec<T>,
    keys: HashMap<MetadataIdentifier, usize>,
}

impl<T> Default for SchemeIndex<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            keys: HashMap::new(),
        }
    }
}

impl<T: IdentifiableObject> SchemeIndex<T> {
    pub(super) fn insert(&mut self, kind: &str, object: T) {
        let uid_key = MetadataIdentifier::of_uid(object.uid());
        if self.keys.contains_key(&uid_key) {
            warn!("Duplicate {kind} UID '{}' ignored", object.uid());
            return;
        }

        let mut keys = vec![uid_key];
        if let Some(code) = object.code() {
            keys.push(MetadataIdentifier::of_code(code));
        }
        if let Some(name) = object.name() {
            keys.push(MetadataIdentifier::of_name(name));
        }
        for (attribute, value) in object.attribute_values() {
            keys.push(MetadataIdentifier::new(
                IdScheme::Attribute(attribute.clone()),
                value.clone(),
            ));
        }

        let slot = self.objects.len();
        for key in keys {
            if let Some(&existing) = self.keys.get(&key) {
                // first object wins
                warn!(
                    "{kind} '{}' shares {} '{}' with '{}'; keeping the first",
                    object.uid(),
                    key.id_scheme,
                    key.identifier,
                    self.objects[existing].uid()
                );
                continue;
            }
            self.keys.insert(key, slot);
        }
        self.objects.push(object);
    }

    pub(super) fn get(&self, id: &MetadataIdentifier) -> Option<&T> {
        self.keys.get(id).map(|&slot| &self.objects[slot])
    }

    pub(super) fn len(&self) -> usize {
        self.objects.len()
    }
}
