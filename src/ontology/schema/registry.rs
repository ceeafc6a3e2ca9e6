//! Process-wide table of every registered resource variant.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::*;
use crate::ontology::{ResourceDescriptor, ResourceType};

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::new(vec![
        VirtualMachine::type_descriptor(),
        Container::type_descriptor(),
        Function::type_descriptor(),
        NetworkInterface::type_descriptor(),
        LoadBalancer::type_descriptor(),
        ObjectStorageService::type_descriptor(),
        BlockStorage::type_descriptor(),
        ObjectStorage::type_descriptor(),
        FileStorage::type_descriptor(),
        DatabaseStorage::type_descriptor(),
        Account::type_descriptor(),
        ResourceGroup::type_descriptor(),
        SecurityAdvisoryDocument::type_descriptor(),
    ])
});

/// The registered variants. Built on first use, immutable afterwards.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Lookup table over variant descriptors.
#[derive(Debug)]
pub struct Registry {
    descriptors: Vec<&'static ResourceDescriptor>,
    by_name: HashMap<&'static str, &'static ResourceDescriptor>,
}

impl Registry {
    fn new(descriptors: Vec<&'static ResourceDescriptor>) -> Self {
        let by_name = descriptors.iter().map(|d| (d.name, *d)).collect();
        Self {
            descriptors,
            by_name,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'static ResourceDescriptor> {
        self.by_name.get(name).copied()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static ResourceDescriptor> + '_ {
        self.descriptors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Whether the variant `name` is-a `type_name`. False for unknown variants.
    pub fn has_type(&self, name: &str, type_name: &str) -> bool {
        self.get(name).is_some_and(|d| d.has_type(type_name))
    }

    /// Names of all variants whose type chain contains `type_name`.
    pub fn variants_of(&self, type_name: &str) -> Vec<&'static str> {
        self.iter()
            .filter(|d| d.has_type(type_name))
            .map(|d| d.name)
            .collect()
    }
}
