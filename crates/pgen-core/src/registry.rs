use std::collections::BTreeMap;

use crate::model::Enumeration;
use crate::types::DataType;

/// Resolves schema type tokens, including references to declared enumerations.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enums: BTreeMap<String, Vec<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an enumeration resolvable by name.
    pub fn register(&mut self, enumeration: &Enumeration) {
        self.enums
            .insert(enumeration.name.clone(), enumeration.values.clone());
    }

    /// Resolve a type token. Built-in tokens take precedence over enumerations.
    pub fn resolve(&self, token: &str) -> Option<DataType> {
        DataType::from_token(token).or_else(|| {
            self.enums
                .contains_key(token)
                .then(|| DataType::Enum(token.to_string()))
        })
    }

    /// Returns true when `label` is one of the values of enumeration `name`.
    pub fn has_label(&self, name: &str, label: &str) -> bool {
        self.enums
            .get(name)
            .is_some_and(|values| values.iter().any(|value| value == label))
    }
}
