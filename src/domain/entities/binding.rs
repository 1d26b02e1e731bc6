//! Binding declaration entity

use crate::domain::value_objects::BindingKind;

/// A binding name claimed by one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDeclaration {
    pub name: String,
    pub kind: BindingKind,
}

impl BindingDeclaration {
    pub fn new(name: impl Into<String>, kind: BindingKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
