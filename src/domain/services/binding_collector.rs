//! Binding collector
//!
//! Flattens every declared binding into one namespace keyed by binding name.

use indexmap::IndexMap;

use crate::domain::entities::BindingDeclaration;
use crate::domain::value_objects::BindingKind;

/// Binding name → kinds claiming it, one entry per declaration.
///
/// Names keep first-seen order, and so do the kinds under each name.
pub type BindingsByName = IndexMap<String, Vec<BindingKind>>;

/// Group declarations by name.
///
/// Declarations are visited in [`BindingKind::PRIORITY`] order; the sort is
/// stable, so declarations of the same kind keep their manifest order.
pub fn collect_bindings_by_name(declarations: &[BindingDeclaration]) -> BindingsByName {
    let mut ordered: Vec<&BindingDeclaration> = declarations.iter().collect();
    ordered.sort_by_key(|declaration| declaration.kind.priority());

    let mut by_name = BindingsByName::new();
    for declaration in ordered {
        by_name
            .entry(declaration.name.clone())
            .or_default()
            .push(declaration.kind);
    }
    by_name
}
