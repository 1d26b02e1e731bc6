//! Binding conflict reporter
//!
//! Every binding name must be unique across all sections of the manifest,
//! otherwise the Worker could not tell the bindings apart at runtime.
//! Same-kind and cross-kind collisions are merged into one diagnostic per
//! name, ordered by first appearance.

use crate::domain::entities::BindingDeclaration;
use crate::domain::value_objects::BindingKind;
use crate::error::ConfigValidationError;

use super::binding_collector::{collect_bindings_by_name, BindingsByName};

/// Trailing instruction appended after the per-name lines
pub const UNIQUE_NAMES_RESOLUTION: &str = "Bindings must have unique names, so that they can all be referenced in the worker.\nPlease change your bindings to have unique names.";

/// A binding name claimed by more than one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingConflict {
    pub name: String,
    /// Distinct kinds, first-seen order
    pub kinds: Vec<BindingKind>,
    /// Number of declarations using the name
    pub occurrences: usize,
}

impl BindingConflict {
    /// All declarations share one kind
    pub fn is_same_kind(&self) -> bool {
        self.kinds.len() == 1
    }

    /// Diagnostic line for this conflict
    pub fn message(&self) -> String {
        let claimants = if self.is_same_kind() {
            format!("multiple {}", self.kinds[0].display_name())
        } else {
            let labels: Vec<&str> = self.kinds.iter().map(BindingKind::display_name).collect();
            english_list(&labels)
        };
        format!("{} assigned to {} bindings.", self.name, claimants)
    }
}

/// Join items as an English list: `A`, `A and B`, `A, B, and C`.
pub fn english_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Find every name with more than one declaration.
pub fn find_binding_conflicts(by_name: &BindingsByName) -> Vec<BindingConflict> {
    by_name
        .iter()
        .filter(|(_, kinds)| kinds.len() > 1)
        .map(|(name, kinds)| {
            let mut distinct: Vec<BindingKind> = Vec::with_capacity(kinds.len());
            for kind in kinds {
                if !distinct.contains(kind) {
                    distinct.push(*kind);
                }
            }
            BindingConflict {
                name: name.clone(),
                kinds: distinct,
                occurrences: kinds.len(),
            }
        })
        .collect()
}

/// Diagnostic lines for a set of conflicts, resolution last.
///
/// Returns nothing when there are no conflicts.
pub fn conflict_diagnostics(conflicts: &[BindingConflict]) -> Vec<String> {
    if conflicts.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = conflicts.iter().map(BindingConflict::message).collect();
    lines.push(UNIQUE_NAMES_RESOLUTION.to_string());
    lines
}

/// Fail with one aggregated error if any binding name is reused.
pub fn validate_unique_binding_names(
    declarations: &[BindingDeclaration],
    file: &str,
) -> Result<(), ConfigValidationError> {
    let conflicts = find_binding_conflicts(&collect_bindings_by_name(declarations));
    if conflicts.is_empty() {
        return Ok(());
    }
    Err(ConfigValidationError::new(
        file,
        conflict_diagnostics(&conflicts),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, kind: BindingKind) -> BindingDeclaration {
        BindingDeclaration::new(name, kind)
    }

    fn messages(declarations: &[BindingDeclaration]) -> Vec<String> {
        find_binding_conflicts(&collect_bindings_by_name(declarations))
            .iter()
            .map(BindingConflict::message)
            .collect()
    }

    // === english_list ===

    #[test]
    fn english_list_shapes() {
        assert_eq!(english_list(&[]), "");
        assert_eq!(english_list(&["A"]), "A");
        assert_eq!(english_list(&["A", "B"]), "A and B");
        assert_eq!(english_list(&["A", "B", "C"]), "A, B, and C");
        assert_eq!(english_list(&["A", "B", "C", "D"]), "A, B, C, and D");
    }

    // === conflict messages ===

    #[test]
    fn no_conflicts_for_unique_names() {
        assert!(messages(&[
            decl("CACHE", BindingKind::KvNamespace),
            decl("ASSETS", BindingKind::R2Bucket),
            decl("API_KEY", BindingKind::EnvironmentVariable),
        ])
        .is_empty());
    }

    #[test]
    fn two_kinds_joined_with_and() {
        assert_eq!(
            messages(&[
                decl("X", BindingKind::KvNamespace),
                decl("X", BindingKind::R2Bucket),
            ]),
            vec!["X assigned to KV Namespace and R2 Bucket bindings."]
        );
    }

    #[test]
    fn same_kind_uses_multiple() {
        assert_eq!(
            messages(&[
                decl("COUNTER", BindingKind::DurableObject),
                decl("COUNTER", BindingKind::DurableObject),
            ]),
            vec!["COUNTER assigned to multiple Durable Object bindings."]
        );
    }

    #[test]
    fn three_kinds_use_oxford_comma_in_priority_order() {
        assert_eq!(
            messages(&[
                decl("SHARED", BindingKind::R2Bucket),
                decl("SHARED", BindingKind::EnvironmentVariable),
                decl("SHARED", BindingKind::DurableObject),
            ]),
            vec![
                "SHARED assigned to Durable Object, R2 Bucket, and Environment Variable bindings."
            ]
        );
    }

    #[test]
    fn mixed_conflict_lists_each_kind_once() {
        let conflicts = find_binding_conflicts(&collect_bindings_by_name(&[
            decl("X", BindingKind::KvNamespace),
            decl("X", BindingKind::KvNamespace),
            decl("X", BindingKind::Queue),
        ]));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].occurrences, 3);
        assert_eq!(
            conflicts[0].message(),
            "X assigned to KV Namespace and Queue bindings."
        );
    }

    #[test]
    fn conflicts_reported_in_first_seen_order() {
        assert_eq!(
            messages(&[
                decl("B", BindingKind::KvNamespace),
                decl("A", BindingKind::KvNamespace),
                decl("B", BindingKind::Service),
                decl("A", BindingKind::Queue),
            ]),
            vec![
                "B assigned to KV Namespace and Service bindings.",
                "A assigned to KV Namespace and Queue bindings.",
            ]
        );
    }

    // === aggregated error ===

    #[test]
    fn validate_passes_without_conflicts() {
        let declarations: Vec<BindingDeclaration> = (0..20)
            .map(|i| decl(&format!("BINDING_{i}"), BindingKind::PRIORITY[i % 12]))
            .collect();
        assert!(validate_unique_binding_names(&declarations, "edgeship.toml").is_ok());
    }

    #[test]
    fn validate_puts_resolution_last() {
        let err = validate_unique_binding_names(
            &[
                decl("ONE", BindingKind::KvNamespace),
                decl("ONE", BindingKind::R2Bucket),
                decl("TWO", BindingKind::Service),
                decl("TWO", BindingKind::Service),
            ],
            "edgeship.toml",
        )
        .unwrap_err();

        assert_eq!(err.diagnostics.len(), 3);
        assert_eq!(err.diagnostics[2], UNIQUE_NAMES_RESOLUTION);
    }

    #[test]
    fn validate_error_renders_as_bullets() {
        let err = validate_unique_binding_names(
            &[
                decl("SHARED", BindingKind::KvNamespace),
                decl("SHARED", BindingKind::R2Bucket),
                decl("SHARED", BindingKind::DurableObject),
            ],
            "edgeship.toml",
        )
        .unwrap_err();

        insta::assert_snapshot!(err.to_string(), @r"
Processing edgeship.toml configuration:
  - SHARED assigned to Durable Object, KV Namespace, and R2 Bucket bindings.
  - Bindings must have unique names, so that they can all be referenced in the worker.
    Please change your bindings to have unique names.
");
    }
}
