//! Property tests for binding name collection and conflict reporting.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use edgeship::domain::entities::BindingDeclaration;
use edgeship::{
    collect_bindings_by_name, find_binding_conflicts, validate_unique_binding_names, BindingKind,
};

fn any_kind() -> impl Strategy<Value = BindingKind> {
    proptest::sample::select(BindingKind::PRIORITY.to_vec())
}

fn binding_name() -> impl Strategy<Value = String> {
    // A small alphabet makes collisions common.
    proptest::string::string_regex("[A-D]{1,2}").unwrap()
}

fn declarations() -> impl Strategy<Value = Vec<BindingDeclaration>> {
    proptest::collection::vec(
        (binding_name(), any_kind()).prop_map(|(name, kind)| BindingDeclaration::new(name, kind)),
        0..=16,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every declaration lands under its name, nothing is dropped.
    #[test]
    fn property_collector_keeps_every_declaration(decls in declarations()) {
        let by_name = collect_bindings_by_name(&decls);

        let total: usize = by_name.values().map(Vec::len).sum();
        prop_assert_eq!(total, decls.len());
        for kinds in by_name.values() {
            let priorities: Vec<usize> = kinds.iter().map(BindingKind::priority).collect();
            let mut sorted = priorities.clone();
            sorted.sort();
            prop_assert_eq!(priorities, sorted);
        }
    }

    /// PROPERTY: One conflict per name declared more than once.
    #[test]
    fn property_one_conflict_per_shared_name(decls in declarations()) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for d in &decls {
            *counts.entry(d.name.as_str()).or_default() += 1;
        }
        let shared: HashSet<&str> = counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(name, _)| *name)
            .collect();

        let conflicts = find_binding_conflicts(&collect_bindings_by_name(&decls));

        prop_assert_eq!(conflicts.len(), shared.len());
        for conflict in &conflicts {
            prop_assert!(shared.contains(conflict.name.as_str()));
            prop_assert_eq!(conflict.occurrences, counts[conflict.name.as_str()]);
        }
    }

    /// PROPERTY: Unique names always validate.
    #[test]
    fn property_unique_names_validate(
        names in proptest::collection::hash_set("[A-Z_]{1,8}", 0..=12),
        kinds in proptest::collection::vec(any_kind(), 12),
    ) {
        let decls: Vec<BindingDeclaration> = names
            .into_iter()
            .zip(kinds)
            .map(|(name, kind)| BindingDeclaration::new(name, kind))
            .collect();

        prop_assert!(validate_unique_binding_names(&decls, "edgeship.toml").is_ok());
    }

    /// PROPERTY: Same-kind duplicates say "multiple", mixed ones list kinds.
    #[test]
    fn property_message_wording_follows_kind_count(decls in declarations()) {
        let conflicts = find_binding_conflicts(&collect_bindings_by_name(&decls));

        for conflict in conflicts {
            let message = conflict.message();
            let expected_prefix = format!("{} assigned to ", conflict.name);
            prop_assert!(message.starts_with(&expected_prefix));
            prop_assert!(message.ends_with(" bindings."));
            prop_assert_eq!(message.contains(" multiple "), conflict.kinds.len() == 1);
            for kind in &conflict.kinds {
                prop_assert!(message.contains(kind.display_name()));
            }
        }
    }

    /// PROPERTY: Failed validation ends with the resolution hint.
    #[test]
    fn property_validation_error_lists_conflicts_then_hint(decls in declarations()) {
        let conflicts = find_binding_conflicts(&collect_bindings_by_name(&decls));

        match validate_unique_binding_names(&decls, "edgeship.toml") {
            Ok(()) => prop_assert!(conflicts.is_empty()),
            Err(err) => {
                prop_assert_eq!(err.diagnostics.len(), conflicts.len() + 1);
                prop_assert!(err
                    .diagnostics
                    .last()
                    .is_some_and(|hint| hint.starts_with("Bindings must have unique names")));
            }
        }
    }
}
