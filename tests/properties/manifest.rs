//! Property tests for manifest parsing and binding validation.

use std::collections::BTreeSet;
use std::path::Path;

use proptest::prelude::*;

use edgeship::config::{parse_with_warnings, resolve_environment};
use edgeship::validate_unique_binding_names;

fn binding_names() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set("[A-F]{1,2}", 0..=5)
}

fn manifest(kv: &BTreeSet<String>, vars: &BTreeSet<String>) -> String {
    let mut out = String::from("name = \"api\"\nmain = \"src/index.js\"\n");
    for (i, name) in kv.iter().enumerate() {
        out.push_str(&format!("\n[[kv_namespaces]]\nbinding = \"{name}\"\nid = \"ns-{i}\"\n"));
    }
    if !vars.is_empty() {
        out.push_str("\n[vars]\n");
        for name in vars {
            out.push_str(&format!("{name} = \"value\"\n"));
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(content in "\\PC{0,200}") {
        let _ = parse_with_warnings(&content, Path::new("edgeship.toml"));
    }

    /// PROPERTY: A KV namespace and a var collide exactly when they share a name.
    #[test]
    fn property_kv_and_vars_collide_on_shared_names(
        kv in binding_names(),
        vars in binding_names(),
    ) {
        let (config, _) = parse_with_warnings(&manifest(&kv, &vars), Path::new("edgeship.toml"))
            .expect("generated manifest parses");
        let (worker, _) = resolve_environment(&config, None, "edgeship.toml")
            .expect("no environment requested");

        let shared: Vec<&String> = kv.intersection(&vars).collect();
        match validate_unique_binding_names(&worker.bindings.declarations(), "edgeship.toml") {
            Ok(()) => prop_assert!(shared.is_empty()),
            Err(err) => {
                prop_assert_eq!(err.diagnostics.len(), shared.len() + 1);
                for (line, name) in err.diagnostics.iter().zip(&shared) {
                    prop_assert_eq!(
                        line,
                        &format!("{name} assigned to KV Namespace and Environment Variable bindings.")
                    );
                }
            }
        }
    }
}
