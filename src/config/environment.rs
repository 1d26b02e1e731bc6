//! Named environments (`[env.<name>]`)
//!
//! Inheritable keys fall back to the top level. Binding sections do not: an
//! environment that needs a binding has to declare it again, and we warn when
//! the top level declares a section the environment leaves out.

use tracing::debug;

use crate::error::{EdgeshipError, EdgeshipResult};

use super::types::{Bindings, ResolvedWorker, WorkerConfig};

/// Apply `env` (if any) to the manifest.
///
/// Returns the resolved Worker and non-fatal warnings.
pub fn resolve_environment(
    config: &WorkerConfig,
    env: Option<&str>,
    file: &str,
) -> EdgeshipResult<(ResolvedWorker, Vec<String>)> {
    let Some(env_name) = env else {
        return Ok((resolve_section(config, config, None), Vec::new()));
    };

    let section = config
        .env
        .get(env_name)
        .ok_or_else(|| EdgeshipError::UnknownEnvironment {
            name: env_name.to_string(),
            file: file.to_string(),
            available: config.env.keys().cloned().collect(),
        })?;

    let mut warnings = Vec::new();
    let declared_here = section.declared_binding_sections();
    for key in config.declared_binding_sections() {
        if !declared_here.contains(&key) {
            warnings.push(format!(
                "\"{key}\" exists at the top level, but not on \"env.{env_name}\".\n\
                 This is not what you probably want, since \"{key}\" is not inherited by environments.\n\
                 Please add \"{key}\" to \"env.{env_name}\"."
            ));
        }
    }
    if !section.env.is_empty() {
        warnings.push(format!(
            "\"env.{env_name}.env\" is ignored: environments cannot be nested."
        ));
    }

    let resolved = resolve_section(config, section, Some(env_name));
    debug!(
        env = env_name,
        script = %resolved.name,
        bindings = resolved.bindings.len(),
        "environment.resolved"
    );
    Ok((resolved, warnings))
}

fn resolve_section(top: &WorkerConfig, section: &WorkerConfig, env: Option<&str>) -> ResolvedWorker {
    let name = match (&section.name, env) {
        (Some(name), _) => name.clone(),
        (None, Some(env)) => top
            .name
            .as_ref()
            .map(|name| format!("{name}-{env}"))
            .unwrap_or_default(),
        (None, None) => String::new(),
    };

    // `route` and `routes` are inherited as a pair.
    let (route, routes) = if section.route.is_some() || section.routes.is_some() {
        (section.route.clone(), section.routes.clone().unwrap_or_default())
    } else {
        (top.route.clone(), top.routes.clone().unwrap_or_default())
    };

    let workers_dev = section
        .workers_dev
        .or(top.workers_dev)
        .unwrap_or(route.is_none() && routes.is_empty());

    ResolvedWorker {
        name,
        environment: env.map(str::to_string),
        account_id: section.account_id.clone().or_else(|| top.account_id.clone()),
        main: section.main.clone().or_else(|| top.main.clone()),
        base_dir: section.base_dir.clone().or_else(|| top.base_dir.clone()),
        compatibility_date: section
            .compatibility_date
            .clone()
            .or_else(|| top.compatibility_date.clone()),
        compatibility_flags: section
            .compatibility_flags
            .clone()
            .or_else(|| top.compatibility_flags.clone())
            .unwrap_or_default(),
        workers_dev,
        route,
        routes,
        crons: section
            .triggers
            .as_ref()
            .or(top.triggers.as_ref())
            .map(|t| t.crons.clone())
            .unwrap_or_default(),
        no_bundle: section.no_bundle.or(top.no_bundle).unwrap_or(false),
        rules: section
            .rules
            .clone()
            .or_else(|| top.rules.clone())
            .unwrap_or_default(),
        bindings: Bindings::from_section(section),
        queue_consumers: section
            .queues
            .as_ref()
            .map(|q| q.consumers.clone())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> WorkerConfig {
        toml::from_str(toml_src).unwrap()
    }

    const MANIFEST: &str = r#"
name = "api"
main = "src/index.js"
compatibility_date = "2024-01-01"
routes = ["api.example.com/*"]

[triggers]
crons = ["0 * * * *"]

[[kv_namespaces]]
binding = "CACHE"
id = "top-cache"

[vars]
MODE = "production"

[env.staging]
workers_dev = true

[[env.staging.kv_namespaces]]
binding = "CACHE"
id = "staging-cache"

[env.preview]
name = "api-preview-custom"
routes = []
"#;

    #[test]
    fn top_level_without_env() {
        let (worker, warnings) = resolve_environment(&parse(MANIFEST), None, "edgeship.toml").unwrap();
        assert_eq!(worker.name, "api");
        assert_eq!(worker.environment, None);
        assert_eq!(worker.routes.len(), 1);
        assert!(!worker.workers_dev, "routes present, workers_dev defaults off");
        assert_eq!(worker.bindings.kv_namespaces[0].id.as_deref(), Some("top-cache"));
        assert_eq!(worker.bindings.vars.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn env_inherits_and_suffixes_name() {
        let (worker, _) =
            resolve_environment(&parse(MANIFEST), Some("staging"), "edgeship.toml").unwrap();
        assert_eq!(worker.name, "api-staging");
        assert_eq!(worker.environment.as_deref(), Some("staging"));
        assert_eq!(worker.main.as_deref(), Some(std::path::Path::new("src/index.js")));
        assert_eq!(worker.compatibility_date.as_deref(), Some("2024-01-01"));
        assert_eq!(worker.crons, vec!["0 * * * *".to_string()]);
        assert!(worker.workers_dev);
        assert_eq!(
            worker.bindings.kv_namespaces[0].id.as_deref(),
            Some("staging-cache")
        );
    }

    #[test]
    fn env_warns_about_missing_binding_sections() {
        let (worker, warnings) =
            resolve_environment(&parse(MANIFEST), Some("staging"), "edgeship.toml").unwrap();
        assert!(worker.bindings.vars.is_empty(), "vars are not inherited");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("\"vars\" exists at the top level, but not on \"env.staging\"."));
    }

    #[test]
    fn env_with_own_name_and_empty_routes() {
        let (worker, _) =
            resolve_environment(&parse(MANIFEST), Some("preview"), "edgeship.toml").unwrap();
        assert_eq!(worker.name, "api-preview-custom");
        assert!(worker.routes.is_empty());
        assert!(worker.workers_dev);
    }

    #[test]
    fn unknown_env_lists_available() {
        let err = resolve_environment(&parse(MANIFEST), Some("prod"), "edgeship.toml").unwrap_err();
        match err {
            EdgeshipError::UnknownEnvironment { name, available, .. } => {
                assert_eq!(name, "prod");
                assert_eq!(available, vec!["staging".to_string(), "preview".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
