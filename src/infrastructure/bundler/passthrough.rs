//! Passthrough bundler
//!
//! Uploads the entry module unchanged. Additional modules are collected from
//! `base_dir` by module rules:
//! - user `[[rules]]` always apply, in declaration order
//! - the default JavaScript rules are appended only for `no_bundle`
//! - a rule without `fallthrough` shadows later rules of the same type
//!
//! The walk respects `.gitignore` and skips hidden files.

use std::fs;
use std::path::{Component, Path};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::domain::entities::{Module, ModuleKind, ModuleRule, ScriptFormat, WorkerBundle};
use crate::domain::ports::{BundleError, BundleRequest, Bundler};

/// Bundler that performs no transformation
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughBundler;

impl PassthroughBundler {
    pub fn new() -> Self {
        Self
    }
}

struct CompiledRule {
    kind: ModuleKind,
    globs: GlobSet,
}

impl Bundler for PassthroughBundler {
    fn bundle(&self, request: &BundleRequest) -> Result<WorkerBundle, BundleError> {
        if !request.entry.is_file() {
            return Err(BundleError::EntryNotFound {
                path: request.entry.clone(),
            });
        }
        let entry_rel = request.entry.strip_prefix(&request.base_dir).map_err(|_| {
            BundleError::EntryOutsideBaseDir {
                entry: request.entry.clone(),
                base_dir: request.base_dir.clone(),
            }
        })?;

        let content = read(&request.entry)?;
        let format = ScriptFormat::detect(&String::from_utf8_lossy(&content));
        let entry_kind = match format {
            ScriptFormat::Modules => ModuleKind::EsModule,
            ScriptFormat::ServiceWorker => ModuleKind::CommonJs,
        };
        let entry = Module::new(module_name(entry_rel), entry_kind, content);

        let mut rules = request.rules.clone();
        if request.no_bundle {
            rules.extend(ModuleRule::defaults());
        }
        let compiled = compile_rules(&rules)?;

        let mut modules = Vec::new();
        if !compiled.is_empty() {
            let walker = WalkBuilder::new(&request.base_dir)
                .hidden(true)
                .git_ignore(true)
                .git_global(false)
                .git_exclude(true)
                .require_git(false)
                .build();

            for item in walker {
                let item = item.map_err(|e| BundleError::Walk {
                    path: request.base_dir.clone(),
                    message: e.to_string(),
                })?;
                let path = item.path();
                if !item.file_type().is_some_and(|t| t.is_file()) || path == request.entry {
                    continue;
                }
                let Ok(rel) = path.strip_prefix(&request.base_dir) else {
                    continue;
                };
                let Some(rule) = compiled.iter().find(|r| r.globs.is_match(rel)) else {
                    continue;
                };
                modules.push(Module::new(module_name(rel), rule.kind, read(path)?));
            }
        }
        modules.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            entry = %entry.name,
            format = ?format,
            modules = modules.len(),
            "bundle.collected"
        );
        Ok(WorkerBundle {
            entry,
            format,
            modules,
        })
    }
}

/// Compile rules in order, dropping rules shadowed by an earlier rule of the
/// same type that does not fall through.
fn compile_rules(rules: &[ModuleRule]) -> Result<Vec<CompiledRule>, BundleError> {
    let mut closed: Vec<ModuleKind> = Vec::new();
    let mut compiled = Vec::with_capacity(rules.len());

    for rule in rules {
        if closed.contains(&rule.kind) {
            warn!(
                kind = ?rule.kind,
                globs = ?rule.globs,
                "module rule ignored: an earlier rule of the same type has no fallthrough"
            );
            continue;
        }
        if !rule.fallthrough {
            closed.push(rule.kind);
        }

        let mut builder = GlobSetBuilder::new();
        for glob in &rule.globs {
            let glob = Glob::new(glob).map_err(|e| BundleError::InvalidGlob {
                glob: glob.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| BundleError::InvalidGlob {
            glob: rule.globs.join(", "),
            message: e.to_string(),
        })?;
        compiled.push(CompiledRule {
            kind: rule.kind,
            globs,
        });
    }
    Ok(compiled)
}

fn read(path: &Path) -> Result<Vec<u8>, BundleError> {
    fs::read(path).map_err(|source| BundleError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Module names always use `/`, whatever the platform
fn module_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
