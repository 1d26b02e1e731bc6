//! Worker bundle entity
//!
//! What the bundler hands to the payload builder: the entry module, the
//! script format it was detected as, and every additional module that has to
//! travel with it.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentHash;

/// How the platform should load the entry module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptFormat {
    /// `export default { fetch() {} }`
    Modules,
    /// `addEventListener("fetch", ...)`
    ServiceWorker,
}

impl ScriptFormat {
    /// Detect the format of an entry module from its source
    pub fn detect(source: &str) -> Self {
        if source.contains("export default") || source.contains("export {") {
            ScriptFormat::Modules
        } else {
            ScriptFormat::ServiceWorker
        }
    }
}

/// Module type, mirroring the `type` of a `[[rules]]` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    #[serde(rename = "ESModule")]
    EsModule,
    #[serde(rename = "CommonJS")]
    CommonJs,
    Text,
    Data,
    CompiledWasm,
}

impl ModuleKind {
    /// Content type of the multipart part carrying this module
    pub fn content_type(&self) -> &'static str {
        match self {
            ModuleKind::EsModule => "application/javascript+module",
            ModuleKind::CommonJs => "application/javascript",
            ModuleKind::Text => "text/plain",
            ModuleKind::Data => "application/octet-stream",
            ModuleKind::CompiledWasm => "application/wasm",
        }
    }
}

/// `[[rules]]` entry: which files become modules of which kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRule {
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    pub globs: Vec<String>,
    /// Let later rules of the same kind still apply
    #[serde(default)]
    pub fallthrough: bool,
}

impl ModuleRule {
    pub fn new(kind: ModuleKind, globs: &[&str]) -> Self {
        Self {
            kind,
            globs: globs.iter().map(|g| g.to_string()).collect(),
            fallthrough: false,
        }
    }

    /// JavaScript rules appended after user rules for `no_bundle` uploads
    pub fn defaults() -> Vec<ModuleRule> {
        vec![
            ModuleRule::new(ModuleKind::EsModule, &["**/*.js", "**/*.mjs"]),
            ModuleRule::new(ModuleKind::CommonJs, &["**/*.cjs"]),
        ]
    }
}

/// A single file uploaded alongside the script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Name the script imports it by (path relative to the base dir)
    pub name: String,
    pub kind: ModuleKind,
    #[serde(skip)]
    pub content: Vec<u8>,
    pub hash: ContentHash,
}

impl Module {
    pub fn new(name: impl Into<String>, kind: ModuleKind, content: Vec<u8>) -> Self {
        let hash = ContentHash::from_bytes(&content);
        Self {
            name: name.into(),
            kind,
            content,
            hash,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Output of a bundler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerBundle {
    pub entry: Module,
    pub format: ScriptFormat,
    pub modules: Vec<Module>,
}

impl WorkerBundle {
    /// Entry plus additional modules, in upload order
    pub fn all_modules(&self) -> impl Iterator<Item = &Module> {
        std::iter::once(&self.entry).chain(self.modules.iter())
    }

    /// Total bytes uploaded for code modules
    pub fn total_size(&self) -> usize {
        self.all_modules().map(Module::size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_modules_format() {
        let source = "export default {\n  fetch() { return new Response('ok') }\n}\n";
        assert_eq!(ScriptFormat::detect(source), ScriptFormat::Modules);
    }

    #[test]
    fn detects_service_worker_format() {
        let source = "addEventListener('fetch', (event) => event.respondWith(handle(event)));";
        assert_eq!(ScriptFormat::detect(source), ScriptFormat::ServiceWorker);
    }

    #[test]
    fn bundle_size_counts_every_module() {
        let bundle = WorkerBundle {
            entry: Module::new("index.js", ModuleKind::EsModule, b"12345".to_vec()),
            format: ScriptFormat::Modules,
            modules: vec![Module::new("data.txt", ModuleKind::Text, b"abc".to_vec())],
        };
        assert_eq!(bundle.total_size(), 8);
        assert_eq!(bundle.all_modules().count(), 2);
    }

    #[test]
    fn module_kind_serde_uses_rule_names() {
        let kind: ModuleKind = serde_json::from_str("\"ESModule\"").unwrap();
        assert_eq!(kind, ModuleKind::EsModule);
        let kind: ModuleKind = serde_json::from_str("\"CompiledWasm\"").unwrap();
        assert_eq!(kind, ModuleKind::CompiledWasm);
    }
}
