//! Reusable manifest and source content

pub const WORKER_SOURCE: &str = "export default {\n  async fetch(request, env) {\n    return new Response(\"ok\");\n  },\n};\n";

/// A Worker with one binding of several kinds and no conflicts
pub const VALID_MANIFEST: &str = r#"
name = "api"
main = "src/index.js"
compatibility_date = "2024-01-01"

[[kv_namespaces]]
binding = "CACHE"
id = "ns-1"

[[r2_buckets]]
binding = "ASSETS"
bucket_name = "assets"

[vars]
MODE = "production"
RETRIES = 3

[[services]]
binding = "AUTH"
service = "auth-worker"
"#;

/// `X` shared by a KV namespace and an R2 bucket, `Y` by two KV namespaces
pub const CONFLICTING_MANIFEST: &str = r#"
name = "api"
main = "src/index.js"
compatibility_date = "2024-01-01"

[[kv_namespaces]]
binding = "X"
id = "1"

[[r2_buckets]]
binding = "X"
bucket_name = "b"

[[kv_namespaces]]
binding = "Y"
id = "2"

[[kv_namespaces]]
binding = "Y"
id = "3"
"#;
