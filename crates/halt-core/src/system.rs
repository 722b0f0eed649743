use std::sync::OnceLock;

static LOCAL_NODE: OnceLock<String> = OnceLock::new();

const FALLBACK_NAME: &str = "local";

/// Name of the node hosting this process.
///
/// Resolved once from the host name; falls back to `"local"` when the host name is unavailable or not UTF-8.
pub fn local_node_name() -> &'static str {
    LOCAL_NODE.get_or_init(|| {
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    })
}
