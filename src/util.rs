//! Shared helpers: XML escaping, filename handling, identifier generation.

use std::path::Path;

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Bare filename of a path, directory components stripped.
pub fn bare_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lowercased extension of a path, if any.
pub fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// Generate a fallback book identifier: the local timestamp plus a random
/// suffix. Callers that need reproducible output set an identifier
/// explicitly instead of relying on this.
pub fn generate_identifier() -> String {
    let now = chrono::Local::now();
    let seed = now.timestamp_nanos_opt().unwrap_or(0) as u64;

    // Simple PRNG (not cryptographically secure, but fine for identifiers)
    let state = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    let suffix = (state >> 33) % 1_000_000;

    format!("{}-{}", now.format("%Y-%m-%dT%H:%M:%S%.6f"), suffix)
}
