//! Network URL constants for the EZCA SDK.

/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://portal.ezca.io/";

/// Audience claim of every certificate-signed assertion.
pub const ASSERTION_AUDIENCE: &str = "https://ezca.io";

/// Scope requested from the ambient credential for bearer tokens.
pub const MANAGEMENT_SCOPE: &str = "https://management.core.windows.net/.default";

/// Normalize a portal base URL: trailing `/` trimmed, scheme forced to `https`.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("https://") {
        format!("https://{}", &trimmed["https://".len()..])
    } else if lower.starts_with("http://") {
        format!("https://{}", &trimmed["http://".len()..])
    } else {
        format!("https://{}", trimmed)
    }
}
