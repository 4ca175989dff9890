//! Email normalization.

/// Canonicalizes an email address for storage and lookup.
///
/// Surrounding whitespace is trimmed and the whole address is lower-cased,
/// so the stored value doubles as the comparison key. Lowering only the
/// domain would admit duplicate accounts differing in local-part case.
/// Idempotent.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
