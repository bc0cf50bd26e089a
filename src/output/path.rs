//! Filesystem naming for persisted documents.
//!
//! Account display names come from the upstream API and may contain path
//! separators or parent-directory references; every component that reaches
//! the filesystem goes through sanitization first.

use crate::AdAccount;

/// Sanitize one path component for filesystem safety.
///
/// Replaces `/`, `\`, `:` with `_` and `..` with `__` so an upstream name
/// can never escape the output directory. Case is preserved.
pub fn sanitize_component(name: &str) -> String {
    name.replace("..", "__").replace(['/', '\\', ':'], "_")
}

/// Directory name holding one account's documents:
/// `{account_id}_{sanitized display name}`.
pub fn account_dir_name(account: &AdAccount) -> String {
    format!(
        "{}_{}",
        account.account_id,
        sanitize_component(&account.name)
    )
}
