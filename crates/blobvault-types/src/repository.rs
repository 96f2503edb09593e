//! Repository name validation.
//!
//! Valid repository names:
//! - Must be non-empty and at most 255 characters overall
//! - Are `/`-separated paths of non-empty components
//! - Components contain only lowercase `[a-z0-9]` and the separators
//!   `.`, `_`, `-`
//! - Components start and end with `[a-z0-9]`
//! - A run of separators must be exactly `.`, `_`, `__`, or dashes only
//!   (so `a__b` and `a--b` are valid while `a..b` and `a._b` are not)

use crate::error::NameError;

/// Maximum overall length of a repository name.
pub const REPOSITORY_NAME_MAX_LEN: usize = 255;

fn is_name_char(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

fn is_separator(b: u8) -> bool {
    matches!(b, b'.' | b'_' | b'-')
}

/// Validate a repository name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use blobvault_types::validate_repository_name;
///
/// assert!(validate_repository_name("library/ubuntu").is_ok());
/// assert!(validate_repository_name("a/b/c").is_ok());
/// assert!(validate_repository_name("").is_err());
/// assert!(validate_repository_name("Library/Ubuntu").is_err());
/// ```
pub fn validate_repository_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::new(name, "repository name must not be empty"));
    }
    if name.len() > REPOSITORY_NAME_MAX_LEN {
        return Err(NameError::new(
            name,
            format!("repository name must be at most {REPOSITORY_NAME_MAX_LEN} characters"),
        ));
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(NameError::new(name, "path components must not be empty"));
        }
        validate_component(name, component)?;
    }

    Ok(())
}

fn validate_component(name: &str, component: &str) -> Result<(), NameError> {
    let bytes = component.as_bytes();

    if !is_name_char(bytes[0]) || !is_name_char(bytes[bytes.len() - 1]) {
        return Err(NameError::new(
            name,
            format!("component must start and end with [a-z0-9]: {component:?}"),
        ));
    }

    let mut i = 0;
    while i < bytes.len() {
        if is_name_char(bytes[i]) {
            i += 1;
            continue;
        }
        if !is_separator(bytes[i]) {
            return Err(NameError::new(
                name,
                format!(
                    "component contains forbidden character {:?}: {component:?}",
                    bytes[i] as char
                ),
            ));
        }

        let start = i;
        while i < bytes.len() && is_separator(bytes[i]) {
            i += 1;
        }
        let run = &component[start..i];
        let run_ok = run == "." || run == "_" || run == "__" || run.bytes().all(|b| b == b'-');
        if !run_ok {
            return Err(NameError::new(
                name,
                format!("invalid separator sequence {run:?} in component {component:?}"),
            ));
        }
    }

    Ok(())
}
