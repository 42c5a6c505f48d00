//! Bank identification code structure.
//!
//! The first 8 characters name the institution (the group key); a trailing
//! `XXX` marks the institution's headquarters entry. Everything else is a
//! branch.

use crate::error::{DirectoryError, DirectoryResult};

pub const HEADQUARTER_SUFFIX: &str = "XXX";
pub const GROUP_KEY_LEN: usize = 8;
/// Longest registrable code (the full branch form).
pub const SWIFT_CODE_MAX_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeClass<'a> {
    pub is_headquarter: bool,
    pub group_key: &'a str,
}

/// Derive role and institution-group key from a code.
///
/// Case-sensitive, no normalization. Returns `None` when the code is too
/// short to carry a group key or is not ASCII.
pub fn classify(code: &str) -> Option<CodeClass<'_>> {
    if !code.is_ascii() || code.len() < GROUP_KEY_LEN {
        return None;
    }
    Some(CodeClass {
        is_headquarter: code.ends_with(HEADQUARTER_SUFFIX),
        group_key: &code[..GROUP_KEY_LEN],
    })
}

/// Registration-boundary check: 8 to 11 ASCII alphanumerics.
pub fn validate_swift_code(code: &str) -> DirectoryResult<()> {
    let len = code.chars().count();
    if !(GROUP_KEY_LEN..=SWIFT_CODE_MAX_LEN).contains(&len) {
        return Err(DirectoryError::validation(
            "swiftCode",
            format!("expected {GROUP_KEY_LEN} to {SWIFT_CODE_MAX_LEN} characters, got {len}"),
        ));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DirectoryError::validation(
            "swiftCode",
            "only ASCII letters and digits are allowed",
        ));
    }
    Ok(())
}
