//! Blacklist section - checks if password is in common password list.

use crate::blacklist::DenyList;
use secrecy::{ExposeSecret, SecretString};

pub const COMMON_PENALTY: i32 = -30;

/// Returns `true` if the password exactly matches a deny-list entry, ignoring case.
pub fn blacklist_section(password: &SecretString, deny_list: &DenyList) -> bool {
    deny_list.contains(password.expose_secret())
}
