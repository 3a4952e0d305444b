//! Script identifier allocation

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Names bound by the script preamble
pub const RESERVED_IDENTIFIERS: [&str; 3] = ["admin", "config", "dbId"];

/// Fallback for names that sanitize to nothing
pub const DEFAULT_IDENTIFIER: &str = "index";

static INVALID_IDENTIFIER_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^a-zA-Z_$]|[^0-9a-zA-Z_$]").unwrap());

/// Turn an index name into a script identifier
///
/// Trims the name, replaces an invalid leading character and every other
/// character outside `[0-9A-Za-z_$]` with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let sanitized = INVALID_IDENTIFIER_CHARS.replace_all(name.trim(), "_");
    if sanitized.is_empty() {
        DEFAULT_IDENTIFIER.to_string()
    } else {
        sanitized.into_owned()
    }
}

/// Hands out identifiers unique within one script
#[derive(Debug, Clone)]
pub struct IdentifierAllocator {
    used: HashSet<String>,
}

impl Default for IdentifierAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierAllocator {
    /// Allocator with the preamble names already taken
    pub fn new() -> Self {
        Self {
            used: RESERVED_IDENTIFIERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reserve an identifier for `name`
    ///
    /// Appends `1`, `2`, ... to the sanitized name until it is unused.
    pub fn allocate(&mut self, name: &str) -> String {
        let base = sanitize_identifier(name);
        let mut candidate = base.clone();
        let mut suffix = 0usize;
        while self.used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}{suffix}");
        }
        self.used.insert(candidate.clone());
        candidate
    }

    pub fn is_used(&self, identifier: &str) -> bool {
        self.used.contains(identifier)
    }
}
