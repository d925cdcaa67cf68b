//! Resource path matching.
//!
//! # Responsibilities
//! - Match `<prefix><digits>` against the full request resource
//! - Hand back the captured digit run for ID parsing
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - The whole resource must match; trailing segments or a query string
//!   mean no match
//! - No regex to guarantee O(n) matching

/// Trait for matching a request resource and capturing its ID.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the captured ID text if the resource matches.
    fn capture<'p>(&self, resource: &'p str) -> Option<&'p str>;
}

/// Matches a fixed prefix followed by one or more ASCII digits.
#[derive(Debug, Clone)]
pub struct ResourcePathMatcher {
    prefix: String,
}

impl ResourcePathMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for ResourcePathMatcher {
    fn capture<'p>(&self, resource: &'p str) -> Option<&'p str> {
        let digits = resource.strip_prefix(self.prefix.as_str())?;
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(digits)
        } else {
            None
        }
    }
}
