//! HTTP verb conventions for application service methods.
//!
//! A method name is mapped to a verb by its leading word. Prefixes are
//! checked in table order and compared ordinally; names matching no prefix
//! are exposed as POST.

use std::fmt;

/// HTTP verb inferred from a method name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Put,
    Delete,
    Post,
    Patch,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Post => "POST",
            HttpVerb::Patch => "PATCH",
        }
    }

    /// Method name prefixes that select this verb
    pub fn prefixes(&self) -> &'static [&'static str] {
        CONVENTIONAL_PREFIXES
            .iter()
            .find(|(verb, _)| verb == self)
            .map(|(_, prefixes)| *prefixes)
            .unwrap_or(&[])
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verb to method-name prefixes, in lookup order
pub const CONVENTIONAL_PREFIXES: &[(HttpVerb, &[&str])] = &[
    (HttpVerb::Get, &["Get"]),
    (HttpVerb::Put, &["Put", "Update"]),
    (HttpVerb::Delete, &["Delete", "Remove"]),
    (HttpVerb::Post, &["Create", "Add", "Insert", "Post"]),
    (HttpVerb::Patch, &["Patch"]),
];

/// Verb used when no prefix matches
pub const DEFAULT_VERB: HttpVerb = HttpVerb::Post;

/// Infer the HTTP verb for a method name
pub fn conventional_verb(method_name: &str) -> HttpVerb {
    CONVENTIONAL_PREFIXES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| method_name.starts_with(p)))
        .map(|(verb, _)| *verb)
        .unwrap_or(DEFAULT_VERB)
}

/// Remove the first of `verb`'s prefixes that `method_name` starts with
pub fn remove_verb_prefix(method_name: &str, verb: HttpVerb) -> &str {
    verb.prefixes()
        .iter()
        .find_map(|p| method_name.strip_prefix(p))
        .unwrap_or(method_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_verb() {
        assert_eq!(conventional_verb("GetListAsync"), HttpVerb::Get);
        assert_eq!(conventional_verb("UpdateAsync"), HttpVerb::Put);
        assert_eq!(conventional_verb("PutAsync"), HttpVerb::Put);
        assert_eq!(conventional_verb("RemoveTagAsync"), HttpVerb::Delete);
        assert_eq!(conventional_verb("InsertManyAsync"), HttpVerb::Post);
        assert_eq!(conventional_verb("PatchAsync"), HttpVerb::Patch);
    }

    #[test]
    fn test_unmatched_name_defaults_to_post() {
        assert_eq!(conventional_verb("PublishAsync"), HttpVerb::Post);
        // ordinal comparison
        assert_eq!(conventional_verb("getAsync"), HttpVerb::Post);
    }

    #[test]
    fn test_remove_verb_prefix() {
        assert_eq!(remove_verb_prefix("GetListAsync", HttpVerb::Get), "ListAsync");
        assert_eq!(remove_verb_prefix("UpdateAsync", HttpVerb::Put), "Async");
        assert_eq!(remove_verb_prefix("PublishAsync", HttpVerb::Post), "PublishAsync");
        assert_eq!(remove_verb_prefix("Get", HttpVerb::Get), "");
    }
}
