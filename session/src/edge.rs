//! Request-level redirect rules applied before any page renders.
//!
//! This is a coarse filter: it looks at the path and whether an auth cookie
//! exists, never at whether the token is valid. The `AuthGateway` component
//! does the real verification afterwards.

#[cfg(test)]
#[path = "edge_test.rs"]
mod edge_test;

use crate::routes::{LOGIN_PATH, MISSPELLED_PROTECTED_PREFIX, PROTECTED_PREFIX};

/// What the edge layer does with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeAction {
    /// Answer with a redirect to this location.
    Redirect(String),
    /// Hand the request on unchanged.
    Continue,
}

/// Prefix and destination table for the edge redirector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRules {
    pub misspelled_prefix: String,
    pub corrected_prefix: String,
    pub protected_prefix: String,
    pub login_path: String,
}

impl Default for EdgeRules {
    fn default() -> Self {
        Self {
            misspelled_prefix: MISSPELLED_PROTECTED_PREFIX.to_owned(),
            corrected_prefix: PROTECTED_PREFIX.to_owned(),
            protected_prefix: PROTECTED_PREFIX.to_owned(),
            login_path: LOGIN_PATH.to_owned(),
        }
    }
}

impl EdgeRules {
    /// Apply the rules in order: typo fix, then cookie gate, then pass.
    ///
    /// `query` is re-attached to typo redirects so links keep their parameters.
    #[must_use]
    pub fn route(&self, path: &str, query: Option<&str>, has_token: bool) -> EdgeAction {
        if let Some(rest) = path.strip_prefix(self.misspelled_prefix.as_str()) {
            let mut location = format!("{}{rest}", self.corrected_prefix);
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                location.push('?');
                location.push_str(query);
            }
            return EdgeAction::Redirect(location);
        }

        if path.starts_with(self.protected_prefix.as_str()) && !has_token {
            return EdgeAction::Redirect(self.login_path.clone());
        }

        EdgeAction::Continue
    }
}
