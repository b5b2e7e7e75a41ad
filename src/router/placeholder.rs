use crate::error::DispatchError;
use crate::table::PlaceholderDecl;
use regex::Regex;

/// Token for an alphanumeric segment (`-`, `_` and `.` allowed)
pub const STRING_TOKEN: &str = "(:string)";
/// Token for an all-digit segment
pub const INT_TOKEN: &str = "(:int)";

/// Ordered table of placeholder tokens and the regex fragment each stands for.
///
/// Fragments must not open capture groups of their own: the compiler wraps
/// every placeholder in exactly one group so group numbers line up with the
/// placeholders' order in the pattern.
#[derive(Debug, Clone)]
pub struct PlaceholderTable {
    entries: Vec<(String, String)>,
}

impl Default for PlaceholderTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (STRING_TOKEN.to_string(), r"[a-zA-Z0-9_.\-]+".to_string()),
                (INT_TOKEN.to_string(), "[0-9]+".to_string()),
            ],
        }
    }
}

impl PlaceholderTable {
    /// Add a token, or replace the fragment of an existing one.
    pub fn insert(&mut self, token: &str, fragment: &str) -> Result<(), DispatchError> {
        let groups = Regex::new(fragment)
            .map_err(|e| DispatchError::InvalidPattern {
                pattern: token.to_string(),
                reason: format!("placeholder regex does not compile: {e}"),
            })?
            .captures_len();
        if groups > 1 {
            return Err(DispatchError::InvalidPattern {
                pattern: token.to_string(),
                reason: "placeholder regex must not contain capture groups".to_string(),
            });
        }

        match self.entries.iter_mut().find(|(t, _)| t == token) {
            Some(entry) => entry.1 = fragment.to_string(),
            None => self.entries.push((token.to_string(), fragment.to_string())),
        }
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, token: &str, fragment: &str) -> Result<Self, DispatchError> {
        self.insert(token, fragment)?;
        Ok(self)
    }

    /// Default table extended with the placeholders declared in a route file.
    pub fn with_declared(decls: &[PlaceholderDecl]) -> Result<Self, DispatchError> {
        let mut table = Self::default();
        for decl in decls {
            table.insert(&decl.token, &decl.regex)?;
        }
        Ok(table)
    }

    /// Regex fragment for a segment, if the segment is exactly a known token.
    #[must_use]
    pub fn fragment(&self, segment: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(token, _)| token == segment)
            .map(|(_, fragment)| fragment.as_str())
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }
}
