//! Symbol tokens.

/// An interned symbolic name.
///
/// A token carries its resolved text when the text is known, and the symbol
/// id it was interned under when it came from a symbol table. A token with no
/// text cannot be resolved to a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolToken<'a> {
    /// Resolved text, if known.
    pub text: Option<&'a str>,
    /// Symbol id, if the token came from a symbol table.
    pub sid: Option<usize>,
}

impl<'a> SymbolToken<'a> {
    /// Creates a token from its text and symbol id.
    #[inline]
    pub const fn new(text: Option<&'a str>, sid: Option<usize>) -> Self {
        Self { text, sid }
    }

    /// Creates a token with known text and no symbol id.
    #[inline]
    pub const fn from_text(text: &'a str) -> Self {
        Self {
            text: Some(text),
            sid: None,
        }
    }

    /// Creates a token whose text is unknown.
    #[inline]
    pub const fn from_sid(sid: usize) -> Self {
        Self {
            text: None,
            sid: Some(sid),
        }
    }

    /// Returns true if the token's text is known.
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        self.text.is_some()
    }
}

impl std::fmt::Display for SymbolToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.text, self.sid) {
            (Some(text), _) => f.write_str(text),
            (None, Some(sid)) => write!(f, "${}", sid),
            (None, None) => f.write_str("$0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_is_resolved() {
        let token = SymbolToken::from_text("name");
        assert!(token.is_resolved());
        assert_eq!(token.to_string(), "name");
    }

    #[test]
    fn test_from_sid_is_unresolved() {
        let token = SymbolToken::from_sid(12);
        assert!(!token.is_resolved());
        assert_eq!(token.to_string(), "$12");
    }
}
