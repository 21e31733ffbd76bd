//! Input abstraction for different sources

/// A borrowed document source, optionally tagged with the file it came
/// from for error reporting.
#[derive(Clone, Copy, Debug)]
pub struct Input<'a> {
    source: &'a str,
    filename: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create from string
    pub const fn from_str(source: &'a str) -> Self {
        Self {
            source,
            filename: None,
        }
    }

    /// Set filename for error reporting
    pub const fn with_filename(mut self, filename: &'a str) -> Self {
        self.filename = Some(filename);
        self
    }

    /// Get source text
    pub const fn text(&self) -> &str {
        self.source
    }

    /// Get filename if set
    pub const fn filename(&self) -> Option<&str> {
        self.filename
    }

    /// Get length in bytes
    pub const fn len(&self) -> usize {
        self.source.len()
    }

    /// Check if empty
    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Self::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_from_str() {
        let input = Input::from_str("hello");
        assert_eq!(input.len(), 5);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_input_with_filename() {
        let input = Input::from_str("<a/>").with_filename("a.xml");
        assert_eq!(input.filename(), Some("a.xml"));
        assert_eq!(input.text(), "<a/>");
    }

    #[test]
    fn test_empty_input() {
        let input = Input::from_str("");
        assert!(input.is_empty());
        assert_eq!(input.len(), 0);
    }

    #[test]
    fn test_input_from_str_trait() {
        let input: Input = "hello".into();
        assert_eq!(input.len(), 5);
    }
}
