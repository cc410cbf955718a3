//! Context types for rule execution.

/// Context provided to rules for a single document.
///
/// Holds the document identifier and the text resolved for it in the
/// mode the rule asked for (raw source or rendered prose).
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    /// Document identifier, a `/`-separated path relative to the analysis root.
    pub identifier: &'a str,
    /// Checkable text for this document.
    pub text: &'a str,
}

impl<'a> DocumentContext<'a> {
    /// Creates a new document context.
    #[must_use]
    pub fn new(identifier: &'a str, text: &'a str) -> Self {
        Self { identifier, text }
    }

    /// Iterates over lines with their 1-indexed line numbers.
    ///
    /// Lines are split on `\n` only; a trailing `\r` stays part of the line.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        let text = self.text;
        let body = text.strip_suffix('\n').unwrap_or(text);
        let empty = text.is_empty();
        body.split('\n')
            .enumerate()
            .filter(move |_| !empty)
            .map(|(i, line)| (i + 1, line))
    }

    /// Returns the 1-indexed line containing the given byte offset.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        self.text.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}
