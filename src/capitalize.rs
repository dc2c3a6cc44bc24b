use std::borrow::Cow;

const CONTEXT_LEN: usize = 8;

/// True when `preceding` is empty or ends with terminal punctuation followed
/// by whitespace.
pub fn ends_sentence(preceding: &str) -> bool {
    if preceding.is_empty() {
        return true;
    }
    if !preceding.ends_with(char::is_whitespace) {
        return false;
    }
    matches!(
        preceding.trim_end().chars().next_back(),
        Some('.' | '!' | '?')
    )
}

pub fn maybe_capitalize<'a>(text: &'a str, preceding: &str) -> Cow<'a, str> {
    if !ends_sentence(preceding) {
        return Cow::Borrowed(text);
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_lowercase() => Cow::Owned(c.to_uppercase().chain(chars).collect()),
        _ => Cow::Borrowed(text),
    }
}

/// Tail of what the engine has committed, enough to see a sentence end.
#[derive(Debug, Clone)]
pub struct CommitContext {
    tail: String,
    /// Cleared when the cursor may have moved without us seeing it; set
    /// again once new text is committed.
    known: bool,
}

impl Default for CommitContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitContext {
    pub fn new() -> Self {
        Self {
            tail: String::new(),
            known: true,
        }
    }

    pub fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.tail.push_str(s);
        self.known = true;
        let extra = self.tail.chars().count().saturating_sub(CONTEXT_LEN);
        if extra > 0 {
            let cut = self
                .tail
                .char_indices()
                .nth(extra)
                .map_or(self.tail.len(), |(i, _)| i);
            self.tail.drain(..cut);
        }
    }

    pub fn pop(&mut self) {
        self.tail.pop();
    }

    pub fn forget(&mut self) {
        self.tail.clear();
        self.known = false;
    }

    pub fn capitalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.known {
            maybe_capitalize(text, &self.tail)
        } else {
            Cow::Borrowed(text)
        }
    }
}
