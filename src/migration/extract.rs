//! Fenced code block extraction
//!
//! Grammar: an opening fence of three backticks, an optional language tag
//! terminated by a newline, the body, and the next closing fence. Only the
//! first block in the text is considered; the body is trimmed. There is no
//! fallback to unfenced text.

use regex::Regex;
use std::sync::OnceLock;

/// A code block found in completion text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag after the opening fence, if any
    pub language: Option<String>,
    /// Trimmed block contents
    pub code: String,
}

impl CodeBlock {
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"```(?:(?P<lang>[\w+#.\-]*)[ \t]*\r?\n)?(?P<code>[\s\S]*?)```")
            .expect("valid fence regex")
    })
}

/// Returns the first fenced block in `text`, or `None` when there is no
/// closed block with non-blank contents.
pub fn extract_code_block(text: &str) -> Option<CodeBlock> {
    let captures = fence_re().captures(text)?;

    let code = captures.name("code")?.as_str().trim();
    if code.is_empty() {
        return None;
    }

    let language = captures
        .name("lang")
        .map(|m| m.as_str())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    Some(CodeBlock {
        language,
        code: code.to_string(),
    })
}
