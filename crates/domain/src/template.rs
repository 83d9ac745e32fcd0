//! Message template compilation.
//!
//! A template is literal text with named placeholders in `{name}` form. The
//! enclosed text is taken verbatim: it is both the structured key and the
//! positional substitution slot. Braces never nest and are never escaped.

use crate::value::LogValue;
use logmsg_shared::{ErrorCode, ErrorEnvelope};
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::ops::Range;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// Reserved key of the synthetic pair holding the unsubstituted template.
pub const ORIGINAL_FORMAT_KEY: &str = "{OriginalFormat}";

/// Template compilation and binding failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` was never closed.
    UnclosedPlaceholder {
        /// Byte offset of the opening brace.
        position: usize,
    },
    /// A `}` appeared outside a placeholder.
    UnopenedPlaceholder {
        /// Byte offset of the closing brace.
        position: usize,
    },
    /// A `{` appeared inside a placeholder.
    NestedPlaceholder {
        /// Byte offset of the nested opening brace.
        position: usize,
    },
    /// `{}` with no name.
    EmptyPlaceholder {
        /// Byte offset of the opening brace.
        position: usize,
    },
    /// Declared argument count differs from the placeholder count.
    ArityMismatch {
        /// Template text as authored.
        template: Box<str>,
        /// Number of positional arguments declared by the definition.
        expected: usize,
        /// Number of placeholders found in the template.
        found: usize,
    },
}

impl TemplateError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnclosedPlaceholder { .. }
            | Self::UnopenedPlaceholder { .. }
            | Self::NestedPlaceholder { .. } => ErrorCode::new("template", "unbalanced_braces"),
            Self::EmptyPlaceholder { .. } => ErrorCode::new("template", "empty_placeholder"),
            Self::ArityMismatch { .. } => ErrorCode::new("template", "arity_mismatch"),
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedPlaceholder { position } => {
                write!(formatter, "placeholder opened at {position} is never closed")
            },
            Self::UnopenedPlaceholder { position } => {
                write!(formatter, "closing brace at {position} has no matching '{{'")
            },
            Self::NestedPlaceholder { position } => {
                write!(formatter, "nested '{{' at {position} inside a placeholder")
            },
            Self::EmptyPlaceholder { position } => {
                write!(formatter, "placeholder at {position} has no name")
            },
            Self::ArityMismatch {
                template,
                expected,
                found,
            } => write!(
                formatter,
                "template \"{template}\" has {found} placeholder(s) but {expected} argument(s) were declared"
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<TemplateError> for ErrorEnvelope {
    fn from(error: TemplateError) -> Self {
        let code = error.error_code();
        let message = error.to_string();

        match error {
            TemplateError::UnclosedPlaceholder { position }
            | TemplateError::UnopenedPlaceholder { position }
            | TemplateError::NestedPlaceholder { position }
            | TemplateError::EmptyPlaceholder { position } => {
                Self::expected(code, message).with_metadata("position", position.to_string())
            },
            TemplateError::ArityMismatch {
                template,
                expected,
                found,
            } => Self::invariant(code, message)
                .with_metadata("template", template)
                .with_metadata("expected", expected.to_string())
                .with_metadata("found", found.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(Range<usize>),
    Hole(usize),
}

/// A compiled template: original text, placeholder names, and substitution plan.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    text: Box<str>,
    names: Vec<Box<str>>,
    segments: Vec<Segment>,
    original: LogValue,
}

impl MessageTemplate {
    /// Compile `text`, scanning left to right for `{name}` placeholders.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut names = Vec::new();
        let mut segments = Vec::new();
        let mut open: Option<usize> = None;
        let mut literal_start = 0;

        for (index, byte) in text.bytes().enumerate() {
            match (byte, open) {
                (b'{', Some(_)) => return Err(TemplateError::NestedPlaceholder { position: index }),
                (b'{', None) => {
                    if literal_start < index {
                        segments.push(Segment::Literal(literal_start..index));
                    }
                    open = Some(index);
                },
                (b'}', None) => {
                    return Err(TemplateError::UnopenedPlaceholder { position: index });
                },
                (b'}', Some(start)) => {
                    let name = text.get(start + 1..index).unwrap_or_default();
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder { position: start });
                    }
                    segments.push(Segment::Hole(names.len()));
                    names.push(Box::from(name));
                    open = None;
                    literal_start = index + 1;
                },
                _ => {},
            }
        }

        if let Some(start) = open {
            return Err(TemplateError::UnclosedPlaceholder { position: start });
        }
        if literal_start < text.len() {
            segments.push(Segment::Literal(literal_start..text.len()));
        }

        Ok(Self {
            text: text.into(),
            names,
            segments,
            original: LogValue::Str(text.into()),
        })
    }

    /// Compile through the process-wide [`TemplateCache`].
    ///
    /// Entries are never evicted; intern fixed definition templates only and
    /// use [`MessageTemplate::parse`] for text built at runtime.
    pub fn cached(text: &str) -> Result<Arc<Self>, TemplateError> {
        TemplateCache::global().get_or_compile(text)
    }

    /// Template text exactly as authored.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder names in declaration order; duplicates are preserved.
    #[must_use]
    pub fn names(&self) -> &[Box<str>] {
        &self.names
    }

    /// Placeholder name at a position.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(AsRef::as_ref)
    }

    /// Number of placeholders.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.names.len()
    }

    /// Fail unless the template has exactly `expected` placeholders.
    pub fn ensure_arity(&self, expected: usize) -> Result<(), TemplateError> {
        if self.arity() == expected {
            Ok(())
        } else {
            Err(TemplateError::ArityMismatch {
                template: self.text.clone(),
                expected,
                found: self.arity(),
            })
        }
    }

    /// The `{OriginalFormat}` payload.
    #[must_use]
    pub const fn original_value(&self) -> &LogValue {
        &self.original
    }

    /// Substitute `values` positionally into the template.
    ///
    /// A placeholder without a value is left as its `{name}` token.
    #[must_use]
    pub fn render(&self, values: &[LogValue]) -> String {
        let mut out = String::with_capacity(self.text.len() + values.len() * 8);
        for segment in &self.segments {
            match segment {
                Segment::Literal(range) => {
                    out.push_str(self.text.get(range.clone()).unwrap_or_default());
                },
                Segment::Hole(index) => match values.get(*index) {
                    Some(value) => {
                        let _ = write!(out, "{value}");
                    },
                    None => {
                        out.push('{');
                        out.push_str(self.name(*index).unwrap_or_default());
                        out.push('}');
                    },
                },
            }
        }
        out
    }
}

/// Interns compiled templates per distinct text.
///
/// Compilation happens under the lock so each text is compiled once; the
/// published `Arc` is immutable and shared by every definition using it.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: Mutex<HashMap<Box<str>, Arc<MessageTemplate>>>,
}

impl TemplateCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`MessageTemplate::cached`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TemplateCache> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Return the compiled template for `text`, compiling it on first use.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_compile(&self, text: &str) -> Result<Arc<MessageTemplate>, TemplateError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(text) {
            return Ok(Arc::clone(existing));
        }

        let compiled = Arc::new(MessageTemplate::parse(text)?);
        entries.insert(text.into(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Returns true when `text` has already been compiled and interned.
    pub fn contains(&self, text: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(text)
    }

    /// Number of distinct compiled templates.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
