//! Documentation blocks attached to types and methods.

/// Smallest unit of documentation prose.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Token {
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a token from text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Join token texts with single spaces.
#[must_use]
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Documentation for a single parameter, keyed by parameter name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ParamDoc {
    /// Name of the documented parameter.
    pub name: String,
    /// Tokens describing the parameter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tokens: Vec<Token>,
}

/// Prose sections of a documentation block, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Short description.
    Summary,
    /// Longer remarks.
    Remarks,
    /// Usage example.
    Example,
    /// Description of the return value.
    Returns,
}

impl Section {
    /// All sections in the order renderers emit them.
    pub const ALL: [Section; 4] = [
        Section::Summary,
        Section::Remarks,
        Section::Example,
        Section::Returns,
    ];

    /// Lowercase section name (`"summary"`, `"remarks"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Remarks => "remarks",
            Self::Example => "example",
            Self::Returns => "returns",
        }
    }
}

/// Optional documentation block of a type or method.
///
/// Each prose section is independently optional. An absent section and a
/// present-but-empty one are distinct values, though renderers usually treat
/// both as "nothing to say" (see [`Documentation::non_empty`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Documentation {
    /// Summary tokens.
    pub summary: Option<Vec<Token>>,
    /// Remarks tokens.
    pub remarks: Option<Vec<Token>>,
    /// Example tokens.
    pub example: Option<Vec<Token>>,
    /// Return value tokens.
    pub returns: Option<Vec<Token>>,
    /// Per-parameter documentation, in source order.
    pub params: Vec<ParamDoc>,
}

impl Documentation {
    /// Create an empty documentation block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set summary tokens.
    #[must_use]
    pub fn with_summary<T: Into<Token>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.summary = Some(collect(tokens));
        self
    }

    /// Set remarks tokens.
    #[must_use]
    pub fn with_remarks<T: Into<Token>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.remarks = Some(collect(tokens));
        self
    }

    /// Set example tokens.
    #[must_use]
    pub fn with_example<T: Into<Token>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.example = Some(collect(tokens));
        self
    }

    /// Set return value tokens.
    #[must_use]
    pub fn with_returns<T: Into<Token>>(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        self.returns = Some(collect(tokens));
        self
    }

    /// Append documentation for a parameter.
    #[must_use]
    pub fn with_param<T: Into<Token>>(
        mut self,
        name: impl Into<String>,
        tokens: impl IntoIterator<Item = T>,
    ) -> Self {
        self.params.push(ParamDoc {
            name: name.into(),
            tokens: collect(tokens),
        });
        self
    }

    /// Tokens of a section, if the section is present.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&[Token]> {
        let tokens = match section {
            Section::Summary => &self.summary,
            Section::Remarks => &self.remarks,
            Section::Example => &self.example,
            Section::Returns => &self.returns,
        };
        tokens.as_deref()
    }

    /// Tokens of a section, if the section is present and has at least one token.
    #[must_use]
    pub fn non_empty(&self, section: Section) -> Option<&[Token]> {
        self.section(section).filter(|tokens| !tokens.is_empty())
    }

    /// Tokens documenting the parameter called `name`.
    ///
    /// When several entries share the same name, the first one wins.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&[Token]> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.tokens.as_slice())
    }
}

fn collect<T: Into<Token>>(tokens: impl IntoIterator<Item = T>) -> Vec<Token> {
    tokens.into_iter().map(Into::into).collect()
}
