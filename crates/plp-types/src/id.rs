//! Prompt identifier grammar.
//!
//! Identifiers are path-like strings such as `marketing/welcome-email`. The grammar is strict and
//! nothing is ever repaired: a candidate either satisfies every rule or it is rejected.
//!
//! Rules, checked in this order:
//! - not empty
//! - at most [`MAX_PROMPT_ID_LEN`] characters
//! - does not start or end with `/`
//! - does not contain `//`
//! - does not contain `..` anywhere
//! - only `A-Z`, `a-z`, `0-9`, `/`, `_` and `-`

/// Maximum length of a prompt identifier.
pub const MAX_PROMPT_ID_LEN: usize = 256;

/// Reasons a candidate identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier cannot be empty")]
    Empty,

    #[error("identifier is {len} characters long (maximum is {max})", max = MAX_PROMPT_ID_LEN)]
    TooLong { len: usize },

    #[error("identifier cannot start or end with '/'")]
    LeadingOrTrailingSlash,

    #[error("identifier cannot contain empty segments ('//')")]
    EmptySegment,

    #[error("identifier cannot contain '..'")]
    ParentReference,

    #[error("identifier contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A validated prompt identifier.
///
/// The only ways to obtain one are [`PromptId::parse`] and deserialization, which runs the same
/// checks. Storage code takes `&PromptId` so an unchecked string cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromptId(String);

impl PromptId {
    /// Validates `candidate` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the first [`IdError`] rule that the candidate breaks.
    pub fn parse(candidate: impl AsRef<str>) -> Result<Self, IdError> {
        let candidate = candidate.as_ref();
        check(candidate)?;
        Ok(Self(candidate.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Returns `true` when `candidate` is a well-formed prompt identifier.
pub fn is_valid_prompt_id(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn check(candidate: &str) -> Result<(), IdError> {
    if candidate.is_empty() {
        return Err(IdError::Empty);
    }

    let len = candidate.chars().count();
    if len > MAX_PROMPT_ID_LEN {
        return Err(IdError::TooLong { len });
    }

    if candidate.starts_with('/') || candidate.ends_with('/') {
        return Err(IdError::LeadingOrTrailingSlash);
    }

    if candidate.contains("//") {
        return Err(IdError::EmptySegment);
    }

    if candidate.contains("..") {
        return Err(IdError::ParentReference);
    }

    if let Some(bad) = candidate
        .chars()
        .find(|c| !matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '/' | '_' | '-'))
    {
        return Err(IdError::InvalidCharacter(bad));
    }

    Ok(())
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PromptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for PromptId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for PromptId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PromptId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PromptId::parse(&s).map_err(serde::de::Error::custom)
    }
}
