//! Splitting a raw request path into an identifier and an optional version.
//!
//! A raw path is everything a client sends after the `/prompts/` prefix, for example
//! `marketing/welcome-email/1.2.0`. When the final `/`-separated segment looks like a semantic
//! version it is taken as the version selector and the rest is the identifier.
//!
//! This is a heuristic. An identifier whose last segment is itself version-shaped cannot be
//! addressed as a whole, because the resolver always reads that segment as a version.
//!
//! The resolver does not validate the identifier; run [`crate::PromptId::parse`] on the result.

use crate::id::{IdError, PromptId};

/// Result of splitting a raw request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub id: String,
    pub version: Option<String>,
}

impl ResolvedPath {
    /// Validates the resolved identifier, keeping the version selector alongside it.
    pub fn into_prompt_id(self) -> Result<(PromptId, Option<String>), IdError> {
        let id = PromptId::parse(&self.id)?;
        Ok((id, self.version))
    }
}

/// Splits `raw_path` into `(id, version?)`.
///
/// The trailing segment is treated as a version only when there are at least two segments and it
/// matches `MAJOR.MINOR.PATCH[-prerelease][+build]`.
pub fn resolve(raw_path: &str) -> ResolvedPath {
    if let Some((head, last)) = raw_path.rsplit_once('/') {
        if is_version_token(last) {
            return ResolvedPath {
                id: head.to_owned(),
                version: Some(last.to_owned()),
            };
        }
    }

    ResolvedPath {
        id: raw_path.to_owned(),
        version: None,
    }
}

/// Returns `true` when `segment` matches `MAJOR.MINOR.PATCH[-prerelease][+build]`.
///
/// MAJOR, MINOR and PATCH are one or more ASCII digits (leading zeros are tolerated). The
/// prerelease and build parts are dot-separated, non-empty runs of ASCII alphanumerics and `-`.
pub fn is_version_token(segment: &str) -> bool {
    let (rest, build) = match segment.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (segment, None),
    };

    let (core, prerelease) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let mut numbers = core.split('.');
    let core_ok = (0..3).all(|_| {
        numbers
            .next()
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    }) && numbers.next().is_none();

    core_ok
        && prerelease.map_or(true, dotted_identifiers)
        && build.map_or(true, dotted_identifiers)
}

fn dotted_identifiers(part: &str) -> bool {
    part.split('.').all(|ident| {
        !ident.is_empty()
            && ident
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}
