//! On-disk naming constants.

/// Extension of every stored envelope object.
pub const OBJECT_EXTENSION: &str = "json";

/// Separates an identifier's flattened token from a version in snapshot file names.
pub const VERSION_SEPARATOR: char = '@';

/// Replaces `..` in flattened tokens.
pub const PARENT_PLACEHOLDER: &str = "%2E%2E";

/// Replaces each run of path separators in flattened tokens.
pub const SEPARATOR_PLACEHOLDER: &str = "%2F";

/// Replaces `%` in version tokens.
pub const PERCENT_PLACEHOLDER: &str = "%25";

/// Starts a token that was replaced by its digest. Valid identifiers and escaped versions never
/// produce it.
pub const HASHED_TOKEN_PREFIX: &str = "%23";

/// Longest identifier token used verbatim in a file name, in bytes.
pub const MAX_ID_TOKEN_LEN: usize = 128;

/// Longest version token used verbatim in a file name, in bytes.
pub const MAX_VERSION_TOKEN_LEN: usize = 64;

/// Suffix of staging files that are renamed into place once fully written.
pub const STAGING_SUFFIX: &str = "tmp";
