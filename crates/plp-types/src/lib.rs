//! Shared types for the Prompt Library.
//!
//! - [`PromptId`] and [`is_valid_prompt_id`]: the identifier grammar
//! - [`resolve`]: splits a raw request path into identifier and version selector
//! - [`PromptEnvelope`], [`PromptInput`], [`PromptContent`]: what gets stored and how writes arrive
//!
//! Nothing here touches the filesystem.

mod content;
mod envelope;
mod id;
mod path;

pub use content::{
    is_multi_modal, normalize_content, text_content, ContentPart, ImageDetail, ImageUrl,
    PromptContent,
};
pub use envelope::{Meta, PayloadError, PromptEnvelope, PromptInput, VERSION_META_KEY};
pub use id::{is_valid_prompt_id, IdError, PromptId, MAX_PROMPT_ID_LEN};
pub use path::{is_version_token, resolve, ResolvedPath};
