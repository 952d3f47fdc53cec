//! # PLP Core
//!
//! Core logic for the Prompt Library: resolving client paths, validating input, and driving the
//! storage engine.
//!
//! This crate contains:
//! - Startup configuration ([`CoreConfig`])
//! - The request-facing service ([`PromptService`])
//! - Error classification for protocol boundaries ([`PromptError::class`])
//!
//! **No transport concerns**: HTTP routing, request parsing and authentication belong to whatever
//! embeds this crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod service;

pub use config::CoreConfig;
pub use error::{ErrorClass, PromptError, PromptResult};
pub use service::PromptService;

pub use plp_files::{StoredPrompt, WriteStatus};
pub use plp_types::{
    is_multi_modal, is_valid_prompt_id, normalize_content, resolve, text_content, ContentPart,
    IdError, ImageDetail, ImageUrl, Meta, PayloadError, PromptContent, PromptEnvelope, PromptId,
    PromptInput, ResolvedPath,
};
