// SPDX-License-Identifier: MIT

//! Claude API integration: prompt templates and the messages-API client.

pub mod client;
pub mod prompt;

pub use client::{ClaudeClient, CompletionModel};
pub use prompt::build_prompt;
