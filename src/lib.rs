// SPDX-License-Identifier: MIT

//! deckhand-rs: an MCP deployment-tool server with direct Claude API access.
//!
//! The server exposes a deployment toolset (git/gh wrappers) alongside four
//! model-backed tools that build a prompt and forward it to the Claude
//! messages API. Setup and status commands generate the surrounding
//! configuration artifacts and diagnose the local integration.

pub mod claude;
pub mod config;
pub mod deploy;
pub mod error;
pub mod server;
pub mod setup;
pub mod status;
