//! Content generation for insurance agents.
//!
//! This crate contains:
//! - The seam over the opaque text-generation backend
//! - Prompt construction for the social channels
//! - Post-processing of generated text (fences, hashtags, JSON payloads)
//! - Website generation with a built-in template fallback

pub mod generator;
pub mod postprocess;
pub mod prompts;
pub mod site;

pub use generator::{ContentGenerator, HttpContentGenerator};
pub use prompts::Channel;
pub use site::AgentProfile;
