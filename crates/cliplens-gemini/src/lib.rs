//! Google Gemini provider for ClipLens
//!
//! `GeminiClient` implements `cliplens_core::VideoProvider` on top of the
//! Gemini File API (resumable upload, get, delete) and `generateContent`.

mod client;
mod error;
mod files;
mod generate;

pub use client::{GeminiClient, GeminiClientConfig, DEFAULT_BASE_URL};
