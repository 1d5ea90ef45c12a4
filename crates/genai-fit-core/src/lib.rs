//! genai-fit-core: question bank, responses, scoring and session state.
//!
//! This crate holds everything the "Should I Learn Generative AI?"
//! assessment needs apart from presentation: the data model, bank loading,
//! the response store, the scoring engine and the step controller.

pub mod bank;
pub mod config;
pub mod error;
pub mod guidance;
pub mod model;
pub mod report;
pub mod responses;
pub mod scoring;
pub mod session;
