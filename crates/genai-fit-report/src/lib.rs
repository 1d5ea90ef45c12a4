//! Report renderers for genai-fit assessment results.

pub mod html;
pub mod markdown;
