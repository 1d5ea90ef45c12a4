//! The `genai-fit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use genai_fit_core::bank::{parse_bank, validate_bank};
use genai_fit_core::model::Section;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let bank = parse_bank(&bank_path)?;

    println!("Question bank: {} ({} questions)", bank.name(), bank.len());
    for section in Section::ALL {
        println!("  {section}: {}", bank.section(section).len());
    }

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
