//! The `genai-fit init` command.

use std::path::Path;

use anyhow::{Context, Result};

use genai_fit_core::bank::QuestionBank;
use genai_fit_core::config::GenaiFitConfig;
use genai_fit_core::model::{AnswerShape, Question};

pub fn execute() -> Result<()> {
    write_if_missing("genai-fit.toml", &starter_config()?)?;

    let bank = QuestionBank::builtin()?;
    write_if_missing("answers.toml", &starter_answers(&bank))?;

    println!("\nNext steps:");
    println!("  1. Take the assessment: genai-fit take");
    println!("  2. Or edit answers.toml and run: genai-fit score --answers answers.toml");

    Ok(())
}

fn write_if_missing(name: &str, content: &str) -> Result<()> {
    let path = Path::new(name);
    if path.exists() {
        println!("{name} already exists, skipping.");
    } else {
        std::fs::write(path, content).with_context(|| format!("failed to write {name}"))?;
        println!("Created {name}");
    }
    Ok(())
}

fn starter_config() -> Result<String> {
    let body = toml::to_string_pretty(&GenaiFitConfig::default())
        .context("failed to serialize default config")?;
    Ok(format!(
        "# genai-fit configuration\n\
         # bank = \"question-banks/generative-ai.toml\"\n\n{body}"
    ))
}

/// An answers file for `bank` with every question set to its midpoint.
fn starter_answers(bank: &QuestionBank) -> String {
    let mut out = format!(
        "# Answers for \"{}\".\n\
         # Scale questions take a number; choice questions take an option label.\n\n\
         [answers]\n",
        bank.name()
    );
    for q in bank.questions() {
        out.push_str(&format!("# {}\n", q.prompt));
        out.push_str(&format!("{} = {}\n", q.id, midpoint(q)));
    }
    out
}

fn midpoint(question: &Question) -> String {
    match &question.shape {
        AnswerShape::Choice { options } => {
            let label = options
                .get(options.len() / 2)
                .map(|o| o.label.as_str())
                .unwrap_or_default();
            format!("{label:?}")
        }
        AnswerShape::Scale { min, max, .. } => ((min + max) / 2).to_string(),
    }
}
