//! The `genai-fit questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use genai_fit_core::bank::load_bank;
use genai_fit_core::model::{AnswerShape, Question, Section};

pub fn execute(bank_path: Option<PathBuf>, section: Option<Section>) -> Result<()> {
    let bank = load_bank(bank_path.as_deref())?;

    println!("{} ({} questions)", bank.name(), bank.len());

    let sections: Vec<Section> = match section {
        Some(s) => vec![s],
        None => Section::ALL.to_vec(),
    };

    for section in sections {
        let questions = bank.section(section);
        println!("\n{} ({})", section.title(), questions.len());

        let mut table = Table::new();
        table.set_header(vec!["#", "ID", "Prompt", "Answer", "Tag"]);
        for (i, q) in questions.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&q.id),
                Cell::new(&q.prompt),
                Cell::new(describe_answer(q)),
                Cell::new(tag(q)),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}

fn describe_answer(question: &Question) -> String {
    match &question.shape {
        AnswerShape::Choice { options } => format!("choice ({} options)", options.len()),
        AnswerShape::Scale { min, max, .. } => format!("scale {min}-{max}"),
    }
}

fn tag(question: &Question) -> String {
    match (&question.dimension, &question.category) {
        (Some(d), _) => d.label().to_string(),
        (None, Some(c)) => c.clone(),
        (None, None) => "-".to_string(),
    }
}
