//! Report output shared by `take` and `score`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use genai_fit_core::guidance::career_summary;
use genai_fit_core::report::AssessmentReport;
use genai_fit_core::scoring::AssessmentResult;
use genai_fit_report::html::{generate_html, write_html_report};
use genai_fit_report::markdown::{generate_markdown, write_markdown_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Html,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            other => anyhow::bail!(
                "unknown format: '{other}' (expected text, json, markdown or html)"
            ),
        }
    }
}

/// Render a result as terminal text with comfy-table summaries.
pub fn render_text(result: &AssessmentResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Overall score: {}/100 ({})\n{}\n\n",
        result.overall_score,
        result.recommendation,
        result.recommendation.headline()
    ));

    let mut pillars = Table::new();
    pillars.set_header(vec!["Pillar", "Score"]);
    for (label, score) in [
        ("Psychological Fit", result.psychological_fit),
        ("Technical Readiness", result.technical_readiness),
        ("WISCAR Average", result.wiscar_scores.average()),
    ] {
        pillars.add_row(vec![Cell::new(label), Cell::new(format!("{score}%"))]);
    }
    out.push_str(&format!("{pillars}\n\n"));

    let mut wiscar = Table::new();
    wiscar.set_header(vec!["WISCAR", "Measures", "Score"]);
    for (dimension, score) in result.wiscar_scores.iter() {
        wiscar.add_row(vec![
            Cell::new(dimension.label()),
            Cell::new(dimension.description()),
            Cell::new(format!("{score}%")),
        ]);
    }
    out.push_str(&format!("{wiscar}\n\n"));

    out.push_str("Recommended career paths:\n");
    for path in &result.career_paths {
        match career_summary(path) {
            Some(summary) => out.push_str(&format!("  - {path}: {summary}\n")),
            None => out.push_str(&format!("  - {path}\n")),
        }
    }

    out.push_str("\nNext steps:\n");
    for (i, step) in result.next_steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }

    out.push_str(&format!("\n{}:\n", result.learning_track.title()));
    for resource in result.learning_track.resources() {
        out.push_str(&format!("  - {resource}\n"));
    }

    out
}

/// Render a report in the requested format.
pub fn render(report: &AssessmentReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(&report.result),
        OutputFormat::Json => report.to_json()?,
        OutputFormat::Markdown => generate_markdown(report),
        OutputFormat::Html => generate_html(report),
    })
}

/// Print a report to stdout, or write it to `output` when given.
pub fn emit(report: &AssessmentReport, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let Some(path) = output else {
        println!("{}", render(report, format)?);
        return Ok(());
    };

    match format {
        OutputFormat::Json => report.save_json(path)?,
        OutputFormat::Html => write_html_report(report, path)?,
        OutputFormat::Markdown => write_markdown_report(report, path)?,
        OutputFormat::Text => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, render_text(&report.result))
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
    }
    eprintln!("Report saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genai_fit_core::guidance::{LearningTrack, FALLBACK_CAREER_PATH};
    use genai_fit_core::scoring::{Recommendation, WiscarScores};

    #[test]
    fn parse_output_formats() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn text_lists_career_paths_with_summaries() {
        let result = AssessmentResult {
            overall_score: 40,
            psychological_fit: 40,
            technical_readiness: 40,
            wiscar_scores: WiscarScores::default(),
            recommendation: Recommendation::No,
            career_paths: vec![
                "Prompt Engineer".into(),
                FALLBACK_CAREER_PATH.into(),
            ],
            next_steps: vec![],
            learning_track: LearningTrack::Beginner,
        };
        let text = render_text(&result);
        assert!(text.contains("  - Prompt Engineer: Craft effective inputs for AI models\n"));
        assert!(text.contains(&format!("  - {FALLBACK_CAREER_PATH}\n")));
    }
}
