//! Markdown report generator.

use anyhow::{Context, Result};
use std::path::Path;

use genai_fit_core::guidance::career_summary;
use genai_fit_core::report::AssessmentReport;

/// Render an assessment report as Markdown.
pub fn generate_markdown(report: &AssessmentReport) -> String {
    let result = &report.result;
    let mut md = String::new();

    md.push_str("# Should I Learn Generative AI?\n\n");
    md.push_str(&format!(
        "_{} | {}_\n\n",
        report.bank.name,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str(&format!(
        "**Overall score:** {}/100 ({})\n\n",
        result.overall_score, result.recommendation
    ));
    md.push_str(&format!("> {}\n\n", result.recommendation.headline()));

    md.push_str("## Summary\n\n");
    md.push_str("| Pillar | Score |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!(
        "| Psychological Fit | {}% |\n",
        result.psychological_fit
    ));
    md.push_str(&format!(
        "| Technical Readiness | {}% |\n",
        result.technical_readiness
    ));
    md.push_str(&format!(
        "| WISCAR Average | {}% |\n\n",
        result.wiscar_scores.average()
    ));

    md.push_str("## WISCAR Analysis\n\n");
    md.push_str("| Dimension | Measures | Score |\n");
    md.push_str("|-----------|----------|-------|\n");
    for (dimension, score) in result.wiscar_scores.iter() {
        md.push_str(&format!(
            "| {} | {} | {}% |\n",
            dimension.label(),
            dimension.description(),
            score
        ));
    }
    md.push('\n');

    md.push_str("## Recommended Career Paths\n\n");
    for path in &result.career_paths {
        match career_summary(path) {
            Some(summary) => md.push_str(&format!("- **{path}**: {summary}\n")),
            None => md.push_str(&format!("- **{path}**\n")),
        }
    }
    md.push('\n');

    md.push_str("## Next Steps\n\n");
    for (i, step) in result.next_steps.iter().enumerate() {
        md.push_str(&format!("{}. {step}\n", i + 1));
    }
    md.push('\n');

    md.push_str(&format!(
        "## Learning Resources: {}\n\n",
        result.learning_track.title()
    ));
    for resource in result.learning_track.resources() {
        md.push_str(&format!("- {resource}\n"));
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::make_test_report;

    #[test]
    fn markdown_contains_scores_and_guidance() {
        let md = generate_markdown(&make_test_report());

        assert!(md.contains("**Overall score:** 68/100 (maybe)"));
        assert!(md.contains("| Technical Readiness | 50% |"));
        assert!(md.contains("| Real-World | Career alignment | 60% |"));
        assert!(md.contains("- **AI Ethicist**: Shape responsible AI use"));
        assert!(md.contains("- **Prompt Engineer**: Craft effective inputs for AI models"));
        assert!(md.contains("2. Strengthen your Python programming fundamentals"));
        assert!(md.contains("## Learning Resources: Beginner Track"));
    }

    #[test]
    fn wiscar_rows_follow_fixed_order() {
        let md = generate_markdown(&make_test_report());
        let will = md.find("| Will |").unwrap();
        let real_world = md.find("| Real-World |").unwrap();
        assert!(will < real_world);
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_markdown_report(&make_test_report(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Should I Learn Generative AI?"));
    }
}
