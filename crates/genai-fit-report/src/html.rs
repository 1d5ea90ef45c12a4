//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use genai_fit_core::guidance::career_summary;
use genai_fit_core::model::WiscarDimension;
use genai_fit_core::report::AssessmentReport;
use genai_fit_core::scoring::{Recommendation, ScoringConfig, WiscarScores};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an assessment report.
pub fn generate_html(report: &AssessmentReport) -> String {
    let result = &report.result;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>genai-fit report: {}</title>\n",
        html_escape(&report.bank.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Should I Learn Generative AI?</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Question bank: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&report.bank.name),
        report.bank.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Verdict
    html.push_str(&format!(
        "<section class=\"verdict {}\">\n",
        recommendation_class(result.recommendation)
    ));
    html.push_str(&format!(
        "<p class=\"score\">{}<span>/100</span></p>\n",
        result.overall_score
    ));
    html.push_str(&format!(
        "<h2>{}</h2>\n",
        html_escape(result.recommendation.headline())
    ));
    html.push_str("</section>\n");

    // Pillars
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Pillar</th><th>Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (label, score) in [
        ("Psychological Fit", result.psychological_fit),
        ("Technical Readiness", result.technical_readiness),
        ("WISCAR Average", result.wiscar_scores.average()),
    ] {
        html.push_str(&format!(
            "<tr><td>{label}</td><td class=\"{}\">{score}%</td></tr>\n",
            score_class(score, &report.scoring)
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // WISCAR breakdown
    html.push_str("<section class=\"wiscar\">\n");
    html.push_str("<h2>WISCAR Analysis</h2>\n");
    html.push_str(&generate_bar_chart(&result.wiscar_scores, &report.scoring));
    html.push_str("</section>\n");

    // Guidance
    html.push_str("<section class=\"guidance\">\n");
    html.push_str("<h2>Recommended Career Paths</h2>\n<ul>\n");
    for path in &result.career_paths {
        match career_summary(path) {
            Some(summary) => html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                html_escape(path),
                html_escape(summary)
            )),
            None => html.push_str(&format!("<li><strong>{}</strong></li>\n", html_escape(path))),
        }
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Next Steps</h2>\n<ol>\n");
    for step in &result.next_steps {
        html.push_str(&format!("<li>{}</li>\n", html_escape(step)));
    }
    html.push_str("</ol>\n");

    html.push_str(&format!(
        "<h2>Learning Resources: {}</h2>\n<ul>\n",
        result.learning_track.title()
    ));
    for resource in result.learning_track.resources() {
        html.push_str(&format!("<li>{}</li>\n", html_escape(resource)));
    }
    html.push_str("</ul>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn recommendation_class(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::Yes => "pass",
        Recommendation::Maybe => "warn",
        Recommendation::No => "fail",
    }
}

/// Colour band for a single score, using the same cut-offs as the verdict.
fn score_class(score: u8, scoring: &ScoringConfig) -> &'static str {
    recommendation_class(Recommendation::from_score(score, scoring))
}

fn bar_color(score: u8, scoring: &ScoringConfig) -> &'static str {
    match Recommendation::from_score(score, scoring) {
        Recommendation::Yes => "#22c55e",
        Recommendation::Maybe => "#eab308",
        Recommendation::No => "#ef4444",
    }
}

fn generate_bar_chart(scores: &WiscarScores, scoring: &ScoringConfig) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = WiscarDimension::ALL.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (dimension, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = score as usize * max_width / 100;

        let color = bar_color(score, scoring);

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(dimension.label())
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.verdict { border-radius: 8px; padding: 1rem 2rem; margin: 1rem 0; }
.verdict h2 { margin-top: 0; }
.score { font-size: 3rem; font-weight: bold; margin: 0; }
.score span { font-size: 1.25rem; color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
