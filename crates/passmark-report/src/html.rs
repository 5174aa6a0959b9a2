//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use passmark_core::analysis::SubScore;
use passmark_core::model::DifficultyTier;
use passmark_core::report::SessionReport;
use passmark_core::scoring::PASS_SCALED_SCORE;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a session report.
pub fn generate_html(report: &SessionReport) -> String {
    let score = &report.score;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>passmark report — {}</title>\n",
        html_escape(&report.session.id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>passmark report</h1>\n");
    let candidate = report
        .session
        .candidate
        .as_deref()
        .map(|c| format!(" | Candidate: <strong>{}</strong>", html_escape(c)))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">Session: <strong>{}</strong>{} | {} questions | {}</p>\n",
        html_escape(&report.session.id),
        candidate,
        score.total_questions,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Verdict
    let status_class = if score.pass_status.is_pass() {
        "pass"
    } else {
        "fail"
    };
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p class=\"verdict {status_class}\">{} — scaled score {} (pass mark {})</p>\n",
        score.pass_status, score.scaled_score, PASS_SCALED_SCORE
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Raw %</th><th>Weighted %</th><th>Scaled</th><th>Confidence</th><th>Time</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{:.1}%</td><td>{:.1}%</td><td>{}</td><td>{}%</td><td>{}</td></tr></tbody>\n",
        score.raw_score_pct,
        score.weighted_pct,
        score.scaled_score,
        score.confidence_pct,
        format_duration(score.total_time_seconds),
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Difficulty breakdown
    if !score.by_difficulty.is_empty() {
        html.push_str("<section class=\"tiers\">\n");
        html.push_str("<h2>By difficulty</h2>\n");
        html.push_str(&generate_bar_chart(&score.by_difficulty));
        html.push_str(&group_table("Tier", score.by_difficulty.iter().map(|(t, s)| (t.to_string(), s))));
        html.push_str("</section>\n");
    }

    // Topic breakdown
    if !score.by_topic.is_empty() {
        html.push_str("<section class=\"topics\">\n");
        html.push_str("<h2>By topic</h2>\n");
        html.push_str(&group_table("Topic", score.by_topic.iter().map(|(t, s)| (t.clone(), s))));
        html.push_str("</section>\n");
    }

    // Recommendations
    if !score.recommendations.is_empty() || !score.weak_topics.is_empty() {
        html.push_str("<section class=\"recommendations\">\n");
        html.push_str("<h2>Recommendations</h2>\n<ul>\n");
        for r in &score.recommendations {
            html.push_str(&format!("<li>{}</li>\n", html_escape(r)));
        }
        if !score.weak_topics.is_empty() {
            let topics: Vec<String> = score.weak_topics.iter().map(|t| html_escape(t)).collect();
            html.push_str(&format!(
                "<li>Topics to revisit: {}</li>\n",
                topics.join(", ")
            ));
        }
        html.push_str("</ul>\n</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds >= 60 {
        format!("{}m {:02}s", seconds / 60, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

fn group_table<'a>(label: &str, rows: impl Iterator<Item = (String, &'a SubScore)>) -> String {
    let mut table = String::from("<table class=\"groups\">\n");
    table.push_str(&format!(
        "<thead><tr><th>{label}</th><th>Correct</th><th>Total</th><th>Accuracy</th><th>Avg time</th></tr></thead>\n<tbody>\n"
    ));
    for (name, s) in rows {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.0}s</td></tr>\n",
            html_escape(&name),
            s.correct,
            s.total,
            s.percentage,
            s.avg_time_seconds
        ));
    }
    table.push_str("</tbody></table>\n");
    table
}

fn generate_bar_chart(by_difficulty: &BTreeMap<DifficultyTier, SubScore>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 140;

    let total_height = by_difficulty.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (tier, s)) in by_difficulty.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let fraction = (s.percentage / 100.0).clamp(0.0, 1.0);
        let width = (fraction * max_width as f64) as usize;

        let color = if s.percentage >= 80.0 {
            "#22c55e"
        } else if s.percentage >= 60.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            tier
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            s.percentage
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.verdict { font-size: 1.5rem; font-weight: bold; padding: 0.75rem 1rem; border-radius: 8px; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
