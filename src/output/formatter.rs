use chrono::NaiveDate;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use url::Url;

use crate::engine::{round2, Category, EngineError, SolverResult, WeightedResult};
use crate::tools::{ConversionResult, Report, Tool};

/// Site the share texts point people to.
pub const SITE_URL: &str = "https://mygwacalculator.com";

const WEIGHT_NOTE: &str = "Note: Total weight is not 100%";

const ESTIMATE_NOTE: &str =
    "Conversions are estimates; check your institution's official grading policy.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Two decimal places, as results are shown everywhere.
pub fn format_grade(value: f64) -> String {
    format!("{:.2}", value)
}

/// Shortest form of an input number: `3` rather than `3.00`, `2.5` as is.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn paint_category(category: &Category, use_colors: bool) -> String {
    if !use_colors {
        return category.label.clone();
    }
    match category.tier {
        0 => category.label.red().to_string(),
        1 => category.label.yellow().to_string(),
        _ => category.label.green().to_string(),
    }
}

/// Terminal rendering of a report.
pub fn format_report(report: &Report, use_colors: bool) -> String {
    match report {
        Report::Average { tool, result } => format_average(*tool, result, use_colors),
        Report::Conversion { tool, result } => format_conversion(*tool, result, use_colors),
        Report::Solver { tool, result } => format_solver(*tool, result, use_colors),
    }
}

fn headline(label: &str, value: f64, use_colors: bool) -> String {
    let value = format_grade(value);
    if use_colors {
        format!("{}: {}", label, value.bold())
    } else {
        format!("{}: {}", label, value)
    }
}

fn format_average(tool: Tool, result: &WeightedResult, use_colors: bool) -> String {
    let mut lines = vec![
        headline(tool.result_label(), result.weighted_average, use_colors),
        paint_category(&result.category, use_colors),
        String::new(),
    ];

    let label_width = result
        .entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);

    for (i, entry) in result.entries.iter().enumerate() {
        let index = format!("{:>2}.", i + 1);
        let line = format!(
            "{} {:<width$}  {}: {}  {}: {}  Points: {}",
            if use_colors { index.dimmed().to_string() } else { index },
            entry.label,
            tool.value_noun(),
            format_number(entry.value),
            tool.weight_noun(),
            format_number(entry.weight),
            format_grade(entry.weighted_value()),
            width = label_width
        );
        lines.push(line);
    }

    lines.push(String::new());
    lines.push(format!(
        "Total {}: {}  Total points: {}",
        tool.weight_noun(),
        format_number(result.total_weight),
        format_grade(result.weighted_sum)
    ));
    if weights_miss_hundred(tool, result) {
        lines.push(if use_colors {
            WEIGHT_NOTE.yellow().to_string()
        } else {
            WEIGHT_NOTE.to_string()
        });
    }
    if result.dropped > 0 {
        let note = format!(
            "{} incomplete or invalid row{} skipped",
            result.dropped,
            if result.dropped == 1 { "" } else { "s" }
        );
        lines.push(if use_colors { note.dimmed().to_string() } else { note });
    }

    lines.join("\n")
}

/// Percentage weights should add up to 100, but the average is still
/// computed when they don't.
fn weights_miss_hundred(tool: Tool, result: &WeightedResult) -> bool {
    tool == Tool::WeightedGrade && (result.total_weight - 100.0).abs() > 1e-9
}

fn format_conversion(tool: Tool, result: &ConversionResult, use_colors: bool) -> String {
    let mut lines = vec![
        headline(tool.result_label(), result.converted, use_colors),
        format!(
            "{} ({}) -> {} ({})",
            format_number(result.input),
            result.from,
            format_grade(result.converted),
            result.to
        ),
    ];
    if let Some(ref category) = result.category {
        lines.push(format!("Category: {}", paint_category(category, use_colors)));
    }
    lines.push(if use_colors {
        ESTIMATE_NOTE.dimmed().to_string()
    } else {
        ESTIMATE_NOTE.to_string()
    });
    lines.join("\n")
}

fn format_solver(tool: Tool, result: &SolverResult, use_colors: bool) -> String {
    [
        headline(tool.result_label(), result.required_rounded, use_colors),
        paint_category(&result.band, use_colors),
        format!(
            "Current grade: {}  Final exam weight: {}%  Target: {}",
            format_number(result.current),
            format_number(round2(result.weight * 100.0)),
            format_number(result.target)
        ),
    ]
    .join("\n")
}

/// JSON rendering of a report.
pub fn format_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

/// JSON rendering of a rejected calculation.
pub fn format_error_json(err: &EngineError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ErrorBody {
        error: err.kind(),
        message: err.to_string(),
    })
}

/// Plain-text summary for the clipboard, listing every entry used.
pub fn format_results_text(report: &Report, generated_on: NaiveDate) -> String {
    let tool = report.tool();
    let mut text = format!("{} Results\n\n", tool.title());

    match report {
        Report::Average { result, .. } => {
            text.push_str(&format!("{}:\n", tool.entry_heading()));
            for (i, entry) in result.entries.iter().enumerate() {
                text.push_str(&format!(
                    "{}. {} - {}: {}, {}: {}\n",
                    i + 1,
                    entry.label,
                    tool.value_noun(),
                    format_number(entry.value),
                    tool.weight_noun(),
                    format_number(entry.weight)
                ));
            }
            text.push_str(&format!(
                "\n{}: {}\n{}\nTotal {}: {}\n",
                tool.result_label(),
                format_grade(result.weighted_average),
                result.category.label,
                tool.weight_noun(),
                format_number(result.total_weight)
            ));
            if weights_miss_hundred(tool, result) {
                text.push_str(WEIGHT_NOTE);
                text.push('\n');
            }
        }
        Report::Conversion { result, .. } => {
            text.push_str(&format!(
                "Input: {} ({})\n{}: {} ({})\n",
                format_number(result.input),
                result.from,
                tool.result_label(),
                format_grade(result.converted),
                result.to
            ));
            if let Some(ref category) = result.category {
                text.push_str(&format!("Category: {}\n", category.label));
            }
        }
        Report::Solver { result, .. } => {
            text.push_str(&format!(
                "Current Grade: {}\nFinal Exam Weight: {}%\nTarget Grade: {}\n\n{}: {}\n{}\n",
                format_number(result.current),
                format_number(round2(result.weight * 100.0)),
                format_number(result.target),
                tool.result_label(),
                format_grade(result.required_rounded),
                result.band.label
            ));
        }
    }

    text.push_str(&format!("\nGenerated on {}", generated_on.format("%Y-%m-%d")));
    text
}

/// One-line brag for social posts, followed by a link back to the site.
pub fn format_share_text(report: &Report) -> String {
    let line = match report {
        Report::Average { tool, result } => match tool {
            Tool::Gwa => format!(
                "My GWA: {} - {}",
                format_grade(result.weighted_average),
                result.category.label
            ),
            Tool::WeightedGrade => format!(
                "My Weighted Average: {} (Total Weight: {}%)",
                format_grade(result.weighted_average),
                format_number(result.total_weight)
            ),
            Tool::SemesterGpa => format!(
                "My Semester GPA: {} with {} credits!",
                format_grade(result.weighted_average),
                format_number(result.total_weight)
            ),
            _ => format!("My Grade Average: {}", format_grade(result.weighted_average)),
        },
        Report::Conversion { tool, result } => match (tool, &result.category) {
            (Tool::CgpaToPercentage, Some(category)) => format!(
                "My CGPA of {} equals {}% - {}!",
                format_number(result.input),
                format_grade(result.converted),
                category.label
            ),
            _ => format!(
                "Grade Conversion: {} converted to {}",
                format_number(result.input),
                format_grade(result.converted)
            ),
        },
        Report::Solver { result, .. } => format!(
            "I need {}% on my final exam to achieve my target grade!",
            format_grade(result.required_rounded)
        ),
    };
    format!("{}\nCalculate yours at: {}", line, SITE_URL)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    pub platform: &'static str,
    pub url: Url,
}

/// Prefilled share links for the usual platforms.
pub fn share_links(text: &str) -> Result<Vec<ShareLink>, url::ParseError> {
    let targets: [(&'static str, &str, Vec<(&str, &str)>); 5] = [
        ("WhatsApp", "https://wa.me/", vec![("text", text)]),
        (
            "Facebook",
            "https://www.facebook.com/sharer/sharer.php",
            vec![("u", SITE_URL), ("quote", text)],
        ),
        ("Twitter", "https://twitter.com/intent/tweet", vec![("text", text)]),
        (
            "Telegram",
            "https://t.me/share/url",
            vec![("url", SITE_URL), ("text", text)],
        ),
        (
            "LinkedIn",
            "https://www.linkedin.com/sharing/share-offsite/",
            vec![("url", SITE_URL), ("summary", text)],
        ),
    ];

    targets
        .into_iter()
        .map(|(platform, base, params)| {
            Ok(ShareLink {
                platform,
                url: Url::parse_with_params(base, params)?,
            })
        })
        .collect()
}
