// crates/conformance-report-core/src/render.rs
// ============================================================================
// Module: HTML Rendering
// Description: Static HTML overview for a generated report.
// Purpose: Render totals, trends, and per-feature results into one page.
// Dependencies: crate::model, crate::stats, crate::trends
// ============================================================================

//! ## Overview
//! Rendering is a pure function from a [`ReportView`] to an HTML string. All
//! text that originates in result files or configuration is escaped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::configuration::Classification;
use crate::model::Element;
use crate::model::Feature;
use crate::model::Status;
use crate::model::Step;
use crate::stats::FeatureStats;
use crate::stats::ReportTotals;
use crate::stats::element_passed;
use crate::trends::Trends;

// ============================================================================
// SECTION: View
// ============================================================================

/// Everything the overview page shows.
#[derive(Debug)]
pub struct ReportView<'a> {
    /// Project name.
    pub project_name: &'a str,
    /// Build identifier.
    pub build_number: &'a str,
    /// Generation time, RFC 3339.
    pub generated_at: &'a str,
    /// Header classifications.
    pub classifications: &'a [Classification],
    /// Features in display order with their statistics.
    pub features: &'a [(Feature, FeatureStats)],
    /// Summed statistics.
    pub totals: &'a ReportTotals,
    /// Trend history including this build.
    pub trends: &'a Trends,
    /// Render steps expanded instead of collapsed.
    pub expand_steps: bool,
    /// Mark the report as produced by parallel runners.
    pub parallel_testing: bool,
}

/// Inline stylesheet for the overview page.
const STYLE: &str = "body{font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;\
margin:2rem;color:#24292f}table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{border:1px solid #d0d7de;padding:.3rem .6rem;text-align:left}\
.passed{color:#1a7f37}.failed{color:#cf222e}.skipped,.pending,.undefined,.ambiguous,\
.unknown{color:#9a6700}pre{background:#f6f8fa;padding:.5rem;white-space:pre-wrap}";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the overview page.
#[must_use]
pub fn render_overview(view: &ReportView<'_>) -> String {
    let title = html_escape(view.project_name);
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{title} - build {}</title>\n", html_escape(view.build_number)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n"));
    html.push_str(&render_header(view));
    html.push_str(&render_totals(view.totals));
    html.push_str(&render_trends(view.trends));
    html.push_str(&render_feature_index(view.features));
    for (index, (feature, stats)) in view.features.iter().enumerate() {
        html.push_str(&render_feature(index, feature, stats, view.expand_steps));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Renders build metadata and classifications.
fn render_header(view: &ReportView<'_>) -> String {
    let mut html = String::from("<table class=\"meta\">\n");
    html.push_str(&format!(
        "<tr><th>Build</th><td>{}</td></tr>\n<tr><th>Generated</th><td>{}</td></tr>\n",
        html_escape(view.build_number),
        html_escape(view.generated_at)
    ));
    if view.parallel_testing {
        html.push_str("<tr><th>Execution</th><td>parallel</td></tr>\n");
    }
    for classification in view.classifications {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            html_escape(&classification.name),
            html_escape(&classification.value)
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Renders the totals table.
fn render_totals(totals: &ReportTotals) -> String {
    format!(
        "<h2>Summary</h2>\n<table class=\"totals\">\n<tr><th></th><th>Passed</th><th>Failed</th>\
         <th>Skipped</th><th>Pending</th><th>Undefined</th><th>Total</th></tr>\n\
         <tr><th>Features</th><td>{}</td><td>{}</td><td></td><td></td><td></td><td>{}</td></tr>\n\
         <tr><th>Scenarios</th><td>{}</td><td>{}</td><td></td><td></td><td></td><td>{}</td></tr>\n\
         <tr><th>Steps</th><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n\
         <tr><th>Duration</th><td colspan=\"6\">{}</td></tr>\n</table>\n",
        totals.passed_features,
        totals.failed_features,
        totals.total_features(),
        totals.passed_scenarios,
        totals.failed_scenarios,
        totals.total_scenarios(),
        totals.steps.passed,
        totals.steps.failed,
        totals.steps.skipped,
        totals.steps.pending,
        totals.steps.undefined,
        totals.steps.total(),
        format_duration(totals.duration_nanos),
    )
}

/// Renders the trend history table, newest first.
fn render_trends(trends: &Trends) -> String {
    let mut html = String::from(
        "<h2>Trends</h2>\n<table class=\"trends\">\n<tr><th>Build</th><th>Passed \
         scenarios</th><th>Failed scenarios</th><th>Passed steps</th><th>Failed \
         steps</th><th>Duration</th></tr>\n",
    );
    for record in trends.records().iter().rev() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(record.build_number),
            record.passed_scenarios,
            record.failed_scenarios,
            record.passed_steps,
            record.failed_steps,
            format_duration(record.duration_nanos)
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Renders the per-feature summary table.
fn render_feature_index(features: &[(Feature, FeatureStats)]) -> String {
    let mut html = String::from(
        "<h2>Features</h2>\n<table class=\"features\">\n<tr><th>Feature</th><th>Passed \
         scenarios</th><th>Failed scenarios</th><th>Steps</th><th>Duration</th><th>Status</th></tr>\n",
    );
    if features.is_empty() {
        html.push_str("<tr><td colspan=\"6\">No result files were found.</td></tr>\n");
    }
    for (index, (feature, stats)) in features.iter().enumerate() {
        let status = if stats.passed() { Status::Passed } else { Status::Failed };
        html.push_str(&format!(
            "<tr><td><a href=\"#feature-{index}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td class=\"{status}\">{status}</td></tr>\n",
            html_escape(display_name(feature)),
            stats.passed_scenarios,
            stats.failed_scenarios,
            stats.steps.total(),
            format_duration(stats.duration_nanos),
            status = status.as_str(),
        ));
    }
    html.push_str("</table>\n");
    html
}

/// Renders one feature section.
fn render_feature(index: usize, feature: &Feature, stats: &FeatureStats, expand: bool) -> String {
    let status = if stats.passed() { Status::Passed } else { Status::Failed };
    let mut html = format!(
        "<section id=\"feature-{index}\">\n<h3 class=\"{}\">{} {}</h3>\n",
        status.as_str(),
        html_escape(&feature.keyword),
        html_escape(display_name(feature))
    );
    if !feature.uri.is_empty() {
        html.push_str(&format!("<p><code>{}</code></p>\n", html_escape(&feature.uri)));
    }
    if !feature.tags.is_empty() {
        let tags: Vec<String> = feature.tags.iter().map(|tag| html_escape(&tag.name)).collect();
        html.push_str(&format!("<p class=\"tags\">{}</p>\n", tags.join(" ")));
    }
    for element in &feature.elements {
        html.push_str(&render_element(element, expand));
    }
    html.push_str("</section>\n");
    html
}

/// Renders a scenario or background with its steps.
fn render_element(element: &Element, expand: bool) -> String {
    let status = if element_passed(element) { Status::Passed } else { Status::Failed };
    let open = if expand { " open" } else { "" };
    let mut html = format!(
        "<details{open}>\n<summary class=\"{}\">{}: {}</summary>\n<ul>\n",
        status.as_str(),
        html_escape(&element.keyword),
        html_escape(&element.name)
    );
    for step in element.all_steps() {
        html.push_str(&render_step(step));
    }
    html.push_str("</ul>\n</details>\n");
    html
}

/// Renders a single step line with its failure message.
fn render_step(step: &Step) -> String {
    let status = step.status().as_str();
    let mut html = format!(
        "<li class=\"{status}\">{}{} <small>({status}, {})</small>",
        html_escape(&step.keyword),
        html_escape(&step.name),
        format_duration(step.duration_nanos())
    );
    if let Some(message) = &step.result.error_message {
        html.push_str(&format!("<pre>{}</pre>", html_escape(message)));
    }
    html.push_str("</li>\n");
    html
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the feature name, falling back to its URI.
fn display_name(feature: &Feature) -> &str {
    if feature.name.is_empty() { &feature.uri } else { &feature.name }
}

/// Formats a nanosecond duration for display.
#[must_use]
pub fn format_duration(nanos: u64) -> String {
    const NANOS_PER_MILLI: u64 = 1_000_000;
    const NANOS_PER_SECOND: u64 = 1_000_000_000;
    if nanos < NANOS_PER_MILLI {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", nanos / NANOS_PER_MILLI);
    }
    let seconds = nanos / NANOS_PER_SECOND;
    let millis = (nanos % NANOS_PER_SECOND) / NANOS_PER_MILLI;
    format!("{seconds}.{millis:03}s")
}

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::ReportView;
    use super::format_duration;
    use super::html_escape;
    use super::render_overview;
    use crate::configuration::Classification;
    use crate::model::Element;
    use crate::model::Feature;
    use crate::model::Status;
    use crate::model::Step;
    use crate::model::StepResult;
    use crate::stats::FeatureStats;
    use crate::stats::ReportTotals;
    use crate::trends::Trends;

    fn feature_with_name(name: &str) -> Feature {
        Feature {
            name: name.to_string(),
            keyword: "Feature".to_string(),
            elements: vec![Element {
                name: "scenario".to_string(),
                keyword: "Scenario".to_string(),
                kind: "scenario".to_string(),
                steps: vec![Step {
                    keyword: "Then ".to_string(),
                    name: "status is 200".to_string(),
                    line: None,
                    result: StepResult {
                        status: Status::Failed,
                        duration: Some(2_000_000),
                        error_message: Some("got <404>".to_string()),
                    },
                }],
                ..Element::default()
            }],
            ..Feature::default()
        }
    }

    fn render(features: &[(Feature, FeatureStats)], expand: bool) -> String {
        let totals = ReportTotals::from_features(features.iter().map(|(_, stats)| stats));
        let classifications = vec![Classification::new("Release", "1.19")];
        let trends = Trends::default();
        render_overview(&ReportView {
            project_name: "Ingress Conformance Test",
            build_number: "1",
            generated_at: "2026-01-01T00:00:00Z",
            classifications: &classifications,
            features,
            totals: &totals,
            trends: &trends,
            expand_steps: expand,
            parallel_testing: false,
        })
    }

    #[test]
    fn escapes_result_text() {
        let feature = feature_with_name("<script>alert(1)</script>");
        let stats = FeatureStats::from_feature(&feature);
        let html = render(&[(feature, stats)], true);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("got &lt;404&gt;"));
        assert!(html.contains("<th>Release</th><td>1.19</td>"));
    }

    #[test]
    fn expand_mode_opens_scenarios() {
        let feature = feature_with_name("Default backend");
        let stats = FeatureStats::from_feature(&feature);
        let features = vec![(feature, stats)];
        assert!(render(&features, true).contains("<details open>"));
        assert!(!render(&features, false).contains("<details open>"));
    }

    #[test]
    fn empty_report_still_renders() {
        let html = render(&[], false);
        assert!(html.contains("No result files were found."));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn durations_are_human_readable() {
        assert_eq!(format_duration(999), "999ns");
        assert_eq!(format_duration(2_500_000), "2ms");
        assert_eq!(format_duration(1_234_000_000), "1.234s");
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(html_escape("a&\"'"), "a&amp;&quot;&#39;");
    }
}
