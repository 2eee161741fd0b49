//! Human-readable rendering of detected templates.
//!
//! Rendering is best-effort and never fails: a match whose template type
//! has no display configuration gets a generic "TEMPLATE DETECTED" panel.
//! Long fields are shortened for display only; the matches themselves are
//! never modified.
//!
//! [`TemplateFormatter::format_detection`] is the entry point used per
//! inbound message. It picks the right panel and records the call in a
//! bounded [`DetectionHistory`].

mod history;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use hive_models::{TemplateMatch, TemplateType};
use regex::{Captures, Regex};
use tracing::debug;

use crate::templates::{DisplayConfig, TemplateLibrary};

pub use self::history::{DetectionHistory, DetectionHistoryEntry, DEFAULT_HISTORY_CAPACITY};

/// Display budget for a content field, in characters.
pub const CONTENT_DISPLAY_LIMIT: usize = 100;

/// Suffix appended to shortened fields.
pub const ELLIPSIS: &str = "...";

const PANEL_TOP: &str = "╭─";
const PANEL_SIDE: &str = "│";
const PANEL_BOTTOM: &str = "╰─";

/// `{field}` placeholder in a display format.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("Invalid placeholder regex"));

/// Shorten `text` to at most `limit` characters for display.
///
/// Counts Unicode scalar values, so multi-byte text is never split.
pub fn truncate_for_display(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.chars().count());
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Renders template matches into text panels and keeps a detection history.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    library: Arc<TemplateLibrary>,
    history: DetectionHistory,
}

impl TemplateFormatter {
    /// Create a formatter sharing the detector's library.
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self {
            library,
            history: DetectionHistory::default(),
        }
    }

    /// Set how many history entries are retained.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = DetectionHistory::new(capacity);
        self
    }

    /// The detection history.
    pub fn history(&self) -> &DetectionHistory {
        &self.history
    }

    /// Render one match.
    ///
    /// Uses the display configuration of the pattern that produced the
    /// match, then that of any pattern of the same type, then the generic
    /// panel.
    pub fn format_template_display(&self, m: &TemplateMatch) -> String {
        let configured = self
            .library
            .get(&m.pattern)
            .filter(|p| p.template_type == m.template_type)
            .or_else(|| self.library.first_of_type(m.template_type));

        match configured {
            Some(pattern) => render_configured(&pattern.display, &pattern.fields, m),
            None => {
                debug!(template_type = %m.template_type, pattern = %m.pattern, "No display config, using generic panel");
                render_generic(m)
            }
        }
    }

    /// Render several matches in input order, each with its index and confidence.
    pub fn format_multiple_templates(&self, matches: &[TemplateMatch]) -> String {
        let mut out = format!("🔍 {} TEMPLATES DETECTED\n", matches.len());
        for (i, m) in matches.iter().enumerate() {
            out.push_str(&format!(
                "\n[{}] {} (confidence: {:.2})\n",
                i + 1,
                m.template_type,
                m.confidence
            ));
            out.push_str(&self.format_template_display(m));
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    /// Aggregate counts per template type plus the highest-confidence match.
    ///
    /// Types are listed in order of first occurrence; ties for highest
    /// confidence go to the earliest match.
    pub fn format_template_summary(&self, matches: &[TemplateMatch]) -> String {
        let mut out = format!("📊 TEMPLATE SUMMARY ({} matches)\n", matches.len());
        if matches.is_empty() {
            out.push_str("  (none)");
            return out;
        }

        for (template_type, count) in count_by_type(matches) {
            out.push_str(&format!("  {}: {}\n", template_type, count));
        }

        if let Some(best) = highest_confidence(matches) {
            out.push_str(&format!(
                "Highest confidence: {} ({:.2}) via pattern '{}'",
                best.template_type, best.confidence, best.pattern
            ));
        }
        out.trim_end().to_string()
    }

    /// Render the panel for a message that carries no template.
    pub fn format_no_template(&self, message: &str) -> String {
        let lines = vec![format!(
            "Message: {}",
            truncate_for_display(message, CONTENT_DISPLAY_LIMIT)
        )];
        panel("💬", "NO TEMPLATE DETECTED", &lines, None)
    }

    /// Render the detection result for `message` and record it in the history.
    pub fn format_detection(&mut self, message: &str, matches: &[TemplateMatch]) -> String {
        let rendered = match matches {
            [] => self.format_no_template(message),
            [single] => self.format_template_display(single),
            many => self.format_multiple_templates(many),
        };

        let recorded = self.history.record(message, matches).match_count;
        debug!(matches = recorded, history = self.history.len(), "Recorded detection");

        rendered
    }

    /// The last `n` history entries, oldest first.
    pub fn get_history_summary(&self, n: usize) -> Vec<&DetectionHistoryEntry> {
        self.history.recent(n).collect()
    }

    /// Render the last `n` history entries.
    pub fn render_history_summary(&self, n: usize) -> String {
        let entries = self.get_history_summary(n);
        let mut out = format!("📜 DETECTION HISTORY (last {} of {})\n", entries.len(), self.history.len());
        if entries.is_empty() {
            out.push_str("  (empty)");
            return out;
        }

        for entry in entries {
            let types = if entry.template_types.is_empty() {
                "-".to_string()
            } else {
                entry
                    .template_types
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            out.push_str(&format!(
                "  [{}] {} match(es) [{}] {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.match_count,
                types,
                truncate_for_display(&entry.message, 50)
            ));
        }
        out.trim_end().to_string()
    }
}

/// Counts per template type, in order of first occurrence.
fn count_by_type(matches: &[TemplateMatch]) -> Vec<(TemplateType, usize)> {
    let mut order: Vec<TemplateType> = Vec::new();
    let mut counts: HashMap<TemplateType, usize> = HashMap::new();
    for m in matches {
        let count = counts.entry(m.template_type).or_insert(0);
        if *count == 0 {
            order.push(m.template_type);
        }
        *count += 1;
    }
    order
        .into_iter()
        .map(|t| (t, counts.get(&t).copied().unwrap_or(0)))
        .collect()
}

/// The first match holding the maximum confidence.
fn highest_confidence(matches: &[TemplateMatch]) -> Option<&TemplateMatch> {
    matches.iter().fold(None, |best, m| match best {
        Some(b) if b.confidence >= m.confidence => Some(b),
        _ => Some(m),
    })
}

/// Render with a configured display descriptor.
///
/// Placeholders are filled in one pass, so captured text that happens to
/// contain `{field}` is shown literally. Unknown placeholders are kept.
fn render_configured(display: &DisplayConfig, fields: &[String], m: &TemplateMatch) -> String {
    let body = PLACEHOLDER_REGEX.replace_all(&display.format, |caps: &Captures<'_>| {
        match fields.iter().position(|f| *f == caps[1]) {
            Some(i) => m
                .group(i)
                .map(|g| truncate_for_display(g, CONTENT_DISPLAY_LIMIT))
                .unwrap_or_else(|| "-".to_string()),
            None => caps[0].to_string(),
        }
    });

    let mut lines: Vec<String> = body.lines().map(str::to_string).collect();
    lines.push(format!("Confidence: {:.2}", m.confidence));
    panel(&display.icon, &display.title, &lines, Some(&m.pattern))
}

/// Fallback rendering that needs no configuration.
fn render_generic(m: &TemplateMatch) -> String {
    let mut lines = vec![
        format!("Type: {}", m.template_type),
        format!("Pattern: {}", m.pattern),
    ];
    for (i, group) in m.groups.iter().enumerate() {
        lines.push(format!(
            "Field {}: {}",
            i + 1,
            truncate_for_display(group, CONTENT_DISPLAY_LIMIT)
        ));
    }
    lines.push(format!("Confidence: {:.2}", m.confidence));
    panel("📨", "TEMPLATE DETECTED", &lines, None)
}

fn panel(icon: &str, title: &str, lines: &[String], footer: Option<&str>) -> String {
    let mut out = format!("{} {} {}\n", PANEL_TOP, icon, title);
    for line in lines {
        out.push_str(&format!("{} {}\n", PANEL_SIDE, line));
    }
    match footer {
        Some(pattern) => out.push_str(&format!("{} pattern: {}", PANEL_BOTTOM, pattern)),
        None => out.push_str(PANEL_BOTTOM),
    }
    out
}
