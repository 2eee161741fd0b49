//! Tests for the template formatter.

use std::sync::Arc;

use hive_models::{TemplateMatch, TemplateType};

use super::*;
use crate::detector::TemplateDetector;
use crate::templates::TemplateLibrary;

fn formatter() -> TemplateFormatter {
    TemplateFormatter::new(Arc::new(TemplateLibrary::builtin()))
}

fn detect(text: &str) -> Vec<TemplateMatch> {
    TemplateDetector::with_builtin().detect_all(text)
}

fn manual_match(template_type: TemplateType, pattern: &str, groups: &[&str], confidence: f64) -> TemplateMatch {
    TemplateMatch {
        template_type,
        full_match: groups.join(":"),
        groups: groups.iter().map(|g| g.to_string()).collect(),
        confidence,
        pattern: pattern.to_string(),
        span: (0, 0),
    }
}

#[test]
fn test_truncate_short_text_untouched() {
    assert_eq!(truncate_for_display("short", CONTENT_DISPLAY_LIMIT), "short");

    let exact = "x".repeat(CONTENT_DISPLAY_LIMIT);
    assert_eq!(truncate_for_display(&exact, CONTENT_DISPLAY_LIMIT), exact);
}

#[test]
fn test_truncate_long_text() {
    let long = "a".repeat(150);
    let shown = truncate_for_display(&long, CONTENT_DISPLAY_LIMIT);

    assert_eq!(shown.chars().count(), CONTENT_DISPLAY_LIMIT);
    assert!(shown.ends_with("..."));
    assert_eq!(&shown[..97], &long[..97]);
}

#[test]
fn test_truncate_counts_characters_not_bytes() {
    let long = "あ".repeat(120);
    let shown = truncate_for_display(&long, CONTENT_DISPLAY_LIMIT);

    assert_eq!(shown.chars().count(), CONTENT_DISPLAY_LIMIT);
    assert!(shown.starts_with(&"あ".repeat(97)));
}

#[test]
fn test_task_panel() {
    let matches = detect("TASK:T001:Implement login");
    assert_eq!(matches.len(), 1);

    let out = formatter().format_template_display(&matches[0]);

    assert!(out.contains("📋 TASK ASSIGNMENT"));
    assert!(out.contains("Task ID: T001"));
    assert!(out.contains("Instruction: Implement login"));
    assert!(out.contains("Confidence: 1.00"));
    assert!(out.contains("pattern: task"));
    assert!(!out.contains("TEMPLATE DETECTED"));
}

#[test]
fn test_display_truncates_but_match_is_unchanged() {
    let instruction = "b".repeat(300);
    let matches = detect(&format!("TASK:T1:{}", instruction));
    let out = formatter().format_template_display(&matches[0]);

    assert!(out.contains(&format!("Instruction: {}...", "b".repeat(97))));
    assert!(!out.contains(&"b".repeat(98)));
    assert_eq!(matches[0].groups[1], instruction);
}

#[test]
fn test_empty_optional_group_renders_dash() {
    let matches = detect("APPROVAL:APPROVED:T7");
    let out = formatter().format_template_display(&matches[0]);

    assert!(out.contains("Decision: APPROVED"));
    assert!(out.contains("Comment: -"));
}

#[test]
fn test_missing_display_config_falls_back() {
    let formatter = TemplateFormatter::new(Arc::new(TemplateLibrary::new()));
    let m = manual_match(TemplateType::QueenReport, "gone", &["R1", "all green"], 0.9);

    let out = formatter.format_template_display(&m);

    assert!(out.contains("TEMPLATE DETECTED"));
    assert!(out.contains("Type: queen_report"));
    assert!(out.contains("Field 1: R1"));
    assert!(out.contains("Field 2: all green"));
    assert!(out.contains("Confidence: 0.90"));
}

#[test]
fn test_display_falls_back_to_same_type_pattern() {
    // Pattern name unknown, but the library still has a task display.
    let m = manual_match(TemplateType::Task, "renamed", &["T5", "ship it"], 1.0);
    let out = formatter().format_template_display(&m);

    assert!(out.contains("TASK ASSIGNMENT"));
    assert!(out.contains("Task ID: T5"));
}

#[test]
fn test_multiple_templates_in_order() {
    let matches = detect("TASK:T1:build it\nWORKER_RESULT:W1:T1:done");
    let out = formatter().format_multiple_templates(&matches);

    assert!(out.starts_with("🔍 2 TEMPLATES DETECTED"));
    let first = out.find("[1] task").unwrap();
    let second = out.find("[2] worker_result").unwrap();
    assert!(first < second);
    assert!(out.contains("Worker: W1"));
}

#[test]
fn test_summary_counts_and_best_match() {
    let matches = vec![
        manual_match(TemplateType::Task, "task", &["T1", "a"], 0.9),
        manual_match(TemplateType::Approval, "approval", &["APPROVED", "T1"], 0.9),
        manual_match(TemplateType::Task, "task", &["T2", "b"], 0.75),
    ];
    let out = formatter().format_template_summary(&matches);

    assert!(out.contains("(3 matches)"));
    assert!(out.contains("task: 2"));
    assert!(out.contains("approval: 1"));
    assert!(out.find("task: 2").unwrap() < out.find("approval: 1").unwrap());
    // Tie at 0.90 goes to the earliest match.
    assert!(out.contains("Highest confidence: task (0.90) via pattern 'task'"));
}

#[test]
fn test_summary_of_nothing() {
    let out = formatter().format_template_summary(&[]);
    assert!(out.contains("(0 matches)"));
    assert!(out.contains("(none)"));
}

#[test]
fn test_no_template_panel() {
    let mut formatter = formatter();
    let message = "通常のメッセージです。";
    let matches = detect(message);
    assert!(matches.is_empty());

    let out = formatter.format_detection(message, &matches);

    assert!(out.contains("NO TEMPLATE DETECTED"));
    assert!(out.contains(message));
    assert_eq!(formatter.history().len(), 1);
}

#[test]
fn test_format_detection_dispatch_and_history() {
    let mut formatter = formatter();

    let single = detect("TASK:T1:go");
    assert!(formatter.format_detection("TASK:T1:go", &single).contains("TASK ASSIGNMENT"));

    let text = "TASK:T2:go\nALERT:ERROR:disk full";
    let many = detect(text);
    assert!(formatter.format_detection(text, &many).contains("2 TEMPLATES DETECTED"));

    formatter.format_detection("plain", &[]);

    let summary = formatter.get_history_summary(2);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].message, text);
    assert_eq!(
        summary[0].template_types,
        vec![TemplateType::Task, TemplateType::SystemAlert]
    );
    assert_eq!(summary[1].match_count, 0);
    assert_eq!(formatter.get_history_summary(10).len(), 3);
}

#[test]
fn test_history_capacity() {
    let mut formatter = formatter().with_history_capacity(2);
    for text in ["a", "b", "c"] {
        formatter.format_detection(text, &[]);
    }

    let messages: Vec<&str> = formatter
        .get_history_summary(5)
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages, vec!["b", "c"]);
}

#[test]
fn test_render_history_summary() {
    let mut formatter = formatter();
    assert!(formatter.render_history_summary(5).contains("(empty)"));

    let matches = detect("TASK:T1:go");
    formatter.format_detection("TASK:T1:go", &matches);
    formatter.format_detection("hello", &[]);

    let out = formatter.render_history_summary(5);
    assert!(out.contains("last 2 of 2"));
    assert!(out.contains("1 match(es) [task] TASK:T1:go"));
    assert!(out.contains("0 match(es) [-] hello"));
}

#[test]
fn test_format_detection_records_each_call() {
    let mut formatter = formatter();
    let matches = detect("TASK:T1:go\nTASK:T2:stop");

    formatter.format_detection("TASK:T1:go\nTASK:T2:stop", &matches);
    formatter.format_detection("again", &[]);

    assert_eq!(formatter.history().len(), 2);
    assert_eq!(formatter.history().total_matches(), 2);
}

#[test]
fn test_captured_placeholder_text_is_not_substituted() {
    use crate::templates::{DisplayConfig, TemplatePattern};

    let mut library = TemplateLibrary::new();
    library.insert(
        TemplatePattern::new(
            "req",
            TemplateType::Request,
            r"REQ:(.+)\|(.+)",
            vec!["a".to_string(), "b".to_string()],
            DisplayConfig::new("❓", "REQ", "A: {a}\nB: {b}\nC: {c}"),
        )
        .unwrap(),
    );
    let library = Arc::new(library);
    let matches = TemplateDetector::new(Arc::clone(&library)).detect_all("REQ:see {b}|SECRET");

    let out = TemplateFormatter::new(library).format_template_display(&matches[0]);

    assert!(out.contains("A: see {b}"));
    assert!(out.contains("B: SECRET"));
    assert!(!out.contains("A: see SECRET"));
    // Placeholders without a field are left as written.
    assert!(out.contains("C: {c}"));
}
