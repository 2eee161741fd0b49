//! Integration tests for the detect → format → history flow.

use std::fs;
use std::sync::Arc;

use hive_core::{
    parse_user_prompt, CoreConfig, HiveEngine, TemplateDetector, TemplateFormatter,
    TemplateLibrary,
};
use hive_models::{Intent, MessagePriority, TemplateType, WorkerRole};
use tempfile::TempDir;

#[test]
fn test_queen_worker_exchange() {
    let mut engine = HiveEngine::default();

    let assign = engine.process_message("TASK:T42:Write the migration script");
    assert_eq!(assign.matches.len(), 1);
    assert_eq!(assign.matches[0].group(0), Some("T42"));

    let result = engine.process_message("WORKER_RESULT:dev-1:T42:script merged");
    assert_eq!(result.matches[0].template_type, TemplateType::WorkerResult);
    assert_eq!(result.matches[0].group(0), Some("dev-1"));

    let approval = engine.process_message("APPROVAL:APPROVED:T42:looks good");
    assert_eq!(approval.matches[0].template_type, TemplateType::Approval);
    assert!(approval.rendered.contains("Comment: looks good"));

    let history = engine.formatter().get_history_summary(10);
    let types: Vec<TemplateType> = history.iter().flat_map(|e| e.template_types.clone()).collect();
    assert_eq!(
        types,
        vec![TemplateType::Task, TemplateType::WorkerResult, TemplateType::Approval]
    );
}

#[test]
fn test_custom_directory_extends_detection_and_display() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("10_deploy.yaml"),
        r#"
name: deploy
template_type: request
pattern: '\bDEPLOY:(\w+):(\w+)'
keyword: 'DEPLOY:'
fields: [service, environment]
display:
  icon: "🚀"
  title: DEPLOY REQUEST
  format: "Service: {service}\nEnvironment: {environment}"
"#,
    )
    .unwrap();
    fs::write(dir.path().join("20_broken.json"), "{ not json").unwrap();

    let config = CoreConfig::new().with_template_dir(dir.path());
    let (mut engine, report) = HiveEngine::from_config(&config).unwrap();

    assert_eq!(report.loaded, vec!["deploy"]);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].path.ends_with("20_broken.json"));

    let processed = engine.process_message("DEPLOY:api:staging");
    assert_eq!(processed.matches.len(), 1);
    let m = &processed.matches[0];
    assert_eq!(m.template_type, TemplateType::Request);
    assert_eq!(m.pattern, "deploy");
    assert_eq!(m.confidence, 1.0);
    assert!(processed.rendered.contains("🚀 DEPLOY REQUEST"));
    assert!(processed.rendered.contains("Environment: staging"));
}

#[test]
fn test_shared_library_between_detector_and_formatter() {
    let library = Arc::new(TemplateLibrary::builtin());
    let detector = TemplateDetector::new(Arc::clone(&library));
    let mut formatter = TemplateFormatter::new(library);

    let text = "ALERT:CRITICAL:queen unreachable";
    let matches = detector.detect_all(text);
    let out = formatter.format_detection(text, &matches);

    assert!(out.contains("🚨 SYSTEM ALERT"));
    assert!(out.contains("Level: CRITICAL"));
    assert_eq!(formatter.history().total_matches(), 1);

    let json = formatter.history().to_json().unwrap();
    assert!(json.contains("system_alert"));
}

#[test]
fn test_prompt_routing() {
    let analysis = parse_user_prompt("Add tests for https://github.com/acme/hive/issues/88 asap");

    assert_eq!(analysis.issue_number.as_deref(), Some("88"));
    assert_eq!(analysis.intent, Intent::AddFeature);
    assert_eq!(analysis.priority, MessagePriority::Critical);
    assert!(analysis.mentions_test);
    assert_eq!(analysis.routing_hint(), WorkerRole::Developer);
}
