//! Built-in hive template patterns.

use hive_models::TemplateType;

use super::{DisplayConfig, TemplatePattern};

/// Identifier shape shared by task, worker and report ids.
const ID: &str = r"([A-Za-z0-9_\-]+)";

/// (name, type, regex, keyword, fields, icon, title, format)
type BuiltinRow = (
    &'static str,
    TemplateType,
    String,
    &'static str,
    &'static [&'static str],
    &'static str,
    &'static str,
    &'static str,
);

fn rows() -> Vec<BuiltinRow> {
    vec![
        (
            "task",
            TemplateType::Task,
            format!(r"\bTASK:{ID}:(.+)"),
            "TASK:",
            &["task_id", "instruction"],
            "📋",
            "TASK ASSIGNMENT",
            "Task ID: {task_id}\nInstruction: {instruction}",
        ),
        (
            "worker_result",
            TemplateType::WorkerResult,
            format!(r"\bWORKER_RESULT:{ID}:{ID}:(.+)"),
            "WORKER_RESULT:",
            &["worker_id", "task_id", "result"],
            "🔧",
            "WORKER RESULT",
            "Worker: {worker_id}\nTask ID: {task_id}\nResult: {result}",
        ),
        (
            "queen_report",
            TemplateType::QueenReport,
            format!(r"\bQUEEN_REPORT:{ID}:(.+)"),
            "QUEEN_REPORT:",
            &["report_id", "summary"],
            "👑",
            "QUEEN REPORT",
            "Report ID: {report_id}\nSummary: {summary}",
        ),
        (
            "approval",
            TemplateType::Approval,
            format!(r"\bAPPROVAL:(APPROVED|REJECTED|PENDING):{ID}(?::(.*))?"),
            "APPROVAL:",
            &["decision", "task_id", "comment"],
            "✅",
            "APPROVAL",
            "Decision: {decision}\nTask ID: {task_id}\nComment: {comment}",
        ),
        (
            "task_completion",
            TemplateType::TaskCompletion,
            format!(r"\bTASK_COMPLETE:{ID}(?::(.+))?"),
            "TASK_COMPLETE:",
            &["task_id", "summary"],
            "🏁",
            "TASK COMPLETED",
            "Task ID: {task_id}\nSummary: {summary}",
        ),
        (
            "system_alert",
            TemplateType::SystemAlert,
            r"\bALERT:(INFO|WARNING|ERROR|CRITICAL):(.+)".to_string(),
            "ALERT:",
            &["level", "message"],
            "🚨",
            "SYSTEM ALERT",
            "Level: {level}\nMessage: {message}",
        ),
        (
            "request",
            TemplateType::Request,
            format!(r"\bREQUEST:{ID}:(.+)"),
            "REQUEST:",
            &["request_id", "content"],
            "❓",
            "REQUEST",
            "Request ID: {request_id}\nContent: {content}",
        ),
        (
            "response",
            TemplateType::Response,
            format!(r"\bRESPONSE:{ID}:(.+)"),
            "RESPONSE:",
            &["request_id", "content"],
            "💬",
            "RESPONSE",
            "Request ID: {request_id}\nContent: {content}",
        ),
    ]
}

/// Build the default hive patterns, in library order.
pub fn builtin_patterns() -> Vec<TemplatePattern> {
    rows()
        .into_iter()
        .map(|(name, template_type, regex, keyword, fields, icon, title, format)| {
            TemplatePattern::new(
                name,
                template_type,
                &regex,
                fields.iter().map(|f| f.to_string()).collect(),
                DisplayConfig::new(icon, title, format),
            )
            .expect("built-in template pattern is valid")
            .with_keyword(keyword)
        })
        .collect()
}
