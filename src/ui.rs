use colored::Colorize;
use sentrykit::OperationResult;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Result Formatting
// ============================================================================

/// One line describing the outcome of a reconciliation
pub fn result_line(description: &str, result: &OperationResult) -> String {
    let marker = if result.failed {
        "✗".red()
    } else if result.changed {
        "✓".green()
    } else {
        "·".dimmed()
    };

    let status = if result.status_code == 0 {
        String::new()
    } else {
        format!(" ({})", result.status_code)
    };

    format!("{marker} {description}: {}{}", result.message, status.dimmed())
}

/// Short explanation extracted from a failed response body
pub fn failure_detail(result: &OperationResult) -> Option<String> {
    if !result.failed {
        return None;
    }
    match result.response.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.clone()),
        _ if result.response.is_null() => None,
        _ => Some(result.response.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
