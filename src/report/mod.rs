// src/report/mod.rs

use crate::model::TripResult;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Renders a trip for the terminal. Pure: the same result always renders
/// to the same text.
pub fn format_result(result: &TripResult) -> String {
    match (result.weather(), result.activities()) {
        (Some(weather), Some(plan)) if result.is_success() => {
            let rule = "=".repeat(RULE_WIDTH);
            let mut out = String::new();

            let _ = writeln!(out, "{rule}");
            let _ = writeln!(out, "🌏 COMPLETE TRIP PLAN");
            let _ = writeln!(out, "{rule}");
            let _ = writeln!(out);
            let _ = writeln!(out, "📍 Location: {}", result.location());
            let _ = writeln!(out);
            let _ = writeln!(out, "{weather}");
            let _ = writeln!(out);
            let _ = writeln!(out, "🎯 Activity Suggestions for {}:", result.location());

            for (i, activity) in plan.activities.iter().enumerate() {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}. {}", i + 1, activity.title);
                if !activity.description.is_empty() {
                    let _ = writeln!(out, "   {}", activity.description);
                }
            }

            let _ = writeln!(out);
            let _ = write!(out, "{rule}");
            out
        }
        _ => failure_line(result),
    }
}

fn failure_line(result: &TripResult) -> String {
    let reason = if result.errors().is_empty() {
        "incomplete result".to_string()
    } else {
        result.errors().join("; ")
    };
    format!("❌ Failed to plan trip for {}: {reason}", result.location())
}
