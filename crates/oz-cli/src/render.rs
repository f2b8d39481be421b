//! Human-readable rendering of tool results.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use oz_log_analyzer::{LogLevel, LogRecord, ToolInfo, ToolResult};

/// Print a tool result the way a person wants to read it.
pub fn render(result: &ToolResult, out: &mut impl Write) -> io::Result<()> {
    let Some(data) = &result.data else {
        if let Some(summary) = &result.summary {
            writeln!(out, "{summary}")?;
        }
        return Ok(());
    };
    match result.tool_name.as_str() {
        "analyze_logs" => render_statistics(data, out),
        "filter_logs" | "tail_logs" => render_records(data, out),
        _ => match &result.summary {
            Some(summary) => writeln!(out, "{summary}"),
            None => Ok(()),
        },
    }
}

/// Print any result as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// One entry per tool: name and description, then its arguments with
/// optional ones marked `?`.
pub fn render_tools(tools: &[ToolInfo], out: &mut impl Write) -> io::Result<()> {
    for tool in tools {
        writeln!(out, "{:<14} {}", tool.name, tool.description)?;
        let required: Vec<&str> = tool.schema["required"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect();
        let mut args: Vec<String> = required.iter().map(|name| name.to_string()).collect();
        if let Some(properties) = tool.schema["properties"].as_object() {
            args.extend(
                properties
                    .keys()
                    .filter(|key| !required.contains(&key.as_str()))
                    .map(|key| format!("{key}?")),
            );
        }
        writeln!(out, "    args: {}", args.join(", "))?;
    }
    Ok(())
}

/// One line per followed record: the original text.
pub fn render_record(record: &LogRecord, out: &mut impl Write) -> io::Result<()> {
    if record.raw.is_empty() {
        writeln!(out, "{}", record.reconstruct())
    } else {
        writeln!(out, "{}", record.raw)
    }
}

fn render_statistics(data: &Value, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "File:          {}", text(&data["path"]))?;
    writeln!(out, "Format:        {}", text(&data["format"]))?;
    writeln!(out, "Total entries: {}", data["total_entries"])?;

    if let Some(levels) = data["level_counts"].as_object()
        && !levels.is_empty()
    {
        writeln!(out, "Levels:")?;
        for level in LogLevel::ALL {
            if let Some(count) = levels.get(level.as_str()) {
                writeln!(out, "  {:<9} {count}", level.as_str())?;
            }
        }
    }
    for (key, label) in [
        ("unleveled_entries", "Without level"),
        ("degraded_entries", "Unparsed"),
    ] {
        if data[key].as_u64().is_some_and(|n| n > 0) {
            writeln!(out, "{label}: {}", data[key])?;
        }
    }
    if let Some(range) = data["time_range"].as_object() {
        writeln!(
            out,
            "Time range:    {} .. {}",
            text(&range["start"]),
            text(&range["end"])
        )?;
    }
    if let Some(messages) = data["common_messages"].as_array()
        && !messages.is_empty()
    {
        writeln!(out, "Most common messages:")?;
        for m in messages {
            writeln!(out, "  {:>6}  {}", m["count"], text(&m["message"]))?;
        }
    }
    Ok(())
}

fn render_records(data: &Value, out: &mut impl Write) -> io::Result<()> {
    for record in data["records"].as_array().into_iter().flatten() {
        writeln!(out, "{}", text(&record["raw"]))?;
    }
    Ok(())
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
