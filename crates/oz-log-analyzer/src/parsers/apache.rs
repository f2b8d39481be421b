//! Apache/NCSA access log parser (common and combined grammars).

use regex::Regex;
use std::sync::LazyLock;

use crate::timestamp::parse_apache_timestamp;
use crate::types::{LogFormat, LogRecord};

// host ident user [ts] "request" status bytes ["referer" "user-agent"]
static RE_ACCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<client>\S+) (?P<ident>\S+) (?P<user>\S+) \[(?P<ts>[^\]]+)\] "(?P<request>[^"]*)" (?P<status>\d{3}) (?P<bytes>\d+|-)(?: "(?P<referer>[^"]*)" "(?P<agent>[^"]*)")?\s*$"#,
    )
    .unwrap()
});

/// Parse an access log line. Access logs carry no level; the message is the
/// request line.
pub fn parse(line: &str) -> LogRecord {
    let Some(caps) = RE_ACCESS.captures(line) else {
        return LogRecord::degraded(line, LogFormat::Apache);
    };

    let request = &caps["request"];
    let mut record = LogRecord::structured(line, request, LogFormat::Apache);
    record.timestamp = parse_apache_timestamp(&caps["ts"]);

    let fields = &mut record.fields;
    for name in ["client", "ident", "user", "request", "status", "bytes"] {
        fields.insert(name.to_string(), caps[name].to_string());
    }
    if let Some(referer) = caps.name("referer") {
        fields.insert("referer".into(), referer.as_str().to_string());
    }
    if let Some(agent) = caps.name("agent") {
        fields.insert("user_agent".into(), agent.as_str().to_string());
    }

    let parts: Vec<&str> = request.split_whitespace().collect();
    if let [method, path, protocol] = parts.as_slice() {
        fields.insert("method".into(), (*method).to_string());
        fields.insert("path".into(), (*path).to_string());
        fields.insert("protocol".into(), (*protocol).to_string());
    }
    record
}

/// Check if a line matches the access log grammar.
pub fn looks_like_apache(line: &str) -> bool {
    RE_ACCESS.is_match(line)
}
