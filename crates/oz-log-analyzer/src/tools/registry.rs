//! Tool registry: look up log tools by name and dispatch calls.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::AnalyzerConfig;
use crate::error::{LogError, LogResult};
use crate::source::LogSource;
use crate::types::{LogTool, ToolResult};

/// Metadata about a registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Log tools indexed by name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn LogTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn LogTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with every tool, configured with `config`.
    pub fn with_defaults(config: &AnalyzerConfig) -> Self {
        Self::new(super::all_tools(config))
    }

    pub fn get(&self, name: &str) -> Option<&dyn LogTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Execute the named tool.
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        source: &dyn LogSource,
    ) -> LogResult<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| LogError::InvalidArgument(format!("unknown tool: {name}")))?;
        tool.execute(args, source).await
    }

    /// All registered tools in registration order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
