// SPDX-License-Identifier: MIT

//! Prompt templates for the model-backed tools.
//!
//! `build_prompt` is a pure, total function: every known tool name maps to a
//! fixed template, anything else falls back to a generic template embedding
//! the serialized arguments. Missing optional arguments fall back to literal
//! defaults; missing required arguments substitute the empty string. Schema
//! validation belongs to the tool descriptors, not here.

use serde_json::{Map, Value};

fn arg<'a>(arguments: &'a Map<String, Value>, key: &str, default: &'a str) -> &'a str {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
}

/// Build the specialized prompt for a model-backed tool invocation.
pub fn build_prompt(tool_name: &str, arguments: &Map<String, Value>) -> String {
    match tool_name {
        "claude_code_review" => {
            let code = arg(arguments, "code", "");
            let language = arg(arguments, "language", "");
            let header = if language.is_empty() { "code" } else { language };
            let context = arg(arguments, "context", "No additional context provided");
            format!(
                "Please review this {header} code and provide detailed feedback:\n\
                 \n\
                 Code:\n\
                 ```{language}\n\
                 {code}\n\
                 ```\n\
                 \n\
                 Context: {context}\n\
                 \n\
                 Please provide:\n\
                 1. Code quality assessment\n\
                 2. Potential bugs or issues\n\
                 3. Performance improvements\n\
                 4. Best practices recommendations\n\
                 5. Security considerations (if applicable)\n"
            )
        }
        "claude_deployment_planning" => {
            let project_type = arg(arguments, "project_type", "");
            let requirements = arg(arguments, "requirements", "Standard deployment");
            let constraints = arg(arguments, "constraints", "None specified");
            format!(
                "Create a comprehensive deployment strategy for this project:\n\
                 \n\
                 Project Type: {project_type}\n\
                 Requirements: {requirements}\n\
                 Constraints: {constraints}\n\
                 \n\
                 Please provide:\n\
                 1. Deployment architecture recommendation\n\
                 2. Step-by-step deployment plan\n\
                 3. Required infrastructure\n\
                 4. Security considerations\n\
                 5. Monitoring and maintenance strategy\n\
                 6. Rollback procedures\n"
            )
        }
        "claude_error_diagnosis" => {
            let error_log = arg(arguments, "error_log", "");
            let system_info = arg(arguments, "system_info", "Not provided");
            let deployment_context = arg(arguments, "deployment_context", "Not provided");
            format!(
                "Diagnose this deployment error and provide solutions:\n\
                 \n\
                 Error Log:\n\
                 {error_log}\n\
                 \n\
                 System Info: {system_info}\n\
                 Deployment Context: {deployment_context}\n\
                 \n\
                 Please provide:\n\
                 1. Root cause analysis\n\
                 2. Immediate fix recommendations\n\
                 3. Prevention strategies\n\
                 4. Related issues to check\n\
                 5. Step-by-step troubleshooting guide\n"
            )
        }
        "claude_optimize_config" => {
            let config_content = arg(arguments, "config_content", "");
            let config_type = arg(arguments, "config_type", "");
            let goals = arg(arguments, "optimization_goals", "General optimization");
            format!(
                "Optimize this {config_type} configuration:\n\
                 \n\
                 Configuration:\n\
                 ```{config_type}\n\
                 {config_content}\n\
                 ```\n\
                 \n\
                 Optimization Goals: {goals}\n\
                 \n\
                 Please provide:\n\
                 1. Optimized configuration\n\
                 2. Explanation of changes\n\
                 3. Performance impact\n\
                 4. Security improvements\n\
                 5. Best practices applied\n"
            )
        }
        _ => {
            let serialized = serde_json::to_string_pretty(&Value::Object(arguments.clone()))
                .unwrap_or_else(|_| "{}".to_string());
            format!("Process this request: {serialized}")
        }
    }
}
