//! Conversion between unified types and Gemini types

use super::types::{
    GeminiContent, GeminiFunctionCall, GeminiFunctionCallingConfig, GeminiFunctionDeclaration,
    GeminiFunctionResponse, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
    GeminiTool, GeminiToolConfig,
};
use crate::error::{Error, Result};
use crate::types::{
    ContentPart, FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Message,
    ResponseContent, Role, ToolCall, ToolChoice, Usage,
};
use serde_json::{json, Value as JsonValue};

/// Convert unified request to Gemini request
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GeminiRequest> {
    let mut system_texts: Vec<String> = req.system.iter().cloned().collect();
    let mut contents: Vec<GeminiContent> = Vec::new();

    for msg in &req.messages {
        if msg.role == Role::System {
            if let Some(text) = msg.text_content() {
                system_texts.push(text);
            }
            continue;
        }

        let content = to_gemini_content(msg)?;
        if content.parts.is_empty() {
            continue;
        }

        // Responses to one batch of calls travel together in a single turn.
        if msg.role == Role::Tool {
            if let Some(last) = contents.last_mut() {
                if is_function_response_turn(last) {
                    last.parts.extend(content.parts);
                    continue;
                }
            }
        }
        contents.push(content);
    }

    if contents.is_empty() {
        return Err(Error::provider_error("Gemini request needs at least one message"));
    }

    let system_instruction = if system_texts.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(system_texts.join("\n\n")),
                ..Default::default()
            }],
        })
    };

    let tools = req.options.tools.as_ref().filter(|t| !t.is_empty()).map(|tools| {
        vec![GeminiTool {
            function_declarations: tools
                .iter()
                .map(|tool| GeminiFunctionDeclaration {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: declared_parameters(&tool.parameters),
                })
                .collect(),
        }]
    });

    let tool_config = req.options.tool_choice.as_ref().and_then(|choice| match choice {
        ToolChoice::Auto => None,
        ToolChoice::None => Some(GeminiToolConfig {
            function_calling_config: GeminiFunctionCallingConfig {
                mode: "NONE".to_string(),
                allowed_function_names: None,
            },
        }),
        ToolChoice::Required { name } => Some(GeminiToolConfig {
            function_calling_config: GeminiFunctionCallingConfig {
                mode: "ANY".to_string(),
                allowed_function_names: Some(vec![name.clone()]),
            },
        }),
    });

    let opts = &req.options;
    let generation_config = if opts.temperature.is_some()
        || opts.top_p.is_some()
        || opts.top_k.is_some()
        || opts.max_tokens.is_some()
        || opts.stop_sequences.is_some()
    {
        Some(GeminiGenerationConfig {
            temperature: opts.temperature,
            top_p: opts.top_p,
            top_k: opts.top_k,
            max_output_tokens: opts.max_tokens,
            stop_sequences: opts.stop_sequences.clone(),
        })
    } else {
        None
    };

    Ok(GeminiRequest {
        contents,
        system_instruction,
        tools,
        tool_config,
        generation_config,
    })
}

fn declared_parameters(schema: &JsonValue) -> Option<JsonValue> {
    let empty = schema
        .get("properties")
        .and_then(JsonValue::as_object)
        .is_some_and(|props| props.is_empty());
    if empty || schema.is_null() {
        None
    } else {
        Some(schema.clone())
    }
}

fn is_function_response_turn(content: &GeminiContent) -> bool {
    !content.parts.is_empty() && content.parts.iter().all(|p| p.function_response.is_some())
}

/// Convert unified message to Gemini content
fn to_gemini_content(msg: &Message) -> Result<GeminiContent> {
    let role = match msg.role {
        Role::Assistant => "model",
        Role::User | Role::Tool => "user",
        Role::System => {
            return Err(Error::provider_error(
                "system messages go into the system instruction",
            ));
        }
    };

    let parts = msg
        .parts()
        .iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } if text.is_empty() => None,
            ContentPart::Text { text } => Some(GeminiPart {
                text: Some(text.clone()),
                ..Default::default()
            }),
            ContentPart::ToolCall {
                name,
                arguments,
                signature,
                ..
            } => Some(GeminiPart {
                function_call: Some(GeminiFunctionCall {
                    id: None,
                    name: name.clone(),
                    args: arguments.clone(),
                }),
                thought_signature: signature.clone(),
                ..Default::default()
            }),
            ContentPart::ToolResult { name, content, .. } => Some(GeminiPart {
                function_response: Some(GeminiFunctionResponse {
                    id: None,
                    name: name.clone(),
                    response: as_response_object(content),
                }),
                ..Default::default()
            }),
        })
        .collect();

    Ok(GeminiContent {
        role: Some(role.to_string()),
        parts,
    })
}

/// `functionResponse.response` must be an object.
fn as_response_object(content: &JsonValue) -> JsonValue {
    match content {
        JsonValue::Object(_) => content.clone(),
        other => json!({ "result": other }),
    }
}

/// Convert Gemini response to unified response
pub fn from_gemini_response(resp: GeminiResponse) -> Result<GenerateResponse> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(Error::provider_error(format!(
            "Gemini returned no answer: {}",
            reason
        )));
    };

    let mut content = Vec::new();
    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    for part in parts {
        if part.thought == Some(true) {
            continue;
        }
        if let Some(text) = part.text {
            if !text.is_empty() {
                content.push(ResponseContent::Text { text });
            }
        }
        if let Some(call) = part.function_call {
            content.push(ResponseContent::ToolCall(ToolCall {
                id: call
                    .id
                    .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple())),
                name: call.name,
                arguments: if call.args.is_null() {
                    json!({})
                } else {
                    call.args
                },
                signature: part.thought_signature,
            }));
        }
    }

    let has_calls = content
        .iter()
        .any(|c| matches!(c, ResponseContent::ToolCall(_)));
    let finish_reason = parse_finish_reason(candidate.finish_reason.as_deref(), has_calls);

    let usage = resp
        .usage_metadata
        .map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        content,
        usage,
        finish_reason,
    })
}

/// Parse Gemini finish reason to unified finish reason
pub fn parse_finish_reason(reason: Option<&str>, has_calls: bool) -> FinishReason {
    match reason {
        Some("STOP") if has_calls => FinishReason::with_raw(FinishReasonKind::ToolCalls, "STOP"),
        Some("STOP") => FinishReason::with_raw(FinishReasonKind::Stop, "STOP"),
        Some("MAX_TOKENS") => FinishReason::with_raw(FinishReasonKind::Length, "MAX_TOKENS"),
        Some(raw @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
            FinishReason::with_raw(FinishReasonKind::ContentFilter, raw)
        }
        Some(raw) => FinishReason::with_raw(FinishReasonKind::Other, raw),
        None => FinishReason::other(),
    }
}
