use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::time::{Duration, timeout};

use crate::error::AIError;
use crate::session::Exchange;

/// Schema handed to the model so structured fields are always present.
/// Free-text fields still pass through the output validator afterwards.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
}

pub fn world_schema() -> ResponseSchema {
    ResponseSchema {
        name: "world_proposal",
        schema: json!({
            "type": "object",
            "properties": {
                "location": { "type": "string" },
                "quest_goal": { "type": "string" },
                "total_encounters": { "type": "integer" }
            },
            "required": ["location", "quest_goal", "total_encounters"],
            "additionalProperties": false
        }),
    }
}

pub fn encounter_schema() -> ResponseSchema {
    ResponseSchema {
        name: "encounter_proposal",
        schema: json!({
            "type": "object",
            "properties": {
                "encounter_type": { "type": "string" },
                "difficulty": { "type": "integer" }
            },
            "required": ["encounter_type", "difficulty"],
            "additionalProperties": false
        }),
    }
}

pub fn narrative_schema() -> ResponseSchema {
    ResponseSchema {
        name: "narrative_proposal",
        schema: json!({
            "type": "object",
            "properties": {
                "narration": { "type": "string" }
            },
            "required": ["narration"],
            "additionalProperties": false
        }),
    }
}

pub fn line_schema() -> ResponseSchema {
    ResponseSchema {
        name: "line_proposal",
        schema: json!({
            "type": "object",
            "properties": {
                "line": { "type": "string" }
            },
            "required": ["line"],
            "additionalProperties": false
        }),
    }
}

// Untrusted proposals parsed out of model output. Nothing here mutates
// game state; the orchestrator and quest machine commit or override.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldProposal {
    pub location: String,
    pub quest_goal: String,
    pub total_encounters: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterProposal {
    pub encounter_type: String,
    pub difficulty: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeProposal {
    pub narration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineProposal {
    pub line: String,
}

pub fn parse_proposal<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, AIError> {
    serde_json::from_str(raw)
        .map_err(|e| AIError::ResponseParseError(format!("{e}: {raw}")))
}

/// The opaque generative capability. Non-deterministic, variable latency,
/// occasionally malformed; callers must treat every reply as a proposal.
pub trait ModelClient {
    fn respond(
        &self,
        instructions: &str,
        history: &[Exchange],
        prompt: &str,
        schema: &ResponseSchema,
    ) -> impl Future<Output = Result<String, AIError>>;
}

pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, request_timeout_secs: u64) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenAiClient {
            client: Client::with_config(config),
            model,
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    fn build_messages(
        instructions: &str,
        history: &[Exchange],
        prompt: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, AIError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(instructions)
                .build()?
                .into(),
        ];
        for exchange in history {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(exchange.prompt.as_str())
                    .build()?
                    .into(),
            );
            messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(exchange.response.as_str())
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );
        Ok(messages)
    }
}

impl ModelClient for OpenAiClient {
    async fn respond(
        &self,
        instructions: &str,
        history: &[Exchange],
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<String, AIError> {
        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: schema.name.into(),
                schema: Some(schema.schema.clone()),
                strict: Some(true),
            },
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.7)
            .response_format(response_format)
            .messages(Self::build_messages(instructions, history, prompt)?)
            .build()?;

        let response = timeout(self.request_timeout, self.client.chat().create(request))
            .await
            .map_err(|_| AIError::Timeout)??;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AIError::NoMessageFound)
    }
}
