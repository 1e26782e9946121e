use reqwest::Response;
use serde::{Deserialize, Serialize};

use super::{LlmError, Prompt, ResponseMode};

pub fn build_request(model: String, prompt: Prompt) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: prompt.system,
            },
            ChatMessage {
                role: "user".into(),
                content: prompt.user,
            },
        ],
        temperature: 0.2,
        top_p: 1.0,
        max_tokens: 2048,
        response_format: match prompt.mode {
            ResponseMode::Json => Some(ResponseFormat {
                r#type: "json_object".into(),
            }),
            ResponseMode::Text => None,
        },
    }
}

pub async fn parse_response(response: Response) -> Result<String, LlmError> {
    let completion: ChatCompletionResponse = response.json().await?;
    first_content(completion)
}

fn first_content(completion: ChatCompletionResponse) -> Result<String, LlmError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|msg| msg.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(mode: ResponseMode) -> Prompt {
        Prompt {
            system: "sys".into(),
            user: "hello".into(),
            mode,
        }
    }

    #[test]
    fn json_mode_requests_json_object() {
        let request = build_request("gpt-4o".into(), prompt(ResponseMode::Json));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
    }

    #[test]
    fn text_mode_omits_response_format() {
        let request = build_request("gpt-4o".into(), prompt(ResponseMode::Text));
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn empty_choices_are_an_error() {
        let completion: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_content(completion), Err(LlmError::EmptyResponse)));

        let completion: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "hi"}}]}"#).unwrap();
        assert_eq!(first_content(completion).unwrap(), "hi");
    }
}
