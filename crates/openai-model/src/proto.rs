use mentor_chat_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelRequest, ModelResponse,
};
use serde::{Deserialize, Serialize};

use crate::{Error, OpenAIConfig};

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System { content: String },
    User { content: String },
    Assistant { content: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    stream: bool,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub message: Message,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        temperature: req.temperature,
        stream: false,
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
    }
}

/// Picks the assistant text out of a completion.
pub fn into_response(mut completion: ChatCompletion) -> Result<ModelResponse, Error> {
    let Some(choice) = completion.choices.drain(..).next() else {
        return Err(Error::new(
            format!("completion {} has no choices", completion.id),
            ErrorKind::InvalidResponse,
        ));
    };
    let content = match choice.message {
        Message::Assistant {
            content: Some(content),
        } => content,
        Message::Assistant { content: None } => {
            return Err(Error::new(
                "completion has no text content",
                ErrorKind::InvalidResponse,
            ));
        }
        other => {
            return Err(Error::new(
                format!("unexpected message role in completion: {other:?}"),
                ErrorKind::InvalidResponse,
            ));
        }
    };
    let finish_reason = choice.finish_reason.as_deref().map(|reason| match reason {
        "length" => ModelFinishReason::Length,
        "content_filter" => ModelFinishReason::ContentFilter,
        _ => ModelFinishReason::Stop,
    });
    if finish_reason == Some(ModelFinishReason::ContentFilter) && content.is_empty() {
        return Err(Error::new("reply was filtered", ErrorKind::Moderated));
    }
    Ok(ModelResponse {
        content,
        finish_reason,
    })
}

/// Extracts the human readable message from an API error body, if the
/// body has the usual `{"error": {"message": ...}}` shape.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.error.message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::OpenAIConfigBuilder;

    #[test]
    fn test_create_request() {
        let request = ModelRequest {
            messages: vec![
                ModelMessage::System("You're a friendly Python mentor.".to_owned()),
                ModelMessage::User("What is a decorator?".to_owned()),
            ],
            temperature: 0.3,
        };
        let config = OpenAIConfigBuilder::with_api_key("xxx")
            .with_model("custom")
            .build();
        let body = serde_json::to_value(create_request(&request, &config)).unwrap();
        let expected = json!({
            "model": "custom",
            "messages": [
                { "role": "system", "content": "You're a friendly Python mentor." },
                { "role": "user", "content": "What is a decorator?" }
            ],
            "temperature": 0.3f32,
            "stream": false
        });
        assert_eq!(body, expected);
    }

    #[test]
    fn test_parse_completion() {
        let completion: ChatCompletion =
            serde_json::from_str(include_str!("../fixtures/chat_completion.json"))
                .unwrap();
        let resp = into_response(completion).unwrap();
        assert!(resp.content.starts_with("\n\nUse a list comprehension:"));
        assert_eq!(resp.finish_reason, Some(ModelFinishReason::Stop));
    }

    #[test]
    fn test_empty_choices() {
        let completion = ChatCompletion {
            id: "chatcmpl-1".to_owned(),
            choices: vec![],
        };
        let err = into_response(completion).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_filtered_reply() {
        let completion = ChatCompletion {
            id: "chatcmpl-2".to_owned(),
            choices: vec![Choice {
                message: Message::Assistant {
                    content: Some(String::new()),
                },
                finish_reason: Some("content_filter".to_owned()),
            }],
        };
        let err = into_response(completion).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Moderated);
    }

    #[test]
    fn test_error_message() {
        let message =
            error_message(include_str!("../fixtures/error_response.json")).unwrap();
        assert!(message.starts_with("Incorrect API key provided"));
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
    }
}
