use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use mentor_chat_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelRequest, ModelResponse,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeModelProviderError(ErrorKind);

impl Display for FakeModelProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for FakeModelProviderError {}

impl ModelProviderError for FakeModelProviderError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Echoes the last user message back after a short pause.
struct EchoModelProvider;

impl ModelProvider for EchoModelProvider {
    type Error = FakeModelProviderError;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let last_user = req.messages.iter().rev().find_map(|msg| match msg {
            ModelMessage::User(text) => Some(text.clone()),
            _ => None,
        });
        async move {
            sleep(Duration::from_millis(1)).await;
            let Some(text) = last_user else {
                return Err(FakeModelProviderError(ErrorKind::InvalidResponse));
            };
            Ok(ModelResponse::with_content(format!("You said {text}")))
        }
    }
}

#[tokio::test]
async fn test_completion() {
    let provider = EchoModelProvider;
    let req = ModelRequest {
        messages: vec![
            ModelMessage::System("Be brief.".to_owned()),
            ModelMessage::User("Good morning".to_owned()),
        ],
        temperature: 0.3,
    };
    let resp = provider.send_request(&req).await.unwrap();
    assert_eq!(resp.content, "You said Good morning");
    assert_eq!(resp.finish_reason, Some(ModelFinishReason::Stop));
}

#[tokio::test]
async fn test_future_outlives_request() {
    let provider = EchoModelProvider;
    let fut = {
        let req = ModelRequest {
            messages: vec![ModelMessage::User("Hi".to_owned())],
            temperature: 0.0,
        };
        provider.send_request(&req)
    };
    let resp = tokio::spawn(fut).await.unwrap().unwrap();
    assert_eq!(resp.content, "You said Hi");
}

#[tokio::test]
async fn test_error() {
    let provider = EchoModelProvider;
    let req = ModelRequest {
        messages: vec![ModelMessage::System("Be brief.".to_owned())],
        temperature: 0.3,
    };
    let err = provider.send_request(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert_eq!(err.to_string(), "invalid response");
}
