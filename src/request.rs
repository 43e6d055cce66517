//! Request and result types for the chat completion endpoint

use serde::{Deserialize, Serialize};

/// Default system prompt for answering questions
pub const DEFAULT_SYSTEM_PROMPT: &str
  = "You are a helpful assistant. Reply with only the final answer—no explanation.";

/// One prompt to send, built fresh for every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest
{   /// User message
    pub prompt: String
  , /// System message
    pub system: String
  , /// Model identifier
    pub model: String
  , /// Sampling temperature in [0, 1]
    pub temperature: f32
  , /// Maximum tokens to generate
    pub max_output_tokens: u32
}

impl ChatRequest
{   pub fn new(
      prompt: impl Into<String>
    , system: impl Into<String>
    , model: impl Into<String>
    , temperature: f32
    , max_output_tokens: u32
    ) -> Self
    {   ChatRequest
        {   prompt: prompt.into()
          , system: system.into()
          , model: model.into()
          , temperature: temperature.clamp(0.0, 1.0)
          , max_output_tokens
        }
    }

    /// Wire body: system message first, then the user prompt
    pub fn to_wire(&self) -> ChatCompletionBody
    {   ChatCompletionBody
        {   model: self.model.clone()
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: self.system.clone()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: self.prompt.clone()
              }
            ]
          , temperature: self.temperature
          , max_tokens: self.max_output_tokens
        }
    }
}

/// Outcome of one exchange with the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatResult
{   /// Raw reply content, possibly empty
    Success
    {   text: String
    }
  , /// Non-200 status, or -1 for transport failures
    Failure
    {   status_code: i32
      , error_detail: String
    }
}

impl ChatResult
{   /// Reply text, `None` on failure
    pub fn text(&self) -> Option<&str>
    {   match self
        {   ChatResult::Success { text } => Some(text.as_str())
          , ChatResult::Failure { .. } => None
        }
    }
}

// ===== Wire Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionBody
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
  , pub max_tokens: u32
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn text_only_on_success()
    {   let ok = ChatResult::Success { text: "Paris".to_string() };
        assert_eq!(ok.text(), Some("Paris"));

        let failed = ChatResult::Failure
        {   status_code: 500
          , error_detail: "boom".to_string()
        };
        assert_eq!(failed.text(), None);
    }
}
