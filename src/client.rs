use std::time::Duration;
use log::{debug, trace, warn};
use crate::config::HarnessConfig;
use crate::request::{ChatRequest, ChatResult};

/// Status code used for transport-level failures
pub const TRANSPORT_FAILURE: i32 = -1;

/// Chat completion client.
///
/// Every outcome, including connection errors and timeouts,
/// comes back as a [`ChatResult`]; `send` has no error path.
#[derive(Debug, Clone)]
pub struct ModelClient
{   config: HarnessConfig
  , http_client: reqwest::Client
}

impl ModelClient
{   pub fn new(config: HarnessConfig) -> Self
    {   debug!("Creating ModelClient for {}", config.base_url);
        ModelClient
        {   config
          , http_client: reqwest::Client::new()
        }
    }

    /// Build a request against the configured model
    pub fn request(
      &self
    , prompt: impl Into<String>
    , system: impl Into<String>
    , temperature: f32
    ) -> ChatRequest
    {   ChatRequest::new(
          prompt,
          system,
          self.config.model_name.clone(),
          temperature,
          self.config.max_output_tokens
        )
    }

    /// Send with the configured timeout
    pub async fn send_default(&self, request: &ChatRequest)
      -> ChatResult
    {   self.send(request, self.config.timeout()).await
    }

    /// Issue one POST to `<base_url>/chat/completions`
    pub async fn send(
      &self
    , request: &ChatRequest
    , timeout: Duration
    ) -> ChatResult
    {   let body = request.to_wire();
        trace!("Chat request: {:?}", body);

        let response = match self.http_client
          .post(self.config.completions_url())
          .header(
            "Authorization",
            format!("Bearer {}", self.config.api_key)
          )
          .header("Content-Type", "application/json")
          .timeout(timeout)
          .json(&body)
          .send()
          .await
        {   Ok(response) => response
          , Err(e) => {
              warn!("Transport error: {}", e);
              return transport_failure(e);
            }
        };

        let status = response.status();
        trace!("Chat response status: {}", status);

        let raw = match response.text().await
        {   Ok(raw) => raw
          , Err(e) => {
              warn!("Failed to read response body: {}", e);
              return transport_failure(e);
            }
        };

        if status != reqwest::StatusCode::OK
        {   let error_detail = error_detail_from_body(&raw);
            warn!("Endpoint returned {}: {}", status, error_detail);
            return ChatResult::Failure
            {   status_code: i32::from(status.as_u16())
              , error_detail
            };
        }

        match serde_json::from_str::<serde_json::Value>(&raw)
        {   Ok(data) => {
              let text = reply_content(&data);
              debug!("Received {} chars of reply", text.len());
              ChatResult::Success { text }
            }
          , Err(e) => {
              warn!("Reply body is not JSON: {}", e);
              ChatResult::Failure
              {   status_code: TRANSPORT_FAILURE
                , error_detail: format!("invalid JSON body: {}", e)
              }
            }
        }
    }
}

fn transport_failure(e: reqwest::Error) -> ChatResult
{   ChatResult::Failure
    {   status_code: TRANSPORT_FAILURE
      , error_detail: e.to_string()
    }
}

/// `choices[0].message.content`, empty when the path is absent
fn reply_content(data: &serde_json::Value) -> String
{   data.pointer("/choices/0/message/content")
      .and_then(|c| c.as_str())
      .unwrap_or_default()
      .to_string()
}

/// Structured JSON error when the body parses, raw body otherwise
fn error_detail_from_body(raw: &str) -> String
{   match serde_json::from_str::<serde_json::Value>(raw)
    {   Ok(value) => value.to_string()
      , Err(_) => raw.to_string()
    }
}
