//! Model-as-judge grading with a normalized string fallback

use log::{debug, info};
use crate::client::ModelClient;
use crate::request::ChatResult;

pub const GRADER_SYSTEM_PROMPT: &str
  = "You are a strict grader. Reply with exactly True or False. No punctuation. No explanation.";

pub const GRADER_TEMPERATURE: f32 = 0.0;

/// Grades predictions with the model, unmetered
#[derive(Debug, Clone)]
pub struct Judge
{   client: ModelClient
}

impl Judge
{   pub fn new(client: ModelClient) -> Self
    {   Judge { client }
    }

    /// Always resolves to a verdict. Unparseable replies and failed
    /// calls fall back to [`normalize_answer`] equality.
    pub async fn judge(
      &self
    , question: &str
    , prediction: &str
    , expected: &str
    ) -> bool
    {   let request = self.client.request(
          build_grading_prompt(question, prediction, expected),
          GRADER_SYSTEM_PROMPT,
          GRADER_TEMPERATURE
        );
        let result = self.client.send_default(&request).await;
        if let ChatResult::Failure { status_code, .. } = &result
        {   debug!("Grader call failed with status {}", status_code);
        }

        match parse_verdict(result.text().unwrap_or_default())
        {   Some(verdict) => {
              debug!("Grader verdict: {}", verdict);
              verdict
            }
          , None => {
              info!("Grader reply unusable, comparing normalized answers");
              normalize_answer(prediction) == normalize_answer(expected)
            }
        }
    }
}

/// `Some(true)` / `Some(false)` when the trimmed, lowercased reply
/// starts with "true" / "false"
pub fn parse_verdict(reply: &str) -> Option<bool>
{   let reply = reply.trim().to_lowercase();
    if reply.starts_with("true")
    {   Some(true)
    } else if reply.starts_with("false")
    {   Some(false)
    } else
    {   None
    }
}

/// Lowercase, collapse whitespace runs to one space, trim
pub fn normalize_answer(text: &str) -> String
{   text.to_lowercase()
      .split_whitespace()
      .collect::<Vec<_>>()
      .join(" ")
}

pub fn build_grading_prompt(
  question: &str
, prediction: &str
, expected: &str
) -> String
{   format!(
      "You are grading a question-answer pair.

Return exactly True if the PREDICTION would be accepted as correct for the EXPECTED_ANSWER.
Otherwise, return False.

QUESTION:
{}

PREDICTION:
{}

EXPECTED_ANSWER:
{}

Answer with exactly: True or False
",
      question, prediction, expected
    )
}
