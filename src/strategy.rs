//! Answering strategies: question text in, answer text out

use std::future::Future;
use log::debug;
use crate::budget::BudgetGuard;
use crate::client::ModelClient;
use crate::request::{ChatResult, DEFAULT_SYSTEM_PROMPT};

pub const ANSWER_TEMPERATURE: f32 = 0.0;

/// Produces a final answer for one question.
/// Any per-instance state (such as a call budget) lives in the implementor.
pub trait AnsweringStrategy
{   fn answer(&mut self, question: &str)
      -> impl Future<Output = String> + Send;
}

/// Single unmetered call per question
#[derive(Debug, Clone)]
pub struct DirectAnswer
{   client: ModelClient
}

impl DirectAnswer
{   pub fn new(client: ModelClient) -> Self
    {   DirectAnswer { client }
    }
}

impl AnsweringStrategy for DirectAnswer
{   async fn answer(&mut self, question: &str) -> String
    {   debug!("DirectAnswer answering");
        let request = self.client.request(
          question,
          DEFAULT_SYSTEM_PROMPT,
          ANSWER_TEMPERATURE
        );
        match self.client.send_default(&request).await
        {   ChatResult::Success { text } => text.trim().to_string()
          , ChatResult::Failure { error_detail, .. } => {
              format!("Error: {}", error_detail)
            }
        }
    }
}

/// Answers through a [`BudgetGuard`], one budget per instance
///
/// ```compile_fail
/// use qaeval::{BudgetedAnswer, HarnessConfig, ModelClient};
///
/// let strategy = BudgetedAnswer::new(ModelClient::new(HarnessConfig::default()));
/// let _copy = strategy.clone();
/// ```
#[derive(Debug)]
pub struct BudgetedAnswer
{   guard: BudgetGuard
}

impl BudgetedAnswer
{   pub fn new(client: ModelClient) -> Self
    {   BudgetedAnswer
        {   guard: BudgetGuard::new(client)
        }
    }

    pub fn with_limit(client: ModelClient, limit: usize) -> Self
    {   BudgetedAnswer
        {   guard: BudgetGuard::with_limit(client, limit)
        }
    }

    pub fn calls_made(&self) -> usize
    {   self.guard.budget().count()
    }
}

impl AnsweringStrategy for BudgetedAnswer
{   async fn answer(&mut self, question: &str) -> String
    {   debug!(
          "BudgetedAnswer answering, {} calls left",
          self.guard.budget().remaining()
        );
        self.guard
          .guarded_call(question, ANSWER_TEMPERATURE, None)
          .await
    }
}
