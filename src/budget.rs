//! Per-session call budget around the model client

use std::fmt;
use log::{debug, warn};
use crate::client::ModelClient;
use crate::request::{ChatResult, DEFAULT_SYSTEM_PROMPT};

/// Calls one guard may make before refusing
pub const DEFAULT_CALL_LIMIT: usize = 20;

pub const BUDGET_EXHAUSTED: &str = "ERROR: max call limit reached";

/// Monotonic call counter with a hard cap.
/// Not `Clone`: a copy would carry its own full budget.
#[derive(Debug, PartialEq, Eq)]
pub struct CallBudget
{   count: usize
  , limit: usize
}

impl CallBudget
{   pub fn new(limit: usize) -> Self
    {   CallBudget
        {   count: 0
          , limit
        }
    }

    /// Take one call from the budget, `false` once exhausted
    pub fn try_acquire(&mut self) -> bool
    {   if self.is_exhausted()
        {   return false;
        }
        self.count += 1;
        true
    }

    pub fn count(&self) -> usize
    {   self.count
    }

    pub fn limit(&self) -> usize
    {   self.limit
    }

    pub fn remaining(&self) -> usize
    {   self.limit.saturating_sub(self.count)
    }

    pub fn is_exhausted(&self) -> bool
    {   self.count >= self.limit
    }
}

impl Default for CallBudget
{   fn default() -> Self
    {   CallBudget::new(DEFAULT_CALL_LIMIT)
    }
}

/// What a guarded call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome
{   /// Trimmed reply text
    Answer(String)
  , /// Refused without touching the network
    BudgetExhausted
  , /// The endpoint call failed
    Failed
    {   status_code: i32
      , error_detail: String
    }
}

impl fmt::Display for CallOutcome
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   CallOutcome::Answer(text) => {
              write!(f, "{}", text)
            }
          , CallOutcome::BudgetExhausted => {
              write!(f, "{}", BUDGET_EXHAUSTED)
            }
          , CallOutcome::Failed { status_code, error_detail } => {
              write!(f, "ERROR status={} {}", status_code, error_detail)
            }
        }
    }
}

/// Model client metered by a [`CallBudget`].
///
/// One guard is one session; it cannot be cloned into a second budget.
///
/// ```compile_fail
/// use qaeval::{BudgetGuard, HarnessConfig, ModelClient};
///
/// let guard = BudgetGuard::new(ModelClient::new(HarnessConfig::default()));
/// let _second_session = guard.clone();
/// ```
#[derive(Debug)]
pub struct BudgetGuard
{   client: ModelClient
  , budget: CallBudget
}

impl BudgetGuard
{   pub fn new(client: ModelClient) -> Self
    {   BudgetGuard::with_limit(client, DEFAULT_CALL_LIMIT)
    }

    pub fn with_limit(client: ModelClient, limit: usize) -> Self
    {   debug!("Creating BudgetGuard with limit {}", limit);
        BudgetGuard
        {   client
          , budget: CallBudget::new(limit)
        }
    }

    pub fn budget(&self) -> &CallBudget
    {   &self.budget
    }

    /// Spend one call and report the tagged outcome.
    /// Failed calls still count against the budget.
    pub async fn try_call(
      &mut self
    , prompt: &str
    , temperature: f32
    , system: Option<&str>
    ) -> CallOutcome
    {   if !self.budget.try_acquire()
        {   warn!(
              "Call budget exhausted after {} calls",
              self.budget.count()
            );
            return CallOutcome::BudgetExhausted;
        }
        debug!(
          "Guarded call {}/{}",
          self.budget.count(), self.budget.limit()
        );

        let request = self.client.request(
          prompt,
          system.unwrap_or(DEFAULT_SYSTEM_PROMPT),
          temperature
        );
        match self.client.send_default(&request).await
        {   ChatResult::Success { text } => {
              CallOutcome::Answer(text.trim().to_string())
            }
          , ChatResult::Failure { status_code, error_detail } => {
              CallOutcome::Failed { status_code, error_detail }
            }
        }
    }

    /// [`BudgetGuard::try_call`] rendered to plain text
    pub async fn guarded_call(
      &mut self
    , prompt: &str
    , temperature: f32
    , system: Option<&str>
    ) -> String
    {   self.try_call(prompt, temperature, system)
          .await
          .to_string()
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn budget_stops_at_limit()
    {   let mut budget = CallBudget::new(2);
        assert!(budget.try_acquire());
        assert!(budget.try_acquire());
        assert!(!budget.try_acquire());
        assert_eq!(budget.count(), 2);
        assert_eq!(budget.remaining(), 0);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn zero_limit_is_exhausted_immediately()
    {   let mut budget = CallBudget::new(0);
        assert!(budget.is_exhausted());
        assert!(!budget.try_acquire());
        assert_eq!(budget.count(), 0);
    }

    #[test]
    fn outcomes_render_sentinel_strings()
    {   assert_eq!(
          CallOutcome::BudgetExhausted.to_string(),
          "ERROR: max call limit reached"
        );
        assert_eq!(
          CallOutcome::Failed
          {   status_code: 503
            , error_detail: "overloaded".to_string()
          }.to_string(),
          "ERROR status=503 overloaded"
        );
        assert_eq!(
          CallOutcome::Answer("42".to_string()).to_string(),
          "42"
        );
    }
}
