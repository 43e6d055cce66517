pub mod error;
pub mod config;
pub mod request;
pub mod client;
pub mod budget;
pub mod strategy;
pub mod judge;
pub mod batch;
pub mod report;

/*

qaeval: batch question answering against one chat completion
endpoint, graded by the same model acting as a strict judge.
two entry points matter to callers: answer a question
(strategy.rs) and judge an answer (judge.rs). everything
else is plumbing around them.

qaeval/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # CLI: load, answer, grade, report
│   ├── error.rs        # Error type for config and batch layers
│   ├── config.rs       # Endpoint settings from env
│   ├── request.rs      # ChatRequest / ChatResult and wire types
│   ├── client.rs       # ModelClient, never errors out
│   ├── budget.rs       # CallBudget and BudgetGuard
│   ├── strategy.rs     # AnsweringStrategy implementations
│   ├── judge.rs        # Model-as-judge with normalized fallback
│   ├── batch.rs        # Question loading, batch loop, validation
│   └── report.rs       # Answer files and accuracy reports
└── tests/              # Integration tests against a mock endpoint

*/

pub use budget::{BudgetGuard, CallBudget, CallOutcome};
pub use client::ModelClient;
pub use config::HarnessConfig;
pub use error::Error;
pub use judge::Judge;
pub use request::{ChatRequest, ChatResult};
pub use strategy::{AnsweringStrategy, BudgetedAnswer, DirectAnswer};
