use std::path::PathBuf;
use clap::Parser;
use log::{error, info};
use qaeval::batch::{self, BatchOutcome};
use qaeval::config::HarnessConfig;
use qaeval::report;
use qaeval::{BudgetedAnswer, DirectAnswer, Error, Judge, ModelClient};

/// Answer a question set with a chat model and grade it with the same model
#[derive(Debug, Parser)]
#[command(name = "qaeval", version)]
struct Cli
{   /// JSON list of {input, output, domain} records
    #[arg(long, default_value = "dev_data.json")]
    input: PathBuf
  , /// Where the produced answers are written
    #[arg(long, default_value = "answers.json")]
    output: PathBuf
  , /// Where wrong answers are listed
    #[arg(long, default_value = "wrong_answers_report.txt")]
    report: PathBuf
  , /// Overrides OPENAI_API_KEY
    #[arg(long)]
    api_key: Option<String>
  , /// Overrides API_BASE
    #[arg(long)]
    base_url: Option<String>
  , /// Overrides MODEL_NAME
    #[arg(long)]
    model: Option<String>
  , #[arg(long)]
    timeout_secs: Option<u64>
  , #[arg(long)]
    max_tokens: Option<u32>
  , /// Meter answering calls with a budget shared by the whole run
    #[arg(long)]
    call_limit: Option<usize>
}

impl Cli
{   /// Environment first, then any flags given on the command line
    fn harness_config(&self) -> HarnessConfig
    {   let env = HarnessConfig::from_env();
        HarnessConfig
        {   api_key: self.api_key.clone().unwrap_or(env.api_key)
          , base_url: self.base_url.clone().unwrap_or(env.base_url)
          , model_name: self.model.clone().unwrap_or(env.model_name)
          , timeout_secs: self.timeout_secs.unwrap_or(env.timeout_secs)
          , max_output_tokens: self.max_tokens
              .unwrap_or(env.max_output_tokens)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error>
{   env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await
    {   error!("{}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), Error>
{   let config = cli.harness_config();
    config.validate()?;
    info!(
      "Using model {} at {}",
      config.model_name, config.base_url
    );

    let questions = batch::load_questions(&cli.input)?;
    println!(
      "Loaded {} questions from {}",
      questions.len(), cli.input.display()
    );

    let client = ModelClient::new(config);
    let judge = Judge::new(client.clone());

    let outcome: BatchOutcome = match cli.call_limit
    {   Some(limit) => {
          let mut strategy = BudgetedAnswer::with_limit(client, limit);
          let outcome = batch::run_batch(
            &mut strategy, &judge, &questions
          ).await;
          info!("Answering used {} calls", strategy.calls_made());
          outcome
        }
      , None => {
          let mut strategy = DirectAnswer::new(client);
          batch::run_batch(&mut strategy, &judge, &questions).await
        }
    };

    report::write_answers(&cli.output, &outcome.answers)?;
    let saved = report::read_answers(&cli.output)?;
    batch::validate_results(&questions, &saved)?;
    println!(
      "Wrote {} answers to {} and validated format successfully.",
      saved.len(), cli.output.display()
    );

    print!("{}", report::render_summary(&outcome.stats));

    report::write_wrong_answers_report(&cli.report, &outcome.stats)?;
    let summary = report::Summary::from_stats(&outcome.stats);
    if summary.wrong > 0
    {   println!("\nWrong answers written to {}", cli.report.display());
    }
    Ok(())
}
