//! Batch evaluation: answer and grade a list of questions in order

use std::collections::BTreeMap;
use std::path::Path;
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use crate::error::Error;
use crate::judge::Judge;
use crate::strategy::AnsweringStrategy;

/// Answers must stay strictly below this many characters
pub const MAX_ANSWER_CHARS: usize = 5000;

/// Input and produced answer are cut to this many characters in reports
pub const REPORT_SNIPPET_CHARS: usize = 100;

pub const UNKNOWN_DOMAIN: &str = "unknown";

/// One question from the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord
{   #[serde(default, deserialize_with = "scalar_to_string")]
    pub input: String
  , #[serde(default, deserialize_with = "scalar_to_string")]
    pub output: String
  , #[serde(default = "unknown_domain", deserialize_with = "scalar_to_string")]
    pub domain: String
}

/// One produced answer, as written to the answers file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord
{   pub output: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer
{   /// 1-based position in the input file
    pub index: usize
  , pub input: String
  , pub expected: String
  , pub got: String
}

/// Per-domain tally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats
{   pub correct: usize
  , pub wrong: usize
  , pub wrong_answers: Vec<WrongAnswer>
}

impl CategoryStats
{   pub fn total(&self) -> usize
    {   self.correct + self.wrong
    }

    /// Percentage correct, 0.0 when empty
    pub fn accuracy(&self) -> f64
    {   percentage(self.correct, self.total())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome
{   pub answers: Vec<AnswerRecord>
  , pub stats: BTreeMap<String, CategoryStats>
}

fn unknown_domain() -> String
{   UNKNOWN_DOMAIN.to_string()
}

/// Accept any JSON scalar; `null` becomes an empty string and
/// booleans are written `True` / `False`
fn scalar_to_string<'de, D>(deserializer: D)
  -> Result<String, D::Error>
where D: Deserializer<'de>
{   let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value
    {   serde_json::Value::Null => String::new()
      , serde_json::Value::String(s) => s
      , serde_json::Value::Bool(true) => "True".to_string()
      , serde_json::Value::Bool(false) => "False".to_string()
      , other => other.to_string()
    })
}

pub(crate) fn percentage(part: usize, total: usize) -> f64
{   if total == 0
    {   0.0
    } else
    {   part as f64 / total as f64 * 100.0
    }
}

/// First [`REPORT_SNIPPET_CHARS`] characters, with "..." when cut
pub fn truncate_for_report(text: &str) -> String
{   if text.chars().count() > REPORT_SNIPPET_CHARS
    {   let head: String = text.chars()
          .take(REPORT_SNIPPET_CHARS)
          .collect();
        format!("{}...", head)
    } else
    {   text.to_string()
    }
}

pub fn parse_questions(raw: &str)
  -> Result<Vec<QuestionRecord>, Error>
{   let data: serde_json::Value = serde_json::from_str(raw)?;
    if !data.is_array()
    {   return Err(Error::InvalidInput(
          "Input file must contain a list of question objects."
            .to_string()
        ));
    }
    Ok(serde_json::from_value(data)?)
}

pub fn load_questions(path: &Path)
  -> Result<Vec<QuestionRecord>, Error>
{   debug!("Loading questions from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    parse_questions(&raw)
}

/// Answer then grade each question, one at a time
pub async fn run_batch<S>(
  strategy: &mut S
, judge: &Judge
, questions: &[QuestionRecord]
) -> BatchOutcome
where S: AnsweringStrategy
{   let mut outcome = BatchOutcome::default();
    let total = questions.len();

    for (idx, question) in questions.iter().enumerate()
    {   let index = idx + 1;
        info!("Processing question {}/{}", index, total);

        let answer = strategy.answer(&question.input).await;
        let is_correct = judge
          .judge(&question.input, &answer, &question.output)
          .await;

        let stats = outcome.stats
          .entry(question.domain.clone())
          .or_default();
        if is_correct
        {   stats.correct += 1;
        } else
        {   debug!("Question {} graded wrong", index);
            stats.wrong += 1;
            stats.wrong_answers.push(WrongAnswer
            {   index
              , input: truncate_for_report(&question.input)
              , expected: question.output.clone()
              , got: truncate_for_report(&answer)
            });
        }

        outcome.answers.push(AnswerRecord { output: answer });
    }

    outcome
}

/// One answer per question, each under [`MAX_ANSWER_CHARS`]
pub fn validate_results(
  questions: &[QuestionRecord]
, answers: &[AnswerRecord]
) -> Result<(), Error>
{   if questions.len() != answers.len()
    {   return Err(Error::Validation(format!(
          "Mismatched lengths: {} questions vs {} answers.",
          questions.len(), answers.len()
        )));
    }
    for (idx, answer) in answers.iter().enumerate()
    {   let chars = answer.output.chars().count();
        if chars >= MAX_ANSWER_CHARS
        {   return Err(Error::Validation(format!(
              "Answer at index {} exceeds {} characters ({} chars). \
               Please make sure your answer does not include any intermediate results.",
              idx, MAX_ANSWER_CHARS, chars
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn parse_stringifies_scalars_and_defaults_domain()
    {   let raw = r#"[
          {"input": "Is water wet?", "output": true, "domain": "common_sense"},
          {"input": "Is fire cold?", "output": false},
          {"input": "2+2", "output": 4},
          {"input": null}
        ]"#;
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].output, "True");
        assert_eq!(questions[0].domain, "common_sense");
        assert_eq!(questions[1].output, "False");
        assert_eq!(questions[2].output, "4");
        assert_eq!(questions[2].domain, "unknown");
        assert_eq!(questions[3].input, "");
        assert_eq!(questions[3].output, "");
    }

    #[test]
    fn parse_rejects_non_list()
    {   let result = parse_questions(r#"{"input": "x"}"#);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn load_reads_file()
    {   let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(
          &path,
          r#"[{"input": "Capital of France?", "output": "Paris", "domain": "geo"}]"#
        ).unwrap();

        let questions = load_questions(&path).unwrap();
        assert_eq!(questions[0].input, "Capital of France?");
        assert!(matches!(
          load_questions(&dir.path().join("missing.json")),
          Err(Error::Io(_))
        ));
    }

    #[test]
    fn truncation_counts_chars()
    {   let short = "a".repeat(100);
        assert_eq!(truncate_for_report(&short), short);

        let long = "é".repeat(101);
        let cut = truncate_for_report(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 103);
    }

    #[test]
    fn validation_enforces_length_and_ceiling()
    {   let questions = vec![QuestionRecord
        {   input: "q".to_string()
          , output: "a".to_string()
          , domain: "d".to_string()
        }];

        assert!(validate_results(&questions, &[]).is_err());

        let ok = vec![AnswerRecord { output: "x".repeat(4999) }];
        assert!(validate_results(&questions, &ok).is_ok());

        let too_long = vec![AnswerRecord { output: "x".repeat(5000) }];
        let err = validate_results(&questions, &too_long).unwrap_err();
        assert!(err.to_string().contains("exceeds 5000 characters"));
    }

    #[test]
    fn accuracy_of_empty_category_is_zero()
    {   assert_eq!(CategoryStats::default().accuracy(), 0.0);
        let stats = CategoryStats
        {   correct: 3
          , wrong: 1
          , wrong_answers: vec![]
        };
        assert_eq!(stats.accuracy(), 75.0);
    }
}
