//! Answer files, accuracy summaries and the wrong-answer report

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use log::debug;
use crate::batch::{percentage, AnswerRecord, CategoryStats};
use crate::error::Error;

const RULE: &str
  = "============================================================";

/// Totals across every category
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary
{   pub correct: usize
  , pub wrong: usize
}

impl Summary
{   pub fn from_stats(stats: &BTreeMap<String, CategoryStats>) -> Self
    {   stats.values().fold(Summary::default(), |acc, s| Summary
        {   correct: acc.correct + s.correct
          , wrong: acc.wrong + s.wrong
        })
    }

    pub fn total(&self) -> usize
    {   self.correct + self.wrong
    }

    pub fn accuracy(&self) -> f64
    {   percentage(self.correct, self.total())
    }
}

pub fn write_answers(path: &Path, answers: &[AnswerRecord])
  -> Result<(), Error>
{   debug!("Writing {} answers to {}", answers.len(), path.display());
    let json = serde_json::to_string_pretty(answers)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn read_answers(path: &Path)
  -> Result<Vec<AnswerRecord>, Error>
{   let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Per-category and overall accuracy block
pub struct SummaryReport<'a>(pub &'a BTreeMap<String, CategoryStats>);

impl fmt::Display for SummaryReport<'_>
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   writeln!(f, "\n{}", RULE)?;
        writeln!(f, "CATEGORY STATISTICS")?;
        writeln!(f, "{}", RULE)?;

        for (domain, s) in self.0
        {   let total = s.total();
            writeln!(f, "\n{}:", domain.to_uppercase())?;
            writeln!(
              f,
              "  Correct: {}/{} ({:.1}%)",
              s.correct, total, s.accuracy()
            )?;
            writeln!(f, "  Wrong: {}/{}", s.wrong, total)?;
        }

        let summary = Summary::from_stats(self.0);
        writeln!(f, "\n{}", RULE)?;
        writeln!(f, "OVERALL STATISTICS")?;
        writeln!(f, "{}", RULE)?;
        writeln!(
          f,
          "Total Correct: {}/{} ({:.1}%)",
          summary.correct, summary.total(), summary.accuracy()
        )?;
        writeln!(
          f,
          "Total Wrong: {}/{}",
          summary.wrong, summary.total()
        )
    }
}

/// Wrong answers grouped by category; categories with none are skipped
pub struct WrongAnswersReport<'a>(pub &'a BTreeMap<String, CategoryStats>);

impl fmt::Display for WrongAnswersReport<'_>
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   writeln!(f, "{}", RULE)?;
        writeln!(f, "WRONG ANSWERS BY CATEGORY")?;
        writeln!(f, "{}", RULE)?;

        for (domain, s) in self.0
        {   if s.wrong_answers.is_empty()
            {   continue;
            }
            writeln!(
              f,
              "\n{} ({} wrong):",
              domain.to_uppercase(), s.wrong_answers.len()
            )?;
            for wrong in &s.wrong_answers
            {   writeln!(f, "\n  Question #{}:", wrong.index)?;
                writeln!(f, "    Input: {}", wrong.input)?;
                writeln!(f, "    Expected: {}", wrong.expected)?;
                writeln!(f, "    Got: {}", wrong.got)?;
            }
        }
        Ok(())
    }
}

pub fn render_summary(stats: &BTreeMap<String, CategoryStats>) -> String
{   SummaryReport(stats).to_string()
}

pub fn render_wrong_answers(stats: &BTreeMap<String, CategoryStats>)
  -> String
{   WrongAnswersReport(stats).to_string()
}

/// Always rewrites `path`, so a clean run replaces an older report
pub fn write_wrong_answers_report(
  path: &Path
, stats: &BTreeMap<String, CategoryStats>
) -> Result<(), Error>
{   debug!("Writing wrong-answer report to {}", path.display());
    std::fs::write(path, render_wrong_answers(stats))?;
    Ok(())
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::batch::WrongAnswer;

    fn sample_stats() -> BTreeMap<String, CategoryStats>
    {   let mut stats = BTreeMap::new();
        stats.insert("math".to_string(), CategoryStats
        {   correct: 1
          , wrong: 1
          , wrong_answers: vec![WrongAnswer
            {   index: 2
              , input: "2+3".to_string()
              , expected: "5".to_string()
              , got: "6".to_string()
            }]
        });
        stats.insert("geography".to_string(), CategoryStats
        {   correct: 2
          , wrong: 0
          , wrong_answers: vec![]
        });
        stats
    }

    #[test]
    fn summary_totals_all_categories()
    {   let summary = Summary::from_stats(&sample_stats());
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.wrong, 1);
        assert_eq!(summary.accuracy(), 75.0);
        assert_eq!(Summary::default().accuracy(), 0.0);
    }

    #[test]
    fn summary_lists_categories_sorted()
    {   let text = render_summary(&sample_stats());
        let geo = text.find("GEOGRAPHY:").unwrap();
        let math = text.find("MATH:").unwrap();
        assert!(geo < math);
        assert!(text.contains("  Correct: 1/2 (50.0%)"));
        assert!(text.contains("Total Correct: 3/4 (75.0%)"));
        assert!(text.contains("Total Wrong: 1/4"));
    }

    #[test]
    fn wrong_answer_report_skips_clean_categories()
    {   let text = render_wrong_answers(&sample_stats());
        assert!(text.contains("MATH (1 wrong):"));
        assert!(text.contains("  Question #2:"));
        assert!(text.contains("    Got: 6"));
        assert!(!text.contains("GEOGRAPHY"));
    }

    #[test]
    fn clean_run_replaces_stale_report()
    {   let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrong_answers_report.txt");

        write_wrong_answers_report(&path, &sample_stats()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("MATH"));

        let mut clean = BTreeMap::new();
        clean.insert("math".to_string(), CategoryStats
        {   correct: 2
          , wrong: 0
          , wrong_answers: vec![]
        });
        write_wrong_answers_report(&path, &clean).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("WRONG ANSWERS BY CATEGORY"));
        assert!(!text.contains("MATH"));
        assert!(!text.contains("Question #"));
    }

    #[test]
    fn answers_file_keeps_non_ascii()
    {   let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        let answers = vec![AnswerRecord { output: "Zürich".to_string() }];

        write_answers(&path, &answers).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Zürich"));
        assert_eq!(read_answers(&path).unwrap(), answers);
    }
}
