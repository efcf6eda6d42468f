//! Input collection for new diary entries.
//!
//! This module provides the `EntrySource` abstraction through which the update
//! workflow asks for each field of an entry, so the workflow can be driven by a
//! person at a terminal or by a scripted source in tests.

use crate::diary_core::{weekday_name, Happiness, RecordingLength};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use std::io::{self, BufRead, Write};

/// Trait defining where the fields of a new entry come from.
///
/// # Examples
///
/// ```
/// use autodiary::prompt::EntrySource;
/// use autodiary::diary_core::{Happiness, RecordingLength};
/// use autodiary::errors::AppResult;
/// use chrono::NaiveDate;
///
/// struct QuietDay;
///
/// impl EntrySource for QuietDay {
///     fn summary(&mut self, _date: NaiveDate) -> AppResult<Option<String>> {
///         Ok(Some("Stayed home".to_string()))
///     }
///     fn happiness(&mut self, _date: NaiveDate) -> AppResult<Option<Happiness>> {
///         Ok(Happiness::from_halves(6))
///     }
///     fn duration(&mut self, _date: NaiveDate) -> AppResult<Option<RecordingLength>> {
///         Ok(None)
///     }
///     fn people(&mut self, _date: NaiveDate) -> AppResult<Vec<String>> {
///         Ok(Vec::new())
///     }
///     fn skip_today(&mut self, _today: NaiveDate) -> AppResult<bool> {
///         Ok(false)
///     }
/// }
/// ```
pub trait EntrySource {
    /// The free-text summary of the day, or `None` to leave it blank.
    fn summary(&mut self, date: NaiveDate) -> AppResult<Option<String>>;

    /// The day's happiness rating, or `None` to leave it unrated.
    fn happiness(&mut self, date: NaiveDate) -> AppResult<Option<Happiness>>;

    /// The length of the day's recording, or `None` if there is no recording.
    fn duration(&mut self, date: NaiveDate) -> AppResult<Option<RecordingLength>>;

    /// Noteworthy people of the day, in order.
    fn people(&mut self, date: NaiveDate) -> AppResult<Vec<String>>;

    /// Asked after catching up on missed days: whether to stop before recording today.
    fn skip_today(&mut self, today: NaiveDate) -> AppResult<bool>;
}

/// Guided questions whose answers are stitched into one summary.
const SUMMARY_PROMPTS: [&str; 4] = [
    "This morning, I",
    "In the afternoon, I",
    "During the evening, I",
    "Overall, I'd say today was",
];

/// A line-oriented `EntrySource` that asks questions on `output` and reads answers
/// from `input`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// A prompt on the process's standard input and output.
    pub fn stdio() -> Self {
        TerminalPrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Creates a prompt over arbitrary reader and writer.
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompt { input, output }
    }

    /// Consumes the prompt, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> AppResult<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::Prompt(
                "Input closed before the entry was complete".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> EntrySource for TerminalPrompt<R, W> {
    fn summary(&mut self, date: NaiveDate) -> AppResult<Option<String>> {
        self.say(&format!(
            "This is the summary for {}, {}.",
            weekday_name(date.weekday()),
            date.format("%B %d, %Y")
        ))?;
        self.say("Be as detailed as possible, and use as many KEYWORDS as you can!")?;

        let mut answers = Vec::with_capacity(SUMMARY_PROMPTS.len());
        for question in SUMMARY_PROMPTS {
            answers.push(self.ask(&format!("{}...", question))?);
        }

        if answers.iter().all(|a| a.is_empty()) {
            return Ok(None);
        }

        let summary = SUMMARY_PROMPTS
            .iter()
            .zip(&answers)
            .map(|(question, answer)| format!("{} {}", question, answer))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Some(summary))
    }

    fn happiness(&mut self, _date: NaiveDate) -> AppResult<Option<Happiness>> {
        let choices = Happiness::all()
            .iter()
            .map(Happiness::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        loop {
            let answer = self.ask(&format!(
                "How would you rate today? [{}] (blank to skip)",
                choices
            ))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<Happiness>() {
                Ok(rating) => return Ok(Some(rating)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    fn duration(&mut self, _date: NaiveDate) -> AppResult<Option<RecordingLength>> {
        loop {
            let answer = self.ask("Recording length as H:M:S (blank for no file)")?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<RecordingLength>() {
                Ok(length) => return Ok(Some(length)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    fn people(&mut self, _date: NaiveDate) -> AppResult<Vec<String>> {
        self.say("Enter the names of people, first and last, who are noteworthy to this day.")?;
        let mut people = Vec::new();
        loop {
            let answer = self.ask(&format!("{} (blank to finish):", people.len() + 1))?;
            if answer.is_empty() {
                return Ok(people);
            }
            if answer.contains(',') {
                self.say("Enter one name at a time, without commas.")?;
                continue;
            }
            people.push(answer);
        }
    }

    fn skip_today(&mut self, _today: NaiveDate) -> AppResult<bool> {
        loop {
            let answer = self.ask("Would you like to skip today? [y/N]")?;
            match answer.to_lowercase().as_str() {
                "" | "n" | "no" => return Ok(false),
                "y" | "yes" => return Ok(true),
                _ => self.say("Please answer yes or no.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()
    }

    #[test]
    fn test_summary_joins_guided_answers() {
        let mut p = prompt("ran.\nworked.\nread.\ngood.\n");
        let summary = p.summary(day()).unwrap().unwrap();
        assert_eq!(
            summary,
            "This morning, I ran. In the afternoon, I worked. \
             During the evening, I read. Overall, I'd say today was good."
        );

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("Thursday, March 04, 2021"));
    }

    #[test]
    fn test_blank_summary_is_absent() {
        let mut p = prompt("\n\n\n\n");
        assert_eq!(p.summary(day()).unwrap(), None);
    }

    #[test]
    fn test_happiness_reprompts_until_valid() {
        let mut p = prompt("7\n2.25\n3.5\n");
        assert_eq!(p.happiness(day()).unwrap().unwrap().value(), 3.5);
    }

    #[test]
    fn test_duration_blank_means_no_recording() {
        let mut p = prompt("\n");
        assert_eq!(p.duration(day()).unwrap(), None);

        let mut p = prompt("oops\n0:4:5\n");
        assert_eq!(p.duration(day()).unwrap().unwrap().as_seconds(), 245);
    }

    #[test]
    fn test_people_until_blank_line() {
        let mut p = prompt("Alice Smith\nBob, Jones\nBob Jones\n\n");
        assert_eq!(p.people(day()).unwrap(), vec!["Alice Smith", "Bob Jones"]);
    }

    #[test]
    fn test_skip_today_defaults_to_no() {
        assert!(!prompt("\n").skip_today(day()).unwrap());
        assert!(prompt("maybe\nYes\n").skip_today(day()).unwrap());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompt("");
        assert!(matches!(p.summary(day()), Err(AppError::Prompt(_))));
    }
}
