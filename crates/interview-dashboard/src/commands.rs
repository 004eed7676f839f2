//! Commands accepted by the interactive `watch` front end

use interview_core::{InterviewId, NewInterview};
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  start <id>     start the call for a pending interview
  report <id>    open the report of a finished interview
  close          close the report
  dismiss        hide the form error banner
  refresh        reload the interview list
  new <name>|<phone>|<position>|<description>[|<skills>]
                 create an interview
  help           show this text
  quit           leave the dashboard";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate the row control of an interview
    Start(InterviewId),
    /// Open an interview's report
    Report(InterviewId),
    /// Close the report overlay
    Close,
    /// Hide the form banner
    Dismiss,
    /// Reload the whole list
    Refresh,
    /// Fill and submit the creation form
    New(NewInterview),
    /// Print usage
    Help,
    /// Exit
    Quit,
}

/// Why an input line could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// First word is not a known command
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    /// Command needs an interview id
    #[error("`{0}` needs an interview id")]
    MissingId(&'static str),
    /// Interview id is not a number
    #[error("invalid interview id `{0}`")]
    InvalidId(String),
    /// `new` without its four required fields
    #[error("usage: new <name>|<phone>|<position>|<description>[|<skills>]")]
    InvalidForm,
}

fn parse_id(command: &'static str, arg: &str) -> Result<InterviewId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingId(command));
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

fn parse_form(arg: &str) -> Result<NewInterview, CommandError> {
    let fields: Vec<&str> = arg.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [name, phone, position, description, rest @ ..] if rest.len() <= 1 => Ok(NewInterview {
            candidate_name: (*name).to_string(),
            phone_number: (*phone).to_string(),
            job_position: (*position).to_string(),
            job_description: (*description).to_string(),
            skills_to_assess: rest.first().map_or_else(String::new, |s| (*s).to_string()),
        }),
        _ => Err(CommandError::InvalidForm),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, arg)| (word, arg.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "start" => parse_id("start", arg).map(Self::Start),
            "report" => parse_id("report", arg).map(Self::Report),
            "close" => Ok(Self::Close),
            "dismiss" => Ok(Self::Dismiss),
            "refresh" => Ok(Self::Refresh),
            "new" => parse_form(arg).map(Self::New),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
