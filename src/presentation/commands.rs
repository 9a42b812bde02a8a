// User commands - parsing and dispatch to the controller
use crate::application::orchestrator::DashboardController;
use crate::domain::filters::{BoroughFilter, parse_date};
use crate::domain::pagination::PageMove;
use crate::application::view::DashboardView;
use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  next | prev            move through the trip listing
  page N                 jump to listing page N
  from YYYY-MM-DD        set the start date
  to YYYY-MM-DD          set the end date
  dates START END        set both dates
  borough NAME | all     filter by borough
  apply                  reload everything with the current filters
  boroughs               list the available boroughs
  help                   show this text
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(u32),
    From(NaiveDate),
    To(NaiveDate),
    Dates(NaiveDate, NaiveDate),
    Borough(BoroughFilter),
    Apply,
    Boroughs,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Date(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        match (word.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("next" | "n", []) => Ok(Self::Next),
            ("prev" | "p", []) => Ok(Self::Prev),
            ("page", [page]) => page
                .parse()
                .map(Self::Page)
                .map_err(|_| CommandError::Usage("page N")),
            ("page", _) => Err(CommandError::Usage("page N")),
            ("from", [date]) => Ok(Self::From(date_arg(date)?)),
            ("from", _) => Err(CommandError::Usage("from YYYY-MM-DD")),
            ("to", [date]) => Ok(Self::To(date_arg(date)?)),
            ("to", _) => Err(CommandError::Usage("to YYYY-MM-DD")),
            ("dates", [start, end]) => Ok(Self::Dates(date_arg(start)?, date_arg(end)?)),
            ("dates", _) => Err(CommandError::Usage("dates START END")),
            // Borough names may contain spaces ("Staten Island").
            ("borough", [_, ..]) => Ok(Self::Borough(BoroughFilter::parse(rest))),
            ("borough", []) => Err(CommandError::Usage("borough NAME | all")),
            ("apply" | "refresh", []) => Ok(Self::Apply),
            ("boroughs", []) => Ok(Self::Boroughs),
            ("help" | "?", _) => Ok(Self::Help),
            ("quit" | "exit" | "q", []) => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}

fn date_arg(input: &str) -> Result<NaiveDate, CommandError> {
    parse_date(input).map_err(|_| CommandError::Date(input.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch<V: DashboardView>(controller: &mut DashboardController<V>, command: Command) -> Flow {
    tracing::debug!("Command: {:?}", command);
    match command {
        Command::Next => page_move(controller, PageMove::Next, "Already on the last page"),
        Command::Prev => page_move(controller, PageMove::Prev, "Already on the first page"),
        Command::Page(page) => page_move(controller, PageMove::Jump(page), "No such page"),
        Command::From(date) => controller.set_start_date(date),
        Command::To(date) => controller.set_end_date(date),
        Command::Dates(start, end) => controller.set_date_range(start, end),
        Command::Borough(borough) => controller.set_borough(borough),
        Command::Apply => controller.apply_filters(),
        Command::Boroughs => controller.show_borough_options(),
        Command::Help => controller.view_mut().notice(HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn page_move<V: DashboardView>(
    controller: &mut DashboardController<V>,
    movement: PageMove,
    no_op: &str,
) {
    if !controller.navigate(movement) {
        controller.view_mut().notice(no_op);
    }
}
