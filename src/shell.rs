use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::client::LogStore;
use crate::controller::{Session, ViewEvent};
use crate::filter::dates;
use crate::output::{self, OutputFormat};
use crate::pager::Direction;
use crate::submission::SubmissionInput;

pub const HELP: &str = "\
commands:
  type <text>                     filter by event type (empty clears)
  date <YYYY-MM-DD>               filter by UTC day (empty clears)
  clear                           drop both filters
  next | prev | page <n>          move between pages
  reload                          fetch the list again
  submit <datetime> <description> create an entry
                                  (2024-03-01T12:00 or 2024-03-01 12:00)
  help                            show this text
  quit                            leave the shell
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Event(ViewEvent),
    Reload,
    Submit(SubmissionInput),
    Help,
    Quit,
    Nothing,
}

/// Splits `<datetime> <description...>`. A date followed by a separate
/// `HH:MM[:SS]` token counts as one date-time.
fn split_submit_args(rest: &str) -> (String, &str) {
    let (first, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let tail = tail.trim_start();
    if dates::parse_filter_date(first).is_ok() {
        let (second, after) = tail.split_once(char::is_whitespace).unwrap_or((tail, ""));
        if dates::parse_time_of_day(second).is_some() {
            return (format!("{first} {second}"), after.trim());
        }
    }
    (first.to_string(), tail.trim())
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_lowercase().as_str() {
        "" => ShellCommand::Nothing,
        "type" | "t" => ShellCommand::Event(ViewEvent::TypeFilterChanged(rest.to_string())),
        "date" | "d" => {
            let date = if rest.is_empty() {
                None
            } else {
                Some(dates::parse_filter_date(rest).map_err(|e| format!("invalid date '{rest}': {e}"))?)
            };
            ShellCommand::Event(ViewEvent::DateFilterChanged(date))
        }
        "clear" => ShellCommand::Event(ViewEvent::FiltersCleared),
        "next" | "n" => ShellCommand::Event(ViewEvent::Navigate(Direction::Next)),
        "prev" | "p" => ShellCommand::Event(ViewEvent::Navigate(Direction::Previous)),
        "page" | "g" => {
            let n = rest
                .parse::<usize>()
                .map_err(|_| format!("invalid page '{rest}'"))?;
            ShellCommand::Event(ViewEvent::Navigate(Direction::GoTo(n)))
        }
        "reload" | "r" => ShellCommand::Reload,
        "submit" | "s" => {
            let (when, description) = split_submit_args(rest);
            ShellCommand::Submit(SubmissionInput::new(when, description))
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(cmd)
}

async fn write_str<W: AsyncWrite + Unpin>(out: &mut W, s: &str) -> Result<(), String> {
    out.write_all(s.as_bytes())
        .await
        .map_err(|e| format!("failed to write output: {e}"))
}

/// Reads one command per line from `input` and re-renders the page after
/// each one, until `quit` or end of input.
pub async fn run<S, R, W>(
    session: &mut Session<S>,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), String>
where
    S: LogStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    out.write_all(&output::render(session.state(), format))
        .await
        .map_err(|e| format!("failed to write output: {e}"))?;

    loop {
        write_str(out, "> ").await?;
        out.flush()
            .await
            .map_err(|e| format!("failed to write output: {e}"))?;
        let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("failed to read input: {e}"))?
        else {
            break;
        };

        let cmd = match parse_line(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                write_str(out, &format!("error: {e}\n")).await?;
                continue;
            }
        };
        match cmd {
            ShellCommand::Nothing => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                write_str(out, HELP).await?;
                continue;
            }
            ShellCommand::Event(event) => session.dispatch(event),
            ShellCommand::Reload => {
                if let Err(e) = session.load().await {
                    write_str(out, &format!("error: {e}\n")).await?;
                    continue;
                }
            }
            ShellCommand::Submit(input) => match session.submit(input).await {
                Ok(done) => {
                    write_str(out, &format!("created entry for {}\n", done.record.event_date))
                        .await?;
                    if let Some(e) = done.reload_error {
                        write_str(out, &format!("warning: list not refreshed: {e}\n")).await?;
                    }
                }
                Err(e) => {
                    write_str(out, &format!("error: {e}\n")).await?;
                    continue;
                }
            },
        }
        out.write_all(&output::render(session.state(), format))
            .await
            .map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}
