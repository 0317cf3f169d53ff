//! Line-oriented control of a running daemon.
//!
//! Stands in for a menu: entries are addressed by their 1-based position in
//! the last `list` output, which is navigation order.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use cs_app::{ClipboardHistory, CycleOutcome, EntryView};
use cs_core::EntryKind;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Search(String),
    Select(usize),
    Favorite(usize),
    Delete(usize),
    Top(usize),
    Clear,
    Next,
    Previous,
    Private(Option<bool>),
    Undo,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list                 show history (history first, then favorites)
  search <text>        show entries containing <text>
  select <n>           put entry <n> on the clipboard
  fav <n>              toggle favorite on entry <n>
  del <n>              delete entry <n>
  top <n>              move entry <n> to the front
  clear                delete all non-favorites except the selection
  next | prev          cycle the selection
  private [on|off]     toggle or set private mode
  undo                 forget the most recent capture
  quit";

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word {
            "list" | "ls" => Self::List,
            "search" | "find" => Self::Search(rest.to_string()),
            "select" | "sel" => Self::Select(position(rest)?),
            "fav" | "favorite" => Self::Favorite(position(rest)?),
            "del" | "delete" | "rm" => Self::Delete(position(rest)?),
            "top" => Self::Top(position(rest)?),
            "clear" => Self::Clear,
            "next" | "n" => Self::Next,
            "prev" | "previous" | "p" => Self::Previous,
            "private" => Self::Private(match rest {
                "" => None,
                "on" => Some(true),
                "off" => Some(false),
                other => bail!("expected on or off, got {other:?}"),
            }),
            "undo" => Self::Undo,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command {other:?}, try help"),
        };
        Ok(command)
    }
}

fn position(arg: &str) -> Result<usize> {
    let n: usize = arg
        .parse()
        .with_context(|| format!("expected an entry number, got {arg:?}"))?;
    if n == 0 {
        bail!("entry numbers start at 1");
    }
    Ok(n)
}

pub fn format_entry(position: usize, view: &EntryView) -> String {
    let marker = if view.selected { '>' } else { ' ' };
    let star = if view.favorite { '*' } else { ' ' };
    let kind = match view.kind {
        EntryKind::Text => "text",
        EntryKind::Image => "image",
        EntryKind::Binary => "data",
    };
    format!("{marker}{position:>3} {star} [{kind:<5}] {}", view.preview)
}

fn print_entries(entries: &[EntryView]) {
    if entries.is_empty() {
        println!("(empty)");
    }
    for (i, view) in entries.iter().enumerate() {
        println!("{}", format_entry(i + 1, view));
    }
}

async fn resolve(history: &ClipboardHistory, n: usize) -> Result<EntryView> {
    history
        .entries()
        .await
        .into_iter()
        .nth(n - 1)
        .ok_or_else(|| anyhow!("no entry {n}"))
}

async fn report_cycle(history: &ClipboardHistory, step: Option<CycleOutcome>) {
    match (step, history.current().await) {
        (Some(step), Some(view)) => println!("{}/{} {}", step.position, step.total, view.preview),
        _ => println!("nothing selected"),
    }
}

/// Runs one command. Returns `false` when the console should stop.
pub async fn execute(history: &ClipboardHistory, command: ConsoleCommand) -> Result<bool> {
    match command {
        ConsoleCommand::List => print_entries(&history.entries().await),
        ConsoleCommand::Search(query) => print_entries(&history.search(&query).await),
        ConsoleCommand::Select(n) => {
            let view = resolve(history, n).await?;
            history.select(&view.id).await?;
        }
        ConsoleCommand::Favorite(n) => {
            let view = resolve(history, n).await?;
            let favorite = history.toggle_favorite(&view.id).await?;
            println!("{} {}", if favorite { "pinned" } else { "unpinned" }, view.preview);
        }
        ConsoleCommand::Delete(n) => {
            let view = resolve(history, n).await?;
            history.remove(&view.id).await?;
        }
        ConsoleCommand::Top(n) => {
            let view = resolve(history, n).await?;
            history.move_to_front(&view.id).await?;
        }
        ConsoleCommand::Clear => {
            let removed = history.clear_history().await;
            println!("removed {removed}");
        }
        ConsoleCommand::Next => report_cycle(history, history.next().await?).await,
        ConsoleCommand::Previous => report_cycle(history, history.previous().await?).await,
        ConsoleCommand::Private(mode) => {
            let enabled = mode.unwrap_or(!history.is_private());
            history.set_privacy_mode(enabled).await?;
            println!("private mode {}", if enabled { "on" } else { "off" });
        }
        ConsoleCommand::Undo => match history.undo_last_capture().await? {
            Some(_) => println!("last capture removed"),
            None => println!("nothing to undo"),
        },
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_console(history: Arc<ClipboardHistory>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if !line.trim().is_empty() {
            let keep_going = match ConsoleCommand::parse(&line) {
                Ok(command) => execute(&history, command).await.unwrap_or_else(|err| {
                    println!("error: {err:#}");
                    true
                }),
                Err(err) => {
                    println!("{err:#}");
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        prompt();
    }
    debug!("console closed");
    Ok(())
}

fn prompt() {
    print!("clipstack> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::{EntryId, MimeType};

    #[test]
    fn parses_commands_with_positions() {
        assert_eq!(ConsoleCommand::parse("fav 3").unwrap(), ConsoleCommand::Favorite(3));
        assert_eq!(ConsoleCommand::parse("  del   12 ").unwrap(), ConsoleCommand::Delete(12));
        assert_eq!(ConsoleCommand::parse("p").unwrap(), ConsoleCommand::Previous);
        assert_eq!(
            ConsoleCommand::parse("search hello world").unwrap(),
            ConsoleCommand::Search("hello world".to_string())
        );
    }

    #[test]
    fn private_takes_optional_mode() {
        assert_eq!(ConsoleCommand::parse("private").unwrap(), ConsoleCommand::Private(None));
        assert_eq!(
            ConsoleCommand::parse("private on").unwrap(),
            ConsoleCommand::Private(Some(true))
        );
        assert!(ConsoleCommand::parse("private maybe").is_err());
    }

    #[test]
    fn rejects_bad_positions_and_unknown_words() {
        assert!(ConsoleCommand::parse("select").is_err());
        assert!(ConsoleCommand::parse("select 0").is_err());
        assert!(ConsoleCommand::parse("select x").is_err());
        assert!(ConsoleCommand::parse("frobnicate").is_err());
    }

    #[test]
    fn formats_selected_favorite() {
        let view = EntryView {
            id: EntryId::from("e"),
            mime: MimeType::text_plain(),
            kind: EntryKind::Text,
            favorite: true,
            selected: true,
            preview: "hello".to_string(),
        };
        assert_eq!(format_entry(2, &view), ">  2 * [text ] hello");
    }
}
