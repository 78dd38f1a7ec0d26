// src/cli.rs
use crate::commands::{Command, Confirmation};
use crate::error::WatchlistError;
use crate::models::Projection;
use crate::render::render_table;
use crate::watchlist::{SaveStatus, Watchlist};
use log::{debug, info};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands (Enter 'H' to hide commands)
----------------------------------------------------------------------------------
add [ticker] : to add stock to watchlist
remove [ticker] : to remove stock from watchlist
sort [sortBy] [sortOrder] : sortBy opt (ticker, price), sortOrder (asc, dsc)
list : show watchlist in saved order
[H] : Hide list of commands
[S] : Show list of commands
[q] : Exit
----------------------------------------------------------------------------------";

const HIDDEN_HELP: &str = "\
[Commands are currently hidden. Enter 'S' to show commands.]
----------------------------------------------------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Add(String),
    Remove(String),
}

/// What the loop is waiting for next.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prompt {
    Command,
    Confirm(Pending),
    Exit,
}

/// Interactive session over one watchlist. Each line is fully handled,
/// network calls included, before the next one is read.
pub struct Session<'a, W: Write> {
    watchlist: &'a mut Watchlist,
    out: &'a mut W,
    show_help: bool,
    projection: Option<Projection>,
}

impl<'a, W: Write> Session<'a, W> {
    pub fn new(watchlist: &'a mut Watchlist, out: &'a mut W) -> Self {
        Self {
            watchlist,
            out,
            show_help: true,
            projection: None,
        }
    }

    /// Loads the saved watchlist, then serves commands until `q` or end of input.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        match self.watchlist.load().await {
            Ok(count) => info!("Restored {} stocks from previous session", count),
            Err(e) => writeln!(self.out, "{}", e)?,
        }

        let mut lines = input.lines();
        let mut prompt = Prompt::Command;
        loop {
            match &prompt {
                Prompt::Command => {
                    self.display()?;
                    write!(self.out, "Please enter a command: ")?;
                }
                Prompt::Confirm(pending) => {
                    write!(self.out, "{}", confirmation_question(pending))?;
                }
                Prompt::Exit => break,
            }
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };
            debug!("Input: {:?}", line);
            prompt = match prompt {
                Prompt::Confirm(pending) => self.confirm(pending, &line).await?,
                _ => self.command(&line).await?,
            };
        }
        writeln!(self.out, "Exiting program.")?;
        Ok(())
    }

    async fn command(&mut self, line: &str) -> io::Result<Prompt> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(Prompt::Command);
            }
        };

        let next = match command {
            Command::Add(symbol) => {
                if self.watchlist.validate(&symbol).await {
                    Prompt::Confirm(Pending::Add(symbol))
                } else {
                    writeln!(self.out, "{}", WatchlistError::InvalidSymbol(symbol))?;
                    Prompt::Command
                }
            }
            Command::Remove(symbol) => Prompt::Confirm(Pending::Remove(symbol)),
            Command::Sort(sort_by, sort_order) => {
                match self.watchlist.sort(sort_by, sort_order).await {
                    Ok(projection) => self.projection = Some(projection),
                    Err(e) => {
                        self.projection = None;
                        writeln!(self.out, "{}", e)?;
                        writeln!(self.out, "Showing watchlist in its saved order.")?;
                    }
                }
                Prompt::Command
            }
            Command::List => {
                self.projection = None;
                Prompt::Command
            }
            Command::HideHelp => {
                self.show_help = false;
                Prompt::Command
            }
            Command::ShowHelp => {
                self.show_help = true;
                Prompt::Command
            }
            Command::Quit => Prompt::Exit,
        };
        Ok(next)
    }

    async fn confirm(&mut self, pending: Pending, line: &str) -> io::Result<Prompt> {
        let answer = match line.parse::<Confirmation>() {
            Ok(answer) => answer,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(Prompt::Confirm(pending));
            }
        };

        match (pending, answer) {
            (Pending::Add(symbol), Confirmation::No) => {
                writeln!(self.out, "{} was not added to your watchlist.", symbol)?;
            }
            (Pending::Remove(symbol), Confirmation::No) => {
                writeln!(self.out, "{} was not removed from your watchlist.", symbol)?;
            }
            (Pending::Add(symbol), Confirmation::Yes) => {
                match self.watchlist.fetch(&symbol).await {
                    Ok(holding) => {
                        let result = self.watchlist.add(&symbol, holding).await;
                        let done =
                            format!("{} has been successfully added to your watchlist", symbol);
                        self.report(result, &done)?;
                    }
                    Err(e) => writeln!(self.out, "{}", e)?,
                }
            }
            (Pending::Remove(symbol), Confirmation::Yes) => {
                let result = self.watchlist.remove(&symbol).await;
                let done =
                    format!("{} has been successfully removed from your watchlist", symbol);
                self.report(result, &done)?;
            }
        }
        Ok(Prompt::Command)
    }

    fn report(
        &mut self,
        result: Result<SaveStatus, WatchlistError>,
        done: &str,
    ) -> io::Result<()> {
        match result {
            Ok(status) => {
                self.projection = None;
                writeln!(self.out, "{}", done)?;
                match status {
                    SaveStatus::Saved => writeln!(self.out, "Watchlist saved successfully"),
                    SaveStatus::Failed(e) => writeln!(self.out, "{}", e),
                }
            }
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    fn display(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "To add or remove stocks from your watchlist, enter:")?;
        writeln!(self.out, "add [ticker] | remove [ticker]")?;
        if let Some(projection) = &self.projection {
            writeln!(
                self.out,
                "Sorted by {} ({})",
                projection.sort_by, projection.sort_order
            )?;
        }
        let rows = self.watchlist.rows(self.projection.as_ref());
        write!(self.out, "{}", render_table(&rows))?;
        if self.show_help {
            writeln!(self.out, "{}", HELP)?;
        } else {
            writeln!(self.out, "{}", HIDDEN_HELP)?;
        }
        Ok(())
    }
}

fn confirmation_question(pending: &Pending) -> String {
    match pending {
        Pending::Add(symbol) => format!(
            "Are you sure you want to add {} to your watchlist? \
             You can always remove the stock if you change your mind! (Y/N): ",
            symbol
        ),
        Pending::Remove(symbol) => format!(
            "Are you sure you want to remove {} from your watchlist? \
             If removed, you can always re-add the stock back to your watchlist. (Y/N): ",
            symbol
        ),
    }
}
