// src/commands.rs
use crate::error::CommandError;
use crate::models::{canonical_symbol, SortBy, SortOrder};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(String),
    Sort(SortBy, SortOrder),
    /// Canonical order, dropping any sort projection.
    List,
    HideHelp,
    ShowHelp,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["H"] => Ok(Command::HideHelp),
            ["S"] => Ok(Command::ShowHelp),
            ["q"] | ["quit"] => Ok(Command::Quit),
            ["list"] => Ok(Command::List),
            ["add"] | ["remove"] => Err(CommandError::MissingSymbol),
            ["add", symbol] => Ok(Command::Add(canonical_symbol(symbol))),
            ["remove", symbol] => Ok(Command::Remove(canonical_symbol(symbol))),
            ["sort", sort_by, sort_order] => {
                Ok(Command::Sort(sort_by.parse()?, sort_order.parse()?))
            }
            [_, _] => Err(CommandError::MissingSymbol),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl FromStr for Confirmation {
    type Err = CommandError;

    fn from_str(answer: &str) -> Result<Self, Self::Err> {
        match answer.trim() {
            "Y" | "y" => Ok(Confirmation::Yes),
            "N" | "n" => Ok(Confirmation::No),
            _ => Err(CommandError::Confirmation),
        }
    }
}
