//! Interactive menu loop

use anyhow::Result;
use colored::*;
use sheetstatus_core::Category;
use std::io::{BufRead, Write};

const MENU: &str = "Select Menu:\n(M)ain\n(N)EBS\n(S)martGrid\n(T)est\nE(x)it";

/// An action picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Main,
    Nebs,
    SmartGrid,
    Test { sheet_id: u64, category: Category },
}

enum Selection {
    Action(Choice),
    /// Test was picked; a sheet id is read next
    Test,
    Exit,
    Invalid,
}

fn parse_selection(line: &str) -> Selection {
    match line.trim().to_lowercase().as_str() {
        "m" => Selection::Action(Choice::Main),
        "n" => Selection::Action(Choice::Nebs),
        "s" => Selection::Action(Choice::SmartGrid),
        "t" => Selection::Test,
        "x" => Selection::Exit,
        _ => Selection::Invalid,
    }
}

/// Parse `<SHEET_ID> [nebs|sg]`; the category defaults to SG
fn parse_test_target(line: &str) -> Option<(u64, Category)> {
    let mut parts = line.split_whitespace();
    let sheet_id = parts.next()?.parse().ok()?;
    let category = match parts.next() {
        Some(category) => category.parse().ok()?,
        None => Category::Sg,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((sheet_id, category))
}

fn prompt(text: &str) -> Result<()> {
    println!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}

/// Read selections from `input` until exit or end of input, running `action`
/// for each. A failed action is reported and the menu is shown again.
pub fn run<R, F>(input: R, mut action: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(Choice) -> Result<()>,
{
    let mut lines = input.lines();

    loop {
        prompt(MENU)?;
        let Some(line) = lines.next() else {
            return Ok(());
        };

        let choice = match parse_selection(&line?) {
            Selection::Action(choice) => choice,
            Selection::Exit => return Ok(()),
            Selection::Invalid => {
                println!("Invalid menu selection.");
                continue;
            }
            Selection::Test => {
                prompt("Sheet ID [nebs|sg]:")?;
                let Some(line) = lines.next() else {
                    return Ok(());
                };
                match parse_test_target(&line?) {
                    Some((sheet_id, category)) => Choice::Test { sheet_id, category },
                    None => {
                        println!("Invalid sheet id.");
                        continue;
                    }
                }
            }
        };

        if let Err(err) = action(choice) {
            eprintln!("{} {:#}", "error:".red().bold(), err);
        }
    }
}
