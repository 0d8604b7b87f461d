//! Interactive food-logging session.
//!
//! A session owns one `DailyLog` for the lifetime of the process and reads
//! one command per line until `quit` or end of input.

use crate::report;
use diet_core::{
    CalorieTarget, DailyLog, Error, FoodCatalog, HistoryStore, Macros, Result,
};
use std::io::{BufRead, Write};

pub const HELP: &str = "\
Commands:
  add [qty] <dish>                                  log servings of a catalog dish
  custom <qty> <kcal> <protein> <carbs> <fats> <name>  log a food not in the catalog
  log                                               show today's entries
  totals                                            show totals and remaining calories
  reset                                             clear today's log
  save                                              record today's totals in history
  history                                           show recorded days
  help                                              show this message
  quit                                              leave the session";

#[derive(Debug, PartialEq)]
enum Command {
    Add { quantity: u32, dish: String },
    Custom { quantity: u32, per_serving: Macros, name: String },
    Log,
    Totals,
    Reset,
    Save,
    History,
    Help,
    Quit,
}

fn parse_quantity(token: &str) -> std::result::Result<u32, String> {
    match token.parse::<i64>() {
        Ok(q) if q >= 1 && q <= i64::from(u32::MAX) => Ok(q as u32),
        Ok(_) => Err("quantity must be a positive whole number".into()),
        Err(_) => Err(format!("'{}' is not a whole number", token)),
    }
}

fn parse_amount(token: &str, what: &str) -> std::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|_| format!("{} '{}' is not a number", what, token))
}

impl Command {
    fn parse(line: &str) -> std::result::Result<Command, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "add" => {
                if rest.is_empty() {
                    return Err("usage: add [qty] <dish>".into());
                }
                let (first, tail) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                // A leading number is the quantity; otherwise one serving
                if first.parse::<i64>().is_ok() {
                    if tail.trim().is_empty() {
                        return Err("usage: add [qty] <dish>".into());
                    }
                    Ok(Command::Add {
                        quantity: parse_quantity(first)?,
                        dish: tail.trim().to_string(),
                    })
                } else {
                    Ok(Command::Add {
                        quantity: 1,
                        dish: rest.to_string(),
                    })
                }
            }
            "custom" => {
                let tokens: Vec<&str> = rest.splitn(6, char::is_whitespace).collect();
                if tokens.len() < 6 || tokens[5].trim().is_empty() {
                    return Err(
                        "usage: custom <qty> <kcal> <protein> <carbs> <fats> <name>".into(),
                    );
                }
                Ok(Command::Custom {
                    quantity: parse_quantity(tokens[0])?,
                    per_serving: Macros::new(
                        parse_amount(tokens[1], "calories")?,
                        parse_amount(tokens[2], "protein")?,
                        parse_amount(tokens[3], "carbs")?,
                        parse_amount(tokens[4], "fats")?,
                    ),
                    name: tokens[5].trim().to_string(),
                })
            }
            "log" => Ok(Command::Log),
            "totals" => Ok(Command::Totals),
            "reset" => Ok(Command::Reset),
            "save" => Ok(Command::Save),
            "history" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}' (type 'help')", other)),
        }
    }
}

pub struct Session<'a> {
    catalog: &'a FoodCatalog,
    store: HistoryStore,
    target: CalorieTarget,
    user_name: String,
    log: DailyLog,
}

impl<'a> Session<'a> {
    pub fn new(
        catalog: &'a FoodCatalog,
        store: HistoryStore,
        target: CalorieTarget,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            store,
            target,
            user_name: user_name.into(),
            log: DailyLog::new(),
        }
    }

    /// Read commands from `input` until quit or EOF
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        report::print_target(out, &self.target)?;
        writeln!(out)?;
        writeln!(out, "Type 'help' for commands.")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(msg) => {
                    writeln!(out, "Error: {}", msg)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            match self.execute(command, out) {
                Ok(()) => {}
                Err(Error::InvalidInput(msg)) => writeln!(out, "Error: {}", msg)?,
                // Storage failures keep the session alive so the log can be saved again
                Err(e @ (Error::Io(_) | Error::Csv(_))) => {
                    tracing::error!("History store error: {}", e);
                    writeln!(out, "Error: {}", e)?;
                }
                Err(e) => return Err(e),
            }
        }

        if !self.log.is_empty() {
            tracing::info!("Session ended with {} entries in the log", self.log.len());
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Add { quantity, dish } => {
                match self.log.add_food(self.catalog, &dish, quantity)? {
                    Some(entry) => writeln!(out, "Added {} x {}", entry.quantity, entry.dish_name)?,
                    None => writeln!(out, "Food not found: {}", dish)?,
                }
            }
            Command::Custom {
                quantity,
                per_serving,
                name,
            } => {
                let entry = self.log.add_custom_food(&name, per_serving, quantity)?;
                writeln!(out, "Added {} x {} (custom)", entry.quantity, entry.dish_name)?;
            }
            Command::Log => report::print_log(out, self.log.entries())?,
            Command::Totals => {
                report::print_totals(out, &self.log.calculate_totals(), self.target.target)?
            }
            Command::Reset => {
                self.log.reset_day();
                writeln!(out, "New day started! Food log cleared")?;
            }
            Command::Save => {
                let totals = self.log.calculate_totals();
                let record = self
                    .store
                    .record_day(&self.user_name, &totals, self.target.target)?;
                writeln!(
                    out,
                    "Saved {} for {}: {} kcal ({})",
                    record.date, record.name, record.totals.calories, record.status
                )?;
            }
            Command::History => report::print_history(out, &self.store.read_history()?)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }
}
