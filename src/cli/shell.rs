use std::io::{self, BufRead, Write};

use crate::cli::output::{money, styled, MessageKind};
use crate::cli::CliError;
use crate::config::Config;
use crate::core::services::LedgerService;
use crate::ledger::{Amount, TransactionKind};

const MENU: [&str; 6] = [
    "1. Add Income",
    "2. Add Expense",
    "3. Calculate Budget",
    "4. Analyze Expenses",
    "5. List Transactions",
    "6. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Runs the interactive menu on stdin/stdout using the resolved configuration.
pub fn run_cli(config: &Config) -> Result<(), CliError> {
    let service = LedgerService::new(Box::new(config.storage()), config.kind_policy);
    tracing::debug!(path = %config.ledger_file.display(), "starting shell");
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(service, stdin.lock(), stdout.lock()).run()
}

/// Numbered text menu over any line-oriented input and output.
pub struct Shell<R, W> {
    service: LedgerService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: LedgerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Loops until the user picks exit or input ends. Any error is returned immediately.
    pub fn run(&mut self) -> Result<(), CliError> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            if self.dispatch(choice.trim())? == LoopControl::Exit {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn dispatch(&mut self, choice: &str) -> Result<LoopControl, CliError> {
        match choice {
            "1" => self.add(TransactionKind::Income),
            "2" => self.add(TransactionKind::Expense),
            "3" => {
                let balance = self.service.calculate_balance()?;
                writeln!(self.output, "Remaining Budget: {}", money(balance))?;
                Ok(LoopControl::Continue)
            }
            "4" => {
                let totals = self.service.analyze_expenses()?;
                writeln!(self.output, "{}", styled(MessageKind::Section, "Expense Analysis:"))?;
                for (category, total) in totals.iter() {
                    writeln!(
                        self.output,
                        "Category: {category} | Total Spent: {}",
                        money(total)
                    )?;
                }
                Ok(LoopControl::Continue)
            }
            "5" => {
                for (index, record) in self.service.list_transactions()?.iter().enumerate() {
                    writeln!(self.output, "{}. {record}", index + 1)?;
                }
                Ok(LoopControl::Continue)
            }
            "6" => Ok(LoopControl::Exit),
            _ => {
                writeln!(
                    self.output,
                    "{}",
                    styled(MessageKind::Warning, "Invalid choice. Please try again.")
                )?;
                Ok(LoopControl::Continue)
            }
        }
    }

    fn add(&mut self, kind: TransactionKind) -> Result<LoopControl, CliError> {
        let Some(category) = self.prompt(&format!("Enter {kind} category: "))? else {
            return Ok(LoopControl::Exit);
        };
        let Some(raw_amount) = self.prompt(&format!("Enter {kind} amount: "))? else {
            return Ok(LoopControl::Exit);
        };
        let amount = Amount::parse(&raw_amount)
            .map_err(|_| CliError::InvalidAmount(raw_amount.trim().to_string()))?;
        let record = self.service.add_transaction(kind, &category, amount)?;
        writeln!(
            self.output,
            "{}",
            styled(
                MessageKind::Success,
                format!("{} recorded: {}", record.kind.label(), record.category)
            )
        )?;
        Ok(LoopControl::Continue)
    }

    fn print_menu(&mut self) -> Result<(), CliError> {
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            styled(MessageKind::Section, "Budget Tracker Application")
        )?;
        for line in MENU {
            writeln!(self.output, "{}", styled(MessageKind::Plain, line))?;
        }
        Ok(())
    }

    /// Prints `message` and reads one line with the trailing newline removed.
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::KindPolicy;
    use crate::storage::{JsonStorage, StorageBackend, WriteMode};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(temp: &TempDir, script: &str) -> (Result<(), CliError>, String) {
        let storage = JsonStorage::new(temp.path().join("transactions.json"), WriteMode::Overwrite);
        let service = LedgerService::new(Box::new(storage), KindPolicy::Lenient);
        let mut shell = Shell::new(service, Cursor::new(script.to_string()), Vec::new());
        let result = shell.run();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (result, output)
    }

    fn stored(temp: &TempDir) -> usize {
        JsonStorage::new(temp.path().join("transactions.json"), WriteMode::Overwrite)
            .load()
            .unwrap()
            .len()
    }

    #[test]
    fn menu_lists_all_six_choices() {
        let temp = TempDir::new().unwrap();
        let (result, output) = run_script(&temp, "6\n");
        result.unwrap();
        for line in MENU {
            assert!(output.contains(line), "missing `{line}` in {output}");
        }
        assert!(output.contains("Choose an option: "));
    }

    #[test]
    fn add_then_report_budget_and_analysis() {
        let temp = TempDir::new().unwrap();
        let script = "1\nsalary\n1000\n2\nfood\n200\n2\nrent\n500\n2\nfood\n50\n3\n4\n6\n";
        let (result, output) = run_script(&temp, script);
        result.unwrap();
        assert_eq!(stored(&temp), 4);
        assert!(output.contains("Remaining Budget: $250"), "{output}");
        assert!(output.contains("Category: food | Total Spent: $250"), "{output}");
        assert!(output.contains("Category: rent | Total Spent: $500"), "{output}");
        let food = output.find("Category: food").unwrap();
        let rent = output.find("Category: rent").unwrap();
        assert!(food < rent);
    }

    #[test]
    fn listing_is_numbered_from_one() {
        let temp = TempDir::new().unwrap();
        let (result, output) = run_script(&temp, "1\nsalary\n1000\n2\nfood\n12.5\n5\n6\n");
        result.unwrap();
        assert!(output.contains("1. Income | Category: salary | Amount: $1000.0 | Date: "));
        assert!(output.contains("2. Expense | Category: food | Amount: $12.5 | Date: "));
    }

    #[test]
    fn invalid_choice_keeps_looping() {
        let temp = TempDir::new().unwrap();
        let (result, output) = run_script(&temp, "9\n6\n");
        result.unwrap();
        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches("Budget Tracker Application").count(), 2);
    }

    #[test]
    fn non_numeric_amount_is_fatal() {
        let temp = TempDir::new().unwrap();
        let (result, _) = run_script(&temp, "2\nfood\nlots\n6\n");
        let err = result.expect_err("amount must be numeric");
        assert!(matches!(err, CliError::InvalidAmount(ref raw) if raw == "lots"));
        assert_eq!(stored(&temp), 0);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let temp = TempDir::new().unwrap();
        let (result, _) = run_script(&temp, "1\nsalary\n");
        result.unwrap();
        assert_eq!(stored(&temp), 0);
    }
}
