//! The interactive menu loop.
//!
//! [`Console`] owns the record store for the session and drives it from a menu read off any
//! `BufRead` input. Failures inside a menu operation are reported and the menu is shown again;
//! only choosing Exit, or the input stream ending, stops the loop.

use crate::prompt::{ConsoleError, ConsoleResult, Prompter};
use medrec_core::constants::DATE_FORMAT_HINT;
use medrec_core::{
    DeleteOutcome, ListView, NonEmptyText, RecordStore, StoreError, parse_date_of_birth,
};
use std::io::{BufRead, Write};

const MENU: &[&str] = &[
    "",
    "===== MEDICAL RECORDS MANAGEMENT SYSTEM =====",
    "1. Add a new medical record",
    "2. Delete a medical record",
    "3. Display all medical records",
    "4. Save records to file",
    "5. Load records from file",
    "6. Exit",
];

/// A menu selection. Any integer is accepted; unknown values map to `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    List,
    Save,
    Load,
    Exit,
    Invalid(i32),
}

impl From<i32> for MenuChoice {
    fn from(value: i32) -> Self {
        match value {
            1 => MenuChoice::Add,
            2 => MenuChoice::Delete,
            3 => MenuChoice::List,
            4 => MenuChoice::Save,
            5 => MenuChoice::Load,
            6 => MenuChoice::Exit,
            other => MenuChoice::Invalid(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Running,
    Exited,
}

pub struct Console<R, W> {
    store: RecordStore,
    prompter: Prompter<R, W>,
    state: ConsoleState,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(store: RecordStore, input: R, output: W) -> Self {
        Self {
            store,
            prompter: Prompter::new(input, output),
            state: ConsoleState::Running,
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// Tears the console down, handing back the store and the output sink.
    pub fn into_parts(self) -> (RecordStore, W) {
        (self.store, self.prompter.into_output())
    }

    /// Runs the menu loop until Exit is chosen or input ends.
    ///
    /// # Errors
    ///
    /// Only output failures escape: with no way to show a message, the loop cannot continue.
    pub fn run(&mut self) -> std::io::Result<()> {
        match self.run_loop() {
            Ok(()) => Ok(()),
            Err(ConsoleError::Output(e)) => Err(e),
            Err(other) => {
                tracing::debug!("console loop stopped: {}", other);
                Ok(())
            }
        }
    }

    fn run_loop(&mut self) -> ConsoleResult<()> {
        while self.state == ConsoleState::Running {
            match self.step() {
                Ok(()) => {}
                Err(ConsoleError::InputClosed) => {
                    tracing::info!("input closed, leaving menu");
                    self.state = ConsoleState::Exited;
                }
                Err(e @ ConsoleError::Output(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!("menu operation failed: {}", e);
                    self.prompter.say(format!("An error occurred: {e}"))?;
                }
            }

            if self.state == ConsoleState::Running {
                self.prompter.say("\nPress Enter to continue...")?;
                if let Err(ConsoleError::InputClosed) = self.prompter.read_line() {
                    self.state = ConsoleState::Exited;
                }
            }
        }

        Ok(())
    }

    /// Shows the menu once and performs the selected operation.
    pub fn step(&mut self) -> ConsoleResult<()> {
        for line in MENU {
            self.prompter.say(line)?;
        }

        let choice = self.prompter.ask_until(
            "Enter your choice: ",
            "Please enter a valid number.",
            |s| s.parse::<i32>(),
        )?;

        match MenuChoice::from(choice) {
            MenuChoice::Add => self.add_record(),
            MenuChoice::Delete => self.delete_record(),
            MenuChoice::List => self.list_records(),
            MenuChoice::Save => self.save_records(),
            MenuChoice::Load => self.load_records(),
            MenuChoice::Exit => {
                self.prompter.say("Exiting the program...")?;
                self.state = ConsoleState::Exited;
                Ok(())
            }
            MenuChoice::Invalid(value) => {
                tracing::debug!(choice = value, "invalid menu choice");
                self.prompter.say("Invalid choice. Please try again.")
            }
        }
    }

    fn add_record(&mut self) -> ConsoleResult<()> {
        self.prompter.say("\n--- Add New Medical Record ---")?;
        let name = self.prompter.ask_until(
            "Enter patient name: ",
            "Patient name cannot be empty.",
            |s| NonEmptyText::new(s),
        )?;
        let date_of_birth = self.prompter.ask_until(
            &format!("Enter date of birth ({DATE_FORMAT_HINT}): "),
            &format!("Invalid date format. Please use {DATE_FORMAT_HINT} format."),
            parse_date_of_birth,
        )?;
        let diagnosis = self.prompter.ask_until(
            "Enter diagnosis: ",
            "Diagnosis cannot be empty.",
            |s| NonEmptyText::new(s),
        )?;

        self.store.add(name, date_of_birth, diagnosis);
        self.prompter.say("Medical record added successfully!")
    }

    fn delete_record(&mut self) -> ConsoleResult<()> {
        if self.store.is_empty() {
            return self.prompter.say("No records to delete.");
        }

        self.prompter.say("\n--- Delete Medical Record ---")?;
        let name = self.prompter.ask("Enter patient name to delete: ")?;

        match self.store.delete(&name) {
            DeleteOutcome::Removed(_) => self.prompter.say("Record deleted successfully!"),
            DeleteOutcome::NotFound => self.prompter.say("No record found with that name."),
        }
    }

    fn list_records(&mut self) -> ConsoleResult<()> {
        let records = match self.store.list() {
            ListView::Empty => return self.prompter.say("No records to display."),
            ListView::Records(records) => records,
        };

        let lines: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}. {}", i + 1, record))
            .collect();

        self.prompter.say("\n--- All Medical Records ---")?;
        for line in lines {
            self.prompter.say(line)?;
        }
        Ok(())
    }

    fn save_records(&mut self) -> ConsoleResult<()> {
        let file_name = self.prompter.ask("Enter filename to save: ")?;

        match self.store.save(&file_name) {
            Ok(path) => self
                .prompter
                .say(format!("Records saved successfully to {}", path.display())),
            Err(e) => self.prompter.say(format!("Error saving to file: {e}")),
        }
    }

    fn load_records(&mut self) -> ConsoleResult<()> {
        let file_name = self.prompter.ask("Enter filename to load: ")?;

        match self.store.load(&file_name) {
            Ok(path) => self
                .prompter
                .say(format!("Records loaded successfully from {}", path.display())),
            Err(StoreError::FileNotFound(path)) => self
                .prompter
                .say(format!("File not found: {}", path.display())),
            Err(e) if e.is_incompatible() => {
                self.prompter.say(format!("Incompatible file format: {e}"))
            }
            Err(e) => self.prompter.say(format!("Error reading file: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_core::StoreConfig;
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Runs a full session over `input` and returns the store and everything printed.
    fn run_session(store: RecordStore, input: &[u8]) -> (RecordStore, String) {
        let mut console = Console::new(store, Cursor::new(input.to_vec()), Vec::new());
        console.run().unwrap();
        assert_eq!(console.state(), ConsoleState::Exited);

        let (store, output) = console.into_parts();
        (store, String::from_utf8(output).unwrap())
    }

    fn store_in(temp: &TempDir) -> RecordStore {
        RecordStore::new(StoreConfig::new(temp.path().to_path_buf()).unwrap())
    }

    const ADD_ALICE_AND_BOB: &str = "1\nAlice\n01/01/1990\nFlu\n\n1\nBob\n02/02/1985\nCold\n\n";

    #[test]
    fn menu_choice_maps_integers() {
        assert_eq!(MenuChoice::from(1), MenuChoice::Add);
        assert_eq!(MenuChoice::from(6), MenuChoice::Exit);
        assert_eq!(MenuChoice::from(0), MenuChoice::Invalid(0));
        assert_eq!(MenuChoice::from(-3), MenuChoice::Invalid(-3));
    }

    #[test]
    fn exit_prints_farewell() {
        let (_, out) = run_session(RecordStore::default(), b"6\n");
        assert!(out.contains("===== MEDICAL RECORDS MANAGEMENT SYSTEM ====="));
        assert!(out.contains("Exiting the program..."));
        assert!(!out.contains("Press Enter to continue..."));
    }

    #[test]
    fn non_numeric_choice_is_reprompted() {
        let (_, out) = run_session(RecordStore::default(), b"abc\n3\n\n6\n");
        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("No records to display."));
    }

    #[test]
    fn out_of_range_choice_is_invalid() {
        let (_, out) = run_session(RecordStore::default(), b"99\n\n-1\n\n6\n");
        assert_eq!(out.matches("Invalid choice. Please try again.").count(), 2);
        assert!(out.contains("Exiting the program..."));
    }

    #[test]
    fn adds_and_lists_records() {
        let input = format!("{ADD_ALICE_AND_BOB}3\n\n6\n");
        let (store, out) = run_session(RecordStore::default(), input.as_bytes());

        assert_eq!(store.len(), 2);
        assert_eq!(out.matches("Medical record added successfully!").count(), 2);
        assert!(out.contains(
            "--- All Medical Records ---\n\
             1. Patient: Alice, Date of Birth: 01/01/1990, Diagnosis: Flu\n\
             2. Patient: Bob, Date of Birth: 02/02/1985, Diagnosis: Cold\n"
        ));
    }

    #[test]
    fn add_reprompts_for_bad_date_and_blank_text() {
        let input = b"1\n\nAlice\n1990-01-01\n01/01/1990\n  \nFlu\n\n6\n";
        let (store, out) = run_session(RecordStore::default(), input);

        assert!(out.contains("Patient name cannot be empty."));
        assert!(out.contains("Invalid date format. Please use dd/MM/yyyy format."));
        assert!(out.contains("Diagnosis cannot be empty."));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].diagnosis().as_str(), "Flu");
    }

    #[test]
    fn deletes_ignoring_case() {
        let input = format!("{ADD_ALICE_AND_BOB}2\nalice\n\n3\n\n6\n");
        let (store, out) = run_session(RecordStore::default(), input.as_bytes());

        assert!(out.contains("Record deleted successfully!"));
        assert!(out.contains("1. Patient: Bob, Date of Birth: 02/02/1985, Diagnosis: Cold"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_reports_unknown_name() {
        let input = format!("{ADD_ALICE_AND_BOB}2\nCarol\n\n6\n");
        let (store, out) = run_session(RecordStore::default(), input.as_bytes());

        assert!(out.contains("No record found with that name."));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_on_empty_store_skips_prompt() {
        let (_, out) = run_session(RecordStore::default(), b"2\n\n6\n");
        assert!(out.contains("No records to delete."));
        assert!(!out.contains("Enter patient name to delete: "));
    }

    #[test]
    fn saves_and_loads_through_menu() {
        let temp = TempDir::new().unwrap();
        let input = format!("{ADD_ALICE_AND_BOB}4\nclinic\n\n6\n");
        let (saved, out) = run_session(store_in(&temp), input.as_bytes());

        let expected_path = temp.path().join("clinic.dat");
        assert!(expected_path.is_file());
        assert!(out.contains(&format!(
            "Records saved successfully to {}",
            expected_path.display()
        )));

        let (loaded, out) = run_session(store_in(&temp), b"5\nclinic.dat\n\n6\n");
        assert!(out.contains("Records loaded successfully from"));
        assert_eq!(loaded.records(), saved.records());
    }

    #[test]
    fn load_missing_file_keeps_records() {
        let temp = TempDir::new().unwrap();
        let input = format!("{ADD_ALICE_AND_BOB}5\nmissing\n\n6\n");
        let (store, out) = run_session(store_in(&temp), input.as_bytes());

        assert!(out.contains("File not found:"));
        assert!(out.contains("missing.dat"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_incompatible_file_keeps_records() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("old.dat"), b"\xac\xed\x00\x05").unwrap();

        let input = format!("{ADD_ALICE_AND_BOB}5\nold\n\n6\n");
        let (store, out) = run_session(store_in(&temp), input.as_bytes());

        assert!(out.contains("Incompatible file format:"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn save_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let input = format!("{ADD_ALICE_AND_BOB}4\nno-such-dir/clinic\n\n6\n");
        let (_, out) = run_session(store_in(&temp), input.as_bytes());

        assert!(out.contains("Error saving to file:"));
        assert!(out.contains("Exiting the program..."));
    }

    #[test]
    fn unreadable_input_is_caught_and_loop_continues() {
        let mut input = b"1\n".to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"\n6\n");
        let (store, out) = run_session(RecordStore::default(), &input);

        assert!(out.contains("An error occurred:"));
        assert!(out.contains("Exiting the program..."));
        assert!(store.is_empty());
    }

    #[test]
    fn end_of_input_stops_loop() {
        let (store, out) = run_session(RecordStore::default(), b"1\nAlice\n");
        assert!(store.is_empty());
        assert!(!out.contains("An error occurred:"));
    }
}
