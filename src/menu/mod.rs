//! Interactive menu - read a choice, prompt for fields, dispatch, repeat.
//!
//! # Flow
//! ```text
//! select record store ──▶ prompt database ──▶ Session::open
//!        │                                         │
//!        ▼                                         ▼
//!      exit                  ┌──▶ show menu ──▶ read choice ──▶ record operation
//!                            └──────────────── report outcome ◀───────┘
//! ```
//!
//! Recoverable errors are reported and the loop continues. Unparseable
//! numbers end the loop with `Error::InvalidInput`.

pub mod console;
pub mod input;
pub mod render;

use std::io::{BufRead, Write};

use crate::common::config::GPA_HINT;
use crate::common::{
    ConnectionConfig, Employee, EmployeePatch, Error, NewStudent, RecordKind, Result, StudentPatch,
};
use crate::records::{employees, students};
use crate::storage::{Dialect, Session};

pub use console::Console;

use input::{optional_text, parse_id, parse_optional_date, parse_optional_number};
use render::{rule, NARROW_RULE_WIDTH};

/// Which record store the user picked at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Students with auto-increment keys; deletes ask for confirmation.
    Students,
    /// Students with sequence keys and named placeholders; deletes do not ask.
    SequenceStudents,
    /// Employees with user-chosen keys; deletes do not ask.
    Employees,
}

impl Variant {
    pub fn config(self) -> ConnectionConfig {
        match self {
            Variant::Students => ConnectionConfig::new(RecordKind::Students),
            Variant::SequenceStudents => {
                ConnectionConfig::new(RecordKind::Students).with_dialect(Dialect::Named)
            }
            Variant::Employees => ConnectionConfig::new(RecordKind::Employees),
        }
    }

    pub fn confirms_delete(self) -> bool {
        matches!(self, Variant::Students)
    }
}

/// Run the whole program on `console`.
///
/// # Errors
/// `Error::Connect` when the database cannot be opened, `Error::InvalidInput`
/// when a number cannot be parsed, `Error::Io` on terminal failure.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say(rule(NARROW_RULE_WIDTH))?;
    console.say("  STUDENTDB RECORD MANAGER")?;
    console.say(rule(NARROW_RULE_WIDTH))?;

    let Some(variant) = select_variant(console)? else {
        console.say("Exiting...")?;
        return Ok(());
    };

    let mut session = connect(console, variant)?;
    let kind = session.config().kind;
    let outcome = match kind {
        RecordKind::Students => {
            StudentMenu::new(console, &mut session, variant.confirms_delete()).run()
        }
        RecordKind::Employees => EmployeeMenu::new(console, &mut session).run(),
    };

    session.close();
    if outcome.is_ok() {
        console.say("Database connection closed.")?;
    }
    outcome
}

/// Ask which record store to open. `None` means exit.
pub fn select_variant<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<Variant>> {
    console.say("\nSelect Database Type:")?;
    console.say("1. Students (auto-increment keys)")?;
    console.say("2. Students (sequence keys)")?;
    console.say("3. Employees")?;
    console.say("4. Exit")?;

    let choice = console.prompt("\nEnter choice (1-4): ")?;
    Ok(match choice.as_deref().map(str::trim) {
        Some("1") => Some(Variant::Students),
        Some("2") => Some(Variant::SequenceStudents),
        Some("3") => Some(Variant::Employees),
        _ => None,
    })
}

/// Prompt for the database file and open a session on it.
pub fn connect<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    variant: Variant,
) -> Result<Session> {
    let defaults = variant.config();
    let label = format!("Enter database file (default: {}): ", defaults.database);
    let database = console.ask_or(&label, &defaults.database)?;

    let session = Session::open(defaults.with_database(database))?;
    console.say("Database connected successfully!")?;

    let report = session.bootstrap_report();
    for failure in &report.failures {
        console.say(format!("ERROR creating table: {}", failure))?;
    }
    if report.is_clean() {
        let table = match session.config().kind {
            RecordKind::Students => "students",
            RecordKind::Employees => "employees",
        };
        console.say(format!("Table '{}' verified/created.", table))?;
    }
    Ok(session)
}

/// Print the message for a failed operation.
fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    noun: &str,
    action: &str,
    err: &Error,
) -> Result<()> {
    match err {
        Error::NotFound(id) => console.say(format!("No {} found with ID: {}", noun, id)),
        Error::NothingToUpdate => console.say("No fields to update!"),
        other => console.say(format!("ERROR {}: {}", action, other)),
    }
}

/// Report recoverable failures; pass anything else up.
fn settle<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    noun: &str,
    action: &str,
    outcome: Result<()>,
) -> Result<()> {
    match outcome {
        Err(err) if err.is_recoverable() => report(console, noun, action, &err),
        other => other,
    }
}

// ============================================================================
// Students
// ============================================================================

struct StudentMenu<'a, R, W> {
    console: &'a mut Console<R, W>,
    session: &'a mut Session,
    confirm_delete: bool,
}

impl<'a, R: BufRead, W: Write> StudentMenu<'a, R, W> {
    fn new(console: &'a mut Console<R, W>, session: &'a mut Session, confirm_delete: bool) -> Self {
        Self {
            console,
            session,
            confirm_delete,
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.show()?;
            let Some(choice) = self.console.prompt("\nEnter your choice (1-6): ")? else {
                return self.farewell();
            };

            let (action, outcome) = match choice.trim() {
                "1" => ("adding student", self.add()),
                "2" => ("retrieving students", self.view_all()),
                "3" => ("searching student", self.search()),
                "4" => ("updating student", self.update()),
                "5" => ("deleting student", self.delete()),
                "6" => return self.farewell(),
                _ => (
                    "reading choice",
                    self.console
                        .say("Invalid choice! Please enter a number between 1-6."),
                ),
            };
            settle(self.console, "student", action, outcome)?;
        }
    }

    fn show(&mut self) -> Result<()> {
        self.console.say(format!("\n{}", rule(NARROW_RULE_WIDTH)))?;
        self.console.say("   STUDENT DATABASE MANAGEMENT SYSTEM")?;
        self.console.say(rule(NARROW_RULE_WIDTH))?;
        self.console.say("1. Add New Student")?;
        self.console.say("2. View All Students")?;
        self.console.say("3. Search Student by ID")?;
        self.console.say("4. Update Student Information")?;
        self.console.say("5. Delete Student")?;
        self.console.say("6. Exit")?;
        self.console.say(rule(NARROW_RULE_WIDTH))
    }

    fn farewell(&mut self) -> Result<()> {
        self.console
            .say("\nThank you for using the Student Database Management System!")
    }

    fn add(&mut self) -> Result<()> {
        self.console.say("\n--- Add New Student ---")?;
        let name = self.console.ask("Enter name: ")?;
        let email = self.console.ask("Enter email: ")?;
        let department = optional_text(self.console.ask("Enter department: ")?);
        let gpa_label = format!("Enter GPA ({:.1} - {:.1}): ", GPA_HINT.0, GPA_HINT.1);
        let gpa = parse_optional_number("GPA", &self.console.ask(&gpa_label)?)?;
        let enrollment_date =
            parse_optional_date(&self.console.ask("Enter enrollment date (YYYY-MM-DD): ")?)?;

        let student = NewStudent {
            name,
            email,
            department,
            gpa,
            enrollment_date,
        };
        let id = students::add(self.session, &student)?;
        self.console.say(format!(
            "Student '{}' added successfully! (ID: {})",
            student.name, id
        ))
    }

    fn view_all(&mut self) -> Result<()> {
        let all = students::list(self.session)?;
        if all.is_empty() {
            return self.console.say("No students found in database.");
        }
        self.console.say(render::student_table(&all))
    }

    fn search(&mut self) -> Result<()> {
        let id = parse_id(&self.console.ask("\nEnter student ID to search: ")?)?;
        match students::get(self.session, id)? {
            Some(student) => self.console.say(render::student_detail(&student)),
            None => Err(Error::NotFound(id)),
        }
    }

    fn update(&mut self) -> Result<()> {
        self.console.say("\n--- Update Student Information ---")?;
        let id = parse_id(&self.console.ask("Enter student ID to update: ")?)?;

        self.console.say("Leave blank to skip updating a field")?;
        let patch = StudentPatch {
            name: optional_text(self.console.ask("Enter new name: ")?),
            email: optional_text(self.console.ask("Enter new email: ")?),
            department: optional_text(self.console.ask("Enter new department: ")?),
            gpa: parse_optional_number("GPA", &self.console.ask("Enter new GPA: ")?)?,
            enrollment_date: parse_optional_date(
                &self.console.ask("Enter new enrollment date (YYYY-MM-DD): ")?,
            )?,
        };

        students::update(self.session, id, &patch)?;
        self.console
            .say(format!("Student ID {} updated successfully!", id))
    }

    fn delete(&mut self) -> Result<()> {
        let id = parse_id(&self.console.ask("\nEnter student ID to delete: ")?)?;

        if self.confirm_delete {
            // Existence is checked, then confirmed, then deleted, with no
            // lock held in between.
            let Some(student) = students::get(self.session, id)? else {
                return Err(Error::NotFound(id));
            };
            self.console.say(render::student_detail(&student))?;

            let label = format!(
                "\nAre you sure you want to delete student ID {}? (yes/no): ",
                id
            );
            if !self.console.confirm(&label)? {
                return self.console.say("Delete operation cancelled.");
            }
        }

        students::delete(self.session, id)?;
        self.console
            .say(format!("Student ID {} deleted successfully!", id))
    }
}

// ============================================================================
// Employees
// ============================================================================

struct EmployeeMenu<'a, R, W> {
    console: &'a mut Console<R, W>,
    session: &'a mut Session,
}

impl<'a, R: BufRead, W: Write> EmployeeMenu<'a, R, W> {
    fn new(console: &'a mut Console<R, W>, session: &'a mut Session) -> Self {
        Self { console, session }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.show()?;
            let Some(choice) = self.console.prompt("\nEnter your choice (1-5): ")? else {
                return self.farewell();
            };

            let (action, outcome) = match choice.trim() {
                "1" => ("adding employee", self.add()),
                "2" => ("retrieving employees", self.view_all()),
                "3" => ("updating employee", self.update()),
                "4" => ("deleting employee", self.delete()),
                "5" => return self.farewell(),
                _ => (
                    "reading choice",
                    self.console
                        .say("Invalid choice! Please enter a number between 1-5."),
                ),
            };
            settle(self.console, "employee", action, outcome)?;
        }
    }

    fn show(&mut self) -> Result<()> {
        self.console.say(format!("\n{}", rule(NARROW_RULE_WIDTH)))?;
        self.console.say("   EMPLOYEE DATABASE MANAGEMENT SYSTEM")?;
        self.console.say(rule(NARROW_RULE_WIDTH))?;
        self.console.say("1. Add New Employee")?;
        self.console.say("2. View All Employees")?;
        self.console.say("3. Update Employee")?;
        self.console.say("4. Delete Employee")?;
        self.console.say("5. Exit")?;
        self.console.say(rule(NARROW_RULE_WIDTH))
    }

    fn farewell(&mut self) -> Result<()> {
        self.console
            .say("\nThank you for using the Employee Database Management System!")
    }

    fn add(&mut self) -> Result<()> {
        self.console.say("\n--- Add New Employee ---")?;
        let id = parse_id(&self.console.ask("Enter employee ID: ")?)?;
        let name = self.console.ask("Enter name: ")?;
        let salary = parse_optional_number("salary", &self.console.ask("Enter salary: ")?)?;

        employees::add(self.session, &Employee::new(id, name.clone(), salary))?;
        self.console.say(format!(
            "Employee '{}' added successfully! (ID: {})",
            name, id
        ))
    }

    fn view_all(&mut self) -> Result<()> {
        let all = employees::list(self.session)?;
        if all.is_empty() {
            return self.console.say("No employees found in database.");
        }
        self.console.say(render::employee_table(&all))
    }

    fn update(&mut self) -> Result<()> {
        self.console.say("\n--- Update Employee ---")?;
        let id = parse_id(&self.console.ask("Enter employee ID to update: ")?)?;

        self.console.say("Leave blank to skip updating a field")?;
        let patch = EmployeePatch {
            name: optional_text(self.console.ask("Enter new name: ")?),
            salary: parse_optional_number("salary", &self.console.ask("Enter new salary: ")?)?,
        };

        employees::update(self.session, id, &patch)?;
        self.console
            .say(format!("Employee ID {} updated successfully!", id))
    }

    fn delete(&mut self) -> Result<()> {
        let id = parse_id(&self.console.ask("\nEnter employee ID to delete: ")?)?;
        employees::delete(self.session, id)?;
        self.console
            .say(format!("Employee ID {} deleted successfully!", id))
    }
}
