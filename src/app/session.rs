use crate::core::repository::StudentRepository;
use crate::core::roll::RollCounter;
use crate::core::{Address, Roll, Student, Terminal};
use crate::utils::error::{RegistryError, Result};

const MENU: &str = "\n1) Add\n2) Add Honors\n3) Show\n4) Search\n5) Update\n6) Delete\n7) Sort\n8) Exit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    AddHonors,
    ShowAll,
    Search,
    Update,
    Delete,
    Sort,
    Exit,
}

impl MenuChoice {
    pub fn from_input(value: i32) -> Option<Self> {
        match value {
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::AddHonors),
            3 => Some(MenuChoice::ShowAll),
            4 => Some(MenuChoice::Search),
            5 => Some(MenuChoice::Update),
            6 => Some(MenuChoice::Delete),
            7 => Some(MenuChoice::Sort),
            8 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Menu loop over a `Terminal`. Owns the repository and the roll counter for
/// the lifetime of the session.
pub struct Session<T: Terminal> {
    terminal: T,
    repo: StudentRepository,
    rolls: RollCounter,
}

impl<T: Terminal> Session<T> {
    pub fn new(terminal: T, rolls: RollCounter) -> Self {
        Self {
            terminal,
            repo: StudentRepository::new(),
            rolls,
        }
    }

    pub fn repository(&self) -> &StudentRepository {
        &self.repo
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Runs until Exit is chosen or input runs out. Both end the session
    /// successfully; only I/O failures are returned as errors.
    pub fn run(&mut self) -> Result<()> {
        match self.run_loop() {
            Err(RegistryError::InputClosed) => {
                tracing::info!("input closed, ending session");
                Ok(())
            }
            other => other,
        }
    }

    fn run_loop(&mut self) -> Result<()> {
        loop {
            self.terminal.print(MENU)?;
            let choice = self.terminal.read_int("Choice: ")?;
            tracing::debug!(choice, "menu choice");
            match MenuChoice::from_input(choice) {
                Some(MenuChoice::Add) => self.add_student(false)?,
                Some(MenuChoice::AddHonors) => self.add_student(true)?,
                Some(MenuChoice::ShowAll) => self.display_all()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::Update) => self.update()?,
                Some(MenuChoice::Delete) => self.remove()?,
                Some(MenuChoice::Sort) => {
                    self.repo.sort_by_roll();
                    self.terminal.print("Sorted.\n")?;
                }
                Some(MenuChoice::Exit) => return Ok(()),
                None => self.terminal.print("Invalid.\n")?,
            }
        }
    }

    /// Prints recoverable failures and swallows them; anything else bubbles up.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Err(e) if e.is_recoverable() => {
                tracing::debug!(error = %e, "action rejected");
                self.terminal.print(&format!("Error: {}\n", e))
            }
            other => other,
        }
    }

    fn add_student(&mut self, honors: bool) -> Result<()> {
        let result = self.try_add_student(honors);
        self.report(result)
    }

    fn try_add_student(&mut self, honors: bool) -> Result<()> {
        let name = self.terminal.read_line("Enter name: ")?;
        let age = self.terminal.read_int("Enter age: ")?;
        let mut roll = if self.terminal.read_yes_no("Manual roll?")? {
            self.terminal.read_int("Roll: ")?
        } else {
            0
        };

        let mut student = if honors {
            if roll <= 0 {
                roll = self.terminal.read_int("Enter roll: ")?;
            }
            let scholarship = self.terminal.read_f64("Scholarship: ")?;
            Student::honors(name, age, i64::from(roll), scholarship)?
        } else if roll > 0 {
            Student::new(name, age, i64::from(roll))?
        } else {
            Student::with_auto_roll(name, age, &mut self.rolls)?
        };

        if self.terminal.read_yes_no("Add address?")? {
            student.set_address(self.enter_address()?);
        }
        self.repo.add(student)
    }

    fn enter_address(&mut self) -> Result<Address> {
        Ok(Address {
            line1: self.terminal.read_line("Address line: ")?,
            city: self.terminal.read_line("City: ")?,
            state: self.terminal.read_line("State: ")?,
            zip: self.terminal.read_line("ZIP: ")?,
        })
    }

    fn display_all(&mut self) -> Result<()> {
        if self.repo.is_empty() {
            return self.terminal.print("No students.\n");
        }
        let text: String = self
            .repo
            .all()
            .iter()
            .map(|s| format!("{}\n", s))
            .collect();
        self.terminal.print(&text)
    }

    /// Reads a roll for lookup. Values that can never be a roll find nothing.
    fn read_roll(&mut self, prompt: &str) -> Result<Option<Roll>> {
        let value = self.terminal.read_int(prompt)?;
        Ok(Roll::new(i64::from(value)).ok())
    }

    fn search(&mut self) -> Result<()> {
        let option = self.terminal.read_int("1) Roll 2) Name: ")?;
        if option == 1 {
            let roll = self.read_roll("Roll: ")?;
            let text = roll
                .and_then(|r| self.repo.find_by_roll(r))
                .map(|s| s.to_string())
                .unwrap_or_else(|| "Not found.\n".to_string());
            self.terminal.print(&text)
        } else {
            let name = self.terminal.read_line("Name: ")?;
            let matches = self.repo.find_by_name(&name);
            let text = if matches.is_empty() {
                "Not found.\n".to_string()
            } else {
                matches.iter().map(|s| format!("{}\n", s)).collect()
            };
            self.terminal.print(&text)
        }
    }

    fn update(&mut self) -> Result<()> {
        let Some(roll) = self
            .read_roll("Enter roll: ")?
            .filter(|r| self.repo.find_by_roll(*r).is_some())
        else {
            return self.terminal.print("Not found.\n");
        };

        let option = self.terminal.read_int("1) Name 2) Age 3) Roll 4) Address: ")?;
        let result = match option {
            1 => {
                let name = self.terminal.read_line("New name: ")?;
                self.repo.update(roll, |s| s.set_name(name))
            }
            2 => {
                let age = self.terminal.read_int("New age: ")?;
                self.repo.update(roll, |s| s.set_age(age))
            }
            3 => {
                let new_roll = self.terminal.read_int("New roll: ")?;
                self.repo.update(roll, |s| s.set_roll(i64::from(new_roll)))
            }
            4 => {
                let address = self.enter_address()?;
                self.repo.update(roll, |s| {
                    s.set_address(address);
                    Ok(())
                })
            }
            _ => {
                self.terminal.print("Invalid.\n")?;
                Ok(self.repo.find_by_roll(roll))
            }
        };

        let result = result.map(|student| student.map(|s| s.to_string()));
        match result {
            Ok(Some(text)) => self.terminal.print(&text),
            Ok(None) => Ok(()),
            Err(e) => self.report(Err(e)),
        }
    }

    fn remove(&mut self) -> Result<()> {
        let removed = match self.read_roll("Roll to delete: ")? {
            Some(roll) => self.repo.remove_by_roll(roll),
            None => false,
        };
        self.terminal
            .print(if removed { "Deleted.\n" } else { "Not found.\n" })
    }
}
