use crate::core::roll::RollCounter;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_finite_non_negative, validate_non_empty_string, validate_range,
};
use std::fmt;

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 130;

/// Largest roll the terminal can name; rolls are entered as `i32`.
pub const MAX_ROLL: u32 = i32::MAX as u32;

/// Positive identifier of a student. Uniqueness is the repository's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Roll(u32);

impl Roll {
    pub fn new(value: i64) -> Result<Self> {
        validate_range(value, 1, i64::from(MAX_ROLL), "Invalid roll")?;
        Ok(Roll(value as u32))
    }

    pub(crate) fn from_counter(value: u32) -> Self {
        Roll(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.to_string().is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line1)?;
        if !self.city.is_empty() {
            write!(f, ", {}", self.city)?;
        }
        if !self.state.is_empty() {
            write!(f, ", {}", self.state)?;
        }
        if !self.zip.is_empty() {
            write!(f, " ({})", self.zip)?;
        }
        Ok(())
    }
}

/// Compared by `code` only.
#[derive(Debug, Clone)]
pub struct Course {
    pub code: String,
    pub title: String,
}

impl Course {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Course {}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    name: String,
    age: u8,
}

impl Person {
    pub fn new(name: impl Into<String>, age: i32) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string(&name, "Name empty")?;
        Ok(Self {
            name,
            age: Self::checked_age(age)?,
        })
    }

    fn checked_age(age: i32) -> Result<u8> {
        validate_range(age, MIN_AGE, MAX_AGE, "Invalid age.")?;
        Ok(age as u8)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_non_empty_string(&name, "Empty name")?;
        self.name = name;
        Ok(())
    }

    pub fn set_age(&mut self, age: i32) -> Result<()> {
        self.age = Self::checked_age(age)?;
        Ok(())
    }

    pub fn render<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "Name: {}", self.name)?;
        writeln!(out, "Age: {}", self.age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    HonorsStudent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::HonorsStudent => "Honors Student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of student specializations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StudentKind {
    Regular,
    Honors { scholarship: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    person: Person,
    roll: Roll,
    address: Address,
    courses: Vec<Course>,
    kind: StudentKind,
}

impl Student {
    /// Student with an explicit roll.
    pub fn new(name: impl Into<String>, age: i32, roll: i64) -> Result<Self> {
        let person = Person::new(name, age)?;
        Ok(Self::from_parts(person, Roll::new(roll)?, StudentKind::Regular))
    }

    /// Student whose roll is drawn from `counter`. The counter is only advanced
    /// once the name and age have been accepted.
    pub fn with_auto_roll(
        name: impl Into<String>,
        age: i32,
        counter: &mut RollCounter,
    ) -> Result<Self> {
        let person = Person::new(name, age)?;
        let roll = counter.next_roll()?;
        Ok(Self::from_parts(person, roll, StudentKind::Regular))
    }

    pub fn honors(name: impl Into<String>, age: i32, roll: i64, scholarship: f64) -> Result<Self> {
        let person = Person::new(name, age)?;
        let roll = Roll::new(roll)?;
        validate_finite_non_negative(scholarship, "Invalid scholarship")?;
        Ok(Self::from_parts(
            person,
            roll,
            StudentKind::Honors { scholarship },
        ))
    }

    fn from_parts(person: Person, roll: Roll, kind: StudentKind) -> Self {
        Self {
            person,
            roll,
            address: Address::default(),
            courses: Vec::new(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn age(&self) -> u8 {
        self.person.age()
    }

    pub fn roll(&self) -> Roll {
        self.roll
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn scholarship(&self) -> Option<f64> {
        match self.kind {
            StudentKind::Regular => None,
            StudentKind::Honors { scholarship } => Some(scholarship),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.person.set_name(name)
    }

    pub fn set_age(&mut self, age: i32) -> Result<()> {
        self.person.set_age(age)
    }

    /// Does not check uniqueness; go through `StudentRepository::update` for
    /// students already held by a repository.
    pub fn set_roll(&mut self, roll: i64) -> Result<()> {
        self.roll = Roll::new(roll)?;
        Ok(())
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    /// Adding a code that is already present is a no-op.
    pub fn add_course(&mut self, course: Course) {
        if !self.courses.contains(&course) {
            self.courses.push(course);
        }
    }

    pub fn remove_course_by_code(&mut self, code: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| c.code != code);
        self.courses.len() != before
    }

    pub fn role(&self) -> Role {
        match self.kind {
            StudentKind::Regular => Role::Student,
            StudentKind::Honors { .. } => Role::HonorsStudent,
        }
    }

    pub fn render<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.render_student(out)?;
        if let Some(scholarship) = self.scholarship() {
            writeln!(out, "Scholarship: {:.2}", scholarship)?;
        }
        Ok(())
    }

    fn render_student<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "[ {} ]", self.role())?;
        self.person.render(out)?;
        writeln!(out, "Roll No: {}", self.roll)?;
        if !self.address.is_empty() {
            writeln!(out, "Address: {}", self.address)?;
        }
        if !self.courses.is_empty() {
            let codes: Vec<&str> = self.courses.iter().map(|c| c.code.as_str()).collect();
            writeln!(out, "Courses: {}", codes.join(", "))?;
        }
        Ok(())
    }

    /// Compact `|`-joined export line. There is no parser for it.
    pub fn serialize(&self) -> String {
        let base = format!("Student|{}|{}|{}", self.roll, self.name(), self.age());
        match self.scholarship() {
            None => base,
            Some(scholarship) => format!("{}|SCH:{:.2}", base, scholarship),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}
