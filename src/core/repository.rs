use crate::domain::model::{Roll, Student};
use crate::utils::error::{RegistryError, Result};

/// Owns every student and guarantees no two share a roll.
#[derive(Debug, Default)]
pub struct StudentRepository {
    data: Vec<Student>,
}

impl StudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, student: Student) -> Result<()> {
        let roll = student.roll();
        if self.find_by_roll(roll).is_some() {
            tracing::debug!(roll = roll.get(), "rejected duplicate roll");
            return Err(RegistryError::DuplicateKeyError { roll: roll.get() });
        }
        tracing::debug!(roll = roll.get(), record = %student.serialize(), "student added");
        self.data.push(student);
        Ok(())
    }

    pub fn find_by_roll(&self, roll: Roll) -> Option<&Student> {
        self.data.iter().find(|s| s.roll() == roll)
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&Student> {
        self.data.iter().filter(|s| s.name() == name).collect()
    }

    pub fn remove_by_roll(&mut self, roll: Roll) -> bool {
        let before = self.data.len();
        self.data.retain(|s| s.roll() != roll);
        let removed = self.data.len() != before;
        tracing::debug!(roll = roll.get(), removed, "remove by roll");
        removed
    }

    /// Stable ascending sort by roll.
    pub fn sort_by_roll(&mut self) {
        self.data.sort_by_key(|s| s.roll());
        tracing::debug!(count = self.data.len(), "sorted by roll");
    }

    /// Applies `edit` to a copy of the student and commits it only if the edit
    /// succeeds and the resulting roll is still unique. Returns `Ok(None)` when
    /// no student holds `roll`.
    pub fn update<F>(&mut self, roll: Roll, edit: F) -> Result<Option<&Student>>
    where
        F: FnOnce(&mut Student) -> Result<()>,
    {
        let Some(index) = self.data.iter().position(|s| s.roll() == roll) else {
            return Ok(None);
        };

        let mut edited = self.data[index].clone();
        edit(&mut edited)?;

        let new_roll = edited.roll();
        let collides = self
            .data
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.roll() == new_roll);
        if collides {
            tracing::debug!(roll = new_roll.get(), "rejected roll change");
            return Err(RegistryError::DuplicateKeyError {
                roll: new_roll.get(),
            });
        }

        tracing::debug!(roll = roll.get(), new_roll = new_roll.get(), "student updated");
        self.data[index] = edited;
        Ok(Some(&self.data[index]))
    }

    pub fn all(&self) -> &[Student] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roll::RollCounter;
    use crate::domain::model::Address;

    fn roll(value: i64) -> Roll {
        Roll::new(value).unwrap()
    }

    #[test]
    fn test_duplicate_roll_is_rejected() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Cy", 20, 7).unwrap()).unwrap();

        let err = repo.add(Student::new("Dee", 21, 7).unwrap()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKeyError { roll: 7 }));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.all()[0].name(), "Cy");
    }

    #[test]
    fn test_auto_rolls_in_repository() {
        let mut repo = StudentRepository::new();
        let mut counter = RollCounter::default();
        repo.add(Student::with_auto_roll("Ann", 20, &mut counter).unwrap())
            .unwrap();
        repo.add(Student::with_auto_roll("Ben", 21, &mut counter).unwrap())
            .unwrap();

        let rolls: Vec<u32> = repo.all().iter().map(|s| s.roll().get()).collect();
        assert_eq!(rolls, vec![1001, 1002]);
    }

    #[test]
    fn test_find_by_name_is_exact_and_ordered() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 9).unwrap()).unwrap();
        repo.add(Student::new("ann", 20, 4).unwrap()).unwrap();
        repo.add(Student::new("Ann", 22, 2).unwrap()).unwrap();

        let found: Vec<u32> = repo
            .find_by_name("Ann")
            .iter()
            .map(|s| s.roll().get())
            .collect();
        assert_eq!(found, vec![9, 2]);

        repo.sort_by_roll();
        let found: Vec<u32> = repo
            .find_by_name("Ann")
            .iter()
            .map(|s| s.roll().get())
            .collect();
        assert_eq!(found, vec![2, 9]);

        assert!(repo.find_by_name("Zed").is_empty());
    }

    #[test]
    fn test_remove_by_roll() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 1).unwrap()).unwrap();
        repo.add(Student::new("Bo", 20, 2).unwrap()).unwrap();

        assert!(!repo.remove_by_roll(roll(3)));
        assert_eq!(repo.len(), 2);

        assert!(repo.remove_by_roll(roll(1)));
        assert_eq!(repo.len(), 1);
        assert!(repo.find_by_roll(roll(1)).is_none());
        assert!(repo.find_by_roll(roll(2)).is_some());
    }

    #[test]
    fn test_sort_by_roll_is_idempotent() {
        let mut repo = StudentRepository::new();
        for (name, r) in [("A", 30), ("B", 10), ("C", 20), ("D", 5)] {
            repo.add(Student::new(name, 20, r).unwrap()).unwrap();
        }

        repo.sort_by_roll();
        let once: Vec<u32> = repo.all().iter().map(|s| s.roll().get()).collect();
        assert_eq!(once, vec![5, 10, 20, 30]);

        repo.sort_by_roll();
        let twice: Vec<u32> = repo.all().iter().map(|s| s.roll().get()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_commits_valid_edit() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 1).unwrap()).unwrap();

        let updated = repo
            .update(roll(1), |s| {
                s.set_address(Address {
                    line1: "1 Main St".to_string(),
                    ..Address::default()
                });
                s.set_roll(8)
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.roll().get(), 8);
        assert!(repo.find_by_roll(roll(1)).is_none());
        assert_eq!(
            repo.find_by_roll(roll(8)).unwrap().address().line1,
            "1 Main St"
        );
    }

    #[test]
    fn test_update_rejects_colliding_roll() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 1).unwrap()).unwrap();
        repo.add(Student::new("Bo", 20, 2).unwrap()).unwrap();

        let err = repo.update(roll(1), |s| s.set_roll(2)).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKeyError { roll: 2 }));
        assert_eq!(repo.find_by_roll(roll(1)).unwrap().name(), "Ann");
    }

    #[test]
    fn test_update_to_same_roll_is_allowed() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 1).unwrap()).unwrap();
        assert!(repo.update(roll(1), |s| s.set_roll(1)).unwrap().is_some());
    }

    #[test]
    fn test_update_failure_leaves_student_untouched() {
        let mut repo = StudentRepository::new();
        repo.add(Student::new("Ann", 20, 1).unwrap()).unwrap();

        let result = repo.update(roll(1), |s| {
            s.set_name("Annie")?;
            s.set_age(500)
        });
        assert!(result.is_err());
        let ann = repo.find_by_roll(roll(1)).unwrap();
        assert_eq!(ann.name(), "Ann");
        assert_eq!(ann.age(), 20);
    }

    #[test]
    fn test_update_missing_roll() {
        let mut repo = StudentRepository::new();
        assert!(repo.update(roll(4), |_| Ok(())).unwrap().is_none());
    }
}
