use super::{DataStore, Observer};
use crate::error::{Result, RosterError};
use crate::model::{Student, StudentAttrs};
use crate::sample;
use std::fmt;
use tracing::debug;

/// The in-memory student registry.
///
/// Single-threaded by construction: every mutation takes `&mut self`, so there is
/// exactly one writer at a time and no locking.
#[derive(Default)]
pub struct Registry {
    students: Vec<Student>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("students", &self.students)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the bundled sample roster.
    pub fn with_sample_data() -> Self {
        Self {
            students: sample::students(),
            observers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.has_id(id))
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer(&self.students);
        }
    }
}

impl DataStore for Registry {
    fn insert(&mut self, student: Student) -> Result<()> {
        if self.position(&student.id).is_some() {
            return Err(RosterError::DuplicateId(student.id));
        }
        debug!(id = %student.id, "student inserted");
        self.students.push(student);
        self.notify();
        Ok(())
    }

    fn replace(&mut self, id: &str, attrs: StudentAttrs) -> Result<()> {
        let index = self
            .position(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;

        let clash = self
            .students
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.has_id(&attrs.id));
        if clash {
            return Err(RosterError::DuplicateId(attrs.id));
        }

        debug!(id = %id, new_id = %attrs.id, "student updated");
        self.students[index].apply(attrs);
        self.notify();
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<Student> {
        let index = self
            .position(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        let removed = self.students.remove(index);
        debug!(id = %removed.id, "student removed");
        self.notify();
        Ok(removed)
    }

    fn get(&self, id: &str) -> Result<&Student> {
        self.students
            .iter()
            .find(|s| s.has_id(id))
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    fn list(&self) -> &[Student] {
        &self.students
    }

    fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Status;

    pub fn attrs(id: &str, programme: &str, level: &str, gpa: f64) -> StudentAttrs {
        StudentAttrs {
            id: id.to_string(),
            full_name: format!("Student {}", id),
            programme: programme.to_string(),
            level: level.to_string(),
            gpa,
            email: format!("{}@school.edu", id.to_lowercase()),
            phone: String::new(),
            status: Status::Active,
        }
    }

    pub struct RegistryFixture {
        pub registry: Registry,
    }

    impl Default for RegistryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RegistryFixture {
        pub fn new() -> Self {
            Self {
                registry: Registry::new(),
            }
        }

        pub fn sample() -> Self {
            Self {
                registry: Registry::with_sample_data(),
            }
        }

        pub fn with_student(mut self, id: &str, programme: &str, level: &str, gpa: f64) -> Self {
            let student = Student::new(attrs(id, programme, level, gpa), "2024-01-01 09:00:00");
            self.registry.insert(student).unwrap();
            self
        }

        pub fn with_inactive(mut self, id: &str, programme: &str, level: &str, gpa: f64) -> Self {
            let mut a = attrs(id, programme, level, gpa);
            a.status = Status::Inactive;
            self.registry
                .insert(Student::new(a, "2024-01-01 09:00:00"))
                .unwrap();
            self
        }

        pub fn with_added(mut self, id: &str, date_added: &str) -> Self {
            let student = Student::new(attrs(id, "Arts", "100", 3.0), date_added);
            self.registry.insert(student).unwrap();
            self
        }

        pub fn students(&self) -> &[Student] {
            self.registry.list()
        }
    }
}
