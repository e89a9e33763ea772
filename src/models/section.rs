//! Student section (cohort) model.

use serde::{Deserialize, Serialize};

/// A named student cohort for a curriculum year and semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Curriculum year.
    pub year: u8,
    /// Semester.
    pub semester: u8,
    /// Label within the year (e.g., "A").
    pub name: String,
    /// Class teacher (faculty id).
    pub class_teacher_id: Option<String>,
    /// Home lecture room.
    pub default_room_id: Option<String>,
    /// Effective-from date as shown on the printed timetable.
    pub effective_from: Option<String>,
    /// Headcount, used when batches are sized by lab room capacity.
    pub strength: Option<u32>,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, year: u8, semester: u8, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            semester,
            name: name.into(),
            class_teacher_id: None,
            default_room_id: None,
            effective_from: None,
            strength: None,
        }
    }

    /// Sets the class teacher.
    pub fn with_class_teacher(mut self, faculty_id: impl Into<String>) -> Self {
        self.class_teacher_id = Some(faculty_id.into());
        self
    }

    /// Sets the home lecture room.
    pub fn with_default_room(mut self, room_id: impl Into<String>) -> Self {
        self.default_room_id = Some(room_id.into());
        self
    }

    /// Sets the effective-from date.
    pub fn with_effective_from(mut self, date: impl Into<String>) -> Self {
        self.effective_from = Some(date.into());
        self
    }

    /// Sets the headcount.
    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = Some(strength);
        self
    }
}
