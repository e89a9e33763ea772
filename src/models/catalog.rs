//! Input catalog: the department's entities as plain value collections.

use serde::{Deserialize, Serialize};

use super::{Faculty, Room, Section, Subject};

/// Everything the generator and the edit validator read.
///
/// Carries no hidden state; callers rebuild it from their own storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub faculty: Vec<Faculty>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Subject>,
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Creates a catalog.
    pub fn new(
        faculty: Vec<Faculty>,
        rooms: Vec<Room>,
        subjects: Vec<Subject>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            faculty,
            rooms,
            subjects,
            sections,
        }
    }

    pub fn faculty_by_id(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    pub fn room_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn subject_by_id(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Lab-capable rooms in catalog order.
    pub fn lab_rooms(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|r| r.is_lab()).collect()
    }

    /// Lecture rooms in catalog order.
    pub fn theory_rooms(&self) -> Vec<&Room> {
        self.rooms.iter().filter(|r| !r.is_lab()).collect()
    }

    /// Subjects taught to a section.
    pub fn subjects_for<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Subject> {
        self.subjects.iter().filter(move |s| s.applies_to(section))
    }

    /// Faculty display name, falling back to the id.
    pub fn faculty_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.faculty_by_id(id)
            .map(|f| f.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(id)
    }

    /// Room display name, falling back to the id.
    pub fn room_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.room_by_id(id)
            .map(|r| r.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(id)
    }

    /// Section label, falling back to the id.
    pub fn section_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.section_by_id(id)
            .map(|s| s.name.as_str())
            .unwrap_or(id)
    }
}
