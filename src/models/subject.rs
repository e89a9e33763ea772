//! Subject (course) model.
//!
//! A subject is a recurring weekly teaching requirement for one section
//! (or all sections) of a curriculum year and semester, owned by a single
//! instructor.
//!
//! The two placement phases dispatch on [`SubjectKind`]: labs are placed as
//! contiguous rotation blocks split across batches, theory subjects as
//! single periods spread over the week.

use serde::{Deserialize, Serialize};

use super::Section;

/// Placement-relevant kind of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    /// Lecture sessions distributed over the week.
    Theory {
        /// Per-subject override of the per-day repetition cap.
        daily_cap: Option<u32>,
    },
    /// Laboratory sessions placed in contiguous blocks.
    Lab {
        /// Preferred lab rooms, tried first. Empty = any lab.
        room_ids: Vec<String>,
    },
}

/// Which sections of a year/semester a subject targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionScope {
    /// Every section of the year/semester.
    All,
    /// Only the section with this label.
    Only(String),
}

/// A subject to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Curriculum code (e.g., "PC701IT").
    pub code: String,
    /// Full name.
    pub name: String,
    /// Short label shown in grid cells (e.g., "IOT").
    pub abbreviation: String,
    /// Theory or lab, with kind-specific placement fields.
    pub kind: SubjectKind,
    /// Curriculum year.
    pub year: u8,
    /// Semester.
    pub semester: u8,
    /// Target section(s).
    pub section: SectionScope,
    /// Required periods per week.
    pub sessions_per_week: u32,
    /// Owning instructor.
    pub faculty_id: String,
}

impl Subject {
    fn new(id: impl Into<String>, kind: SubjectKind, faculty_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: String::new(),
            name: String::new(),
            abbreviation: String::new(),
            kind,
            year: 1,
            semester: 1,
            section: SectionScope::All,
            sessions_per_week: 0,
            faculty_id: faculty_id.into(),
        }
    }

    /// Creates a theory subject taught by `faculty_id`.
    pub fn theory(id: impl Into<String>, faculty_id: impl Into<String>) -> Self {
        Self::new(id, SubjectKind::Theory { daily_cap: None }, faculty_id)
    }

    /// Creates a lab subject supervised by `faculty_id`.
    pub fn lab(id: impl Into<String>, faculty_id: impl Into<String>) -> Self {
        Self::new(
            id,
            SubjectKind::Lab {
                room_ids: Vec::new(),
            },
            faculty_id,
        )
    }

    /// Sets code, name and abbreviation.
    pub fn with_names(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> Self {
        self.code = code.into();
        self.name = name.into();
        self.abbreviation = abbreviation.into();
        self
    }

    /// Targets a curriculum year and semester.
    pub fn for_term(mut self, year: u8, semester: u8) -> Self {
        self.year = year;
        self.semester = semester;
        self
    }

    /// Restricts the subject to one section label.
    pub fn for_section(mut self, label: impl Into<String>) -> Self {
        self.section = SectionScope::Only(label.into());
        self
    }

    /// Sets the weekly requirement.
    pub fn with_sessions(mut self, sessions_per_week: u32) -> Self {
        self.sessions_per_week = sessions_per_week;
        self
    }

    /// Overrides the per-day cap. Ignored for labs.
    pub fn with_daily_cap(mut self, cap: u32) -> Self {
        if let SubjectKind::Theory { daily_cap } = &mut self.kind {
            *daily_cap = Some(cap);
        }
        self
    }

    /// Adds a preferred lab room. Ignored for theory subjects.
    pub fn with_lab_room(mut self, room_id: impl Into<String>) -> Self {
        if let SubjectKind::Lab { room_ids } = &mut self.kind {
            room_ids.push(room_id.into());
        }
        self
    }

    #[inline]
    pub fn is_lab(&self) -> bool {
        matches!(self.kind, SubjectKind::Lab { .. })
    }

    #[inline]
    pub fn is_theory(&self) -> bool {
        matches!(self.kind, SubjectKind::Theory { .. })
    }

    /// Whether this subject is taught to `section`.
    pub fn applies_to(&self, section: &Section) -> bool {
        self.year == section.year
            && self.semester == section.semester
            && match &self.section {
                SectionScope::All => true,
                SectionScope::Only(label) => *label == section.name,
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::theory("sub1", "f1")
            .with_names("PC701IT", "Internet of Things", "IOT")
            .for_term(4, 7)
            .for_section("A")
            .with_sessions(3)
            .with_daily_cap(1);

        assert!(s.is_theory());
        assert_eq!(s.abbreviation, "IOT");
        assert_eq!(s.section, SectionScope::Only("A".into()));
        assert_eq!(s.kind, SubjectKind::Theory { daily_cap: Some(1) });
    }

    #[test]
    fn test_lab_rooms_only_on_labs() {
        let lab = Subject::lab("sub6", "f1").with_lab_room("r5");
        assert_eq!(
            lab.kind,
            SubjectKind::Lab {
                room_ids: vec!["r5".into()]
            }
        );

        let theory = Subject::theory("sub1", "f1").with_lab_room("r5");
        assert_eq!(theory.kind, SubjectKind::Theory { daily_cap: None });
    }

    #[test]
    fn test_applies_to() {
        let a = Section::new("s1", 3, 5, "A");
        let b = Section::new("s2", 3, 5, "B");
        let other_year = Section::new("s3", 4, 7, "A");

        let only_a = Subject::theory("x", "f1").for_term(3, 5).for_section("A");
        assert!(only_a.applies_to(&a));
        assert!(!only_a.applies_to(&b));
        assert!(!only_a.applies_to(&other_year));

        let all = Subject::lab("y", "f1").for_term(3, 5);
        assert!(all.applies_to(&a));
        assert!(all.applies_to(&b));
    }
}
