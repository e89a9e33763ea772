//! Input validation for timetable catalogs.
//!
//! Checks structural integrity of the catalog before generation. Detects:
//! - Duplicate IDs
//! - References to unknown faculty or rooms
//! - Lab subjects pointing at rooms that are not labs
//! - Subjects with no weekly sessions
//! - Sections with nothing to schedule
//!
//! Generation itself does not defend against these; run this first.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{Catalog, RoomKind, SubjectKind};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A subject or section references a faculty member that doesn't exist.
    UnknownFaculty,
    /// A section or lab subject references a room that doesn't exist.
    UnknownRoom,
    /// A lab subject prefers a room that is not a lab.
    NotALab,
    /// A subject taught to some section has no weekly sessions.
    ZeroSessions,
    /// A section has no applicable subjects.
    EmptySection,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates a catalog.
///
/// Checks:
/// 1. No duplicate faculty, room, subject, or section IDs
/// 2. Every subject's instructor exists
/// 3. Every section's class teacher and default room exist
/// 4. Every lab subject's preferred rooms exist and are labs
/// 5. Subjects taught to at least one section have weekly sessions
/// 6. Every section has at least one applicable subject
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let faculty_ids = check_unique(
        "faculty",
        catalog.faculty.iter().map(|f| f.id.as_str()),
        &mut errors,
    );
    check_unique(
        "room",
        catalog.rooms.iter().map(|r| r.id.as_str()),
        &mut errors,
    );
    check_unique(
        "subject",
        catalog.subjects.iter().map(|s| s.id.as_str()),
        &mut errors,
    );
    check_unique(
        "section",
        catalog.sections.iter().map(|s| s.id.as_str()),
        &mut errors,
    );

    for subject in &catalog.subjects {
        if !faculty_ids.contains(subject.faculty_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                format!(
                    "Subject '{}' references unknown faculty '{}'",
                    subject.id, subject.faculty_id
                ),
            ));
        }

        if let SubjectKind::Lab { room_ids } = &subject.kind {
            for room_id in room_ids {
                match catalog.room_by_id(room_id) {
                    None => errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownRoom,
                        format!(
                            "Lab subject '{}' references unknown room '{}'",
                            subject.id, room_id
                        ),
                    )),
                    Some(room) if room.kind != RoomKind::Lab => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::NotALab,
                            format!(
                                "Lab subject '{}' prefers room '{}', which is not a lab",
                                subject.id, room_id
                            ),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        let taught = catalog.sections.iter().any(|s| subject.applies_to(s));
        if taught && subject.sessions_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSessions,
                format!("Subject '{}' has no weekly sessions", subject.id),
            ));
        }
    }

    for section in &catalog.sections {
        if let Some(teacher) = &section.class_teacher_id {
            if !faculty_ids.contains(teacher.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownFaculty,
                    format!(
                        "Section '{}' has unknown class teacher '{}'",
                        section.id, teacher
                    ),
                ));
            }
        }
        if let Some(room_id) = &section.default_room_id {
            if catalog.room_by_id(room_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRoom,
                    format!(
                        "Section '{}' references unknown default room '{}'",
                        section.id, room_id
                    ),
                ));
            }
        }
        if catalog.subjects_for(section).next().is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySection,
                format!("Section '{}' has no subjects", section.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
