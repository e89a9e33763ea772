//! Teaching resources: faculty members and rooms.
//!
//! Both are owned by department configuration and referenced everywhere
//! else by identifier, never duplicated.

use serde::{Deserialize, Serialize};

/// A faculty member who can be assigned to subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name (e.g., "DR. M. KRISHNA").
    pub name: String,
    /// Designation (e.g., "Professor", "Asst. Professor").
    pub designation: String,
    /// Maximum teaching periods per week.
    pub weekly_load: u32,
    /// Contact address.
    pub email: Option<String>,
    /// Owning department.
    pub department: Option<String>,
}

/// What a room can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Lecture hall.
    Theory,
    /// Laboratory with workstations.
    Lab,
}

/// A physical room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name (e.g., "N 305", "IT LAB 1").
    pub name: String,
    /// Capability.
    pub kind: RoomKind,
    /// Seating capacity.
    pub capacity: u32,
}

impl Faculty {
    /// Creates a faculty member with the given weekly capacity.
    pub fn new(id: impl Into<String>, weekly_load: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            designation: String::new(),
            weekly_load,
            email: None,
            department: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the designation.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = designation.into();
        self
    }

    /// Sets the contact address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

impl Room {
    /// Creates a room of the given kind.
    pub fn new(id: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            capacity: 0,
        }
    }

    /// Creates a lecture room.
    pub fn theory(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Theory)
    }

    /// Creates a laboratory.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomKind::Lab)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    #[inline]
    pub fn is_lab(&self) -> bool {
        self.kind == RoomKind::Lab
    }
}
