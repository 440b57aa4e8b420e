//! crates/tutor_roster_core/src/validation.rs
//!
//! Field-level checks run before any command touches a roster. A failed check
//! never mutates anything; it yields a map of field name to message.

use crate::domain::{CourseType, SessionInput, StudentInput};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Field name to human-readable message, one entry per violated field.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid fields: {}", field_list(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation. A later message for the same field replaces the earlier one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn field_list(fields: &BTreeMap<&'static str, String>) -> String {
    fields.keys().copied().collect::<Vec<_>>().join(", ")
}

//=========================================================================================
// Validated Forms
//=========================================================================================

/// Student fields that passed validation, trimmed and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub grade: String,
    pub contact: String,
    pub course_type: CourseType,
    pub total_hours: f64,
}

fn require_text(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

/// Checks a student form. `used_hours` is the student's current usage (zero for
/// a new student); the new total may not drop below it.
pub fn validate_student(input: &StudentInput, used_hours: f64) -> Result<StudentFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = require_text(&mut errors, "name", &input.name, "Name is required");
    let grade = require_text(&mut errors, "grade", &input.grade, "Grade is required");
    let contact = require_text(&mut errors, "contact", &input.contact, "Contact is required");

    let course_type = match input.course_type.parse::<CourseType>() {
        Ok(course_type) => Some(course_type),
        Err(_) => {
            errors.add("courseType", "Course type must be theory or practical");
            None
        }
    };

    let total_hours = input.total_hours;
    if !total_hours.is_finite() || total_hours <= 0.0 {
        errors.add("totalHours", "Total hours must be greater than 0");
    } else if total_hours < used_hours {
        errors.add(
            "totalHours",
            format!("Total hours cannot be less than the {} hours already used", used_hours),
        );
    }

    match course_type {
        Some(course_type) => errors.into_result(StudentFields {
            name,
            grade,
            contact,
            course_type,
            total_hours,
        }),
        None => Err(errors),
    }
}

/// Session fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionFields {
    pub date: NaiveDate,
    pub hours_used: f64,
    pub content: String,
    pub teacher: String,
}

/// Checks a session form against the referenced student's balance.
///
/// `student` pairs a caller-side handle for the student with its remaining
/// hours, or is `None` when the student does not exist. On success the handle
/// is handed back with the validated fields.
pub fn validate_session<H>(
    input: &SessionInput,
    student: Option<(H, f64)>,
) -> Result<(H, SessionFields), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let remaining_hours = student.as_ref().map(|(_, remaining)| *remaining);
    if remaining_hours.is_none() {
        errors.add("studentId", "Student not found");
    }

    let date = match input.date.trim() {
        "" => {
            errors.add("date", "Date is required");
            None
        }
        raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("date", "Date must be formatted as YYYY-MM-DD");
                None
            }
        },
    };

    let hours_used = input.hours_used;
    if !hours_used.is_finite() || hours_used <= 0.0 {
        errors.add("hoursUsed", "Hours used must be greater than 0");
    } else if let Some(remaining) = remaining_hours {
        if hours_used > remaining {
            errors.add(
                "hoursUsed",
                format!("Hours used cannot exceed the {} hours remaining", remaining),
            );
        }
    }

    let content = require_text(&mut errors, "content", &input.content, "Content is required");
    let teacher = require_text(&mut errors, "teacher", &input.teacher, "Teacher is required");

    match (student, date) {
        (Some((handle, _)), Some(date)) => errors.into_result((
            handle,
            SessionFields {
                date,
                hours_used,
                content,
                teacher,
            },
        )),
        _ => Err(errors),
    }
}
