use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const NULL_CHARACTER_MESSAGE: &str = "Null characters are not allowed.";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated field values ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
}

/// Raw form submission for both the create and the update page.
///
/// Missing fields deserialize as empty strings so that an incomplete body
/// ends up as a validation error on the page instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CourseForm {
    pub fn validate(&self) -> Result<NewCourse, FormErrors> {
        let mut errors = FormErrors::default();

        // SQLite text functions stop at NUL, so it never reaches the store.
        if self.title.contains('\0') {
            errors.add("title", NULL_CHARACTER_MESSAGE);
        } else if self.title.trim().is_empty() {
            errors.add("title", REQUIRED_MESSAGE);
        }
        if self.description.contains('\0') {
            errors.add("description", NULL_CHARACTER_MESSAGE);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let title = self.title.trim();
        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_string());

        Ok(NewCourse {
            title: title.to_string(),
            description,
        })
    }
}

impl From<&Course> for CourseForm {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone().unwrap_or_default(),
        }
    }
}

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}
