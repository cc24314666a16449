//! Owner-scoped drawings that can be edited and deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::immutable_drawing::{DrawingPayload, DrawingValidationError};
use super::user::UserId;

/// Longest accepted drawing name, in characters.
pub const DRAWING_NAME_MAX_LENGTH: usize = 100;

/// Fixed page size for owner listings.
pub const MUTABLE_DRAWING_PAGE_SIZE: i64 = 100;

/// Database-assigned drawing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(i64);

impl DrawingId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human-readable drawing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingName(String);

impl DrawingName {
    /// Validate a name for a new drawing: non-blank and within the limit.
    pub fn new(raw: impl Into<String>) -> Result<Self, DrawingValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DrawingValidationError::EmptyName);
        }
        Self::bounded(raw)
    }

    fn bounded(raw: String) -> Result<Self, DrawingValidationError> {
        if raw.chars().count() > DRAWING_NAME_MAX_LENGTH {
            return Err(DrawingValidationError::NameTooLong {
                max: DRAWING_NAME_MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DrawingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields for a new owned drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMutableDrawing {
    pub owner: UserId,
    pub name: DrawingName,
    pub data: DrawingPayload,
}

/// Partial update of an owned drawing.
///
/// Absent and empty fields both mean "keep the stored value".
///
/// # Examples
/// ```
/// use cascii::domain::DrawingChanges;
///
/// let changes = DrawingChanges::from_parts(Some(""), Some("new body")).expect("valid");
/// assert!(changes.name().is_none());
/// assert_eq!(changes.data(), Some("new body"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingChanges {
    name: Option<DrawingName>,
    data: Option<String>,
}

impl DrawingChanges {
    /// Build changes from optional request fields.
    pub fn from_parts(
        name: Option<&str>,
        data: Option<&str>,
    ) -> Result<Self, DrawingValidationError> {
        let name = match name.filter(|n| !n.is_empty()) {
            Some(raw) => Some(DrawingName::bounded(raw.to_owned())?),
            None => None,
        };
        let data = data.filter(|d| !d.is_empty()).map(str::to_owned);
        Ok(Self { name, data })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(DrawingName::as_str)
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// True when applying the changes would leave the row untouched.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }
}

/// Full owned drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableDrawing {
    pub id: DrawingId,
    pub owner: UserId,
    pub name: String,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

/// Listing entry without the drawing body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableDrawingSummary {
    pub id: DrawingId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&MutableDrawing> for MutableDrawingSummary {
    fn from(value: &MutableDrawing) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", DrawingValidationError::EmptyName)]
    #[case("   ", DrawingValidationError::EmptyName)]
    fn blank_names_are_rejected_on_create(
        #[case] raw: &str,
        #[case] expected: DrawingValidationError,
    ) {
        assert_eq!(DrawingName::new(raw), Err(expected));
    }

    #[rstest]
    fn names_are_bounded_in_characters() {
        let at_limit = "é".repeat(DRAWING_NAME_MAX_LENGTH);
        assert!(DrawingName::new(at_limit).is_ok());
        let over = "x".repeat(DRAWING_NAME_MAX_LENGTH + 1);
        assert_eq!(
            DrawingName::new(over),
            Err(DrawingValidationError::NameTooLong {
                max: DRAWING_NAME_MAX_LENGTH
            })
        );
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some(""), Some(""), true)]
    #[case(Some("n"), None, false)]
    #[case(None, Some("d"), false)]
    fn empty_fields_keep_stored_values(
        #[case] name: Option<&str>,
        #[case] data: Option<&str>,
        #[case] empty: bool,
    ) {
        let changes = DrawingChanges::from_parts(name, data).expect("valid changes");
        assert_eq!(changes.is_empty(), empty);
    }

    #[rstest]
    fn oversized_update_name_is_rejected() {
        let name = "x".repeat(DRAWING_NAME_MAX_LENGTH + 1);
        assert!(DrawingChanges::from_parts(Some(&name), None).is_err());
    }
}
