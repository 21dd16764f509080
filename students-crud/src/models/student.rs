use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub course: String,
    pub grade: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Stamped by the server with `$currentDate` on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl Student {
    pub fn new(name: &str, course: &str, grade: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            course: course.to_string(),
            grade: grade.to_string(),
            created_at,
            updated_at: None,
        }
    }
}

/// Projection of a student used by the list query.
///
/// The collection is shared, so every projected field may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    #[serde(rename = "_id", default)]
    pub id: Option<Bson>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

/// The two students inserted by the CREATE step.
pub fn seed_students(now: DateTime<Utc>) -> Vec<Student> {
    vec![
        Student::new("Moise", "Web Service", "B", now),
        Student::new("Ada", "Web Service", "A", now),
    ]
}
