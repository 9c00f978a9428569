//! Student profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::{Preferences, Role, RoleProfile};

/// Courses offered in the course picker.
pub const COURSE_OPTIONS: [&str; 3] = [
    "Bachelor of Software Engineering (Multimedia)",
    "Bachelor of Computer Science",
    "Bachelor of Information Technology",
];

/// Faculties offered in the faculty picker.
pub const FACULTY_OPTIONS: [&str; 3] = [
    "Faculty of Information Science & Technology",
    "Faculty of Engineering & Built Environment",
    "Faculty of Economics & Business",
];

/// Years offered in the year-of-study picker.
pub const YEAR_OPTIONS: [&str; 4] = ["Year 1", "Year 2", "Year 3", "Year 4"];

/// Profile document stored in `studentProfiles/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub user_id: String,

    // Personal information
    pub name: String,
    pub matric_number: String,
    pub email: String,
    pub phone: String,

    // Academic information
    pub course: String,
    pub faculty: String,
    pub year_of_study: String,

    #[serde(flatten)]
    pub preferences: Preferences,

    /// Empty until a picture is uploaded.
    pub profile_picture_path: String,
}

impl RoleProfile for StudentProfile {
    const ROLE: Role = Role::Student;

    fn empty(user_id: &UserId) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            name: String::new(),
            matric_number: String::new(),
            email: String::new(),
            phone: String::new(),
            course: String::new(),
            faculty: String::new(),
            year_of_study: String::new(),
            preferences: Preferences::default(),
            profile_picture_path: String::new(),
        }
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn set_user_id(&mut self, user_id: &UserId) {
        self.user_id = user_id.as_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Language, SchemaError, Theme};
    use serde_json::json;

    fn sample() -> StudentProfile {
        StudentProfile {
            user_id: "stu-1".to_string(),
            name: "Armin Rafiqin".to_string(),
            matric_number: "A201010".to_string(),
            email: "armin@siswa.ukm.edu.my".to_string(),
            phone: "+60 11-63130800".to_string(),
            course: COURSE_OPTIONS[0].to_string(),
            faculty: FACULTY_OPTIONS[0].to_string(),
            year_of_study: YEAR_OPTIONS[1].to_string(),
            preferences: Preferences {
                notifications_enabled: true,
                language: Language::English,
                theme: Theme::Dark,
            },
            profile_picture_path: String::new(),
        }
    }

    #[test]
    fn empty_profile_only_carries_the_owner() {
        let id = UserId::new("stu-1").unwrap();
        let profile = StudentProfile::empty(&id);

        assert_eq!(profile.user_id(), "stu-1");
        assert!(profile.name.is_empty());
        assert_eq!(profile.preferences, Preferences::default());
    }

    #[test]
    fn document_uses_flat_camel_case_fields() {
        let fields = sample().to_fields().unwrap();

        assert_eq!(fields["userId"], json!("stu-1"));
        assert_eq!(fields["matricNumber"], json!("A201010"));
        assert_eq!(fields["yearOfStudy"], json!("Year 2"));
        assert_eq!(fields["theme"], json!("Dark"));
        assert_eq!(fields["notificationsEnabled"], json!(true));
        assert!(!fields.contains_key("preferences"));
    }

    #[test]
    fn decode_restores_every_field() {
        let profile = sample();
        let fields = profile.to_fields().unwrap();
        assert_eq!(StudentProfile::from_fields(&fields).unwrap(), profile);
    }

    #[test]
    fn decode_rejects_missing_field() {
        let mut fields = sample().to_fields().unwrap();
        fields.remove("faculty");

        let err = StudentProfile::from_fields(&fields).unwrap_err();
        assert!(matches!(err, SchemaError::Decode { role: Role::Student, .. }));
        assert!(err.to_string().contains("faculty"));
    }

    #[test]
    fn decode_rejects_mistyped_field() {
        let mut fields = sample().to_fields().unwrap();
        fields.insert("notificationsEnabled".to_string(), json!("yes"));

        assert!(StudentProfile::from_fields(&fields).is_err());
    }
}
