pub mod generate;

use std::fmt::Display;

#[derive(Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize, Debug)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn from_number(number: u32) -> Self {
        Self(format!("S{number}"))
    }
}

impl<S: Into<String>> From<S> for StudentId {
    fn from(s: S) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A synthetic student record.
///
/// Every field is required when deserializing; there is no defaulting.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub student_id: StudentId,
    pub name: String,
    pub age: u32,
    pub school: String,
    pub major: String,
    pub graduation_year: i32,
    pub gpa: f64,
    pub email: String,
    pub city: String,
    pub state: String,
    pub interests: Vec<String>,
}

impl Profile {
    /// The string-valued fields in declaration order. Interests are not included.
    pub fn string_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.student_id.as_ref(),
            self.name.as_str(),
            self.school.as_str(),
            self.major.as_str(),
            self.email.as_str(),
            self.city.as_str(),
            self.state.as_str(),
        ]
        .into_iter()
    }
}

#[cfg(test)]
pub(crate) fn test_profile(student_id: &str) -> Profile {
    Profile {
        student_id: student_id.into(),
        name: "Avery Johnson".to_string(),
        age: 20,
        school: "Westbridge University".to_string(),
        major: "Computer Science".to_string(),
        graduation_year: 2027,
        gpa: 3.5,
        email: "avery.johnson@westbridgeuniversity.edu".to_string(),
        city: "Maplewood".to_string(),
        state: "OH".to_string(),
        interests: vec![
            "coding".to_string(),
            "chess".to_string(),
            "3D printing".to_string(),
        ],
    }
}
