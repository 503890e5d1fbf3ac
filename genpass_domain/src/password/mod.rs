pub mod generate;

pub use generate::{
    extract_keywords, generate_password_set, password_valid, PasswordStrategy,
    DEFAULT_PASSWORDS_PER_PROFILE,
};

use crate::profile::StudentId;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Candidate passwords per student id.
///
/// Iterates in insertion order, which for a deserialized set is the key order of the
/// JSON object. Keys are not checked against any profile list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordSet {
    entries: Vec<(StudentId, Vec<String>)>,
}

impl PasswordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the candidates of `student_id`.
    ///
    /// Replacing keeps the position of the first insertion.
    pub fn insert(&mut self, student_id: StudentId, passwords: Vec<String>) {
        match self.entries.iter_mut().find(|(id, _)| id == &student_id) {
            Some((_, existing)) => *existing = passwords,
            None => self.entries.push((student_id, passwords)),
        }
    }

    pub fn get(&self, student_id: &StudentId) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(id, _)| id == student_id)
            .map(|(_, passwords)| passwords.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StudentId, &[String])> {
        self.entries
            .iter()
            .map(|(id, passwords)| (id, passwords.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StudentId, Vec<String>)> for PasswordSet {
    fn from_iter<I: IntoIterator<Item = (StudentId, Vec<String>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (student_id, passwords) in iter {
            set.insert(student_id, passwords);
        }
        set
    }
}

impl Serialize for PasswordSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (student_id, passwords) in &self.entries {
            map.serialize_entry(student_id, passwords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PasswordSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = PasswordSet;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.pad("a map of student id to password list")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = PasswordSet::new();
                while let Some((student_id, passwords)) =
                    access.next_entry::<StudentId, Vec<String>>()?
                {
                    set.insert(student_id, passwords);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::*;

    #[test]
    fn keeps_payload_key_order() {
        let set: PasswordSet =
            serde_json::from_str(r#"{"S2": ["c3"], "S1": ["a1", "b2"], "S10": []}"#).unwrap();

        let keys = set.iter().map(|(id, _)| id.to_string()).collect::<Vec<_>>();
        assert_eq!(vec!["S2", "S1", "S10"], keys);
        assert_eq!(Some(&["a1".to_string(), "b2".to_string()][..]), set.get(&"S1".into()));
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let set: PasswordSet =
            serde_json::from_str(r#"{"S1": ["old"], "S2": ["x"], "S1": ["new"]}"#).unwrap();

        let entries = set
            .iter()
            .map(|(id, pw)| (id.to_string(), pw.to_vec()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                ("S1".to_string(), vec!["new".to_string()]),
                ("S2".to_string(), vec!["x".to_string()]),
            ],
            entries
        );
    }

    #[test]
    fn serializes_in_insertion_order() {
        let set: PasswordSet = [
            ("S9".into(), vec!["z".to_string()]),
            ("S1".into(), vec!["a".to_string(), "b".to_string()]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            r#"{"S9":["z"],"S1":["a","b"]}"#,
            serde_json::to_string(&set).unwrap()
        );
    }

    #[test]
    fn array_payload_is_rejected() {
        assert_matches!(serde_json::from_str::<PasswordSet>(r#"[["S1"]]"#), Err(_));
        assert_matches!(
            serde_json::from_str::<PasswordSet>(r#"{"S1": "not-a-list"}"#),
            Err(_)
        );
    }
}
