use serde::{Deserialize, Serialize};

use crate::utils::contains_ignore_case;

/// A student on the school roster, eligible to be added to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Student {
    pub id: i64,
    #[serde(rename = "studentCode", alias = "code", default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(rename = "className", alias = "class", default)]
    pub class_name: String,
}

impl Student {
    /// Check whether any visible field contains the query.
    /// Query should already be lowercased.
    pub fn matches_search(&self, query: &str) -> bool {
        contains_ignore_case(&self.name, query)
            || contains_ignore_case(&self.code, query)
            || contains_ignore_case(&self.grade, query)
            || contains_ignore_case(&self.class_name, query)
    }

    /// "Grade 7 / Class 3" style label for list rows
    pub fn grade_class(&self) -> String {
        match (self.grade.is_empty(), self.class_name.is_empty()) {
            (false, false) => format!("{} / {}", self.grade, self.class_name),
            (false, true) => self.grade.clone(),
            (true, false) => self.class_name.clone(),
            (true, true) => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            id: 11,
            code: "S2024011".to_string(),
            name: "Lin Wei".to_string(),
            grade: "Grade 8".to_string(),
            class_name: "8B".to_string(),
        }
    }

    #[test]
    fn test_parse_student() {
        let json = r#"{"id": 11, "studentCode": "S2024011", "name": "Lin Wei", "grade": "Grade 8", "className": "8B"}"#;
        let parsed: Student = serde_json::from_str(json).expect("Failed to parse student JSON");
        assert_eq!(parsed, student());
    }

    #[test]
    fn test_parse_student_missing_labels() {
        let json = r#"{"id": 3, "name": "Ana"}"#;
        let parsed: Student = serde_json::from_str(json).expect("Failed to parse student JSON");
        assert_eq!(parsed.code, "");
        assert_eq!(parsed.grade_class(), "-");
    }

    #[test]
    fn test_matches_search_any_field() {
        let s = student();
        assert!(s.matches_search("lin"));
        assert!(s.matches_search("s2024"));
        assert!(s.matches_search("grade 8"));
        assert!(s.matches_search("8b"));
        assert!(!s.matches_search("grade 9"));
    }

    #[test]
    fn test_grade_class() {
        assert_eq!(student().grade_class(), "Grade 8 / 8B");
    }
}
