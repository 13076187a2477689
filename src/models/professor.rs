use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown Professor";
pub const UNKNOWN_SUBJECT: &str = "Unknown Subject";

/// A professor record from the backend, reshaped into one uniform form.
///
/// Built by [`crate::parsers::response::normalize_professor`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Relevance in `0.0..=1.0`.
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ProfessorMatch {
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            subject: subject.into(),
            rating: None,
            score: 0.0,
            review: None,
            department: None,
            num_reviews: None,
            tags: Vec::new(),
        }
    }

    /// Rating as shown to the user, `N/A` when the backend sent none.
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{}", rating),
            None => "N/A".to_string(),
        }
    }

    /// Score as a percentage with one decimal, e.g. `87.3%`.
    pub fn score_label(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_label() {
        let mut professor = ProfessorMatch::new("Dr. Smith", "Calculus");
        assert_eq!(professor.rating_label(), "N/A");

        professor.rating = Some(4.5);
        assert_eq!(professor.rating_label(), "4.5");

        professor.rating = Some(4.0);
        assert_eq!(professor.rating_label(), "4");
    }

    #[test]
    fn test_score_label() {
        let mut professor = ProfessorMatch::new("Dr. Smith", "Calculus");
        assert_eq!(professor.score_label(), "0.0%");

        professor.score = 0.8734;
        assert_eq!(professor.score_label(), "87.3%");

        professor.score = 1.0;
        assert_eq!(professor.score_label(), "100.0%");
    }
}
