use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::aliases::{
    ANSWER_ALIASES, DEPARTMENT_ALIASES, ID_ALIASES, MATCHES_ALIASES, NAME_ALIASES,
    RATING_ALIASES, REVIEW_ALIASES, REVIEW_COUNT_ALIASES, SCORE_ALIASES, SOURCES_ALIASES,
    SUBJECT_ALIASES, TAGS_ALIASES, TOTAL_ALIASES, as_array, as_count, as_number, as_text,
    as_text_list, first_with,
};
use crate::error::ResponseError;
use crate::models::ProfessorMatch;
use crate::models::professor::{UNKNOWN_NAME, UNKNOWN_SUBJECT};

/// A backend response reduced to the fields the client consumes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedResponse {
    /// `None` when every answer alias was absent
    pub answer: Option<String>,
    /// All professor records in backend order, uncapped
    pub professors: Vec<ProfessorMatch>,
    /// Identifiers the answer cites, in backend order
    pub sources: Vec<String>,
    pub total_found: Option<u64>,
}

/// Parse a raw response body
///
/// Fails only when the body is not a JSON object; every individual field is optional.
pub fn parse_response(body: &str) -> Result<NormalizedResponse, ResponseError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ResponseError::InvalidJson(e.to_string()))?;
    let object = value.as_object().ok_or(ResponseError::NotAnObject)?;
    Ok(normalize_response(object))
}

pub fn normalize_response(object: &Map<String, Value>) -> NormalizedResponse {
    let answer = first_with(object, ANSWER_ALIASES, as_text);

    let professors = first_with(object, MATCHES_ALIASES, as_array)
        .map(|entries| {
            entries
                .iter()
                .enumerate()
                .filter_map(|(idx, entry)| match entry.as_object() {
                    Some(record) => Some(normalize_professor(record)),
                    None => {
                        warn!(index = idx, "Skipping professor entry that is not an object");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let sources = first_with(object, SOURCES_ALIASES, as_text_list).unwrap_or_default();
    let total_found = first_with(object, TOTAL_ALIASES, as_count);

    let normalized = NormalizedResponse { answer, professors, sources, total_found };
    debug!(
        has_answer = normalized.answer.is_some(),
        professors = normalized.professors.len(),
        sources = normalized.sources.len(),
        "Normalized backend response"
    );
    normalized
}

/// Reshape one backend professor record
pub fn normalize_professor(record: &Map<String, Value>) -> ProfessorMatch {
    ProfessorMatch {
        id: first_with(record, ID_ALIASES, as_text),
        name: first_with(record, NAME_ALIASES, as_text).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        subject: first_with(record, SUBJECT_ALIASES, as_text)
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
        rating: first_with(record, RATING_ALIASES, as_number),
        score: first_with(record, SCORE_ALIASES, as_number).unwrap_or(0.0),
        review: first_with(record, REVIEW_ALIASES, as_text),
        department: first_with(record, DEPARTMENT_ALIASES, as_text),
        num_reviews: first_with(record, REVIEW_COUNT_ALIASES, as_count),
        tags: first_with(record, TAGS_ALIASES, as_text_list).unwrap_or_default(),
    }
}
