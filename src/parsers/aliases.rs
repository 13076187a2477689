//! Alias fallback chains over loosely-shaped JSON objects.
//!
//! Backend releases renamed fields over time (`llm_answer` vs `answer`, `rating` vs `stars`),
//! so every consumed field is looked up through an ordered list of candidate names. A candidate
//! only wins when its value is *present* and converts to the wanted type; otherwise the next
//! candidate is tried. Presence follows the loose truthiness the backend relies on: `null`,
//! `false`, `0`, blank strings and empty arrays all count as absent.

use serde_json::{Map, Value};

pub const ANSWER_ALIASES: &[&str] = &["llm_answer", "answer"];
pub const MATCHES_ALIASES: &[&str] = &["matches", "professors"];
pub const SOURCES_ALIASES: &[&str] = &["sources_used", "sources"];
pub const TOTAL_ALIASES: &[&str] = &["total_found"];

pub const ID_ALIASES: &[&str] = &["id", "professor_id"];
pub const NAME_ALIASES: &[&str] = &["name"];
pub const SUBJECT_ALIASES: &[&str] = &["subject"];
pub const RATING_ALIASES: &[&str] = &["rating", "stars", "avg_rating"];
pub const SCORE_ALIASES: &[&str] = &["final_score", "score"];
pub const REVIEW_ALIASES: &[&str] = &["review", "chunk_preview"];
pub const DEPARTMENT_ALIASES: &[&str] = &["department"];
pub const REVIEW_COUNT_ALIASES: &[&str] = &["num_reviews"];
pub const TAGS_ALIASES: &[&str] = &["tags"];

/// Whether a value counts as present for alias resolution
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Resolve the first alias whose value is present and accepted by `convert`
pub fn first_with<'a, T>(
    object: &'a Map<String, Value>,
    aliases: &[&str],
    convert: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    aliases
        .iter()
        .filter_map(|alias| object.get(*alias))
        .filter(|value| is_present(value))
        .find_map(convert)
}

/// Strings as-is, numbers in their JSON spelling
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers, or strings that parse as one
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_array(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()
}

/// Arrays of strings or numbers, dropping anything else
pub fn as_text_list(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| items.iter().filter_map(as_text).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_presence_rules() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(0.0)));
        assert!(!is_present(&json!("   ")));
        assert!(!is_present(&json!([])));

        assert!(is_present(&json!(true)));
        assert!(is_present(&json!(4.2)));
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!([1])));
        assert!(is_present(&json!({})));
    }

    #[test]
    fn test_first_alias_wins() {
        let obj = object(json!({"llm_answer": "first", "answer": "second"}));
        assert_eq!(first_with(&obj, ANSWER_ALIASES, as_text), Some("first".to_string()));
    }

    #[test]
    fn test_falls_back_when_first_alias_missing() {
        let obj = object(json!({"answer": "second"}));
        assert_eq!(first_with(&obj, ANSWER_ALIASES, as_text), Some("second".to_string()));
    }

    #[test]
    fn test_falls_back_when_first_alias_blank() {
        let obj = object(json!({"llm_answer": "", "answer": "second"}));
        assert_eq!(first_with(&obj, ANSWER_ALIASES, as_text), Some("second".to_string()));
    }

    #[test]
    fn test_falls_back_when_first_alias_has_wrong_type() {
        let obj = object(json!({"rating": "excellent", "stars": 4.5}));
        assert_eq!(first_with(&obj, RATING_ALIASES, as_number), Some(4.5));
    }

    #[test]
    fn test_zero_rating_falls_through_to_later_alias() {
        let obj = object(json!({"rating": 0, "avg_rating": 3.8}));
        assert_eq!(first_with(&obj, RATING_ALIASES, as_number), Some(3.8));
    }

    #[test]
    fn test_all_aliases_absent() {
        let obj = object(json!({"unrelated": 1}));
        assert_eq!(first_with(&obj, RATING_ALIASES, as_number), None);
    }

    #[test]
    fn test_numeric_string_coercion() {
        assert_eq!(as_number(&json!("4.5")), Some(4.5));
        assert_eq!(as_number(&json!("n/a")), None);
        assert_eq!(as_count(&json!("12")), Some(12));
        assert_eq!(as_text(&json!(42)), Some("42".to_string()));
    }

    #[test]
    fn test_text_list_mixed_items() {
        let list = as_text_list(&json!(["p1", 2, null, {"x": 1}])).unwrap();
        assert_eq!(list, vec!["p1".to_string(), "2".to_string()]);
    }
}
