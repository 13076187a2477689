//! Display text for professor matches, shared by the log messages, the TUI and the CLI.

use crate::models::ProfessorMatch;

/// Pre-formatted block used by the single `result` message layout
pub fn format_result_block(professors: &[(ProfessorMatch, bool)]) -> String {
    let mut text = String::from("Found professors:\n\n");

    for (idx, (professor, cited)) in professors.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", idx + 1, professor.name));
        text.push_str(&format!("   Subject: {}\n", professor.subject));
        text.push_str(&format!("   Rating: {}⭐\n", professor.rating_label()));
        text.push_str(&format!("   Match Score: {}\n", professor.score_label()));
        if *cited {
            text.push_str("   Cited in answer\n");
        }
        text.push('\n');
    }

    text.truncate(text.trim_end().len());
    text
}

/// One line per professor for the `match` message layout, review quoted underneath
pub fn format_match(professor: &ProfessorMatch, cited: bool) -> String {
    let mut text = format!(
        "{} · {} · {}⭐ · {} match",
        professor.name,
        professor.subject,
        professor.rating_label(),
        professor.score_label()
    );
    if cited {
        text.push_str(" · cited");
    }
    if let Some(count) = professor.num_reviews {
        text.push_str(&format!(" · {} reviews", count));
    }
    if let Some(review) = &professor.review {
        text.push_str(&format!("\n  \"{}\"", review));
    }
    text
}

/// Title introducing a `match` list
pub fn format_header(shown: usize, total: usize) -> String {
    match (shown, total) {
        (1, 1) => "Found 1 professor:".to_string(),
        (s, t) if s < t => format!("Top {} of {} professors:", s, t),
        (s, _) => format!("Found {} professors:", s),
    }
}
