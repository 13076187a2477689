//! Turning a normalized response into log messages

use super::policy::{NormalizationPolicy, ResultLayout};
use crate::formatting::{format_header, format_match, format_result_block};
use crate::models::{Message, MessageMeta, ProfessorMatch, Role};
use crate::parsers::NormalizedResponse;

pub const NO_ANSWER_TEXT: &str = "No answer returned";

/// Stable partition: cited professors first, each group in backend order.
///
/// Returns every professor paired with whether the answer cites it.
pub fn order_by_citation(
    professors: Vec<ProfessorMatch>,
    sources: &[String],
) -> Vec<(ProfessorMatch, bool)> {
    let (cited, uncited): (Vec<_>, Vec<_>) = professors
        .into_iter()
        .map(|p| {
            let is_cited = p.id.as_ref().is_some_and(|id| sources.contains(id));
            (p, is_cited)
        })
        .partition(|(_, is_cited)| *is_cited);

    cited.into_iter().chain(uncited).collect()
}

/// Messages appended after a successful response, in display order
pub fn resolve_messages(response: NormalizedResponse, policy: &NormalizationPolicy) -> Vec<Message> {
    let mut messages = Vec::new();

    match response.answer {
        Some(answer) => messages.push(Message::bot(answer)),
        None => messages.push(Message::error(NO_ANSWER_TEXT)),
    }

    if response.professors.is_empty() {
        return messages;
    }

    let received = response.professors.len();
    let total = response.total_found.map(|t| t as usize).unwrap_or(received).max(received);

    let mut ordered = order_by_citation(response.professors, &response.sources);
    ordered.truncate(policy.max_results);

    if ordered.is_empty() {
        return messages;
    }

    match policy.layout {
        ResultLayout::Block => {
            let text = format_result_block(&ordered);
            let professors = ordered.into_iter().map(|(p, _)| p).collect();
            messages
                .push(Message::new(Role::Result, text).with_meta(MessageMeta::Professors { professors }));
        }
        ResultLayout::Split => {
            let shown = ordered.len();
            messages.push(
                Message::new(Role::Header, format_header(shown, total))
                    .with_meta(MessageMeta::Header { shown, total }),
            );
            for (professor, cited) in ordered {
                let text = format_match(&professor, cited);
                messages
                    .push(Message::new(Role::Match, text).with_meta(MessageMeta::Match { professor, cited }));
            }
        }
    }

    messages
}
