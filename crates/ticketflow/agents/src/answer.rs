//! Extractive answer generator
//!
//! Drafts an answer by scoring knowledge-base lines against the question and
//! quoting the best matches. Deliberately best-effort: it always produces
//! some answer, so the information-search branch never stalls on a ticket.

use crate::error::AgentResult;
use crate::traits::AnswerGenerator;

const MAX_EXCERPT_LINES: usize = 3;

const FALLBACK_ANSWER: &str =
    "We could not find this in our documentation. A support agent will follow up with you shortly.";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAnswerGenerator;

impl TemplateAnswerGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Overlap between the question's terms and a candidate line, ignoring
    /// short words
    fn score(line: &str, terms: &[String]) -> usize {
        let line = line.to_lowercase();
        terms.iter().filter(|t| line.contains(t.as_str())).count()
    }
}

impl AnswerGenerator for TemplateAnswerGenerator {
    fn generate(&self, context: &str, question: &str) -> AgentResult<String> {
        let terms: Vec<String> = question
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 3)
            .map(str::to_string)
            .collect();

        let mut scored: Vec<(usize, &str)> = context
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| (Self::score(l, &terms), l))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        if scored.is_empty() {
            return Ok(FALLBACK_ANSWER.to_string());
        }

        let excerpt = scored
            .iter()
            .take(MAX_EXCERPT_LINES)
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(format!(
            "Based on our documentation:\n{excerpt}\n\nIf this does not answer your question, reply to this message and a support agent will assist you."
        ))
    }
}
