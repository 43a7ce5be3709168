//! Display payloads.
//!
//! A `Card` is everything a front-end needs to draw the current question:
//! it carries no styling of its own beyond which answer token is emphasized.

use serde::Serialize;

/// What the prompt line is labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// A vocabulary question.
    Question,
    /// A conjugated verb form.
    Form,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Question => "Q",
            PromptKind::Form => "Form",
        }
    }
}

/// One word of a revealed verb row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub emphasized: bool,
}

/// The revealed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Answer {
    /// Vocabulary answer, verbatim.
    Text(String),
    /// The full verb row with the asked form emphasized.
    Entry(Vec<Token>),
}

impl Answer {
    /// Build a verb answer: every field becomes a token and only the one at
    /// `emphasized` is marked, so a repeated word elsewhere in the row stays
    /// plain.
    pub fn highlighted(fields: &[String], emphasized: usize) -> Self {
        Answer::Entry(
            fields
                .iter()
                .enumerate()
                .map(|(i, text)| Token {
                    text: text.clone(),
                    emphasized: i == emphasized,
                })
                .collect(),
        )
    }

    /// Render with `mark` applied to the emphasized token, words joined by a
    /// single space. No escaping is done.
    pub fn render_with(&self, mark: impl Fn(&str) -> String) -> String {
        match self {
            Answer::Text(text) => text.clone(),
            Answer::Entry(tokens) => tokens
                .iter()
                .map(|t| {
                    if t.emphasized {
                        mark(&t.text)
                    } else {
                        t.text.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Render with the emphasized token wrapped in `<b><u>..</u></b>`.
    pub fn to_html(&self) -> String {
        self.render_with(|w| format!("<b><u>{w}</u></b>"))
    }
}

/// The current question as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// 0-based position in the current pass.
    pub position: usize,
    /// Questions in the current pass.
    pub total: usize,
    /// 1 for the first pass, incremented for each review pass.
    pub pass: u32,
    pub font_size: u32,
    pub kind: PromptKind,
    pub prompt: String,
    /// Present only once the answer has been revealed for this position.
    pub answer: Option<Answer>,
}

impl Card {
    /// `"3/10"` style progress.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.position + 1, self.total)
    }

    /// The prompt line, e.g. `"1/2 — Q: cat"`.
    pub fn headline(&self) -> String {
        format!("{} — {}: {}", self.progress(), self.kind.label(), self.prompt)
    }

    /// Inline-styled HTML for embedding in a web view.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div style='font-size:{}px; line-height:1.3;'>{}</div>",
            self.font_size,
            self.headline()
        );
        if let Some(answer) = &self.answer {
            let body = match answer {
                Answer::Text(text) => format!("A: {text}"),
                Answer::Entry(_) => answer.to_html(),
            };
            html.push_str(&format!(
                "<div style='font-size:{}px;'>{body}</div>",
                self.font_size
            ));
        }
        html
    }
}
