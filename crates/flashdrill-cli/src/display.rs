//! Terminal rendering of cards and session summaries.

use std::io::{self, Write};

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use crossterm::style::{self, Color, Print, ResetColor, SetForegroundColor, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};

use flashdrill_core::render::{Answer, Card};
use flashdrill_core::report::SessionReport;

use crate::input::HELP;

/// How cards are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Colored prompt, bold+underlined answer form.
    Ansi,
    /// No escape codes; the answer form is wrapped in `*..*`.
    Plain,
    /// The inline-styled HTML fragment for each card.
    Html,
}

/// Writes everything the trainer shows.
pub struct Display<W: Write> {
    out: W,
    style: Style,
    /// Clear the screen before each card.
    clear: bool,
}

impl<W: Write> Display<W> {
    pub fn new(out: W, style: Style, clear: bool) -> Self {
        Self { out, style, clear }
    }

    pub fn show_card(&mut self, card: &Card) -> io::Result<()> {
        if self.clear {
            queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }

        match self.style {
            Style::Html => writeln!(self.out, "{}", card.to_html())?,
            Style::Plain => {
                writeln!(self.out, "{}", card.headline())?;
                if let Some(answer) = &card.answer {
                    writeln!(self.out, "{}", answer_line(answer, |w| format!("*{w}*")))?;
                }
            }
            Style::Ansi => {
                queue!(
                    self.out,
                    SetForegroundColor(Color::Cyan),
                    Print(card.headline()),
                    ResetColor,
                    Print("\n")
                )?;
                if let Some(answer) = &card.answer {
                    let line = answer_line(answer, |w| {
                        style::style(w).bold().underlined().to_string()
                    });
                    queue!(self.out, Print(line), Print("\n"))?;
                }
            }
        }
        self.out.flush()
    }

    pub fn show_prompt(&mut self) -> io::Result<()> {
        write!(self.out, "[s]how  [c]orrect  [w]rong  [q]uit > ")?;
        self.out.flush()
    }

    pub fn show_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")
    }

    pub fn show_notice(&mut self, message: &str) -> io::Result<()> {
        match self.style {
            Style::Ansi => queue!(
                self.out,
                SetForegroundColor(Color::Yellow),
                Print(message),
                ResetColor,
                Print("\n")
            )?,
            _ => writeln!(self.out, "{message}")?,
        }
        self.out.flush()
    }

    /// Per-pass table followed by totals.
    pub fn show_summary(&mut self, report: &SessionReport) -> io::Result<()> {
        let mut table = Table::new();
        table.set_header(vec!["Pass", "Questions", "Correct", "Wrong", "Accuracy"]);

        for pass in &report.passes {
            table.add_row(vec![
                Cell::new(pass.pass),
                Cell::new(pass.questions),
                Cell::new(pass.correct),
                Cell::new(pass.wrong),
                Cell::new(format!("{:.1}%", pass.accuracy() * 100.0)),
            ]);
        }

        writeln!(self.out, "\n{table}")?;
        writeln!(
            self.out,
            "Total: {} correct, {} wrong (first pass {:.1}%)",
            report.total_correct,
            report.total_wrong,
            report.first_pass_accuracy() * 100.0
        )?;
        self.out.flush()
    }
}

fn answer_line(answer: &Answer, mark: impl Fn(&str) -> String) -> String {
    match answer {
        Answer::Text(text) => format!("A: {text}"),
        Answer::Entry(_) => answer.render_with(mark),
    }
}
