//! Action input.
//!
//! One action per line so a single render can never fire two actions.

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Correct,
    Wrong,
    Quit,
}

impl Action {
    /// Parse one input line. An empty line reveals the answer.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "" | "s" | "show" => Some(Action::Reveal),
            "c" | "correct" | "y" => Some(Action::Correct),
            "w" | "wrong" | "n" => Some(Action::Wrong),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "Enter s (show answer), c (correct), w (wrong) or q (quit).";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_actions() {
        assert_eq!(Action::parse("s\n"), Some(Action::Reveal));
        assert_eq!(Action::parse("\n"), Some(Action::Reveal));
        assert_eq!(Action::parse("  C "), Some(Action::Correct));
        assert_eq!(Action::parse("wrong"), Some(Action::Wrong));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
        assert_eq!(Action::parse("cw"), None);
    }
}
