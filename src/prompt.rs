//! Yes/no prompting
//!
//! The copier and the overwrite guard only talk to a [`Prompter`], so the
//! whole pipeline can run against a terminal or against a scripted list of
//! answers in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Blocking yes/no questions plus informational lines for the user
pub trait Prompter {
    /// Ask `question` and return the answer.
    ///
    /// With `default_yes` the answer is yes unless the user types `n`;
    /// otherwise it is no unless the user types `y`. Case and surrounding
    /// whitespace are ignored.
    fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool>;

    /// Show a line of text that needs no answer
    fn say(&mut self, message: &str) -> io::Result<()>;
}

/// Interpret a raw answer against the question's default
pub fn interpret_answer(answer: &str, default_yes: bool) -> bool {
    let answer = answer.trim();
    if default_yes {
        !answer.eq_ignore_ascii_case("n")
    } else {
        answer.eq_ignore_ascii_case("y")
    }
}

/// Prompter reading answers line by line from `input` and writing questions to `output`
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        // EOF reads as an empty answer, i.e. the default
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(interpret_answer(&answer, default_yes))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }
}

/// Prompter that replays canned answers and records every question asked
///
/// Once the script runs out, every further question gets an empty answer.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Questions asked, in order
    pub asked: Vec<String>,
    /// Informational lines shown, in order
    pub said: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            said: Vec::new(),
        }
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool> {
        self.asked.push(question.to_string());
        let answer = self.answers.pop_front().unwrap_or_default();
        Ok(interpret_answer(&answer, default_yes))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        self.said.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_default_yes() {
        assert!(interpret_answer("", true));
        assert!(interpret_answer("y", true));
        assert!(interpret_answer("maybe", true));
        assert!(!interpret_answer("n", true));
        assert!(!interpret_answer("N\n", true));
        assert!(!interpret_answer("  n  ", true));
    }

    #[test]
    fn test_interpret_default_no() {
        assert!(!interpret_answer("", false));
        assert!(!interpret_answer("yes", false));
        assert!(!interpret_answer("n", false));
        assert!(interpret_answer("y", false));
        assert!(interpret_answer("Y\r\n", false));
    }

    #[test]
    fn test_terminal_prompter_reads_lines() {
        let input = io::Cursor::new("n\n\ny\n");
        let mut output = Vec::new();
        {
            let mut prompter = TerminalPrompter::new(input, &mut output);
            assert!(!prompter.confirm("First? (Y/n) ", true).unwrap());
            assert!(prompter.confirm("Second? (Y/n) ", true).unwrap());
            assert!(prompter.confirm("Third? (y/N) ", false).unwrap());
            prompter.say("done").unwrap();
        }
        let written = String::from_utf8(output).unwrap();
        assert_eq!(written, "First? (Y/n) Second? (Y/n) Third? (y/N) done\n");
    }

    #[test]
    fn test_terminal_prompter_eof_is_default() {
        let mut output = Vec::new();
        let mut prompter = TerminalPrompter::new(io::Cursor::new(""), &mut output);
        assert!(prompter.confirm("Keep? (Y/n) ", true).unwrap());
        assert!(!prompter.confirm("Overwrite? (y/N) ", false).unwrap());
    }

    #[test]
    fn test_scripted_prompter_records_questions() {
        let mut prompter = ScriptedPrompter::new(["n"]);
        assert!(!prompter.confirm("a", true).unwrap());
        assert!(prompter.confirm("b", true).unwrap());
        prompter.say("c").unwrap();
        assert_eq!(prompter.asked, vec!["a", "b"]);
        assert_eq!(prompter.said, vec!["c"]);
        assert_eq!(prompter.remaining(), 0);
    }
}
