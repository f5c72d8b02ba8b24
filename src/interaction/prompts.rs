//! User prompting implementation

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for collecting user input.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Prompt for a choice from a list of labels; returns the chosen label
    /// together with its index.
    async fn select(&self, message: &str, options: &[String]) -> Result<(String, usize)>;

    /// Prompt for free-form text input. The message is printed verbatim.
    async fn text(&self, message: &str) -> Result<String>;
}

/// Real prompter reading from stdin.
pub struct TerminalPrompter;

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Validate and parse a 1-based menu choice.
    /// Returns Some(index) if valid, None if invalid.
    fn validate_choice(input: &str, num_options: usize) -> Option<usize> {
        if num_options == 0 {
            return None;
        }

        input.parse::<usize>().ok().and_then(|num| {
            if num > 0 && num <= num_options {
                Some(num - 1)
            } else {
                None
            }
        })
    }

    fn format_menu(message: &str, options: &[String]) -> String {
        let mut output = String::new();
        output.push_str(message);
        output.push('\n');
        for (i, option) in options.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, option));
        }
        output
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select(&self, message: &str, options: &[String]) -> Result<(String, usize)> {
        if options.is_empty() {
            anyhow::bail!("No options provided");
        }

        print!("{}", Self::format_menu(message, options));
        print!("Enter choice (1-{}): ", options.len());
        io::stdout().flush()?;

        loop {
            let input = Self::read_line()?;
            if let Some(index) = Self::validate_choice(&input, options.len()) {
                return Ok((options[index].clone(), index));
            }
            print!(
                "Invalid choice. Please enter a number between 1 and {}: ",
                options.len()
            );
            io::stdout().flush()?;
        }
    }

    async fn text(&self, message: &str) -> Result<String> {
        print!("{message}");
        io::stdout().flush()?;
        Self::read_line()
    }
}

/// Scripted prompter for tests: queued selections and text responses,
/// recorded prompt messages and label lists.
#[derive(Default)]
pub struct MockPrompter {
    selections: Mutex<VecDeque<usize>>,
    responses: Mutex<VecDeque<String>>,
    messages: Mutex<Vec<String>>,
    seen_options: Mutex<Vec<Vec<String>>>,
}

impl MockPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selections<I>(self, selections: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        *self.selections.lock().unwrap() = selections.into_iter().collect();
        self
    }

    pub fn with_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.responses.lock().unwrap() = responses.into_iter().map(Into::into).collect();
        self
    }

    /// Every prompt message seen, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Every label list passed to `select`, in order.
    pub fn seen_options(&self) -> Vec<Vec<String>> {
        self.seen_options.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for MockPrompter {
    async fn select(&self, message: &str, options: &[String]) -> Result<(String, usize)> {
        self.messages.lock().unwrap().push(message.to_string());
        self.seen_options.lock().unwrap().push(options.to_vec());
        let index = self
            .selections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No mock selection configured"))?;
        let label = options
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock selection {index} out of range"))?;
        Ok((label, index))
    }

    async fn text(&self, message: &str) -> Result<String> {
        self.messages.lock().unwrap().push(message.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No mock response configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_choice_valid() {
        assert_eq!(TerminalPrompter::validate_choice("1", 3), Some(0));
        assert_eq!(TerminalPrompter::validate_choice("3", 3), Some(2));
        assert_eq!(TerminalPrompter::validate_choice("10", 10), Some(9));
    }

    #[test]
    fn test_validate_choice_invalid() {
        assert_eq!(TerminalPrompter::validate_choice("0", 3), None);
        assert_eq!(TerminalPrompter::validate_choice("4", 3), None);
        assert_eq!(TerminalPrompter::validate_choice("-1", 3), None);
        assert_eq!(TerminalPrompter::validate_choice("abc", 3), None);
        assert_eq!(TerminalPrompter::validate_choice("", 3), None);
        assert_eq!(TerminalPrompter::validate_choice("1", 0), None);
    }

    #[test]
    fn test_format_menu() {
        let options = vec!["Option A".to_string(), "Option B".to_string()];
        assert_eq!(
            TerminalPrompter::format_menu("Choose an option:", &options),
            "Choose an option:\n  1. Option A\n  2. Option B\n"
        );
    }

    #[tokio::test]
    async fn test_mock_prompter_select() {
        let prompter = MockPrompter::new().with_selections([1]);
        let options = vec!["one".to_string(), "two".to_string()];

        let (label, index) = prompter.select("one or two?", &options).await.unwrap();
        assert_eq!(label, "two");
        assert_eq!(index, 1);
        assert_eq!(prompter.messages(), vec!["one or two?"]);
        assert_eq!(prompter.seen_options(), vec![options]);
    }

    #[tokio::test]
    async fn test_mock_prompter_text_in_order() {
        let prompter = MockPrompter::new().with_responses(["first", "second"]);
        assert_eq!(prompter.text("a: ").await.unwrap(), "first");
        assert_eq!(prompter.text("b: ").await.unwrap(), "second");
        assert!(prompter.text("c: ").await.is_err());
    }
}
