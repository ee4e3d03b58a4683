//! Human-facing input/output.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

/// Where assistant text goes and where user answers come from.
#[async_trait]
pub trait Console: Send + Sync {
    /// Show assistant text to the user.
    fn render(&self, text: &str);

    /// Show the output of the tool that ended the conversation.
    fn show_tool_output(&self, text: &str);

    /// Show `prompt`, then block for one line of input.
    ///
    /// Never fails: EOF or a read error yields an empty answer.
    async fn read_line(&self, prompt: &str) -> String;
}

/// Console on the process's stdin/stdout.
pub struct StdConsole {
    stdin: tokio::sync::Mutex<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    fn render(&self, text: &str) {
        println!("\nAssistant: {}", text);
    }

    fn show_tool_output(&self, text: &str) {
        println!("\n{}", text);
    }

    async fn read_line(&self, prompt: &str) -> String {
        self.render(prompt);

        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(b"You: ").await {
            tracing::warn!("Failed to write input prompt: {}", e);
        }
        if let Err(e) = stdout.flush().await {
            tracing::warn!("Failed to flush input prompt: {}", e);
        }

        let mut line = String::new();
        let mut stdin = self.stdin.lock().await;
        match stdin.read_line(&mut line).await {
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                tracing::warn!("Failed to read user input: {}", e);
                String::new()
            }
        }
    }
}

/// Console with canned answers that records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
    rendered: Mutex<Vec<String>>,
    tool_outputs: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            rendered: Mutex::new(Vec::new()),
            tool_outputs: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Text passed to [`Console::render`], in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Text passed to [`Console::show_tool_output`], in order.
    pub fn tool_outputs(&self) -> Vec<String> {
        self.tool_outputs.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Prompts passed to [`Console::read_line`], in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn render(&self, text: &str) {
        if let Ok(mut rendered) = self.rendered.lock() {
            rendered.push(text.to_string());
        }
    }

    fn show_tool_output(&self, text: &str) {
        if let Ok(mut outputs) = self.tool_outputs.lock() {
            outputs.push(text.to_string());
        }
    }

    async fn read_line(&self, prompt: &str) -> String {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or_default()
    }
}
