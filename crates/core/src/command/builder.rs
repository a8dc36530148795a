//! Ordered token sequence that becomes the child process's argument vector.
//!
//! The first two tokens are always the interpreter and the script. Everything
//! after them is appended, never inserted or removed individually.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    interpreter: String,
    script: String,
    tokens: Vec<String>,
}

impl CommandBuilder {
    pub fn new(interpreter: impl Into<String>, script: impl Into<String>) -> Self {
        let mut builder = Self {
            interpreter: interpreter.into(),
            script: script.into(),
            tokens: Vec::new(),
        };
        builder.reset();
        builder
    }

    /// Reset the sequence to exactly `[interpreter, script]`.
    ///
    /// The new paths are also remembered, so a later [`reset`](Self::reset)
    /// rebuilds from them.
    pub fn initialize(&mut self, interpreter: impl Into<String>, script: impl Into<String>) {
        self.interpreter = interpreter.into();
        self.script = script.into();
        self.reset();
    }

    /// Rebuild the sequence from the currently configured paths.
    pub fn reset(&mut self) {
        self.tokens = vec![self.interpreter.clone(), self.script.clone()];
    }

    /// Change the interpreter path. Takes effect on the next reset.
    pub fn set_interpreter(&mut self, interpreter: impl Into<String>) {
        self.interpreter = interpreter.into();
    }

    /// Change the script path. Takes effect on the next reset.
    pub fn set_script(&mut self, script: impl Into<String>) {
        self.script = script.into();
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// Append one token verbatim. No quoting or sanitation is applied.
    pub fn append(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Append the payload, then the target directory.
    pub fn extend_with_request(&mut self, payload: impl Into<String>, target_dir: impl Into<String>) {
        self.append(payload);
        self.append(target_dir);
    }

    pub fn current_command(&self) -> &[String] {
        &self.tokens
    }

    /// Split the sequence into program and arguments.
    ///
    /// Every token after the interpreter is passed verbatim, blank ones included,
    /// so the payload and target always sit at the same positions.
    pub fn argv(&self) -> Result<(&str, Vec<&str>)> {
        let (program, rest) = self
            .tokens
            .split_first()
            .ok_or_else(|| Error::InvalidCommand("command has no tokens".to_string()))?;

        if program.is_empty() {
            return Err(Error::InvalidCommand(
                "interpreter path is empty".to_string(),
            ));
        }

        let args = rest.iter().map(String::as_str).collect();

        Ok((program.as_str(), args))
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                cmd.push(' ');
            }
            if needs_quoting(token) {
                cmd.push_str(&format!("'{}'", token.replace('\'', r"'\''")));
            } else {
                cmd.push_str(token);
            }
        }
        cmd
    }
}

fn needs_quoting(token: &str) -> bool {
    token.is_empty()
        || token.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '\'' | '"' | '{' | '}' | '$' | '&' | '|' | ';' | '<' | '>' | '(' | ')' | '*'
                        | '?' | '`' | '\\'
                )
        })
}
