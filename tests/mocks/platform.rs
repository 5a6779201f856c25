//! Mock command runner.
//!
//! Simulates a development machine:
//! - tools present or absent on PATH
//! - canned output per command line
//! - launch failures and timeouts

use site_preflight::platform::process::{CommandOutput, CommandRunner, ProbeError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Canned behaviour for one command line
#[derive(Debug, Clone)]
pub enum MockResponse {
    Output(CommandOutput),
    Timeout,
    SpawnFailure,
}

impl MockResponse {
    pub fn stdout(text: &str) -> Self {
        MockResponse::Output(CommandOutput {
            success: true,
            code: Some(0),
            stdout: format!("{}\n", text),
            stderr: String::new(),
        })
    }

    pub fn stderr(text: &str) -> Self {
        MockResponse::Output(CommandOutput {
            success: true,
            code: Some(0),
            stdout: String::new(),
            stderr: format!("{}\n", text),
        })
    }

    pub fn failure(code: i32, stderr: &str) -> Self {
        MockResponse::Output(CommandOutput {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }
}

/// Command runner backed by an in-memory table of tools
#[derive(Debug, Default)]
pub struct MockRunner {
    installed: HashSet<String>,
    responses: HashMap<String, MockResponse>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// No tools installed
    pub fn empty() -> Self {
        MockRunner::default()
    }

    /// Every tool present, configured, and up to date
    pub fn healthy_toolchain() -> Self {
        MockRunner::empty()
            .with_tool("hugo", "hugo version", MockResponse::stdout("hugo v0.125.4-cc3574ef4f41fccbe88d9443ed066eb10867ada2+extended linux/amd64 BuildDate=2024-04-25T13:27:26Z VendorInfo=gohugoio"))
            .with_tool("go", "go version", MockResponse::stdout("go version go1.22.2 linux/amd64"))
            .with_tool("python3", "python3 --version", MockResponse::stdout("Python 3.11.6"))
            .with_tool("git", "git version", MockResponse::stdout("git version 2.43.0"))
            .respond("git rev-parse --git-dir", MockResponse::stdout(".git"))
            .respond("git config user.name", MockResponse::stdout("Site Author"))
            .respond("git config user.email", MockResponse::stdout("author@example.com"))
            .respond("go mod verify", MockResponse::stdout("all modules verified"))
            .with_tool("make", "make --version", MockResponse::stdout("GNU Make 4.3"))
    }

    /// Put `tool` on PATH and answer `command_line` with `response`
    pub fn with_tool(mut self, tool: &str, command_line: &str, response: MockResponse) -> Self {
        self.installed.insert(tool.to_string());
        self.responses.insert(command_line.to_string(), response);
        self
    }

    /// Answer `command_line` with `response`, replacing any earlier answer
    pub fn respond(mut self, command_line: &str, response: MockResponse) -> Self {
        self.responses.insert(command_line.to_string(), response);
        self
    }

    /// Take `tool` off PATH
    pub fn without_tool(mut self, tool: &str) -> Self {
        self.installed.remove(tool);
        self
    }

    /// Command lines run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn ran(&self, command_line: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command_line)
    }
}

impl CommandRunner for MockRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .contains(program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        _cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<CommandOutput, ProbeError> {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(command_line.clone());

        if !self.installed.contains(program) {
            return Err(ProbeError::NotFound {
                program: program.to_string(),
            });
        }

        match self.responses.get(&command_line) {
            Some(MockResponse::Output(output)) => Ok(output.clone()),
            Some(MockResponse::Timeout) => Err(ProbeError::Timeout {
                program: program.to_string(),
                timeout,
            }),
            Some(MockResponse::SpawnFailure) => Err(ProbeError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            }),
            None => Ok(CommandOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: String::new(),
            }),
        }
    }
}
