//! Interactive ticket session for `t3po session`.
//!
//! Reads one command per line and drives a [`TicketSession`]. Pipeline
//! errors are printed and the loop continues; only I/O failures end it
//! early.

use std::io::{BufRead, Write};

use crate::ticket::{format_description, ScopedTask, TicketSession};

const HELP: &str = "\
Commands:
  generate <title>          Generate and evaluate a scope for a task title
  create                    File the last generated task as a Jira ticket
  show                      Show the last generated task
  config                    Show the Jira settings
  set url|user|project <v>  Change a Jira setting
  help                      Show this help
  quit                      Leave the session";

/// Which Jira setting a `set` command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Server URL.
    Url,
    /// Username.
    User,
    /// Project key.
    Project,
}

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Run the pipeline for a title.
    Generate(String),
    /// Submit the held task.
    Create,
    /// Print the held task.
    Show,
    /// Print the Jira settings.
    Config,
    /// Change a Jira setting.
    Set(Setting, String),
    /// Print the command list.
    Help,
    /// Leave the loop.
    Quit,
    /// Blank line.
    Empty,
    /// Anything unrecognized, with a hint for the user.
    Unknown(String),
}

/// Parses one line of input. Command words are case-insensitive; arguments
/// keep their case.
#[must_use]
pub fn parse_command(input: &str) -> ConsoleCommand {
    let input = input.trim();
    if input.is_empty() {
        return ConsoleCommand::Empty;
    }
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_lowercase().as_str() {
        "generate" | "gen" | "g" => {
            if rest.is_empty() {
                ConsoleCommand::Unknown("usage: generate <title>".into())
            } else {
                ConsoleCommand::Generate(rest.to_string())
            }
        }
        "create" | "submit" => ConsoleCommand::Create,
        "show" => ConsoleCommand::Show,
        "config" => ConsoleCommand::Config,
        "set" => parse_set(rest),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        other => ConsoleCommand::Unknown(format!("unknown command {other:?}; type `help`")),
    }
}

fn parse_set(rest: &str) -> ConsoleCommand {
    let usage = || ConsoleCommand::Unknown("usage: set url|user|project <value>".into());
    let Some((key, value)) = rest.split_once(char::is_whitespace) else {
        return usage();
    };
    let value = value.trim();
    if value.is_empty() {
        return usage();
    }
    let setting = match key.to_lowercase().as_str() {
        "url" => Setting::Url,
        "user" | "username" => Setting::User,
        "project" | "key" => Setting::Project,
        _ => return usage(),
    };
    ConsoleCommand::Set(setting, value.to_string())
}

/// Renders a held task the way the console and `generate` print it.
#[must_use]
pub fn render_task(task: &ScopedTask) -> String {
    format!("Task Title: {}\nScope Quality: {}\n\n{}", task.title, task.quality, format_description(task))
}

/// Line-oriented front end over a [`TicketSession`].
pub struct ConsoleLoop<R: BufRead, W: Write> {
    session: TicketSession,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleLoop<R, W> {
    /// Creates a loop reading commands from `reader` and printing to `writer`.
    pub fn new(session: TicketSession, reader: R, writer: W) -> Self {
        Self { session, reader, writer }
    }

    /// Runs until `quit` or end of input and returns the session.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run(mut self) -> Result<TicketSession, String> {
        self.say("T3PO ticket session. Type `help` for commands.")?;
        loop {
            self.prompt()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match parse_command(&line) {
                ConsoleCommand::Quit => break,
                ConsoleCommand::Empty => {}
                ConsoleCommand::Help => self.say(HELP)?,
                ConsoleCommand::Unknown(hint) => self.say(&hint)?,
                ConsoleCommand::Config => {
                    let jira = self.session.jira();
                    let text = format!(
                        "Jira URL: {}\nJira Username: {}\nJira Project Key: {}",
                        jira.url, jira.user, jira.project_key
                    );
                    self.say(&text)?;
                }
                ConsoleCommand::Set(setting, value) => {
                    let jira = self.session.jira_mut();
                    let label = match setting {
                        Setting::Url => {
                            jira.url = value;
                            "Jira URL"
                        }
                        Setting::User => {
                            jira.user = value;
                            "Jira Username"
                        }
                        Setting::Project => {
                            jira.project_key = value;
                            "Jira Project Key"
                        }
                    };
                    self.say(&format!("{label} updated."))?;
                }
                ConsoleCommand::Show => {
                    let text = self
                        .session
                        .current()
                        .map_or_else(|| "Nothing generated yet.".to_string(), render_task);
                    self.say(&text)?;
                }
                ConsoleCommand::Generate(title) => {
                    let text = match self.session.generate(&title).await {
                        Ok(task) => {
                            format!("{}\nType `create` to file this ticket.", render_task(task))
                        }
                        Err(e) => e.to_string(),
                    };
                    self.say(&text)?;
                }
                ConsoleCommand::Create => {
                    let text = match self.session.submit().await {
                        Ok(message) => message,
                        Err(e) => e.to_string(),
                    };
                    self.say(&text)?;
                }
            }
        }
        Ok(self.session)
    }

    fn say(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.writer, "{text}").map_err(|e| format!("write error: {e}"))
    }

    fn prompt(&mut self) -> Result<(), String> {
        write!(self.writer, "> ").map_err(|e| format!("write error: {e}"))?;
        self.writer.flush().map_err(|e| format!("flush error: {e}"))
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|e| format!("read error: {e}"))?;
        Ok((read > 0).then_some(line))
    }
}
