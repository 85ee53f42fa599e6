//! Interactive document session on top of `ConversationController`.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use docgen_application::{Collaborators, ConversationController};
use docgen_core::{DocgenConfig, DocgenError, NodePath};
use docgen_infrastructure::{
    DocgenPaths, JsonDocumentExporter, JsonStructureResponder, LocalFileUploader,
};

use super::display;

const COMMANDS: [&str; 8] = [
    "/upload", "/set", "/add", "/delete", "/form", "/generate", "/reset", "/help",
];

/// A parsed line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Upload(Vec<PathBuf>),
    Set { path: NodePath, value: String },
    Add(NodePath),
    Delete { path: NodePath, index: usize },
    Form,
    Generate,
    Reset,
    Help,
    Message(String),
    Invalid(String),
}

impl ChatCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if !line.starts_with('/') {
            return ChatCommand::Message(line.to_string());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "/upload" if !rest.is_empty() => {
                ChatCommand::Upload(rest.split_whitespace().map(PathBuf::from).collect())
            }
            "/upload" => ChatCommand::Invalid("Usage: /upload <file>...".to_string()),
            "/set" => match rest.split_once(char::is_whitespace) {
                Some((path, value)) => ChatCommand::Set {
                    path: NodePath::parse(path),
                    value: value.trim().to_string(),
                },
                None if !rest.is_empty() => ChatCommand::Set {
                    path: NodePath::parse(rest),
                    value: String::new(),
                },
                None => ChatCommand::Invalid("Usage: /set <path> <value>".to_string()),
            },
            "/add" if !rest.is_empty() => ChatCommand::Add(NodePath::parse(rest)),
            "/add" => ChatCommand::Invalid("Usage: /add <path>".to_string()),
            "/delete" => match rest.rsplit_once(char::is_whitespace) {
                Some((path, index)) => match index.parse() {
                    Ok(index) => ChatCommand::Delete {
                        path: NodePath::parse(path.trim()),
                        index,
                    },
                    Err(_) => ChatCommand::Invalid(format!("Not an index: {}", index)),
                },
                None => ChatCommand::Invalid("Usage: /delete <path> <index>".to_string()),
            },
            "/form" => ChatCommand::Form,
            "/generate" => ChatCommand::Generate,
            "/reset" => ChatCommand::Reset,
            "/help" => ChatCommand::Help,
            other => ChatCommand::Invalid(format!("Unknown command: {}", other)),
        }
    }
}

/// rustyline helper providing command completion, highlighting and hints.
#[derive(Clone)]
struct ChatHelper;

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ChatHelper {}

fn print_help() {
    let lines = [
        "/upload <file>...       attach files (a .json file provides the structure)",
        "/set <path> <value>     fill in a field, e.g. /set sections.0.heading Intro",
        "/add <path>             append an item to an array",
        "/delete <path> <index>  remove an array item",
        "/form                   show the current form",
        "/generate               write the finished document",
        "/reset                  start over",
        "quit                    leave the session",
    ];
    for line in lines {
        println!("{}", line.bright_black());
    }
}

/// Prints transcript messages added since `shown` and returns the new count.
async fn print_new_messages(controller: &ConversationController, shown: usize) -> usize {
    let transcript = controller.transcript().await;
    for message in transcript.iter().skip(shown) {
        display::print_message(message);
    }
    transcript.len()
}

fn report(result: docgen_core::Result<()>) {
    match result {
        Ok(()) => {}
        Err(DocgenError::NoKnownShape { path }) => println!(
            "{}",
            format!("Cannot add to '{}': no item shape is known yet", path).yellow()
        ),
        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
}

fn resolve_output_dir(config: &DocgenConfig, output_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = output_dir.or_else(|| config.output_dir.clone()) {
        return Ok(dir);
    }
    Ok(DocgenPaths::documents_dir()?)
}

pub async fn run(config: DocgenConfig, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = resolve_output_dir(&config, output_dir)?;
    tracing::info!(output_dir = %output_dir.display(), "Starting chat session");

    let controller = ConversationController::new(
        &config,
        Collaborators {
            upload: Arc::new(LocalFileUploader::new()),
            message: Arc::new(JsonStructureResponder::new()),
            generation: Arc::new(JsonDocumentExporter::new(output_dir)),
        },
    );

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper));

    println!("{}", "=== DocGen ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    let mut shown = print_new_messages(&controller, 0).await;

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match ChatCommand::parse(trimmed) {
                    ChatCommand::Upload(paths) => report(controller.upload_files(paths).await),
                    ChatCommand::Set { path, value } => {
                        controller.edit_input(&path, value).await;
                    }
                    ChatCommand::Add(path) => {
                        report(controller.add_item(&path).await);
                        display::print_form(&controller.render().await);
                    }
                    ChatCommand::Delete { path, index } => {
                        report(controller.delete_item(&path, index).await);
                        display::print_form(&controller.render().await);
                    }
                    ChatCommand::Form => display::print_form(&controller.render().await),
                    ChatCommand::Generate => {
                        report(controller.request_document_generation().await)
                    }
                    ChatCommand::Reset => {
                        controller.reset().await;
                        shown = 0;
                    }
                    ChatCommand::Help => print_help(),
                    ChatCommand::Message(text) => {
                        let had_structure = controller.structure().await.is_some();
                        report(controller.submit_user_message(&text).await);
                        shown = print_new_messages(&controller, shown).await;
                        if !had_structure && controller.structure().await.is_some() {
                            display::print_form(&controller.render().await);
                        }
                    }
                    ChatCommand::Invalid(reason) => println!("{}", reason.yellow()),
                }

                shown = print_new_messages(&controller, shown).await;
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
