use std::collections::BTreeMap;
use std::fmt;
use std::io;

mod cd;
mod cond;
mod find;
mod files;
mod grep;
mod help;
mod history;
mod list;
mod text;
mod view;

pub use cd::{CdCommand, PwdCommand};
pub use cond::IfCommand;
pub use find::FindCommand;
pub use files::{CpCommand, MkdirCommand, MvCommand, RmCommand, RmdirCommand, TouchCommand};
pub use grep::GrepCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use list::ListCommand;
pub use text::{concatenate, ConcatCommand, EchoCommand};
pub use view::{CatCommand, ReadCommand};

use super::config::Settings;
use super::prompt::Params;
use super::scrollback::Transcript;
use super::session::Session;
use crate::expr::ExprError;
use crate::process::{ProcessError, ProcessExecutor};

/// Built-in actions in display order, with their one-line summaries.
pub const ACTIONS: &[(&str, &str)] = &[
    ("ls", "List Files"),
    ("cd", "Change Directory"),
    ("mkdir", "Make Directory"),
    ("rmdir", "Remove Directory"),
    ("touch", "Create File"),
    ("rm", "Remove File"),
    ("mv", "Move File"),
    ("cp", "Copy File"),
    ("cat", "View File Content"),
    ("grep", "Search in Files"),
    ("pwd", "Print Path"),
    ("concat", "Concatenate Strings"),
    ("history", "History"),
    ("read", "Read File"),
    ("find", "Find File or Directory"),
    ("echo", "Echo Message"),
    ("if", "Conditional Statement"),
    ("help", "List Actions"),
];

#[derive(Debug)]
pub enum CommandError {
    /// The user left a prompt empty; nothing is reported.
    Cancelled,
    NotFound(String),
    InvalidArguments(String),
    Io {
        context: &'static str,
        source: io::Error,
    },
    Process {
        context: &'static str,
        source: ProcessError,
    },
    Expression(ExprError),
}

impl CommandError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CommandError::Cancelled)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Cancelled => write!(f, "cancelled"),
            CommandError::NotFound(name) => write!(f, "Unknown action: {} (try :help)", name),
            CommandError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            CommandError::Io { context, source } => write!(f, "Error {}: {}", context, source),
            CommandError::Process { context, source } => {
                write!(f, "Error {}: {}", context, source)
            }
            CommandError::Expression(e) => write!(f, "Error evaluating condition: {}", e),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ExprError> for CommandError {
    fn from(err: ExprError) -> Self {
        CommandError::Expression(err)
    }
}

/// Attaches the "Error <context>: ..." wording to a failed call.
pub(crate) trait Context<T> {
    fn context(self, context: &'static str) -> Result<T, CommandError>;
}

impl<T> Context<T> for io::Result<T> {
    fn context(self, context: &'static str) -> Result<T, CommandError> {
        self.map_err(|source| CommandError::Io { context, source })
    }
}

impl<T> Context<T> for Result<T, ProcessError> {
    fn context(self, context: &'static str) -> Result<T, CommandError> {
        self.map_err(|source| CommandError::Process { context, source })
    }
}

/// Everything one action run may touch.
pub struct Invocation<'a> {
    pub session: &'a mut Session,
    pub params: Params<'a>,
    pub out: &'a mut dyn Transcript,
    pub process: &'a ProcessExecutor,
}

pub trait Command {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    List(ListCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Mkdir(MkdirCommand),
    Rmdir(RmdirCommand),
    Touch(TouchCommand),
    Rm(RmCommand),
    Mv(MvCommand),
    Cp(CpCommand),
    Cat(CatCommand),
    Read(ReadCommand),
    Grep(GrepCommand),
    Find(FindCommand),
    Concat(ConcatCommand),
    Echo(EchoCommand),
    If(IfCommand),
    History(HistoryCommand),
    Help(HelpCommand),
}

impl Command for CommandType {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        match self {
            CommandType::List(cmd) => cmd.execute(inv),
            CommandType::Cd(cmd) => cmd.execute(inv),
            CommandType::Pwd(cmd) => cmd.execute(inv),
            CommandType::Mkdir(cmd) => cmd.execute(inv),
            CommandType::Rmdir(cmd) => cmd.execute(inv),
            CommandType::Touch(cmd) => cmd.execute(inv),
            CommandType::Rm(cmd) => cmd.execute(inv),
            CommandType::Mv(cmd) => cmd.execute(inv),
            CommandType::Cp(cmd) => cmd.execute(inv),
            CommandType::Cat(cmd) => cmd.execute(inv),
            CommandType::Read(cmd) => cmd.execute(inv),
            CommandType::Grep(cmd) => cmd.execute(inv),
            CommandType::Find(cmd) => cmd.execute(inv),
            CommandType::Concat(cmd) => cmd.execute(inv),
            CommandType::Echo(cmd) => cmd.execute(inv),
            CommandType::If(cmd) => cmd.execute(inv),
            CommandType::History(cmd) => cmd.execute(inv),
            CommandType::Help(cmd) => cmd.execute(inv),
        }
    }
}

/// Registry of built-in actions, keyed by action name.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
}

impl CommandExecutor {
    pub fn new(settings: &Settings) -> Self {
        let mut executor = Self {
            commands: BTreeMap::new(),
        };

        executor.register("ls", CommandType::List(ListCommand));
        executor.register("cd", CommandType::Cd(CdCommand));
        executor.register("pwd", CommandType::Pwd(PwdCommand));
        executor.register("mkdir", CommandType::Mkdir(MkdirCommand));
        executor.register("rmdir", CommandType::Rmdir(RmdirCommand));
        executor.register("touch", CommandType::Touch(TouchCommand));
        executor.register("rm", CommandType::Rm(RmCommand));
        executor.register("mv", CommandType::Mv(MvCommand));
        executor.register("cp", CommandType::Cp(CpCommand));
        executor.register("cat", CommandType::Cat(CatCommand));
        executor.register("read", CommandType::Read(ReadCommand));
        executor.register(
            "grep",
            CommandType::Grep(GrepCommand::new(settings.search_program.clone())),
        );
        executor.register("find", CommandType::Find(FindCommand));
        executor.register("concat", CommandType::Concat(ConcatCommand));
        executor.register("echo", CommandType::Echo(EchoCommand));
        executor.register("if", CommandType::If(IfCommand));
        executor.register("history", CommandType::History(HistoryCommand));
        executor.register("help", CommandType::Help(HelpCommand));

        executor
    }

    fn register(&mut self, name: &str, command: CommandType) {
        self.commands.insert(name.to_string(), command);
    }

    pub fn execute(&self, name: &str, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        match self.commands.get(name) {
            Some(cmd) => cmd.execute(inv),
            None => Err(CommandError::NotFound(name.to_string())),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::prompt::ScriptedPrompter;
    use crate::core::scrollback::Scrollback;
    use std::path::PathBuf;

    /// A session rooted in a scratch directory.
    pub struct Harness {
        pub dir: tempfile::TempDir,
        pub session: Session,
        pub scrollback: Scrollback,
        pub process: ProcessExecutor,
    }

    impl Harness {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let session = Session::new(dir.path().canonicalize().unwrap());
            Self {
                dir,
                session,
                scrollback: Scrollback::new(),
                process: ProcessExecutor::default(),
            }
        }

        pub fn root(&self) -> PathBuf {
            self.session.working_dir().to_path_buf()
        }

        pub fn run(&mut self, cmd: &dyn Command, rest: &str) -> Result<(), CommandError> {
            self.run_with(cmd, rest, &[])
        }

        pub fn run_with(
            &mut self,
            cmd: &dyn Command,
            rest: &str,
            answers: &[&str],
        ) -> Result<(), CommandError> {
            let mut prompter = ScriptedPrompter::new(answers);
            let mut inv = Invocation {
                session: &mut self.session,
                params: Params::new(rest, &mut prompter),
                out: &mut self.scrollback,
                process: &self.process,
            };
            cmd.execute(&mut inv)
        }

        pub fn texts(&self) -> Vec<&str> {
            self.scrollback.texts()
        }

        /// Forgets output produced so far.
        pub fn clear(&mut self) {
            self.scrollback = Scrollback::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_action_is_registered() {
        let executor = CommandExecutor::new(&Settings::default());
        for (name, _) in ACTIONS {
            assert!(executor.names().any(|n| n == *name), "{} not registered", name);
        }
        assert_eq!(executor.names().count(), ACTIONS.len());
    }

    #[test]
    fn test_unknown_action() {
        let executor = CommandExecutor::new(&Settings::default());
        let mut harness = testing::Harness::new();
        let mut prompter = crate::core::prompt::ScriptedPrompter::new(&[]);
        let mut inv = Invocation {
            session: &mut harness.session,
            params: Params::new("", &mut prompter),
            out: &mut harness.scrollback,
            process: &harness.process,
        };
        let result = executor.execute("frobnicate", &mut inv);
        assert!(matches!(result, Err(CommandError::NotFound(_))));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::Io {
            context: "removing file",
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "Error removing file: gone");
        assert_eq!(
            CommandError::NotFound("x".into()).to_string(),
            "Unknown action: x (try :help)"
        );
        assert!(CommandError::Cancelled.is_cancelled());
    }
}
