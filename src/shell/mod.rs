use std::path::PathBuf;
use std::time::Duration;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

mod prompter;
mod transcript;

pub use prompter::EditorPrompter;
pub use transcript::TerminalTranscript;

use crate::{
    core::{
        config::{Config, ConfigPaths},
        Dispatcher, Line, Session, Transcript,
    },
    error::ShellError,
    flags::Flags,
    input::ShellCompleter,
};

pub struct Shell {
    editor: Editor<ShellCompleter, FileHistory>,
    session: Session,
    dispatcher: Dispatcher,
    transcript: TerminalTranscript,
    history_file: Option<PathBuf>,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut paths = ConfigPaths::new()?;
        if let Some(rc) = flags.get_value("config") {
            paths = paths.with_rc_path(rc);
        }

        let mut config = Config::new(paths);
        config.load()?;

        if let Some(delay) = flags.get_value("delay") {
            let ms: u64 = delay
                .parse()
                .map_err(|_| ShellError::FlagError(format!("Invalid delay: {}", delay)))?;
            config.settings_mut().tree_delay = Duration::from_millis(ms);
        }

        let session = Session::from_current_dir()?;
        let dispatcher = Dispatcher::new(&config);
        let settings = config.settings();

        let mut completer = ShellCompleter::new(dispatcher.action_names(), session.working_dir());
        completer.update_aliases(dispatcher.alias_names());

        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_max_history_size(settings.history_size)?;
        editor.set_auto_add_history(false);
        editor.set_helper(Some(completer));

        let history_file = settings.history_file.clone();
        if let Some(path) = history_file.as_deref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not load recall history");
            }
        }

        ctrlc::set_handler(|| {
            tracing::debug!("interrupt received");
        })?;

        tracing::info!(dir = %session.working_dir().display(), rc = %config.rc_path().display(), "session started");

        Ok(Shell {
            editor,
            session,
            dispatcher,
            transcript: TerminalTranscript::new(settings.tree_delay),
            history_file,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        self.transcript
            .append(Line::directory(self.session.working_dir().display()));

        loop {
            let prompt = format!("{} > ", self.session.working_dir().display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            tracing::warn!(error = %e, "could not add recall entry");
                        }
                    }

                    if matches!(line.trim(), ":exit" | ":quit") {
                        break;
                    }

                    self.submit(&line);
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    tracing::warn!(error = %e, "readline failed");
                    continue;
                }
            }
        }

        self.save_history();
        tracing::info!(
            lines = self.transcript.scrollback().lines().len(),
            "session ended"
        );
        Ok(())
    }

    fn submit(&mut self, line: &str) {
        let Shell {
            editor,
            session,
            dispatcher,
            transcript,
            ..
        } = self;

        let mut prompter = EditorPrompter::new(editor);
        dispatcher.submit(session, line, &mut prompter, transcript);

        if let Some(helper) = self.editor.helper_mut() {
            helper.set_working_dir(self.session.working_dir());
        }
    }

    fn save_history(&mut self) {
        let Some(path) = self.history_file.as_deref() else {
            return;
        };
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save recall history");
        }
    }
}
