pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod history;
pub mod prompt;
pub mod scrollback;
pub mod session;

pub use dispatcher::Dispatcher;
pub use history::CommandHistory;
pub use prompt::{Params, Prompter};
pub use scrollback::{Line, LineKind, Scrollback, Transcript};
pub use session::Session;
