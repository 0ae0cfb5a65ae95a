use std::env;
use vish::flags::Flags;
use vish::shell::Shell;

fn main() -> Result<(), vish::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("vish {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = vish::logging::init(flags.is_set("debug")) {
        if !flags.is_set("quiet") {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    let mut shell = Shell::new(flags)?;
    shell.run()
}
