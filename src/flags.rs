use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &str, long: &str, description: &str, takes_value: bool) -> Self {
        Flag {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            takes_value,
            value: None,
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "help".to_string(),
            Flag::new("-h", "--help", "Print this help message", false),
        );
        flags.insert(
            "version".to_string(),
            Flag::new("-v", "--version", "Show version information", false),
        );
        flags.insert(
            "config".to_string(),
            Flag::new("-c", "--config", "Use FILE instead of ~/.vishrc", true),
        );
        flags.insert(
            "quiet".to_string(),
            Flag::new("-q", "--quiet", "Suppress start-up warnings", false),
        );
        flags.insert(
            "debug".to_string(),
            Flag::new("-d", "--debug", "Write debug output to the log file", false),
        );
        flags.insert(
            "delay".to_string(),
            Flag::new("-D", "--delay", "Pause MS milliseconds per tree row", true),
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            let Some(flag) = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
            else {
                return Err(ShellError::FlagError(format!("Unknown flag: {}", arg)));
            };

            if flag.takes_value {
                match args.get(i + 1) {
                    Some(value) => {
                        flag.value = Some(value.clone());
                        i += 1;
                    }
                    None => {
                        return Err(ShellError::FlagError(format!(
                            "Flag {} requires a value",
                            arg
                        )));
                    }
                }
            } else {
                flag.value = Some("true".to_string());
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: vish [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_switches_and_values() {
        let mut flags = Flags::new();
        flags
            .parse(&args(&["-q", "--config", "/tmp/rc", "-D", "0"]))
            .unwrap();

        assert!(flags.is_set("quiet"));
        assert!(!flags.is_set("debug"));
        assert_eq!(flags.get_value("config").map(String::as_str), Some("/tmp/rc"));
        assert_eq!(flags.get_value("delay").map(String::as_str), Some("0"));
    }

    #[test]
    fn test_missing_value() {
        let mut flags = Flags::new();
        let err = flags.parse(&args(&["--delay"])).unwrap_err();
        assert_eq!(err.to_string(), "Flag error: Flag --delay requires a value");
    }

    #[test]
    fn test_unknown_flag() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["--colour"])),
            Err(ShellError::FlagError(_))
        ));
    }
}
