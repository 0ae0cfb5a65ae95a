use super::{Command, CommandError, Context, Invocation};
use crate::core::scrollback::Line;

#[derive(Clone, Debug, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let target = inv
            .params
            .text("Change Directory", "Enter target directory path:")?;
        let dir = inv
            .session
            .change_dir(&target)
            .context("changing directory")?
            .display()
            .to_string();

        inv.out.append(Line::echo(format!("cd {}", target)));
        inv.out.append(Line::output(format!("Changed directory to: {}", dir)));
        inv.out.append(Line::directory(&dir));
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        inv.out.append(Line::echo("pwd"));
        inv.out
            .append(Line::output(inv.session.working_dir().display().to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;
    use crate::core::scrollback::LineKind;
    use std::fs;

    #[test]
    fn test_cd_then_pwd_reports_canonical_path() {
        let mut h = Harness::new();
        fs::create_dir_all(h.dir.path().join("work/sub")).unwrap();
        let expected = h.root().join("work");

        h.run(&CdCommand, "work/sub/..").unwrap();
        assert_eq!(
            h.texts(),
            vec![
                "$ cd work/sub/..".to_string(),
                format!("Changed directory to: {}", expected.display()),
                format!("[Directory]: {}", expected.display()),
            ]
        );
        assert_eq!(h.scrollback.lines()[2].kind, LineKind::Directory);

        h.clear();
        h.run(&PwdCommand, "").unwrap();
        assert_eq!(h.texts(), vec!["$ pwd".to_string(), expected.display().to_string()]);
    }

    #[test]
    fn test_failed_cd_leaves_pwd_unchanged() {
        let mut h = Harness::new();
        h.run(&PwdCommand, "").unwrap();
        let before = h.texts()[1].to_string();

        let err = h.run(&CdCommand, "does-not-exist").unwrap_err();
        assert!(err.to_string().starts_with("Error changing directory:"));

        h.clear();
        h.run(&PwdCommand, "").unwrap();
        assert_eq!(h.texts()[1], before);
    }

    #[test]
    fn test_cd_prompts_for_target() {
        let mut h = Harness::new();
        fs::create_dir(h.dir.path().join("prompted")).unwrap();
        h.run_with(&CdCommand, "", &["prompted"]).unwrap();
        assert_eq!(h.session.working_dir(), h.dir.path().canonicalize().unwrap().join("prompted"));
    }

    #[test]
    fn test_cd_cancelled_when_prompt_empty() {
        let mut h = Harness::new();
        let before = h.root();
        assert!(h.run_with(&CdCommand, "", &[""]).unwrap_err().is_cancelled());
        assert_eq!(h.root(), before);
        assert!(h.texts().is_empty());
    }

    #[test]
    fn test_cd_into_name_with_spaces() {
        let mut h = Harness::new();
        fs::create_dir(h.dir.path().join("two words")).unwrap();
        h.run(&CdCommand, "two words").unwrap();
        assert!(h.session.working_dir().ends_with("two words"));
    }
}
