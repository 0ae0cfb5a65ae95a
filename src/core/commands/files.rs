use std::fs;

use super::{Command, CommandError, Context, Invocation};
use crate::core::scrollback::Line;

/// Creates a directory and any missing parents.
#[derive(Clone, Debug, Default)]
pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let name = inv.params.text("Create Directory", "Enter directory name:")?;
        let path = inv.session.resolve(&name).context("creating directory")?;
        fs::create_dir_all(&path).context("creating directory")?;

        inv.out.append(Line::echo(format!("mkdir {}", name)));
        inv.out
            .append(Line::output(format!("Directory '{}' created successfully.", name)));
        Ok(())
    }
}

/// Removes an empty directory.
#[derive(Clone, Debug, Default)]
pub struct RmdirCommand;

impl Command for RmdirCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let name = inv.params.text("Remove Directory", "Enter directory name:")?;
        let path = inv.session.resolve(&name).context("removing directory")?;
        fs::remove_dir(&path).context("removing directory")?;

        inv.out.append(Line::echo(format!("rmdir {}", name)));
        inv.out
            .append(Line::output(format!("Directory '{}' removed successfully.", name)));
        Ok(())
    }
}

/// Creates an empty file, truncating an existing one.
#[derive(Clone, Debug, Default)]
pub struct TouchCommand;

impl Command for TouchCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let name = inv.params.text("Create File", "Enter file name:")?;
        let path = inv.session.resolve(&name).context("creating file")?;
        fs::File::create(&path).context("creating file")?;

        inv.out.append(Line::echo(format!("touch {}", name)));
        inv.out
            .append(Line::output(format!("File '{}' created successfully.", name)));
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct RmCommand;

impl Command for RmCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let name = inv.params.text("Remove File", "Enter file name:")?;
        let path = inv.session.resolve(&name).context("removing file")?;
        fs::remove_file(&path).context("removing file")?;

        inv.out.append(Line::echo(format!("rm {}", name)));
        inv.out
            .append(Line::output(format!("File '{}' removed successfully.", name)));
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MvCommand;

impl Command for MvCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let source = inv.params.word("Move File", "Enter source file path:")?;
        let destination = inv.params.word("Move File", "Enter destination file path:")?;
        inv.params.finish()?;

        let from = inv.session.resolve(&source).context("moving file")?;
        let to = inv.session.resolve(&destination).context("moving file")?;
        fs::rename(&from, &to).context("moving file")?;

        inv.out
            .append(Line::echo(format!("mv {} {}", source, destination)));
        inv.out.append(Line::output("File moved successfully."));
        Ok(())
    }
}

/// Byte-for-byte copy; the source comes from the file picker.
#[derive(Clone, Debug, Default)]
pub struct CpCommand;

impl Command for CpCommand {
    fn execute(&self, inv: &mut Invocation<'_>) -> Result<(), CommandError> {
        let source = inv.params.file("Select Source File")?;
        let destination = inv.params.word("Copy File", "Enter destination path:")?;
        inv.params.finish()?;

        let from = inv.session.resolve(&source).context("copying file")?;
        let to = inv.session.resolve(&destination).context("copying file")?;
        let bytes = fs::read(&from).context("copying file")?;
        fs::write(&to, bytes).context("copying file")?;

        inv.out
            .append(Line::echo(format!("cp {} {}", source, destination)));
        inv.out.append(Line::output("File copied successfully."));
        Ok(())
    }
}
