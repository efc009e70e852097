//! Integration tests for the command surface shared by the CLI and the shell

use super::test_utils::{sample_project, with_empty_config_home};
use std::path::PathBuf;
use verse::cli::{map_error, shell_step, Commands, RunContext, ShellStep};
use verse::command::Command;
use verse::ApiError;

fn context(root: PathBuf) -> RunContext {
    with_empty_config_home(|| RunContext::new(root, None))
        .unwrap()
        .with_color(false)
}

#[test]
fn test_init_then_status_output() {
    let project = sample_project();
    let ctx = context(project.path().to_path_buf());

    let init = ctx.execute(&Commands::Init).unwrap();
    let head = ctx.repository().head().get().unwrap();
    assert!(init.contains(&format!("Head: {}", head)));

    let status = ctx.execute(&Commands::Status { no_content: false }).unwrap();
    let mut lines = status.lines();
    assert_eq!(lines.next().unwrap(), format!("Head: {}", head));
    assert!(status.contains("file: readme.txt"));
    assert!(status.contains("src/"));
    assert!(status.contains("hello"));
}

#[test]
fn test_check_tree_marks_edit() {
    let project = sample_project();
    let ctx = context(project.path().to_path_buf());
    ctx.execute(&Commands::Init).unwrap();
    std::fs::write(project.path().join("readme.txt"), "bye").unwrap();

    let tree = ctx.execute(&Commands::Check { path: None }).unwrap();
    assert!(tree.contains("readme.txt [modified]"));
    assert!(!tree.contains("main.txt ["));
}

#[test]
fn test_every_stub_reports_not_implemented() {
    let project = sample_project();
    let ctx = context(project.path().to_path_buf());

    let stubs = [
        (Commands::Add, Command::Add),
        (Commands::Diff, Command::Diff),
        (Commands::Tag, Command::Tag),
        (Commands::Commit, Command::Commit),
        (Commands::Log, Command::Log),
    ];
    for (cli_command, command) in stubs {
        let err = ctx.execute(&cli_command).unwrap_err();
        assert!(matches!(err, ApiError::NotImplemented(c) if c == command));
        assert_eq!(map_error(&err), format!("`{}` is not implemented yet", command));
    }
}

#[test]
fn test_status_before_init_reports_error() {
    let project = sample_project();
    let ctx = context(project.path().to_path_buf());
    let err = ctx.execute(&Commands::Status { no_content: false }).unwrap_err();
    assert!(matches!(err, ApiError::StorageError(_)));
}

#[test]
fn test_shell_session() {
    let project = sample_project();
    let ctx = context(project.path().to_path_buf());

    let steps: Vec<ShellStep> = ["h", "init", "e", "bogus", "flush", "q"]
        .iter()
        .map(|line| shell_step(&ctx, line))
        .collect();

    assert!(matches!(&steps[0], ShellStep::Continue(out) if out.contains("valid commands:")));
    assert!(matches!(&steps[1], ShellStep::Continue(out) if out.contains("Head: ")));
    assert!(matches!(&steps[2], ShellStep::Continue(out) if out.contains("readme.txt")));
    assert!(matches!(&steps[3], ShellStep::Failed(out) if out.contains("command invalid")));
    assert!(matches!(&steps[4], ShellStep::Continue(_)));
    assert_eq!(steps[5], ShellStep::Quit);
    assert!(!project.path().join(".verse").exists());
}
