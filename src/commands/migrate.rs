//! The `bower-away` migration command.

use std::fmt::Write as _;
use std::path::Path;

use console::style;

use super::Status;
use crate::checklist::{self, Outcome, Request, Step};
use crate::context::ServiceContext;
use crate::manifest::diff::format_diff;

const CALL_AGAIN: &str = "Please call bower-away once more when you're done with this!";

/// Execute one checklist pass and print its result.
///
/// Step guidance goes to stderr; a `--diff` preview goes to stdout.
///
/// # Errors
///
/// Returns an error string if a project file is malformed or `package.json`
/// cannot be written.
pub fn run(ctx: &ServiceContext, cwd: &Path, request: Request) -> Result<Status, String> {
    let progress = checklist::next_step(ctx, cwd, request).map_err(|e| e.to_string())?;
    match progress.outcome {
        Outcome::Pending(step) => {
            eprint!("{}", render_step(&progress.completed, &step, false));
            Ok(Status::Pending)
        }
        Outcome::Preview(changes) => {
            println!("{}", colorize_diff(&format_diff(&changes)));
            Ok(Status::Done)
        }
        Outcome::Done(step) => {
            eprint!("{}", render_step(&progress.completed, &step, true));
            Ok(Status::Done)
        }
    }
}

/// Render a step: the steps already completed, the heading, the
/// instructions, and unless `last`, a reminder to run the tool again.
#[must_use]
pub fn render_step(completed: &[&str], step: &Step, last: bool) -> String {
    let mut out = String::new();

    if !completed.is_empty() {
        let done: Vec<String> =
            completed.iter().enumerate().map(|(i, title)| format!("{}. {title}", i + 1)).collect();
        let _ = writeln!(out, "\n{}", style(done.join("\n")).green().for_stderr());
    }

    let _ = writeln!(out, "\n{}", style(format!("# {}", step.title)).bold().for_stderr());
    let _ = writeln!(out, "\n{}", step.lines.join("\n"));

    if !last {
        let _ = writeln!(out, "\n{}", style(CALL_AGAIN).red().for_stderr());
    }
    out.push('\n');
    out
}

fn colorize_diff(text: &str) -> String {
    text.lines()
        .map(|line| match line.chars().next() {
            Some('+') => style(line).green().to_string(),
            Some('-') => style(line).red().to_string(),
            Some('~') => style(line).yellow().to_string(),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::{FixedExecutables, MemoryFileSystem};
    use crate::checklist::steps;

    fn step(title: &'static str, lines: &[&str]) -> Step {
        Step { title, lines: lines.iter().map(|l| (*l).to_string()).collect() }
    }

    #[test]
    fn render_lists_completed_steps_in_order() {
        let out = render_step(
            &[steps::BROWSE_TO_PROJECT, steps::INSTALL_YARN],
            &step(steps::INSTALL_BOWER, &["$ npm install -g bower"]),
            false,
        );
        assert!(out.contains("1. Browse to project directory"));
        assert!(out.contains("2. Install Yarn"));
        assert!(out.contains("# Install Bower"));
        assert!(out.contains("$ npm install -g bower"));
        assert!(out.contains(CALL_AGAIN));
    }

    #[test]
    fn render_last_step_has_no_reminder() {
        let out = render_step(&[], &step(steps::DONE, &["All done"]), true);
        assert!(out.contains("# Done"));
        assert!(!out.contains(CALL_AGAIN));
        assert!(!out.contains("1."));
    }

    #[test]
    fn pending_step_maps_to_pending_status() {
        let ctx = ServiceContext::new(
            Box::new(Arc::new(MemoryFileSystem::new())),
            Box::new(FixedExecutables::default()),
        );
        let status = run(&ctx, Path::new("/p"), Request::Inspect).unwrap();
        assert_eq!(status, Status::Pending);
    }

    #[test]
    fn malformed_input_is_an_error() {
        let ctx = ServiceContext::new(
            Box::new(Arc::new(
                MemoryFileSystem::new()
                    .with_file("/p/bower.json", "{}")
                    .with_file("/p/.bowerrc", "not json"),
            )),
            Box::new(FixedExecutables::new(["yarn", "bower"])),
        );
        let err = run(&ctx, Path::new("/p"), Request::Inspect).unwrap_err();
        assert!(err.contains("/p/.bowerrc"));
    }

    #[test]
    fn colorize_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(colorize_diff("+ a: 1\n- b: 2\nplain"), "+ a: 1\n- b: 2\nplain");
    }
}
