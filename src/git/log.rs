use crate::config::Config;
use crate::error::{PunchError, Result};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// One RFC 2822 author date per commit.
pub const LOG_FORMAT: &str = "--format=%aD";

/// A `git log` invocation over non-merge commits.
pub struct LogQuery<'a> {
    repo: &'a Path,
    author: Option<&'a str>,
    extra_args: &'a [String],
}

impl<'a> LogQuery<'a> {
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            repo: &config.path,
            author: config.author.as_deref(),
            extra_args: &config.git_args,
        }
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--no-merges".to_string(),
            LOG_FORMAT.to_string(),
        ];
        if let Some(author) = self.author {
            args.push(format!("--author={author}"));
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Runs git and returns its stdout. Blocks until git exits.
    pub fn run(&self) -> Result<String> {
        if !self.repo.is_dir() {
            return Err(PunchError::InvalidOption(format!(
                "repository path '{}' is not a directory",
                self.repo.display()
            )));
        }

        let args = self.args();
        debug!(repo = %self.repo.display(), ?args, "running git");

        let pb = if Term::stderr().is_term() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Reading git log...");
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let output = Command::new("git")
            .args(&args)
            .current_dir(self.repo)
            .stdin(Stdio::null())
            .output();
        pb.finish_and_clear();

        let output = output.map_err(PunchError::GitUnavailable)?;
        if !output.status.success() {
            return Err(PunchError::GitFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        info!(lines = text.lines().count(), "git log finished");
        Ok(text)
    }
}
