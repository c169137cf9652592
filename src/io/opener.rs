use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Error type for launching an external url
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("could not launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("refusing to open placeholder url {0:?}")]
    NoTarget(String),
}

/// Opens a url in a new, unrelated browsing context
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Hands the url to the platform opener (or a configured program) as a
/// detached child with no stdio, so nothing links it back to the dashboard.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    program: Option<String>,
}

impl SystemOpener {
    pub fn new(program: Option<String>) -> Self {
        SystemOpener { program }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(program) = &self.program {
            let mut cmd = Command::new(program);
            cmd.arg(url);
            return cmd;
        }
        platform_command(url)
    }
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    windows_command(url)
}

/// The url handler is invoked directly; no shell ever parses the url.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn windows_command(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        if url == crate::ops::normalize::PLACEHOLDER_URL {
            return Err(OpenError::NoTarget(url.to_string()));
        }
        spawn_detached(self.command(url))?;
        log::info!("opened {url}");
        Ok(())
    }
}

/// Launch `cmd` with null stdio and reap it on a background thread.
fn spawn_detached(mut cmd: Command) -> Result<JoinHandle<Option<ExitStatus>>, OpenError> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| OpenError::Spawn {
            program: program.clone(),
            source,
        })?;
    Ok(thread::spawn(move || reap(child, &program)))
}

fn reap(mut child: Child, program: &str) -> Option<ExitStatus> {
    match child.wait() {
        Ok(status) => {
            if !status.success() {
                log::warn!("{program} exited with {status}");
            }
            Some(status)
        }
        Err(e) => {
            log::warn!("could not wait for {program}: {e}");
            None
        }
    }
}
