use std::{
  fs,
  io::{self, Read},
  path::Path,
  process::{Child, Command, ExitStatus, Stdio},
  sync::mpsc::{self, Receiver},
  thread,
  time::{Duration, Instant},
};

use thiserror::Error;

use crate::{stage, ToastError};

pub const DEFAULT_PROGRAM: &str = "PowerShell";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("failed to start {program}: {source}")]
  Spawn { program: String, source: io::Error },

  #[error("failed to wait for {program}: {source}")]
  Wait { program: String, source: io::Error },

  #[error("{program} exited with {status}: {stderr}")]
  Failed {
    program: String,
    status: ExitStatus,
    stderr: String,
  },

  #[error("{program} did not exit within {timeout:?}")]
  TimedOut { program: String, timeout: Duration },
}

impl DispatchError {
  /// Exit code of the host, when it ran to completion
  pub fn code(&self) -> Option<i32> {
    match self {
      DispatchError::Failed { status, .. } => status.code(),
      _ => None,
    }
  }
}

/// The scripting host that runs staged scripts
///
/// By default `PowerShell -NoProfile -NonInteractive -ExecutionPolicy Bypass -File <script>`
/// with a hidden window, given 30 seconds to finish.
#[derive(Debug, Clone)]
pub struct ScriptHost {
  program: String,
  args: Vec<String>,
  timeout: Option<Duration>,
  log_scripts: bool,
}

impl Default for ScriptHost {
  fn default() -> Self {
    Self {
      program: DEFAULT_PROGRAM.to_string(),
      args: [
        "-NoProfile",
        "-NonInteractive",
        "-ExecutionPolicy",
        "Bypass",
        "-File",
      ]
      .map(String::from)
      .to_vec(),
      timeout: Some(DEFAULT_TIMEOUT),
      log_scripts: false,
    }
  }
}

impl ScriptHost {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_program<T: Into<String>>(mut self, program: T) -> Self {
    self.program = program.into();
    self
  }

  /// Arguments placed before the script path
  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args = args.into_iter().map(Into::into).collect();
    self
  }

  /// `None` waits for the host forever
  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  /// Logs every script at debug level before it runs.
  /// Scripts carry the toast text, so this is off by default.
  pub fn with_script_logging(mut self, enabled: bool) -> Self {
    self.log_scripts = enabled;
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout
  }

  /// Stages `script`, dispatches it and removes the staged file
  pub fn run(&self, script: &str) -> Result<(), ToastError> {
    if self.log_scripts {
      tracing::debug!(target: "toast::host", script, "Rendered script");
    }

    let path = stage(script)?;
    let result = self.dispatch(&path);

    if let Err(e) = fs::remove_file(&path) {
      tracing::warn!(target: "toast::host", path = %path.display(), error = %e, "Failed to remove staged script");
    }

    Ok(result?)
  }

  /// Runs the host against a staged script and waits for it to exit
  pub fn dispatch(&self, path: &Path) -> Result<(), DispatchError> {
    let mut command = Command::new(&self.program);
    command
      .args(&self.args)
      .arg(path)
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::piped());

    #[cfg(windows)]
    {
      use std::os::windows::process::CommandExt;
      use windows::Win32::System::Threading::CREATE_NO_WINDOW;

      command.creation_flags(CREATE_NO_WINDOW.0);
    }

    tracing::debug!(target: "toast::host", program = %self.program, path = %path.display(), "Dispatching script");

    let started = Instant::now();
    let mut child = command.spawn().map_err(|source| DispatchError::Spawn {
      program: self.program.clone(),
      source,
    })?;
    let stderr = collect_stderr(&mut child);

    let status = match self.timeout {
      Some(timeout) => self.wait_bounded(&mut child, timeout)?,
      None => child.wait().map_err(|source| DispatchError::Wait {
        program: self.program.clone(),
        source,
      })?,
    };

    let stderr = stderr
      .map(|output| self.receive_stderr(&output, started))
      .unwrap_or_default();

    if !status.success() {
      tracing::warn!(target: "toast::host", program = %self.program, %status, stderr = %stderr.trim(), "Script failed");
      return Err(DispatchError::Failed {
        program: self.program.clone(),
        status,
        stderr: stderr.trim().to_string(),
      });
    }

    tracing::debug!(target: "toast::host", elapsed = ?started.elapsed(), "Script finished");
    Ok(())
  }

  /// Waits for the drained stderr within what is left of the timeout.
  ///
  /// Processes started by the script can keep the pipe open after the host
  /// exits. Past the deadline their output is dropped and the drain thread
  /// is left to finish on its own.
  fn receive_stderr(&self, output: &Receiver<String>, started: Instant) -> String {
    let received = match self.timeout {
      Some(timeout) => output
        .recv_timeout(timeout.saturating_sub(started.elapsed()))
        .map_err(|e| e.to_string()),
      None => output.recv().map_err(|e| e.to_string()),
    };

    received.unwrap_or_else(|error| {
      tracing::debug!(target: "toast::host", program = %self.program, %error, "Stderr not collected");
      String::new()
    })
  }

  fn wait_bounded(&self, child: &mut Child, timeout: Duration) -> Result<ExitStatus, DispatchError> {
    let started = Instant::now();

    loop {
      match child.try_wait() {
        Ok(Some(status)) => return Ok(status),
        Ok(None) => {}
        Err(source) => {
          let _ = child.kill();
          let _ = child.wait();
          return Err(DispatchError::Wait {
            program: self.program.clone(),
            source,
          });
        }
      }

      if started.elapsed() >= timeout {
        tracing::warn!(target: "toast::host", program = %self.program, ?timeout, "Killing script host");
        let _ = child.kill();
        let _ = child.wait();
        return Err(DispatchError::TimedOut {
          program: self.program.clone(),
          timeout,
        });
      }

      thread::sleep(POLL_INTERVAL);
    }
  }
}

/// Drains stderr on its own thread so a chatty host cannot fill the pipe and stall
fn collect_stderr(child: &mut Child) -> Option<Receiver<String>> {
  let mut pipe = child.stderr.take()?;
  let (tx, rx) = mpsc::channel();

  thread::spawn(move || {
    let mut buf = vec![];
    let _ = pipe.read_to_end(&mut buf);
    let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
  });

  Some(rx)
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;

  fn sh(command: &str) -> ScriptHost {
    ScriptHost::new().with_program("sh").with_args(["-c", command])
  }

  fn staged(dir: &Path) -> std::path::PathBuf {
    crate::stage_in(dir, "Write-Output 'hi'").unwrap()
  }

  #[test]
  fn test_default_host() {
    let host = ScriptHost::default();
    assert_eq!(host.program(), "PowerShell");
    assert_eq!(
      host.args(),
      ["-NoProfile", "-NonInteractive", "-ExecutionPolicy", "Bypass", "-File"]
    );
    assert_eq!(host.timeout(), Some(Duration::from_secs(30)));
  }

  #[test]
  fn test_zero_exit_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());

    sh("test -f \"$0\"").dispatch(&path).unwrap();
  }

  #[test]
  fn test_script_path_is_last_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());
    let copy = dir.path().join("copy.ps1");

    sh(&format!("cp \"$0\" '{}'", copy.display()))
      .dispatch(&path)
      .unwrap();

    assert_eq!(fs::read(&copy).unwrap(), fs::read(&path).unwrap());
  }

  #[test]
  fn test_nonzero_exit_is_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());

    let err = sh("echo broken >&2; exit 3").dispatch(&path).unwrap_err();

    assert_eq!(err.code(), Some(3));
    assert!(matches!(err, DispatchError::Failed { ref stderr, .. } if stderr == "broken"));
  }

  #[test]
  fn test_missing_program_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());

    let err = ScriptHost::new()
      .with_program("/nonexistent/toast-host")
      .dispatch(&path)
      .unwrap_err();

    assert!(matches!(err, DispatchError::Spawn { .. }));
  }

  #[test]
  fn test_hung_host_is_killed() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());

    let started = Instant::now();
    let err = sh("exec sleep 10")
      .with_timeout(Some(Duration::from_millis(200)))
      .dispatch(&path)
      .unwrap_err();

    assert!(matches!(err, DispatchError::TimedOut { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
  }

  #[test]
  fn test_inherited_stderr_does_not_outlive_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let path = staged(dir.path());

    let started = Instant::now();
    sh("sleep 4 & exit 0")
      .with_timeout(Some(Duration::from_millis(300)))
      .dispatch(&path)
      .unwrap();

    assert!(started.elapsed() < Duration::from_secs(2));
  }

  #[test]
  fn test_run_removes_staged_script() {
    let dir = tempfile::tempdir().unwrap();
    let seen = dir.path().join("seen");

    sh(&format!("echo \"$0\" > '{}'", seen.display()))
      .run("Write-Output 'hi'")
      .unwrap();

    let staged = fs::read_to_string(&seen).unwrap();
    let staged = Path::new(staged.trim());
    assert_eq!(staged.extension().and_then(|x| x.to_str()), Some("ps1"));
    assert!(!staged.exists());
  }

  #[test]
  fn test_run_wraps_dispatch_error() {
    let err = sh("exit 1").run("x").unwrap_err();
    assert!(matches!(err, ToastError::Dispatch(DispatchError::Failed { .. })));
  }
}
