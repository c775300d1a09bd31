use std::{
    io::Read,
    os::unix::process::CommandExt,
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
    time::Duration,
};

use itertools::Itertools;
use nix::unistd::{setpgid, Pid};
use wait_timeout::ChildExt;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn { program: String, source: std::io::Error },
    #[error("Failed while waiting for `{program}`: {source}")]
    Wait { program: String, source: std::io::Error },
    #[error("Failed to read the output of `{program}`: {source}")]
    Read { program: String, source: std::io::Error },
    #[error("`{program}` did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("Output of `{program}` is not valid utf-8")]
    InvalidOutput { program: String, source: std::string::FromUtf8Error },
}

/// Runs external programs. Everything that talks to the outside world goes through this,
/// so the pollers can be driven by canned outputs.
pub trait CommandRunner {
    /// Run a program to completion and return its trimmed stdout.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;

    /// Start a program in its own process group without waiting for it.
    fn spawn(&self, program: &str, args: &[&str]) -> Result<(), CommandError>;

    fn locate(&self, program: &str) -> Option<PathBuf> {
        crate::util::find_in_path(program)
    }

    fn is_installed(&self, program: &str) -> bool {
        self.locate(program).is_some()
    }

    /// Like [CommandRunner::run], but a failed call yields an empty string.
    fn run_or_empty(&self, program: &str, args: &[&str]) -> String {
        self.run(program, args).unwrap_or_else(|err| {
            log::debug!("{}", err);
            String::new()
        })
    }
}

pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        SystemCommandRunner { timeout }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        log::debug!("Running command: {} {}", program, args.iter().join(" "));
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn { program: program.to_string(), source })?;

        // Drained concurrently so a child writing more than the pipe buffer never blocks.
        let pipe = child.stdout.take();
        let reader = std::thread::spawn(move || -> std::io::Result<Vec<u8>> {
            let mut stdout = Vec::new();
            if let Some(mut pipe) = pipe {
                pipe.read_to_end(&mut stdout)?;
            }
            Ok(stdout)
        });

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                log::warn!("command {} timed out", program);
                kill_and_reap(&mut child);
                return Err(CommandError::TimedOut { program: program.to_string(), timeout: self.timeout });
            }
            Err(source) => {
                kill_and_reap(&mut child);
                return Err(CommandError::Wait { program: program.to_string(), source });
            }
        };
        if !status.success() {
            return Err(CommandError::Failed { program: program.to_string(), status });
        }

        let stdout = reader
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::new(std::io::ErrorKind::Other, "stdout reader panicked")))
            .map_err(|source| CommandError::Read { program: program.to_string(), source })?;
        let output = String::from_utf8(stdout).map_err(|source| CommandError::InvalidOutput { program: program.to_string(), source })?;
        Ok(output.trim().to_string())
    }

    fn spawn(&self, program: &str, args: &[&str]) -> Result<(), CommandError> {
        log::debug!("Spawning detached command: {} {}", program, args.iter().join(" "));
        let child = unsafe {
            Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .pre_exec(|| {
                    let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
                    Ok(())
                })
                .spawn()
        };
        child.map(|_| ()).map_err(|source| CommandError::Spawn { program: program.to_string(), source })
    }
}

/// Kill a child that is still running and collect its exit status so it does not linger as a zombie.
fn kill_and_reap(child: &mut std::process::Child) {
    let _ = child.kill();
    let _ = child.wait();
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_run_trims_output() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        assert_eq!(runner.run("sh", &["-c", "echo '  hello  '"]).unwrap(), "hello");
    }

    #[test]
    fn test_failed_command_is_empty() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        assert!(matches!(runner.run("sh", &["-c", "exit 3"]), Err(CommandError::Failed { .. })));
        assert_eq!(runner.run_or_empty("sh", &["-c", "echo partial; exit 1"]), "");
        assert_eq!(runner.run_or_empty("definitely-not-a-real-program-name", &[]), "");
    }

    #[test]
    fn test_timeout() {
        let runner = SystemCommandRunner::new(Duration::from_millis(100));
        assert!(matches!(runner.run("sleep", &["5"]), Err(CommandError::TimedOut { .. })));
    }

    #[test]
    fn test_kill_and_reap() {
        let mut child = Command::new("sleep").arg("5").spawn().unwrap();
        kill_and_reap(&mut child);
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn test_output_larger_than_pipe_buffer() {
        let runner = SystemCommandRunner::new(Duration::from_secs(5));
        let output = runner.run("sh", &["-c", "head -c 100000 /dev/zero | tr '\\0' a"]).unwrap();
        assert_eq!(output.len(), 100000);
        assert!(output.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_read_error_message() {
        let err = CommandError::Read { program: "playerctl".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, "broken") };
        assert_eq!(err.to_string(), "Failed to read the output of `playerctl`: broken");
    }
}
