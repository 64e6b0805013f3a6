use std::{
    io::{self, Read},
    path::Path,
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

/// Captured output from a build-tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Seam for external process invocation, so dependency listing can be faked
/// in tests without launching a real build tool.
pub trait CommandRunner: Send + Sync + std::fmt::Debug {
    fn run(&self, cwd: &Path, program: &Path, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runs the command synchronously on the caller's thread.
#[derive(Debug, Clone, Default)]
pub struct DefaultCommandRunner {
    /// Optional wall-clock timeout, enforced by polling the child and killing
    /// it on expiry. Child processes spawned by the build tool itself may
    /// outlive the kill.
    pub timeout: Option<Duration>,
}

impl CommandRunner for DefaultCommandRunner {
    fn run(&self, cwd: &Path, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let command = format_command(program, args);
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| io::Error::new(err.kind(), format!("failed to spawn `{command}`: {err}")))?;

        let stdout = drain_on_thread(child.stdout.take());
        let stderr = drain_on_thread(child.stderr.take());

        let status = match self.timeout {
            None => child.wait(),
            Some(timeout) => {
                let start = Instant::now();
                loop {
                    match child.try_wait()? {
                        Some(status) => break Ok(status),
                        None if start.elapsed() >= timeout => {
                            let _ = child.kill();
                            let _ = child.wait();
                            break Err(io::Error::new(
                                io::ErrorKind::TimedOut,
                                format!("command `{command}` timed out after {timeout:?}"),
                            ));
                        }
                        None => thread::sleep(Duration::from_millis(20)),
                    }
                }
            }
        }?;

        Ok(CommandOutput {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        })
    }
}

fn drain_on_thread(pipe: Option<impl Read + Send + 'static>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

pub(crate) fn format_command(program: &Path, args: &[String]) -> String {
    let mut out = program.to_string_lossy().into_owned();
    for arg in args {
        out.push(' ');
        out.push_str(arg);
    }
    out
}
