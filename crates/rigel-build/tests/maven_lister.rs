use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

use rigel_build::{
    Artifact, BuildError, CommandOutput, CommandRunner, MavenDependencyLister, MavenListerConfig,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    cwd: PathBuf,
    program: PathBuf,
    args: Vec<String>,
}

#[derive(Debug)]
struct FakeCommandRunner {
    invocations: Mutex<Vec<Invocation>>,
    output: CommandOutput,
}

impl FakeCommandRunner {
    fn new(output: CommandOutput) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            output,
        }
    }

    fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, cwd: &Path, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        self.invocations.lock().unwrap().push(Invocation {
            cwd: cwd.to_path_buf(),
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        Ok(self.output.clone())
    }
}

#[derive(Debug)]
struct TimedOutRunner;

impl CommandRunner for TimedOutRunner {
    fn run(&self, _cwd: &Path, _program: &Path, _args: &[String]) -> io::Result<CommandOutput> {
        Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
    }
}

fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

fn output(code: i32, stdout: &str) -> CommandOutput {
    CommandOutput {
        status: exit_status(code),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

const LISTING: &str = "\
[INFO] Scanning for projects...
[INFO] The following files have been resolved:
[INFO]    junit:junit:jar:4.12:test
[INFO]    org.hamcrest:hamcrest-core:jar:1.3:test
[INFO] BUILD SUCCESS
";

fn workspace_with_pom() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("pom.xml"),
        "<project><modelVersion>4.0.0</modelVersion></project>",
    )
    .unwrap();
    tmp
}

#[test]
fn lists_dependencies_from_command_output() {
    let tmp = workspace_with_pom();
    let runner = Arc::new(FakeCommandRunner::new(output(0, LISTING)));
    let lister = MavenDependencyLister::with_runner(MavenListerConfig::default(), runner.clone());

    let deps = lister.list_dependencies(tmp.path()).unwrap();

    assert_eq!(deps.len(), 2);
    assert!(deps.contains(&Artifact::parse("junit:junit:4.12").unwrap()));

    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].cwd, tmp.path());
    assert_eq!(invocations[0].args, vec!["dependency:list".to_string()]);
}

#[test]
fn missing_pom_short_circuits_without_invocation() {
    let tmp = tempfile::tempdir().unwrap();
    let runner = Arc::new(FakeCommandRunner::new(output(0, LISTING)));
    let lister = MavenDependencyLister::with_runner(MavenListerConfig::default(), runner.clone());

    let deps = lister.list_dependencies(tmp.path()).unwrap();

    assert!(deps.is_empty());
    assert!(runner.invocations().is_empty());
}

#[test]
fn non_zero_exit_is_an_error() {
    let tmp = workspace_with_pom();
    let runner = Arc::new(FakeCommandRunner::new(output(1, "")));
    let lister = MavenDependencyLister::with_runner(MavenListerConfig::default(), runner);

    match lister.list_dependencies(tmp.path()) {
        Err(BuildError::CommandFailed { tool, code, .. }) => {
            assert_eq!(tool, "maven");
            assert_eq!(code, Some(1));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn timeout_degrades_to_empty_listing() {
    let tmp = workspace_with_pom();
    let lister =
        MavenDependencyLister::with_runner(MavenListerConfig::default(), Arc::new(TimedOutRunner));

    let deps = lister.list_dependencies(tmp.path()).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn wrapper_is_preferred_when_present() {
    let tmp = workspace_with_pom();
    let wrapper_name = if cfg!(windows) { "mvnw.cmd" } else { "mvnw" };
    std::fs::write(tmp.path().join(wrapper_name), "#!/bin/sh\n").unwrap();

    let runner = Arc::new(FakeCommandRunner::new(output(0, LISTING)));
    let lister = MavenDependencyLister::with_runner(MavenListerConfig::default(), runner.clone());
    lister.list_dependencies(tmp.path()).unwrap();

    assert_eq!(runner.invocations()[0].program, tmp.path().join(wrapper_name));
}
