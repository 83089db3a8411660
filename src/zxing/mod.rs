//! Barcode location through ZXing's Java command line runner
//!
//! ZXing runs inside a container so the host only needs a container runtime
//! and the three jars. The working directory is mounted at `/app`, so every
//! input path is passed to the container relative to it.

/// Parser for the runner's text report
pub mod parse;

pub use parse::{NO_BARCODE_MARKER, is_no_barcode, parse_output};

use crate::error::{Error, Result};
use log::debug;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// Default ZXing `javase` jar
pub const DEFAULT_JAVASE_JAR: &str = "javase-3.5.0.jar";
/// Default ZXing `core` jar
pub const DEFAULT_CORE_JAR: &str = "core-3.5.0.jar";
/// Default JCommander jar, required by the runner's argument parser
pub const DEFAULT_JCOMMANDER_JAR: &str = "jcommander-1.82.jar";
/// Default input image
pub const DEFAULT_IMAGE: &str = "pdf417_code.png";
/// Default annotated output image
pub const DEFAULT_OUTPUT: &str = "annotated_barcode.png";
/// Default container image providing a JVM
pub const DEFAULT_DOCKER_IMAGE: &str = "openjdk:17";
/// Entry point of the ZXing command line runner
pub const RUNNER_CLASS: &str = "com.google.zxing.client.j2se.CommandLineRunner";

const CONTAINER_MOUNT: &str = "/app";

/// Inputs of one ZXing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZxingConfig {
    /// Directory mounted into the container; relative paths resolve against it
    pub workdir: PathBuf,
    /// ZXing `javase` jar
    pub javase_jar: PathBuf,
    /// ZXing `core` jar
    pub core_jar: PathBuf,
    /// JCommander jar
    pub jcommander_jar: PathBuf,
    /// Image to decode
    pub image: PathBuf,
    /// Where the annotated image is written
    pub output: PathBuf,
    /// Container image to run
    pub docker_image: String,
    /// Container runtime executable
    pub program: String,
}

impl Default for ZxingConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            javase_jar: PathBuf::from(DEFAULT_JAVASE_JAR),
            core_jar: PathBuf::from(DEFAULT_CORE_JAR),
            jcommander_jar: PathBuf::from(DEFAULT_JCOMMANDER_JAR),
            image: PathBuf::from(DEFAULT_IMAGE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            docker_image: DEFAULT_DOCKER_IMAGE.to_string(),
            program: "docker".to_string(),
        }
    }
}

impl ZxingConfig {
    /// Set the mounted working directory
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Set the image to decode
    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the three jars making up the classpath
    pub fn with_jars(
        mut self,
        javase: impl Into<PathBuf>,
        core: impl Into<PathBuf>,
        jcommander: impl Into<PathBuf>,
    ) -> Self {
        self.javase_jar = javase.into();
        self.core_jar = core.into();
        self.jcommander_jar = jcommander.into();
        self
    }

    /// Set the annotated output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the container image
    pub fn with_docker_image(mut self, docker_image: impl Into<String>) -> Self {
        self.docker_image = docker_image.into();
        self
    }

    /// Resolve a path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    /// Required inputs, in the order they are checked
    pub fn required_files(&self) -> [&Path; 4] {
        [
            &self.javase_jar,
            &self.core_jar,
            &self.jcommander_jar,
            &self.image,
        ]
    }

    /// Path of `path` relative to the working directory, or `None` when it
    /// resolves outside of it and so is not visible inside the container
    pub fn relative_to_workdir(&self, path: &Path) -> Option<PathBuf> {
        let full = normalize(&self.resolve(path));
        let base = normalize(&self.workdir);
        let relative = full.strip_prefix(&base).ok()?;
        let escapes = relative.has_root()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || relative.as_os_str().is_empty() {
            return None;
        }
        Some(relative.to_path_buf())
    }

    /// Check that every required input lies under the working directory and
    /// exists, reporting the first one that does not
    pub fn validate(&self) -> Result<()> {
        for file in self.required_files() {
            if self.relative_to_workdir(file).is_none() {
                return Err(Error::OutsideWorkdir {
                    path: file.to_path_buf(),
                    workdir: self.workdir.clone(),
                });
            }
            if !self.resolve(file).exists() {
                return Err(Error::MissingFile(file.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Arguments passed to the container runtime
    pub fn command_args(&self) -> Vec<String> {
        let classpath = [&self.javase_jar, &self.core_jar, &self.jcommander_jar]
            .iter()
            .map(|jar| self.container_path(jar))
            .collect::<Vec<_>>()
            .join(":");

        vec![
            "run".to_string(),
            "--rm".to_string(),
            "-v".to_string(),
            format!("{}:{}", self.workdir.display(), CONTAINER_MOUNT),
            self.docker_image.clone(),
            "java".to_string(),
            "-cp".to_string(),
            classpath,
            RUNNER_CLASS.to_string(),
            self.container_path(&self.image),
        ]
    }

    /// Path of a working-directory file as seen inside the container
    fn container_path(&self, path: &Path) -> String {
        let relative = self
            .relative_to_workdir(path)
            .unwrap_or_else(|| path.to_path_buf());
        format!(
            "{}/{}",
            CONTAINER_MOUNT,
            relative.to_string_lossy().trim_start_matches('/')
        )
    }
}

/// Lexically fold `.` and `..` components; symlinks are not followed
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Captured result of an external process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, if any
    pub code: Option<i32>,
    /// Standard output as text
    pub stdout: String,
    /// Standard error as text
    pub stderr: String,
}

impl ProcessOutput {
    /// Turn a non-zero exit into [`Error::ProcessFailure`] carrying standard error
    pub fn check(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(Error::ProcessFailure {
            status: self.code,
            stderr: self.stderr,
        })
    }

    /// Standard output followed by standard error
    pub fn combined(&self) -> String {
        let mut combined = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        combined.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&self.stderr);
        combined
    }
}

/// Runs an external program to completion, capturing its output
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit
    fn run(&mut self, program: &str, args: &[String]) -> Result<ProcessOutput>;
}

/// Runs commands on the host with [`std::process::Command`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        debug!("running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::ProcessSpawn {
                program: program.to_string(),
                source,
            })?;
        debug!("{} exited with {}", program, output.status);

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Validate the inputs, run ZXing and return its captured output whatever
/// the exit status; see [`ProcessOutput::check`].
pub fn invoke_zxing<R: CommandRunner>(
    config: &ZxingConfig,
    runner: &mut R,
) -> Result<ProcessOutput> {
    config.validate()?;
    runner.run(&config.program, &config.command_args())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_command_args() {
        let config = ZxingConfig::default().with_workdir("/work");
        assert_eq!(
            config.command_args(),
            vec![
                "run",
                "--rm",
                "-v",
                "/work:/app",
                "openjdk:17",
                "java",
                "-cp",
                "/app/javase-3.5.0.jar:/app/core-3.5.0.jar:/app/jcommander-1.82.jar",
                "com.google.zxing.client.j2se.CommandLineRunner",
                "/app/pdf417_code.png",
            ]
        );
    }

    #[test]
    fn test_container_path_strips_dot_prefix() {
        let config = ZxingConfig::default().with_workdir("/work");
        assert_eq!(config.container_path(Path::new("./img/a.png")), "/app/img/a.png");
    }

    #[test]
    fn test_absolute_path_inside_workdir_maps_into_mount() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("scans")).unwrap();
        let image = dir.path().join("scans").join("pic.png");
        let config = ZxingConfig::default()
            .with_workdir(dir.path())
            .with_image(&image);
        for jar in [&config.javase_jar, &config.core_jar, &config.jcommander_jar] {
            fs::write(dir.path().join(jar), b"x").unwrap();
        }
        fs::write(&image, b"x").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.command_args().last().map(String::as_str),
            Some("/app/scans/pic.png")
        );
    }

    #[test]
    fn test_absolute_path_outside_workdir_is_rejected() {
        let workdir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let image = elsewhere.path().join("pic.png");
        fs::write(&image, b"x").unwrap();
        let config = ZxingConfig::default()
            .with_workdir(workdir.path())
            .with_image(&image);
        for jar in [&config.javase_jar, &config.core_jar, &config.jcommander_jar] {
            fs::write(workdir.path().join(jar), b"x").unwrap();
        }

        match config.validate() {
            Err(Error::OutsideWorkdir { path, .. }) => assert_eq!(path, image),
            other => panic!("expected OutsideWorkdir, got {:?}", other),
        }
    }

    #[test]
    fn test_parent_dir_escape_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let workdir = root.path().join("work");
        fs::create_dir(&workdir).unwrap();
        fs::write(root.path().join("pic.png"), b"x").unwrap();
        let config = ZxingConfig::default()
            .with_workdir(&workdir)
            .with_image("../pic.png");
        for jar in [&config.javase_jar, &config.core_jar, &config.jcommander_jar] {
            fs::write(workdir.join(jar), b"x").unwrap();
        }

        assert!(matches!(
            config.validate(),
            Err(Error::OutsideWorkdir { .. })
        ));
    }

    #[test]
    fn test_relative_to_workdir() {
        let config = ZxingConfig::default();
        assert_eq!(
            config.relative_to_workdir(Path::new("a/../b.png")),
            Some(PathBuf::from("b.png"))
        );
        assert_eq!(config.relative_to_workdir(Path::new("../b.png")), None);
        assert_eq!(config.relative_to_workdir(Path::new("/etc/b.png")), None);
        assert_eq!(config.relative_to_workdir(Path::new(".")), None);
    }

    #[test]
    fn test_validate_reports_first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_JAVASE_JAR), b"jar").unwrap();
        let config = ZxingConfig::default().with_workdir(dir.path());

        match config.validate() {
            Err(Error::MissingFile(path)) => assert_eq!(path, PathBuf::from(DEFAULT_CORE_JAR)),
            other => panic!("expected missing core jar, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_passes_when_all_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = ZxingConfig::default().with_workdir(dir.path());
        for file in config.required_files() {
            fs::write(dir.path().join(file), b"x").unwrap();
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_check_maps_failure() {
        let output = ProcessOutput {
            success: false,
            code: Some(2),
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        match output.check() {
            Err(Error::ProcessFailure { status, stderr }) => {
                assert_eq!(status, Some(2));
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected ProcessFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_combined_output() {
        let output = ProcessOutput {
            success: true,
            code: Some(0),
            stdout: "out".to_string(),
            stderr: "err\n".to_string(),
        };
        assert_eq!(output.combined(), "out\nerr\n");
    }
}
