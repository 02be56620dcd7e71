// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::{TempDir, tempdir};

use versus_runner::infra::fs::CaptureLayout;

/// A configuration with two shell-script tracks. Each test source is a small
/// `sh` script whose output becomes the capture.
pub const SCRIPT_CONFIG: &str = r#"
language = "en"
runs = 1
ops = 10

[primary]
name = "alpha"
label = "Alpha"
tests_dir = "alpha"
extension = "sh"
command = "sh {tests_dir}/{test}.sh"

[secondary]
name = "beta"
label = "Beta"
tests_dir = "beta"
extension = "sh"
command = "sh {tests_dir}/{test}.sh"
"#;

/// A temporary project holding `Versus.toml` and the two track directories.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(dir.path().join("alpha")).expect("Failed to create alpha dir");
        fs::create_dir_all(dir.path().join("beta")).expect("Failed to create beta dir");
        fs::write(dir.path().join("Versus.toml"), SCRIPT_CONFIG).expect("Failed to write config");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `alpha/<test>.sh` (or `beta/...`) with the given script body.
    pub fn script(&self, track_dir: &str, test: &str, body: &str) -> PathBuf {
        let path = self.root().join(track_dir).join(format!("{test}.sh"));
        fs::write(&path, body).expect("Failed to write script");
        path
    }

    /// Writes a script that prints the metric as a JSON object.
    pub fn emitting(&self, track_dir: &str, test: &str, value: u64) -> PathBuf {
        self.script(
            track_dir,
            test,
            &format!("echo '{{\"median_ops_per_sec\": {value}}}'\n"),
        )
    }

    /// The layout matching `SCRIPT_CONFIG` under this project.
    pub fn layout(&self) -> CaptureLayout {
        CaptureLayout::new(
            ("alpha", self.root().join("alpha")),
            ("beta", self.root().join("beta")),
        )
    }

    /// Writes a capture file directly, as a previous run would have.
    pub fn capture(&self, track_dir: &str, test: &str, content: &str) -> PathBuf {
        let path = self
            .root()
            .join(track_dir)
            .join(format!("results_{track_dir}_{test}.json"));
        fs::write(&path, content).expect("Failed to write capture");
        path
    }
}

/// Helper function to create an invalid TOML configuration
pub fn create_invalid_toml(dir: &Path) -> PathBuf {
    let path = dir.join("invalid.toml");
    let content = r#"
language = "en"
# Invalid TOML - missing closing bracket
[primary
name = "alpha"
"#;
    fs::write(&path, content).expect("Failed to write invalid config");
    path
}

/// Removes ANSI colouring from every string produced in this test process.
pub fn plain_output() {
    colored::control::set_override(false);
}

/// A writer that accepts at most three bytes per `write` call and yields the
/// thread after each one, so a line written without outside locking gets torn
/// by whatever other thread writes at the same time.
#[derive(Clone, Default)]
pub struct TricklingWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl TricklingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }
}

impl Write for TricklingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(3);
        self.bytes.lock().unwrap().extend_from_slice(&buf[..n]);
        std::thread::yield_now();
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
