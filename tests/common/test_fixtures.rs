//! Test fixtures for wtsrc workspaces

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary tsrc workspace with an isolated alias file.
///
/// `tsrc` is replaced by `echo tsrc`, so delegated commands print the command
/// line they would have run.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Workspace with `.tsrc/manifest` but no project file
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("workspace/.tsrc/manifest"))
            .expect("Failed to create manifest dir");
        Self { temp_dir }
    }

    /// Workspace whose `wtsrc.yml` holds `content`
    pub fn with_project(content: &str) -> Self {
        let workspace = Self::new();
        fs::write(workspace.manifest_dir().join("wtsrc.yml"), content)
            .expect("Failed to write wtsrc.yml");
        workspace
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("workspace")
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.root().join(".tsrc").join("manifest")
    }

    /// A directory outside the workspace
    pub fn outside(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("elsewhere");
        fs::create_dir_all(&dir).expect("Failed to create outside dir");
        dir
    }

    pub fn alias_file(&self) -> PathBuf {
        self.temp_dir.path().join("aliases.yml")
    }

    pub fn create_repo(&self, dest: &str) -> PathBuf {
        let dir = self.root().join(dest);
        fs::create_dir_all(&dir).expect("Failed to create repo dir");
        dir
    }

    /// `wtsrc` running in the workspace root
    pub fn wtsrc(&self) -> Command {
        self.wtsrc_in(&self.root())
    }

    /// `wtsrc` running in `dir`
    pub fn wtsrc_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("wtsrc").expect("wtsrc binary not built");
        cmd.current_dir(dir)
            .arg("--no-color")
            .env("WTSRC_ALIAS_FILE", self.alias_file())
            .env("WTSRC_TSRC", "echo tsrc")
            .env_remove("WTSRC_VERBOSE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A `tsrc` stand-in whose `init` creates `.tsrc/manifest/wtsrc.yml`
    /// holding `project` in the current directory. Returns the value for
    /// `WTSRC_TSRC`.
    pub fn cloning_tsrc(&self, project: &str) -> String {
        let script = self.temp_dir.path().join("cloning-tsrc.sh");
        let body = format!(
            "mkdir -p .tsrc/manifest\ncat > .tsrc/manifest/wtsrc.yml <<'WTSRC_YML'\n{}\nWTSRC_YML\necho tsrc \"$@\"\n",
            project
        );
        fs::write(&script, body).expect("Failed to write tsrc script");
        format!("sh {}", script.display())
    }

    pub fn manifest_file(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.manifest_dir().join(name)).ok()
    }
}
