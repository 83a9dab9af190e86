use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestWorkspace {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_ros-license-reporter").to_string();
        fs::create_dir_all(dir.path().join("src")).expect("Failed to create src dir");

        Self { dir, binary_path }
    }

    pub fn src(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    /// Write (or overwrite) a catkin package under `src/<name>`.
    pub fn add_package(&self, name: &str, version: &str, licenses: &[&str], deps: &[&str]) {
        let pkg_dir = self.src().join(name);
        fs::create_dir_all(&pkg_dir).unwrap();

        let mut xml = String::from("<?xml version=\"1.0\"?>\n<package format=\"2\">\n");
        xml.push_str(&format!("  <name>{}</name>\n", name));
        xml.push_str(&format!("  <version>{}</version>\n", version));
        xml.push_str("  <description>test package</description>\n");
        for license in licenses {
            xml.push_str(&format!("  <license>{}</license>\n", license));
        }
        xml.push_str("  <buildtool_depend>catkin</buildtool_depend>\n");
        for dep in deps {
            xml.push_str(&format!("  <depend>{}</depend>\n", dep));
        }
        xml.push_str("</package>\n");

        fs::write(pkg_dir.join("package.xml"), xml).unwrap();
    }

    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn prefix(&self, name: &str) -> String {
        self.dir.path().join("reports").join(name).display().to_string()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.dir.path())
            .env("ROS_PACKAGE_PATH", self.src())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run ros-license-reporter")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Path printed on stdout by a successful run.
pub fn report_path(output: &Output) -> PathBuf {
    PathBuf::from(stdout(output).trim())
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
