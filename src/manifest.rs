use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// catkin manifest file name
pub const PACKAGE_FILE: &str = "package.xml";
/// rosbuild manifest file name
pub const MANIFEST_FILE: &str = "manifest.xml";

/// Dependency elements of a catkin `package.xml` (formats 1 to 3).
const DEPEND_TAGS: &[&str] = &[
    "depend",
    "build_depend",
    "buildtool_depend",
    "build_export_depend",
    "buildtool_export_depend",
    "exec_depend",
    "run_depend",
    "test_depend",
    "doc_depend",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// catkin `package.xml`
    Package,
    /// rosbuild `manifest.xml`
    Rosbuild,
}

/// The subset of a ROS package manifest needed for license reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: Option<String>,
    /// Declared licenses in manifest order.
    pub licenses: Vec<String>,
    /// Direct dependencies, deduplicated, in first-seen order.
    pub depends: Vec<String>,
    pub is_metapackage: bool,
    pub kind: ManifestKind,
    /// Directory holding the manifest.
    pub path: PathBuf,
}

impl PackageManifest {
    /// Parse a catkin `package.xml`.
    pub fn parse_package_xml(path: &Path) -> Result<Self> {
        let content = read_manifest(path)?;
        parse_manifest(&content, path, ManifestKind::Package, None)
    }

    /// Parse a rosbuild `manifest.xml`. Rosbuild packages are named after
    /// their directory.
    pub fn parse_manifest_xml(path: &Path) -> Result<Self> {
        let content = read_manifest(path)?;
        let name = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReportError::Manifest {
                path: path.to_path_buf(),
                details: "cannot derive package name from directory".to_string(),
            })?
            .to_string();
        parse_manifest(&content, path, ManifestKind::Rosbuild, Some(name))
    }

    /// License string as rospkg reports it: multiple licenses joined by ", ".
    pub fn license(&self) -> Option<String> {
        if self.licenses.is_empty() {
            None
        } else {
            Some(self.licenses.join(", "))
        }
    }
}

fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ReportError::io(path, e))
}

fn parse_manifest(
    content: &str,
    file: &Path,
    kind: ManifestKind,
    dir_name: Option<String>,
) -> Result<PackageManifest> {
    let invalid = |details: String| ReportError::Manifest {
        path: file.to_path_buf(),
        details,
    };

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();

    let mut name: Option<String> = dir_name;
    let mut version = None;
    let mut licenses = Vec::new();
    let mut depends = Vec::new();
    let mut is_metapackage = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = tag_name(&e);
                if stack.is_empty() && tag != "package" {
                    return Err(invalid(format!("unexpected root element <{}>", tag)));
                }
                if kind == ManifestKind::Rosbuild && stack.is_empty() {
                    rosbuild_license(&e, &mut licenses).map_err(invalid)?;
                }
                if kind == ManifestKind::Rosbuild && stack.len() == 1 {
                    rosbuild_depend(&e, &tag, &mut depends).map_err(invalid)?;
                }
                stack.push(tag);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                let tag = tag_name(&e);
                if tag == "metapackage" && stack.iter().any(|t| t == "export") {
                    is_metapackage = true;
                }
                if kind == ManifestKind::Rosbuild && stack.len() == 1 {
                    rosbuild_depend(&e, &tag, &mut depends).map_err(invalid)?;
                }
            }
            Ok(Event::Text(t)) => {
                let unescaped = t.unescape().map_err(|e| invalid(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(t)) => {
                text.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Ok(Event::End(_)) => {
                let tag = stack.pop().unwrap_or_default();
                // only direct children of <package> carry metadata
                if stack.len() == 1 {
                    let value = text.trim();
                    match (kind, tag.as_str()) {
                        (_, "license") if !value.is_empty() => licenses.push(value.to_string()),
                        (ManifestKind::Package, "name") => name = Some(value.to_string()),
                        (ManifestKind::Package, "version") if !value.is_empty() => {
                            version = Some(value.to_string())
                        }
                        (ManifestKind::Package, t) if DEPEND_TAGS.contains(&t) => {
                            push_unique(&mut depends, value)
                        }
                        _ => {}
                    }
                }
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(invalid(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| invalid("missing <name> element".to_string()))?;

    Ok(PackageManifest {
        name: name.trim().to_string(),
        version,
        licenses,
        depends,
        is_metapackage,
        kind,
        path: file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    })
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned()
}

/// `<depend package="roscpp"/>` in rosbuild manifests.
fn rosbuild_depend(
    e: &BytesStart<'_>,
    tag: &str,
    depends: &mut Vec<String>,
) -> std::result::Result<(), String> {
    if tag != "depend" {
        return Ok(());
    }
    let attr = e.try_get_attribute("package").map_err(|e| e.to_string())?;
    if let Some(attr) = attr {
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        push_unique(depends, value.trim());
    }
    Ok(())
}

/// `<package license="BSD">` on the root of a rosbuild manifest.
fn rosbuild_license(
    e: &BytesStart<'_>,
    licenses: &mut Vec<String>,
) -> std::result::Result<(), String> {
    let attr = e.try_get_attribute("license").map_err(|e| e.to_string())?;
    if let Some(attr) = attr {
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        push_unique(licenses, value.trim());
    }
    Ok(())
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
