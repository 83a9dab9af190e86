use super::helpers::{read, report_path, stderr, TestWorkspace};

/// A workspace mixing catkin and rosbuild packages, an ignored subtree and an
/// underlay on a second search path.
fn mixed_workspace(ws: &TestWorkspace) -> String {
    ws.add_package("robot_bringup", "0.4.2", &["BSD"], &["robot_driver", "legacy_planner"]);
    ws.add_package("robot_driver", "1.2.0", &["Apache-2.0", "BSD"], &["common_msgs"]);
    ws.write_file(
        "src/rosbuild/legacy_planner/manifest.xml",
        "<package>\n  <license>LGPL</license>\n  <depend package=\"common_msgs\"/>\n</package>\n",
    );
    ws.write_file(
        "src/attic/old_driver/package.xml",
        "<package><name>robot_driver</name><version>0.0.1</version><license>GPL-3.0</license></package>",
    );
    ws.write_file("src/attic/CATKIN_IGNORE", "");
    ws.write_file(
        "underlay/common_msgs/package.xml",
        "<package format=\"3\"><name>common_msgs</name><version>1.13.1</version><license>BSD</license></package>",
    );

    let underlay = ws.dir.path().join("underlay");
    std::env::join_paths([ws.src(), underlay])
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_mixed_workspace_report() {
    let ws = TestWorkspace::new();
    let search_path = mixed_workspace(&ws);

    let output = ws.run(&[
        "robot_bringup",
        "--ros_package_path",
        &search_path,
        "--prefix_outfile",
        &ws.prefix("licenses"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = read(&report_path(&output));
    assert_eq!(
        content,
        "Apache-2.0:\n- robot_driver\n\
         BSD:\n- common_msgs\n- robot_bringup\n- robot_driver\n\
         LGPL:\n- legacy_planner\n\
         license_not_found:\n- catkin\n"
    );
}

#[test]
fn test_strict_mode_rejects_unavailable_dependency() {
    let ws = TestWorkspace::new();
    let search_path = mixed_workspace(&ws);

    let output = ws.run(&[
        "robot_bringup",
        "--ros_package_path",
        &search_path,
        "--prefix_outfile",
        &ws.prefix("licenses"),
        "--strict",
    ]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("catkin"));
}
