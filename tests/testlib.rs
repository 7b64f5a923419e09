use std::{
    io::Write,
    process::{Command, Stdio},
};
use tempfile::NamedTempFile;

pub const SNAPSHOT: &str = r#"{
    "classes": {
        "NSObject": {
            "class_methods": [{
                "name": "alloc",
                "type_encoding": "@16@0:8",
                "parameters_type": ["@", ":"],
                "return_type": "@",
                "implementation": 4096
            }],
            "instance_methods": [{
                "name": "description",
                "type_encoding": "@16@0:8",
                "parameters_type": ["@", ":"],
                "return_type": "@\"NSString\"",
                "implementation": 8192
            }]
        },
        "Widget": {
            "superclass": "NSObject",
            "class_methods": [{
                "name": "widgetWithFrame:",
                "type_encoding": "@48@0:8{CGRect={CGPoint=dd}{CGSize=dd}}16",
                "parameters_type": ["@", ":", "{CGRect={CGPoint=dd}{CGSize=dd}}"],
                "return_type": "@",
                "implementation": 12288
            }],
            "instance_methods": [{
                "name": "doSomething:withArg:",
                "type_encoding": "v32@0:8@16i24",
                "parameters_type": ["@", ":", "@", "i"],
                "return_type": "v",
                "implementation": 16384
            }],
            "properties": [{
                "name": "name",
                "attributes_string": "T@,R,N",
                "attributes": { "T": "@", "N": "", "R": "" }
            }, {
                "name": "title",
                "attributes_string": "T@\"NSString\",C,N,V_title",
                "attributes": { "T": "@\"NSString\"", "C": "", "N": "", "V": "_title" }
            }]
        }
    },
    "objects": {
        "0x600000c04000": {
            "class": "Widget",
            "values": { "name": "<Widget: 0x600000c04000>", "title": "Hello" }
        }
    }
}"#;

pub fn snapshot_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create snapshot file");
    file.write_all(SNAPSHOT.as_bytes())
        .expect("Failed to write snapshot file");
    file
}

pub fn run_execute(bin: &str, commands: &[&str]) -> (String, String, bool) {
    let file = snapshot_file();
    let mut cmd = Command::new(bin);
    cmd.arg(file.path());
    for command in commands {
        cmd.arg("-e").arg(command);
    }

    let output = cmd.output().expect("Failed to run binary");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}

pub fn run_cli_commands(bin: &str, commands: &[&str]) -> (String, String, bool) {
    let file = snapshot_file();
    let mut child = Command::new(bin)
        .arg(file.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn binary");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        for command in commands {
            writeln!(stdin, "{command}").expect("Failed to write to stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait on child");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}
