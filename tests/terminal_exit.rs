// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The terminal console ends the process on terminating errors. Each case re-runs itself in a
//! child process that takes the exiting branch.

use std::process::Command;
use std::process::Output;

use cliforth::Console;
use cliforth::append::CliAppend;
use cliforth::console::Terminal;
use cliforth::env::HostEnvironment;
use cliforth::mapping::Exit;

const CHILD_ENV: &str = "CLIFORTH_TERMINAL_EXIT_CHILD";

fn is_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn run_child(test_name: &str) -> Output {
    let exe = std::env::current_exe().unwrap();
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .output()
        .unwrap()
}

#[test]
fn test_error_exits_with_code() {
    if is_child() {
        let terminal = Terminal::new(&HostEnvironment::new(true, false)).no_color(true);
        terminal.log("before the failure").unwrap();
        let _ = terminal.error("Rollback failed", Exit::Code(2));
        panic!("the terminal console did not exit");
    }

    let output = run_child("test_error_exits_with_code");
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("before the failure"), "{stdout}");
    assert!(stderr.contains("Error: Rollback failed"), "{stderr}");
    assert!(!stderr.contains("did not exit"), "{stderr}");
}

#[test]
fn test_critical_record_exits_through_append() {
    if is_child() {
        let env = HostEnvironment::new(true, false);
        let logger = cliforth::builder()
            .channel("deploy")
            .append(CliAppend::new(&env).unwrap())
            .build();
        logger.error("recoverable").unwrap();
        let _ = logger.critical("Database unreachable");
        panic!("the terminal console did not exit");
    }

    let output = run_child("test_critical_record_exits_through_append");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(ERROR) recoverable"), "{stderr}");
    assert!(stderr.contains("(CRITICAL) Database unreachable"), "{stderr}");
    assert!(!stderr.contains("did not exit"), "{stderr}");
}
