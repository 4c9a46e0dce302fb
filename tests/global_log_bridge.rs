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

//! This case ensures that `log` crate macros reach the host console through the global logger.

use cliforth::append::CliAppend;
use cliforth::console::Recording;
use cliforth::env::HostEnvironment;
use cliforth::mapping::Action;
use cliforth::record::Level;

#[test]
fn test_log_macros_reach_console() {
    let console = Recording::default();
    let append = CliAppend::builder()
        .level(Level::INFO)
        .verbose(true)
        .console(console.clone())
        .build(&HostEnvironment::new(true, false))
        .unwrap();

    cliforth::builder()
        .channel("bridge")
        .filter("info,noisy=error")
        .append(append)
        .apply();

    log::info!(user = "alice"; "signed in");
    log::warn!(target: "noisy", "suppressed by the filter");
    log::warn!("disk almost full");
    log::error!("recoverable failure");
    log::trace!("handed to the host debug action");

    assert_eq!(
        console.messages(Action::Log),
        vec![r#"signed in {"user":"alice"} {"target":"global_log_bridge"}"#]
    );
    assert_eq!(
        console.messages(Action::Warn),
        vec![r#"(WARNING) disk almost full [] {"target":"global_log_bridge"}"#]
    );
    assert_eq!(
        console.messages(Action::Error),
        vec![r#"(ERROR) recoverable failure [] {"target":"global_log_bridge"}"#]
    );
    // trace is below the `info` directive
    assert!(console.messages(Action::Debug).is_empty());
}
