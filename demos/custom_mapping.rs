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

//! Run with `HOST_CLI=1 cargo run --example custom_mapping`. The process exits with code 2 on
//! the last line.

use cliforth::append::CliAppend;
use cliforth::env::HostEnvironment;
use cliforth::layout::CustomLayout;
use cliforth::mapping::LevelActionMap;
use cliforth::record::Level;
use cliforth::record::Record;

const MAPPING: &str = r#"{
    "info": { "action": "log" },
    "notice": { "action": "log", "prefix_level_name": true },
    "warning": { "action": "warn" },
    "error": { "action": "error", "prefix_level_name": true, "exit": 2 },
    "critical": { "action": "warn", "exit": true }
}"#;

fn main() {
    let mapping = LevelActionMap::from_json(MAPPING).unwrap();
    for (level, entry) in mapping.iter() {
        let name = level.name().unwrap_or_default();
        if let Err(err) = mapping.validate(level, name) {
            eprintln!("skipping {level} => {}: {err}", entry.action_name());
        }
    }

    let env = HostEnvironment::from_default_env();
    let logger = cliforth::builder()
        .channel("deploy")
        .append(
            CliAppend::builder()
                .level(Level::INFO)
                .mapping(mapping)
                .layout(CustomLayout::new(|record: &Record| {
                    Ok(format!("[{}] {}", record.channel(), record.message()))
                }))
                .build(&env)
                .unwrap(),
        )
        .build();

    logger.info("Uploading release").unwrap();
    logger.notice("Cache is cold").unwrap();
    logger.warning("Slow mirror").unwrap();
    logger.critical("Not handled: the entry is invalid").unwrap();
    logger.error("Rollback failed").unwrap();
}
