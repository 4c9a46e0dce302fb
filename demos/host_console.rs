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

//! Run with `HOST_CLI=1 cargo run --example host_console`. Add `HOST_DEBUG=1` to see debug
//! output and the verbose layout.

use cliforth::append::CliAppend;
use cliforth::env::HostEnvironment;
use cliforth::filter::EnvFilter;
use cliforth::record::Level;

fn main() {
    let env = HostEnvironment::from_default_env();
    let append = match CliAppend::builder().level(Level::INFO).build(&env) {
        Ok(append) => append,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("hint: set HOST_CLI=1 to pretend to run inside the host");
            return;
        }
    };

    cliforth::builder()
        .channel("demo")
        .filter(EnvFilter::from_default_env_or("trace"))
        .append(append)
        .apply();

    log::trace!("Hello trace!");
    log::debug!(plugins = 3; "Hello debug!");
    log::info!("Hello info!");
    log::warn!("Hello warn!");
    log::error!("Hello error!");
}
