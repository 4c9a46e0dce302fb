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

//! Process-wide flags describing the host command-line environment.

use std::borrow::Cow;

const DEFAULT_HOST_ENV: &str = "HOST_CLI";
const DEFAULT_DEBUG_ENV: &str = "HOST_DEBUG";

/// Whether the process runs inside the host command-line tool, and whether the host runs in
/// debug mode.
///
/// The flags are read once and passed explicitly to whatever needs them, so tests can construct
/// any environment without touching process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostEnvironment {
    in_host: bool,
    debug: bool,
}

impl HostEnvironment {
    /// Create an environment from explicit flags.
    pub fn new(in_host: bool, debug: bool) -> Self {
        HostEnvironment { in_host, debug }
    }

    /// Read the flags from the default variables `HOST_CLI` and `HOST_DEBUG`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliforth::env::HostEnvironment;
    ///
    /// let env = HostEnvironment::from_default_env();
    /// ```
    pub fn from_default_env() -> Self {
        HostEnvironment::from_env(DEFAULT_HOST_ENV, DEFAULT_DEBUG_ENV)
    }

    /// Read the flags from the given variables.
    ///
    /// A flag is set when its variable holds `1`, `true`, `yes` or `on`, in any case. Unset or
    /// other values leave the flag cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliforth::env::HostEnvironment;
    ///
    /// let env = HostEnvironment::from_env("MY_TOOL", "MY_TOOL_DEBUG");
    /// ```
    pub fn from_env<'a, 'b, H, D>(host: H, debug: D) -> Self
    where
        H: Into<Cow<'a, str>>,
        D: Into<Cow<'b, str>>,
    {
        HostEnvironment {
            in_host: read_flag(&host.into()),
            debug: read_flag(&debug.into()),
        }
    }

    /// Whether the process runs inside the host command-line tool.
    pub fn in_host(&self) -> bool {
        self.in_host
    }

    /// Whether the host runs in debug mode.
    pub fn debug(&self) -> bool {
        self.debug
    }
}

fn read_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| is_truthy(&value))
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}
