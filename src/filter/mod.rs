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

//! Filters for records arriving through the `log` crate.

use std::str::FromStr;

use log::LevelFilter;

pub use self::env::EnvFilter;
pub use self::env::EnvFilterBuilder;

mod env;

/// The result of a filter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// The record will be processed without further filtering.
    Accept,
    /// The record should not be processed.
    Reject,
    /// No decision could be made, further filtering should occur.
    Neutral,
}

/// Represents a filter that can be applied to `log` crate records.
#[derive(Debug)]
pub enum Filter {
    /// An env_logger filter.
    Env(EnvFilter),
}

impl Filter {
    pub(crate) fn enabled(&self, metadata: &log::Metadata) -> FilterResult {
        match self {
            Filter::Env(filter) => filter.enabled(metadata),
        }
    }

    pub(crate) fn matches(&self, record: &log::Record) -> FilterResult {
        match self {
            Filter::Env(filter) => filter.matches(record),
        }
    }
}

impl From<LevelFilter> for Filter {
    fn from(filter: LevelFilter) -> Self {
        EnvFilter::from(filter).into()
    }
}

impl<'a> From<&'a str> for Filter {
    fn from(filter: &'a str) -> Self {
        EnvFilter::from(filter).into()
    }
}

impl FromStr for Filter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvFilter::from_str(s).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(level: log::Level, target: &str) -> log::Metadata<'_> {
        log::Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn test_level_filter() {
        let filter = Filter::from(LevelFilter::Warn);
        assert_eq!(
            filter.enabled(&metadata(log::Level::Error, "app")),
            FilterResult::Neutral
        );
        assert_eq!(
            filter.enabled(&metadata(log::Level::Info, "app")),
            FilterResult::Reject
        );
    }

    #[test]
    fn test_directive_filter() {
        let filter = "info,noisy=error".parse::<Filter>().unwrap();
        assert_eq!(
            filter.enabled(&metadata(log::Level::Info, "app")),
            FilterResult::Neutral
        );
        assert_eq!(
            filter.enabled(&metadata(log::Level::Warn, "noisy")),
            FilterResult::Reject
        );

        let record = log::Record::builder()
            .level(log::Level::Debug)
            .target("app")
            .args(format_args!("hidden"))
            .build();
        assert_eq!(filter.matches(&record), FilterResult::Reject);
    }
}
