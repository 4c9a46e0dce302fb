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

use log::LevelFilter;

use super::Logger;
use crate::Append;
use crate::filter::Filter;

/// Create a new empty [`Builder`] instance for configuring the logger.
///
/// At least one append must be added before the logger can be built or applied:
///
/// ```rust
/// use cliforth::append::CliAppend;
/// use cliforth::console::Recording;
/// use cliforth::env::HostEnvironment;
///
/// let env = HostEnvironment::new(true, false);
/// let append = CliAppend::builder()
///     .console(Recording::default())
///     .build(&env)
///     .unwrap();
///
/// let logger = cliforth::builder()
///     // .build()  CANNOT COMPILE: a builder without Append
///     .channel("deploy")
///     .append(append)
///     .build();
/// ```
pub fn builder() -> Builder<false> {
    Builder::default()
}

/// A builder for configuring the logger. See also [`builder`] for a fluent API.
///
/// * `READY=false`: The initialized state. You can configure the channel, [`Filter`]s and
///   [`Append`]s. Once at least one append is configured, the builder transit to `READY=true`.
/// * `READY=true`: The builder can [build][Builder::build] a [`Logger`], or
///   [apply][Builder::apply] it as the `log` crate global logger.
#[must_use = "call `build` to create the logger or `apply` to set the global logger"]
#[derive(Debug)]
pub struct Builder<const READY: bool = true> {
    channel: String,
    filters: Vec<Filter>,
    appends: Vec<Box<dyn Append>>,

    // default to trace - we need this because the global default is OFF
    max_level: LevelFilter,
}

impl Default for Builder<false> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const READY: bool> Builder<READY> {
    /// Add an [`Append`] to the end of the chain.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Builder<true> {
        self.appends.push(append.into());

        Builder {
            channel: self.channel,
            filters: self.filters,
            appends: self.appends,
            max_level: self.max_level,
        }
    }

    /// Set the channel name stamped on every record.
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    /// Add a [`Filter`] for records bridged from the `log` crate.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Set the global maximum log level.
    ///
    /// This will be passed to [`log::set_max_level`] on [`Builder::apply`].
    pub fn max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }
}

impl Builder<false> {
    /// Create a new empty [`Builder`].
    pub fn new() -> Self {
        Self {
            channel: "app".to_string(),
            filters: vec![],
            appends: vec![],
            max_level: LevelFilter::Trace,
        }
    }
}

impl Builder<true> {
    /// Create the [`Logger`] without installing it.
    pub fn build(self) -> Logger {
        Logger::new(self.channel, self.filters, self.appends)
    }

    /// Set up the `log` crate global logger.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Errors
    ///
    /// This function will fail if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn try_apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self.build()))?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Set up the `log` crate global logger.
    ///
    /// This should be called early in the execution of a Rust program. Any log events that occur
    /// before initialization will be ignored.
    ///
    /// # Panics
    ///
    /// This function will panic if it is called more than once, or if another library has already
    /// initialized a global logger.
    pub fn apply(self) {
        self.try_apply()
            .expect("Builder::apply should not be called after the global logger initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::record::Record;

    #[derive(Debug)]
    struct Noop;

    impl Append for Noop {
        fn append(&self, _: &Record) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn test_build_logger() {
        let logger = builder()
            .channel("deploy")
            .filter(LevelFilter::Info)
            .append(Noop)
            .append(Noop)
            .build();
        assert_eq!(logger.channel(), "deploy");
        assert!(logger.info("hello").unwrap());
    }

    #[test]
    fn test_default_channel() {
        let logger = builder().append(Noop).build();
        assert_eq!(logger.channel(), "app");
    }
}
