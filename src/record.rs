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

//! Log record and metadata.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde_json::Map;
use serde_json::Value;

use crate::Error;
use crate::ErrorKind;

/// A severity level, represented by its integer code.
///
/// Codes are ordered: a greater code is more severe. The eight standard levels are exposed as
/// associated constants; any other code is representable but unknown to the default mapping.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u16);

impl Level {
    /// Detailed debug information.
    pub const DEBUG: Level = Level(100);
    /// Interesting events.
    pub const INFO: Level = Level(200);
    /// Normal but significant events.
    pub const NOTICE: Level = Level(250);
    /// Exceptional occurrences that are not errors.
    pub const WARNING: Level = Level(300);
    /// Runtime errors that do not require immediate action.
    pub const ERROR: Level = Level(400);
    /// Critical conditions.
    pub const CRITICAL: Level = Level(500);
    /// Action must be taken immediately.
    pub const ALERT: Level = Level(550);
    /// The system is unusable.
    pub const EMERGENCY: Level = Level(600);

    /// All standard levels, from least to most severe.
    pub const STANDARD: [Level; 8] = [
        Level::DEBUG,
        Level::INFO,
        Level::NOTICE,
        Level::WARNING,
        Level::ERROR,
        Level::CRITICAL,
        Level::ALERT,
        Level::EMERGENCY,
    ];

    /// Create a level from its integer code.
    pub const fn from_code(code: u16) -> Level {
        Level(code)
    }

    /// Return the integer code of the level.
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Return the standard name of the level, or `None` for a non-standard code.
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Level::DEBUG => Some("DEBUG"),
            Level::INFO => Some("INFO"),
            Level::NOTICE => Some("NOTICE"),
            Level::WARNING => Some("WARNING"),
            Level::ERROR => Some("ERROR"),
            Level::CRITICAL => Some("CRITICAL"),
            Level::ALERT => Some("ALERT"),
            Level::EMERGENCY => Some("EMERGENCY"),
            _ => None,
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.pad(name),
            None => write!(f, "Level({})", self.0),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.pad(name),
            None => f.pad(&self.0.to_string()),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARNING,
            log::Level::Info => Level::INFO,
            log::Level::Debug | log::Level::Trace => Level::DEBUG,
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u16>() {
            return Ok(Level(code));
        }

        for (name, level) in [
            ("debug", Level::DEBUG),
            ("info", Level::INFO),
            ("notice", Level::NOTICE),
            ("warning", Level::WARNING),
            ("warn", Level::WARNING),
            ("error", Level::ERROR),
            ("critical", Level::CRITICAL),
            ("crit", Level::CRITICAL),
            ("alert", Level::ALERT),
            ("emergency", Level::EMERGENCY),
            ("emerg", Level::EMERGENCY),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(level);
            }
        }

        Err(Error::new(ErrorKind::Unexpected, format!("malformed level: {s:?}")))
    }
}

/// Metadata about a log message.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Metadata<'a> {
    level: Level,
    channel: &'a str,
}

impl<'a> Metadata<'a> {
    /// Create a metadata for the given level and channel.
    pub fn new(level: Level, channel: &'a str) -> Self {
        Metadata { level, channel }
    }

    /// Get the level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Get the channel.
    pub fn channel(&self) -> &'a str {
        self.channel
    }
}

impl From<Level> for Metadata<'static> {
    fn from(level: Level) -> Self {
        Metadata::new(level, "")
    }
}

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: SystemTime,

    // the metadata
    metadata: Metadata<'a>,
    level_name: Cow<'a, str>,

    // the payload
    message: Cow<'a, str>,

    // structural logging
    context: Map<String, Value>,
    extra: Map<String, Value>,
}

impl<'a> Record<'a> {
    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// Metadata about the log directive.
    pub fn metadata(&self) -> &Metadata<'a> {
        &self.metadata
    }

    /// The severity level of the message.
    pub fn level(&self) -> Level {
        self.metadata.level()
    }

    /// The name of the severity level.
    ///
    /// Defaults to [`Level::name`], or the empty string for a non-standard level.
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// The channel the record was logged to.
    pub fn channel(&self) -> &'a str {
        self.metadata.channel()
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Contextual data supplied with the message.
    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// Extra data attached to the record after it was logged.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
    level_name: Option<Cow<'a, str>>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                metadata: Metadata::new(Level::INFO, ""),
                level_name: Cow::Borrowed(""),
                message: Cow::Borrowed(""),
                context: Map::new(),
                extra: Map::new(),
            },
            level_name: None,
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.metadata.level = level;
        self
    }

    /// Set [`level_name`](Record::level_name), overriding the standard name.
    pub fn level_name(mut self, name: impl Into<Cow<'a, str>>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// Set [`channel`](Record::channel).
    pub fn channel(mut self, channel: &'a str) -> Self {
        self.record.metadata.channel = channel;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Add one entry to [`context`](Record::context).
    pub fn context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.context.insert(key.into(), value.into());
        self
    }

    /// Replace the whole [`context`](Record::context).
    pub fn context_map(mut self, context: Map<String, Value>) -> Self {
        self.record.context = context;
        self
    }

    /// Add one entry to [`extra`](Record::extra).
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.extra.insert(key.into(), value.into());
        self
    }

    /// Set the observed time.
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Invoke the builder and return a `Record`
    pub fn build(self) -> Record<'a> {
        let mut record = self.record;
        record.level_name = match self.level_name {
            Some(name) => name,
            None => Cow::Borrowed(record.metadata.level.name().unwrap_or_default()),
        };
        record
    }
}
