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

//! Mapping from severity levels to host console actions.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::MapAccess;
use serde::de::Visitor;

use crate::Error;
use crate::ErrorKind;
use crate::record::Level;

/// A host console output action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Plain output.
    Log,
    /// A warning.
    Warn,
    /// An error, optionally terminating the process.
    Error,
    /// Debug output, shown at the host's discretion.
    Debug,
}

impl Action {
    /// Return the canonical name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Log => "log",
            Action::Warn => "warn",
            Action::Error => "error",
            Action::Debug => "debug",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Action, Self::Err> {
        for (name, action) in [
            ("log", Action::Log),
            ("write", Action::Log),
            ("warn", Action::Warn),
            ("warning", Action::Warn),
            ("error", Action::Error),
            ("debug", Action::Debug),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Ok(action);
            }
        }

        Err(Error::new(
            ErrorKind::InvalidMapping,
            format!("unknown host action: {s:?}"),
        ))
    }
}

/// Whether the host should terminate the process after an error action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Exit {
    /// Return normally.
    #[default]
    Continue,
    /// Terminate with exit code 1.
    Terminate,
    /// Terminate with the given exit code if it is at least 1; otherwise return normally.
    Code(i32),
}

impl Exit {
    /// Return the exit code to terminate with, or `None` if the process should continue.
    pub fn code(&self) -> Option<i32> {
        match *self {
            Exit::Continue => None,
            Exit::Terminate => Some(1),
            Exit::Code(code) if code >= 1 => Some(code),
            Exit::Code(_) => None,
        }
    }

    /// Whether this policy requests termination.
    pub fn terminates(&self) -> bool {
        self.code().is_some()
    }
}

impl From<bool> for Exit {
    fn from(exit: bool) -> Self {
        if exit { Exit::Terminate } else { Exit::Continue }
    }
}

/// What to do with records of one severity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAction {
    action: Cow<'static, str>,
    prefix_level_name: bool,
    exit: Exit,
}

impl LevelAction {
    /// Create an entry for the given action, without level name prefix or exit.
    pub fn new(action: Action) -> Self {
        LevelAction::named(action.as_str())
    }

    /// Create an entry by action name.
    ///
    /// The name is not checked until the entry is validated, so a map loaded from configuration
    /// can carry names the host does not know.
    pub fn named(action: impl Into<Cow<'static, str>>) -> Self {
        LevelAction {
            action: action.into(),
            prefix_level_name: false,
            exit: Exit::Continue,
        }
    }

    /// Prepend `"(<levelName>) "` to the message.
    pub fn with_level_name_prefix(mut self, prefix: bool) -> Self {
        self.prefix_level_name = prefix;
        self
    }

    /// Set the exit policy.
    pub fn with_exit(mut self, exit: impl Into<Exit>) -> Self {
        self.exit = exit.into();
        self
    }

    /// The configured action name.
    pub fn action_name(&self) -> &str {
        &self.action
    }

    /// Resolve the action name to a host action.
    pub fn action(&self) -> Result<Action, Error> {
        self.action.parse()
    }

    /// Whether the level name is prepended to the message.
    pub fn prefix_level_name(&self) -> bool {
        self.prefix_level_name
    }

    /// The exit policy.
    pub fn exit(&self) -> Exit {
        self.exit
    }
}

/// A read-only mapping from severity level to [`LevelAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelActionMap {
    entries: BTreeMap<Level, LevelAction>,
}

impl Default for LevelActionMap {
    /// The standard mapping:
    ///
    /// | level     | action | prefix | exit      |
    /// |-----------|--------|--------|-----------|
    /// | DEBUG     | debug  | no     | continue  |
    /// | INFO      | log    | no     | continue  |
    /// | NOTICE    | warn   | yes    | continue  |
    /// | WARNING   | warn   | yes    | continue  |
    /// | ERROR     | error  | yes    | continue  |
    /// | CRITICAL  | error  | yes    | terminate |
    /// | ALERT     | error  | yes    | terminate |
    /// | EMERGENCY | error  | yes    | terminate |
    fn default() -> Self {
        [
            (Level::DEBUG, LevelAction::new(Action::Debug)),
            (Level::INFO, LevelAction::new(Action::Log)),
            (
                Level::NOTICE,
                LevelAction::new(Action::Warn).with_level_name_prefix(true),
            ),
            (
                Level::WARNING,
                LevelAction::new(Action::Warn).with_level_name_prefix(true),
            ),
            (
                Level::ERROR,
                LevelAction::new(Action::Error).with_level_name_prefix(true),
            ),
            (
                Level::CRITICAL,
                LevelAction::new(Action::Error)
                    .with_level_name_prefix(true)
                    .with_exit(Exit::Terminate),
            ),
            (
                Level::ALERT,
                LevelAction::new(Action::Error)
                    .with_level_name_prefix(true)
                    .with_exit(Exit::Terminate),
            ),
            (
                Level::EMERGENCY,
                LevelAction::new(Action::Error)
                    .with_level_name_prefix(true)
                    .with_exit(Exit::Terminate),
            ),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<(Level, LevelAction)> for LevelActionMap {
    fn from_iter<T: IntoIterator<Item = (Level, LevelAction)>>(iter: T) -> Self {
        LevelActionMap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl LevelActionMap {
    /// Look up the entry for a level.
    pub fn get(&self, level: Level) -> Option<&LevelAction> {
        self.entries.get(&level)
    }

    /// Iterate over all entries, in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &LevelAction)> {
        self.entries.iter().map(|(level, entry)| (*level, entry))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the entry for `level`. See [`validate_mapping`].
    pub fn validate(&self, level: Level, level_name: &str) -> Result<Action, Error> {
        validate_mapping(self, level, level_name)
    }

    /// Levels whose entry passes validation. See [`supported_levels`].
    pub fn supported_levels(&self) -> BTreeSet<Level> {
        supported_levels(self)
    }

    /// Load a map from JSON.
    ///
    /// Keys are level names or integer codes. Values are objects with an `action` name, an
    /// optional `prefix_level_name` flag and an optional `exit`, either a boolean or an exit
    /// code:
    ///
    /// ```
    /// use cliforth::mapping::LevelActionMap;
    ///
    /// let map = LevelActionMap::from_json(
    ///     r#"{
    ///         "info": { "action": "log" },
    ///         "warning": { "action": "warn", "prefix_level_name": true },
    ///         "500": { "action": "error", "prefix_level_name": true, "exit": 2 }
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(map.len(), 3);
    /// ```
    ///
    /// A level may appear only once, by name or by code; repeats fail with
    /// [`ErrorKind::InvalidMapping`]. Entries are not validated here; use
    /// [`LevelActionMap::validate`] or [`LevelActionMap::supported_levels`] to check them.
    pub fn from_json(json: &str) -> Result<LevelActionMap, Error> {
        let RawLevelActions(raw) = serde_json::from_str(json).map_err(|err| {
            Error::new(ErrorKind::Unexpected, "failed to parse level action map").with_source(err)
        })?;

        let mut entries = BTreeMap::new();
        for (key, raw) in raw {
            let level = key.parse::<Level>()?;
            let exit = match raw.exit {
                None => Exit::Continue,
                Some(RawExit::Flag(flag)) => Exit::from(flag),
                Some(RawExit::Code(code)) => Exit::Code(code),
            };
            let entry = LevelAction::named(raw.action)
                .with_level_name_prefix(raw.prefix_level_name)
                .with_exit(exit);
            if entries.insert(level, entry).is_some() {
                return Err(Error::new(
                    ErrorKind::InvalidMapping,
                    "duplicate level in level action map",
                )
                .with_context("level", level));
            }
        }
        Ok(LevelActionMap { entries })
    }
}

// Keeps every key in document order so repeated keys reach the duplicate check.
struct RawLevelActions(Vec<(String, RawLevelAction)>);

impl<'de> Deserialize<'de> for RawLevelActions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawLevelActionsVisitor)
    }
}

struct RawLevelActionsVisitor;

impl<'de> Visitor<'de> for RawLevelActionsVisitor {
    type Value = RawLevelActions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from level to level action")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, RawLevelAction>()? {
            entries.push((key, value));
        }
        Ok(RawLevelActions(entries))
    }
}

#[derive(Deserialize)]
struct RawLevelAction {
    action: String,
    #[serde(default)]
    prefix_level_name: bool,
    #[serde(default)]
    exit: Option<RawExit>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExit {
    Flag(bool),
    Code(i32),
}

/// Return the standard level action map.
pub fn default_level_action_map() -> LevelActionMap {
    LevelActionMap::default()
}

/// Check that `map` has a well-formed entry for `level`, returning the resolved action.
///
/// # Errors
///
/// Fails with [`ErrorKind::InvalidMapping`] when:
///
/// * there is no entry for `level`;
/// * the entry's action name is not a host action;
/// * the entry requests termination on an action other than [`Action::Error`].
pub fn validate_mapping(
    map: &LevelActionMap,
    level: Level,
    level_name: &str,
) -> Result<Action, Error> {
    let invalid = |message: &str| {
        Error::new(ErrorKind::InvalidMapping, message)
            .with_context("level", level.code())
            .with_context("level_name", level_name)
    };

    let Some(entry) = map.get(level) else {
        return Err(invalid("no entry for level"));
    };

    let action = entry
        .action()
        .map_err(|err| invalid("unknown host action").with_source(err))?;

    if entry.exit().terminates() && action != Action::Error {
        return Err(invalid("exit is only allowed on the error action")
            .with_context("action", action));
    }

    Ok(action)
}

/// Return the levels of `map` whose entry passes [`validate_mapping`].
///
/// Invalid entries are silently left out.
pub fn supported_levels(map: &LevelActionMap) -> BTreeSet<Level> {
    map.iter()
        .filter(|(level, _)| {
            let name = level.name().unwrap_or_default();
            validate_mapping(map, *level, name).is_ok()
        })
        .map(|(level, _)| level)
        .collect()
}
