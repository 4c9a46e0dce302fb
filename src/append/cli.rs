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

use std::collections::BTreeSet;

use crate::Error;
use crate::ErrorKind;
use crate::append::Append;
use crate::console::Console;
use crate::console::Terminal;
use crate::env::HostEnvironment;
use crate::layout::Layout;
use crate::layout::MessageLayout;
use crate::layout::VerboseLayout;
use crate::mapping::Action;
use crate::mapping::LevelActionMap;
use crate::mapping::validate_mapping;
use crate::record::Level;
use crate::record::Metadata;
use crate::record::Record;

/// An appender that forwards log records to the output actions of a host command-line tool.
///
/// Each record's level is looked up in a [`LevelActionMap`] to pick the [`Console`] action to
/// invoke, whether to prefix the message with the level name, and whether the host should
/// terminate the process afterwards. With the default map, `CRITICAL` and above terminate.
///
/// `DEBUG` records are always handled regardless of the configured threshold; the host console
/// decides whether debug output is shown.
///
/// # Examples
///
/// ```
/// use cliforth::append::CliAppend;
/// use cliforth::console::Recording;
/// use cliforth::env::HostEnvironment;
/// use cliforth::record::Level;
///
/// let env = HostEnvironment::new(true, false);
/// let append = CliAppend::builder()
///     .level(Level::INFO)
///     .console(Recording::default())
///     .build(&env)
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct CliAppend {
    level: Level,
    bubble: bool,
    verbose: bool,
    mapping: LevelActionMap,
    supported: BTreeSet<Level>,
    layout: Box<dyn Layout>,
    console: Box<dyn Console>,
}

impl CliAppend {
    /// Create a new builder with the default configuration.
    pub fn builder() -> CliAppendBuilder {
        CliAppendBuilder::default()
    }

    /// Create an appender with the default configuration, printing to the [`Terminal`].
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Environment`] if `env` is not inside the host.
    pub fn new(env: &HostEnvironment) -> Result<CliAppend, Error> {
        CliAppend::builder().build(env)
    }

    /// The minimum level handled, except for `DEBUG`.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether the verbose layout is the default.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The level action map in use.
    pub fn mapping(&self) -> &LevelActionMap {
        &self.mapping
    }

    fn dispatch(&self, record: &Record, message: String) -> Result<(), Error> {
        let level = record.level();
        let level_name = record.level_name();

        let Some(entry) = self.mapping.get(level) else {
            return Err(Error::new(ErrorKind::UnmappedLevel, "unsupported level")
                .with_context("level", level.code())
                .with_context("level_name", level_name));
        };
        let action = validate_mapping(&self.mapping, level, level_name)?;

        let message = if entry.prefix_level_name() {
            format!("({level_name}) {message}")
        } else {
            message
        };

        match action {
            Action::Log => self.console.log(&message),
            Action::Warn => self.console.warn(&message),
            Action::Debug => self.console.debug(&message),
            Action::Error => self.console.error(&message, entry.exit()),
        }
    }
}

impl Append for CliAppend {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let level = metadata.level();

        // the host console gates debug output itself
        if level == Level::DEBUG {
            return true;
        }

        self.supported.contains(&level) && level >= self.level
    }

    fn append(&self, record: &Record) -> Result<(), Error> {
        let bytes = self.layout.format(record)?;
        let message = String::from_utf8_lossy(&bytes).into_owned();
        self.dispatch(record, message)
    }

    fn bubble(&self) -> bool {
        self.bubble
    }
}

/// A builder to configure and create a [`CliAppend`].
#[derive(Debug)]
pub struct CliAppendBuilder {
    level: Level,
    bubble: bool,
    verbose: bool,
    mapping: Option<LevelActionMap>,
    layout: Option<Box<dyn Layout>>,
    console: Option<Box<dyn Console>>,
}

impl Default for CliAppendBuilder {
    fn default() -> Self {
        CliAppendBuilder {
            level: Level::WARNING,
            bubble: true,
            verbose: false,
            mapping: None,
            layout: None,
            console: None,
        }
    }
}

impl CliAppendBuilder {
    /// Set the minimum level handled.
    ///
    /// Default to [`Level::WARNING`]. `DEBUG` records are handled regardless.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set whether handled records are passed on to later appenders.
    ///
    /// Default to `true`.
    pub fn bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    /// Request the verbose layout, which appends the record's context and extra data.
    ///
    /// The verbose layout is also used when the host runs in debug mode. Ignored if a custom
    /// layout is set.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set a custom level action map.
    ///
    /// Default to [`LevelActionMap::default`]. Entries that fail validation are never handled.
    pub fn mapping(mut self, mapping: LevelActionMap) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Set a custom layout instead of the message or verbose layout.
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Set the console to write to.
    ///
    /// Default to a [`Terminal`] configured from the host environment.
    pub fn console(mut self, console: impl Into<Box<dyn Console>>) -> Self {
        self.console = Some(console.into());
        self
    }

    /// Build the [`CliAppend`].
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Environment`] if `env` is not inside the host.
    pub fn build(self, env: &HostEnvironment) -> Result<CliAppend, Error> {
        if !env.in_host() {
            return Err(Error::new(
                ErrorKind::Environment,
                "not running inside the host command-line tool",
            ));
        }

        let verbose = self.verbose || env.debug();
        let layout = self.layout.unwrap_or_else(|| {
            if verbose {
                Box::new(VerboseLayout::default())
            } else {
                Box::new(MessageLayout::default())
            }
        });
        let console = self
            .console
            .unwrap_or_else(|| Box::new(Terminal::new(env)));
        let mapping = self.mapping.unwrap_or_default();
        let supported = mapping.supported_levels();

        Ok(CliAppend {
            level: self.level,
            bubble: self.bubble,
            verbose,
            mapping,
            supported,
            layout,
            console,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleCall;
    use crate::console::Recording;
    use crate::layout::CustomLayout;
    use crate::mapping::Exit;
    use crate::mapping::LevelAction;

    fn in_host() -> HostEnvironment {
        HostEnvironment::new(true, false)
    }

    fn build(level: Level) -> (CliAppend, Recording) {
        let console = Recording::default();
        let append = CliAppend::builder()
            .level(level)
            .console(console.clone())
            .build(&in_host())
            .unwrap();
        (append, console)
    }

    fn record(level: Level) -> Record<'static> {
        Record::builder()
            .level(level)
            .message("This is the end...")
            .build()
    }

    #[test]
    fn test_build_outside_host() {
        let err = CliAppend::builder()
            .console(Recording::default())
            .build(&HostEnvironment::new(false, true))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Environment);

        let err = CliAppend::new(&HostEnvironment::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Environment);
    }

    #[test]
    fn test_defaults() {
        let append = CliAppend::new(&in_host()).unwrap();
        assert_eq!(append.level(), Level::WARNING);
        assert!(append.bubble());
        assert!(!append.verbose());
        assert_eq!(append.mapping(), &LevelActionMap::default());
    }

    #[test]
    fn test_verbose_from_host_debug() {
        let append = CliAppend::builder()
            .console(Recording::default())
            .build(&HostEnvironment::new(true, true))
            .unwrap();
        assert!(append.verbose());

        let append = CliAppend::builder()
            .verbose(true)
            .console(Recording::default())
            .build(&in_host())
            .unwrap();
        assert!(append.verbose());
    }

    #[test]
    fn test_enabled_all_standard_levels() {
        let (append, _) = build(Level::DEBUG);
        for level in Level::STANDARD {
            assert!(append.enabled(&Metadata::from(level)), "{level}");
        }
        assert!(!append.enabled(&Metadata::from(Level::from_code(999))));
    }

    #[test]
    fn test_enabled_respects_threshold_except_debug() {
        let (append, _) = build(Level::ERROR);
        assert!(append.enabled(&Metadata::from(Level::DEBUG)));
        assert!(!append.enabled(&Metadata::from(Level::INFO)));
        assert!(!append.enabled(&Metadata::from(Level::WARNING)));
        assert!(append.enabled(&Metadata::from(Level::ERROR)));
        assert!(append.enabled(&Metadata::from(Level::EMERGENCY)));

        let (append, _) = build(Level::from_code(u16::MAX));
        assert!(append.enabled(&Metadata::from(Level::DEBUG)));
    }

    #[test]
    fn test_enabled_skips_invalid_entries() {
        let mapping = [
            (Level::INFO, LevelAction::new(Action::Log)),
            (Level::NOTICE, LevelAction::named("shout")),
        ]
        .into_iter()
        .collect();
        let append = CliAppend::builder()
            .level(Level::DEBUG)
            .mapping(mapping)
            .console(Recording::default())
            .build(&in_host())
            .unwrap();
        assert!(append.enabled(&Metadata::from(Level::INFO)));
        assert!(!append.enabled(&Metadata::from(Level::NOTICE)));
        assert!(!append.enabled(&Metadata::from(Level::WARNING)));
    }

    #[test]
    fn test_dispatch_default_mapping() {
        let (append, console) = build(Level::DEBUG);
        for level in [
            Level::DEBUG,
            Level::INFO,
            Level::NOTICE,
            Level::WARNING,
            Level::ERROR,
        ] {
            append.append(&record(level)).unwrap();
        }

        let message = |action, message: &str, exit| ConsoleCall {
            action,
            message: message.to_string(),
            exit,
        };
        assert_eq!(
            console.calls(),
            vec![
                message(Action::Debug, "This is the end...", Exit::Continue),
                message(Action::Log, "This is the end...", Exit::Continue),
                message(Action::Warn, "(NOTICE) This is the end...", Exit::Continue),
                message(Action::Warn, "(WARNING) This is the end...", Exit::Continue),
                message(Action::Error, "(ERROR) This is the end...", Exit::Continue),
            ]
        );
    }

    #[test]
    fn test_dispatch_terminates_from_critical() {
        let (append, console) = build(Level::DEBUG);
        for level in [Level::CRITICAL, Level::ALERT, Level::EMERGENCY] {
            let err = append.append(&record(level)).unwrap_err();
            assert_eq!(err.exit_code(), Some(1), "{level}");
        }
        assert_eq!(
            console.messages(Action::Error),
            vec![
                "(CRITICAL) This is the end...".to_string(),
                "(ALERT) This is the end...".to_string(),
                "(EMERGENCY) This is the end...".to_string(),
            ]
        );
    }

    #[test]
    fn test_dispatch_unmapped_level() {
        let (append, console) = build(Level::DEBUG);
        let err = append.append(&record(Level::from_code(999))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnmappedLevel);
        assert!(console.calls().is_empty());
    }

    #[test]
    fn test_dispatch_invalid_mapping() {
        let mapping = [(Level::INFO, LevelAction::new(Action::Warn).with_exit(true))]
            .into_iter()
            .collect();
        let console = Recording::default();
        let append = CliAppend::builder()
            .mapping(mapping)
            .console(console.clone())
            .build(&in_host())
            .unwrap();
        let err = append.append(&record(Level::INFO)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMapping);
        assert!(console.calls().is_empty());
    }

    #[test]
    fn test_custom_level_name_in_prefix() {
        let mapping = [(
            Level::from_code(700),
            LevelAction::new(Action::Error)
                .with_level_name_prefix(true)
                .with_exit(Exit::Code(3)),
        )]
        .into_iter()
        .collect();
        let console = Recording::default();
        let append = CliAppend::builder()
            .level(Level::DEBUG)
            .mapping(mapping)
            .console(console.clone())
            .build(&in_host())
            .unwrap();

        let record = Record::builder()
            .level(Level::from_code(700))
            .level_name("DOOM")
            .message("goodbye")
            .build();
        assert!(append.enabled(record.metadata()));
        let err = append.append(&record).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exit(3));
        assert_eq!(console.messages(Action::Error), vec!["(DOOM) goodbye".to_string()]);
    }

    #[test]
    fn test_layout_selection() {
        let record = Record::builder()
            .level(Level::INFO)
            .message("This is a message")
            .context("whatever", "something")
            .extra("whatever2", "something else")
            .build();

        let standard = Recording::default();
        CliAppend::builder()
            .level(Level::DEBUG)
            .console(standard.clone())
            .build(&in_host())
            .unwrap()
            .append(&record)
            .unwrap();

        let verbose = Recording::default();
        CliAppend::builder()
            .level(Level::DEBUG)
            .verbose(true)
            .console(verbose.clone())
            .build(&in_host())
            .unwrap()
            .append(&record)
            .unwrap();

        let custom = Recording::default();
        CliAppend::builder()
            .level(Level::DEBUG)
            .verbose(true)
            .layout(CustomLayout::new(|record: &Record| {
                Ok(record.message().to_uppercase())
            }))
            .console(custom.clone())
            .build(&in_host())
            .unwrap()
            .append(&record)
            .unwrap();

        assert_eq!(
            standard.messages(Action::Log),
            vec!["This is a message".to_string()]
        );
        assert_eq!(
            verbose.messages(Action::Log),
            vec![
                r#"This is a message {"whatever":"something"} {"whatever2":"something else"}"#
                    .to_string()
            ]
        );
        assert_eq!(
            custom.messages(Action::Log),
            vec!["THIS IS A MESSAGE".to_string()]
        );
    }
}
