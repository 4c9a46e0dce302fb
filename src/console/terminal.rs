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

use std::io::Write;

use crate::Error;
#[cfg(feature = "colored")]
use crate::console::ActionColor;
use crate::console::Console;
use crate::env::HostEnvironment;
use crate::mapping::Action;
use crate::mapping::Exit;

/// A console that prints to the standard streams of the current process.
///
/// Output format:
///
/// ```text
/// Plain messages go to stdout.
/// Warning: (WARNING) Disk almost full
/// Debug: Loaded 3 plugins
/// Error: (CRITICAL) Database unreachable
/// ```
///
/// Everything but plain messages goes to stderr. Debug messages are dropped unless the host runs
/// in debug mode. An error whose exit policy requests termination exits the process with that
/// code after printing.
///
/// With the `colored` feature, the labels are colored; see [`ActionColor`].
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    debug: bool,
    #[cfg_attr(not(feature = "colored"), allow(dead_code))]
    no_color: bool,
    #[cfg(feature = "colored")]
    colors: ActionColor,
}

impl Terminal {
    /// Create a terminal console that shows debug output iff the host runs in debug mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliforth::console::Terminal;
    /// use cliforth::env::HostEnvironment;
    ///
    /// let terminal = Terminal::new(&HostEnvironment::new(true, true));
    /// ```
    pub fn new(env: &HostEnvironment) -> Self {
        Terminal::default().with_debug(env.debug())
    }

    /// Show or drop debug output.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Disable colored labels.
    ///
    /// Has no effect without the `colored` feature.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Set the label colors.
    #[cfg(feature = "colored")]
    pub fn with_colors(mut self, colors: ActionColor) -> Self {
        self.colors = colors;
        self
    }

    #[cfg(feature = "colored")]
    fn label(&self, action: Action, label: &str) -> String {
        self.colors
            .colorize_label(self.no_color, action, label)
            .to_string()
    }

    #[cfg(not(feature = "colored"))]
    fn label(&self, _: Action, label: &str) -> String {
        label.to_string()
    }

    fn write_stderr(&self, action: Action, label: &str, message: &str) -> Result<(), Error> {
        let label = self.label(action, label);
        writeln!(std::io::stderr(), "{label} {message}").map_err(Error::from_io_error)
    }
}

impl Console for Terminal {
    fn log(&self, message: &str) -> Result<(), Error> {
        writeln!(std::io::stdout(), "{message}").map_err(Error::from_io_error)
    }

    fn warn(&self, message: &str) -> Result<(), Error> {
        self.write_stderr(Action::Warn, "Warning:", message)
    }

    fn debug(&self, message: &str) -> Result<(), Error> {
        if !self.debug {
            return Ok(());
        }
        self.write_stderr(Action::Debug, "Debug:", message)
    }

    fn error(&self, message: &str, exit: Exit) -> Result<(), Error> {
        self.write_stderr(Action::Error, "Error:", message)?;

        if let Some(code) = exit.code() {
            let _ = std::io::stdout().flush();
            let _ = std::io::stderr().flush();
            std::process::exit(code);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        let terminal = Terminal::default().no_color(true);
        assert_eq!(terminal.label(Action::Warn, "Warning:"), "Warning:");
        assert_eq!(terminal.label(Action::Error, "Error:"), "Error:");
    }

    #[cfg(not(feature = "colored"))]
    #[test]
    fn test_labels_are_plain_without_colors() {
        let terminal = Terminal::default();
        assert_eq!(terminal.label(Action::Debug, "Debug:"), "Debug:");
    }

    #[test]
    fn test_non_terminating_error_returns() {
        let terminal = Terminal::default().no_color(true);
        terminal.error("(ERROR) recoverable", Exit::Continue).unwrap();
        terminal.error("(ERROR) zero code", Exit::Code(0)).unwrap();
    }

    #[test]
    fn test_debug_follows_host_environment() {
        assert!(!Terminal::new(&HostEnvironment::new(true, false)).debug);
        assert!(Terminal::new(&HostEnvironment::new(true, true)).debug);
        Terminal::default().debug("dropped").unwrap();
    }
}
