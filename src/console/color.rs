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

//! Color utilities.

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::mapping::Action;

/// Colors for the labels the terminal prints before messages.
#[derive(Debug, Clone)]
pub struct ActionColor {
    /// Color for the `Warning:` label.
    pub warn: Color,
    /// Color for the `Error:` label.
    pub error: Color,
    /// Color for the `Debug:` label.
    pub debug: Color,
}

impl Default for ActionColor {
    fn default() -> Self {
        Self {
            warn: Color::Yellow,
            error: Color::Red,
            debug: Color::Blue,
        }
    }
}

impl ActionColor {
    /// Colorize the label of an action.
    pub fn colorize_label(&self, no_color: bool, action: Action, label: &str) -> ColoredString {
        let color = match action {
            Action::Warn => Some(self.warn),
            Action::Error => Some(self.error),
            Action::Debug => Some(self.debug),
            Action::Log => None,
        };

        match color {
            Some(color) if !no_color => ColoredString::from(label).color(color),
            _ => ColoredString::from(label),
        }
    }
}
