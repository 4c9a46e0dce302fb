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

//! Output routines of the host command-line tool.

use std::fmt;

use crate::Error;
use crate::mapping::Exit;

#[cfg(feature = "colored")]
mod color;
mod recording;
mod terminal;

#[cfg(feature = "colored")]
pub use self::color::ActionColor;
pub use self::recording::ConsoleCall;
pub use self::recording::Recording;
pub use self::terminal::Terminal;

/// The console output actions a host command-line tool exposes.
pub trait Console: fmt::Debug + Send + Sync + 'static {
    /// Print a plain message.
    fn log(&self, message: &str) -> Result<(), Error>;

    /// Print a warning.
    fn warn(&self, message: &str) -> Result<(), Error>;

    /// Print a debug message. The host decides whether debug output is shown.
    fn debug(&self, message: &str) -> Result<(), Error>;

    /// Print an error, then terminate the process if `exit` requests it.
    ///
    /// Returns normally when `exit` does not request termination.
    fn error(&self, message: &str, exit: Exit) -> Result<(), Error>;
}

impl<T: Console> From<T> for Box<dyn Console> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
