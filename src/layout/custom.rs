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

use std::fmt::Debug;
use std::fmt::Formatter;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

type FormatFunction = dyn Fn(&Record) -> Result<String, Error> + Send + Sync + 'static;

/// A layout that you can pass the custom layout function.
///
/// The custom layout function accepts [`&Record`][Record] and returns the formatted message. For
/// example:
///
/// ```rust
/// use cliforth::layout::CustomLayout;
/// use cliforth::record::Record;
///
/// let layout = CustomLayout::new(|record: &Record| {
///     Ok(format!("[{}] {}", record.channel(), record.message()))
/// });
/// ```
pub struct CustomLayout {
    f: Box<FormatFunction>,
}

impl Debug for CustomLayout {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "CustomLayout {{ ... }}")
    }
}

impl CustomLayout {
    /// Create a new [`CustomLayout`] from the layout function.
    pub fn new(
        layout: impl Fn(&Record) -> Result<String, Error> + Send + Sync + 'static,
    ) -> Self {
        CustomLayout {
            f: Box::new(layout),
        }
    }
}

impl Layout for CustomLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        (self.f)(record).map(String::into_bytes)
    }
}
