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

use crate::Error;
use crate::layout::Layout;
use crate::layout::replace_newlines;
use crate::record::Record;

/// A layout that outputs the message only.
///
/// Output format:
///
/// ```text
/// This is a message
/// ```
///
/// Line breaks in the message are replaced by spaces.
///
/// # Examples
///
/// ```
/// use cliforth::layout::MessageLayout;
///
/// let layout = MessageLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct MessageLayout {}

impl Layout for MessageLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        Ok(replace_newlines(record.message()).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only() {
        let record = Record::builder()
            .message("This is a message")
            .context("whatever", "something")
            .build();
        let bytes = MessageLayout::default().format(&record).unwrap();
        assert_eq!(bytes, b"This is a message");
    }

    #[test]
    fn test_single_line() {
        let record = Record::builder().message("one\ntwo\r\nthree\rfour").build();
        let bytes = MessageLayout::default().format(&record).unwrap();
        assert_eq!(bytes, b"one two three four");
    }
}
