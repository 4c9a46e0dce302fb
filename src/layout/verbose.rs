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

use std::fmt::Write;

use serde_json::Map;
use serde_json::Value;

use crate::Error;
use crate::ErrorKind;
use crate::layout::Layout;
use crate::layout::replace_newlines;
use crate::record::Record;

/// A layout that outputs the message followed by the record's context and extra data.
///
/// Output format:
///
/// ```text
/// This is a message {"whatever":"something"} {"whatever2":"something else"}
/// Nothing attached [] []
/// ```
///
/// Context and extra are rendered as compact JSON; an empty map is rendered as `[]`. The output is
/// always a single line.
///
/// # Examples
///
/// ```
/// use cliforth::layout::VerboseLayout;
///
/// let layout = VerboseLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct VerboseLayout {}

fn write_map(text: &mut String, map: &Map<String, Value>) -> Result<(), Error> {
    if map.is_empty() {
        text.push_str("[]");
        return Ok(());
    }

    let json = serde_json::to_string(map).map_err(|err| {
        Error::new(ErrorKind::Unexpected, "failed to serialize record data").with_source(err)
    })?;
    text.push_str(&json);
    Ok(())
}

impl Layout for VerboseLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();

        write!(&mut text, "{} ", record.message()).map_err(Error::from_fmt_error)?;
        write_map(&mut text, record.context())?;
        text.push(' ');
        write_map(&mut text, record.extra())?;

        Ok(replace_newlines(&text).into_bytes())
    }
}
