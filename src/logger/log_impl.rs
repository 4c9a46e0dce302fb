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

use std::borrow::Cow;
use std::io::Write;

use serde_json::Map;
use serde_json::Value;

use crate::Append;
use crate::Error;
use crate::filter::Filter;
use crate::filter::FilterResult;
use crate::record::Level;
use crate::record::Metadata;
use crate::record::Record;

/// A logger that passes records down an ordered chain of appenders.
///
/// Each appender whose [`enabled`](Append::enabled) accepts the record gets it, in the order the
/// appenders were added. Once an appender that does not [`bubble`](Append::bubble) has handled a
/// record, the appenders after it do not see it.
///
/// The logger also implements [`log::Log`], so it can serve `log` crate macros. Filters only apply
/// to those bridged records.
#[derive(Debug)]
pub struct Logger {
    channel: String,
    filters: Vec<Filter>,
    appends: Vec<Box<dyn Append>>,
}

impl Logger {
    pub(super) fn new(
        channel: String,
        filters: Vec<Filter>,
        appends: Vec<Box<dyn Append>>,
    ) -> Self {
        debug_assert!(
            !appends.is_empty(),
            "A Logger must have at least one append"
        );

        Self {
            channel,
            filters,
            appends,
        }
    }

    /// The channel name stamped on records created by this logger.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Pass a record down the appender chain.
    ///
    /// Returns whether any appender handled the record.
    ///
    /// # Errors
    ///
    /// Returns the first error an appender fails with; later appenders are skipped.
    pub fn handle(&self, record: &Record) -> Result<bool, Error> {
        let mut handled = false;

        for append in &self.appends {
            if !append.enabled(record.metadata()) {
                continue;
            }

            handled = true;
            append.append(record)?;
            if !append.bubble() {
                break;
            }
        }

        Ok(handled)
    }

    /// Log a message with context at the given level.
    pub fn log<'a>(
        &'a self,
        level: Level,
        message: impl Into<Cow<'a, str>>,
        context: Map<String, Value>,
    ) -> Result<bool, Error> {
        let record = Record::builder()
            .channel(&self.channel)
            .level(level)
            .message(message)
            .context_map(context)
            .build();
        self.handle(&record)
    }

    /// Log a message at [`Level::DEBUG`].
    pub fn debug<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::DEBUG, message, Map::new())
    }

    /// Log a message at [`Level::INFO`].
    pub fn info<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::INFO, message, Map::new())
    }

    /// Log a message at [`Level::NOTICE`].
    pub fn notice<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::NOTICE, message, Map::new())
    }

    /// Log a message at [`Level::WARNING`].
    pub fn warning<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::WARNING, message, Map::new())
    }

    /// Log a message at [`Level::ERROR`].
    pub fn error<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::ERROR, message, Map::new())
    }

    /// Log a message at [`Level::CRITICAL`].
    pub fn critical<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::CRITICAL, message, Map::new())
    }

    /// Log a message at [`Level::ALERT`].
    pub fn alert<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::ALERT, message, Map::new())
    }

    /// Log a message at [`Level::EMERGENCY`].
    pub fn emergency<'a>(&'a self, message: impl Into<Cow<'a, str>>) -> Result<bool, Error> {
        self.log(Level::EMERGENCY, message, Map::new())
    }

    /// Flush all appenders.
    pub fn flush(&self) -> Result<(), Error> {
        for append in &self.appends {
            append.flush()?;
        }
        Ok(())
    }

    fn bridged_enabled(&self, metadata: &log::Metadata) -> bool {
        for filter in &self.filters {
            match filter.enabled(metadata) {
                FilterResult::Reject => return false,
                FilterResult::Accept => break,
                FilterResult::Neutral => {}
            }
        }

        let metadata = Metadata::new(metadata.level().into(), &self.channel);
        self.appends.iter().any(|append| append.enabled(&metadata))
    }

    fn bridged_matches(&self, record: &log::Record) -> bool {
        for filter in &self.filters {
            match filter.matches(record) {
                FilterResult::Reject => return false,
                FilterResult::Accept => return true,
                FilterResult::Neutral => {}
            }
        }

        true
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.bridged_enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.bridged_matches(record) {
            return;
        }

        let record = Record::builder()
            .channel(&self.channel)
            .level(record.level().into())
            .message(record.args().to_string())
            .context_map(collect_kvs(record.key_values()))
            .extra("target", record.target())
            .build();

        if let Err(err) = self.handle(&record) {
            handle_log_error(&record, err);
        }
    }

    fn flush(&self) {
        if let Err(err) = Logger::flush(self) {
            handle_flush_error(err);
        }
    }
}

fn collect_kvs(kv: &dyn log::kv::Source) -> Map<String, Value> {
    let mut collector = KvCollector { kvs: Map::new() };
    kv.visit(&mut collector).ok();
    collector.kvs
}

struct KvCollector {
    kvs: Map<String, Value>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        let value = if let Some(v) = value.to_bool() {
            Value::from(v)
        } else if let Some(v) = value.to_i64() {
            Value::from(v)
        } else if let Some(v) = value.to_u64() {
            Value::from(v)
        } else if let Some(v) = value.to_f64() {
            Value::from(v)
        } else {
            Value::from(value.to_string())
        };
        self.kvs.insert(key.to_string(), value);
        Ok(())
    }
}

fn handle_log_error(record: &Record, error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error:?}
"###,
        message = record.message(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        message = record.message(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use log::Log;

    use super::*;

    #[derive(Debug)]
    struct Counting {
        bubble: bool,
        min: Option<Level>,
        seen: Arc<AtomicUsize>,
    }

    impl Append for Counting {
        fn enabled(&self, metadata: &Metadata) -> bool {
            self.min.is_none_or(|min| metadata.level() >= min)
        }

        fn append(&self, _: &Record) -> Result<(), Error> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn bubble(&self) -> bool {
            self.bubble
        }
    }

    fn counting(bubble: bool, min: Option<Level>) -> (Counting, Arc<AtomicUsize>) {
        let seen = Arc::new(AtomicUsize::new(0));
        let append = Counting {
            bubble,
            min,
            seen: seen.clone(),
        };
        (append, seen)
    }

    #[test]
    fn test_bubble_stops_propagation() {
        let (first, first_seen) = counting(false, Some(Level::ERROR));
        let (second, second_seen) = counting(true, None);
        let logger = Logger::new("app".to_string(), vec![], vec![first.into(), second.into()]);

        // not handled by the first, so it reaches the second
        assert!(logger.info("hello").unwrap());
        // handled by the first, which does not bubble
        assert!(logger.error("boom").unwrap());

        assert_eq!(first_seen.load(Ordering::SeqCst), 1);
        assert_eq!(second_seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unhandled_record() {
        let (append, seen) = counting(true, Some(Level::ERROR));
        let logger = Logger::new("app".to_string(), vec![], vec![append.into()]);
        assert!(!logger.notice("ignored").unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_log_borrowed_message() {
        let (append, seen) = counting(true, None);
        let logger = Logger::new("app".to_string(), vec![], vec![append.into()]);

        let message = format!("deployed {} files", 3);
        let mut context = Map::new();
        context.insert("files".to_string(), Value::from(3));
        assert!(logger.log(Level::NOTICE, message.as_str(), context).unwrap());
        assert!(logger.warning(message.as_str()).unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_bridge_filters() {
        let (append, seen) = counting(true, None);
        let logger = Logger::new(
            "app".to_string(),
            vec![Filter::from(log::LevelFilter::Warn)],
            vec![append.into()],
        );

        let info = log::Metadata::builder().level(log::Level::Info).build();
        assert!(!Log::enabled(&logger, &info));

        Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Info)
                .args(format_args!("dropped"))
                .build(),
        );
        Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Error)
                .args(format_args!("kept"))
                .build(),
        );
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_collect_kvs() {
        let kvs: &[(&str, log::kv::Value)] = &[
            ("user", log::kv::Value::from("alice")),
            ("attempts", log::kv::Value::from(3)),
            ("ok", log::kv::Value::from(true)),
        ];
        let map = collect_kvs(&kvs);
        assert_eq!(map["user"], "alice");
        assert_eq!(map["attempts"], 3);
        assert_eq!(map["ok"], true);
    }
}
