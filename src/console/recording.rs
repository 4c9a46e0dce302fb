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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::ErrorKind;
use crate::console::Console;
use crate::mapping::Action;
use crate::mapping::Exit;

/// One call made on a [`Recording`] console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCall {
    /// The action invoked.
    pub action: Action,
    /// The message passed.
    pub message: String,
    /// The exit policy, only ever set for [`Action::Error`].
    pub exit: Exit,
}

/// A console that records calls instead of printing, for use in tests.
///
/// Clones share the same record, so keep one clone to inspect the calls made through another.
/// An error whose exit policy requests termination is recorded and then reported as
/// [`ErrorKind::Exit`] instead of exiting the process.
///
/// # Examples
///
/// ```
/// use cliforth::console::Console;
/// use cliforth::console::Recording;
/// use cliforth::mapping::Exit;
///
/// let console = Recording::default();
/// console.warn("careful").unwrap();
/// let err = console.error("fatal", Exit::Terminate).unwrap_err();
/// assert_eq!(err.exit_code(), Some(1));
/// assert_eq!(console.calls().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Recording {
    calls: Arc<Mutex<Vec<ConsoleCall>>>,
}

impl Recording {
    /// Return all calls made so far.
    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.lock().clone()
    }

    /// Return the messages passed to the given action, in call order.
    pub fn messages(&self, action: Action) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|call| call.action == action)
            .map(|call| call.message.clone())
            .collect()
    }

    /// Forget all calls made so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ConsoleCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, action: Action, message: &str, exit: Exit) {
        self.lock().push(ConsoleCall {
            action,
            message: message.to_string(),
            exit,
        });
    }
}

impl Console for Recording {
    fn log(&self, message: &str) -> Result<(), Error> {
        self.record(Action::Log, message, Exit::Continue);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<(), Error> {
        self.record(Action::Warn, message, Exit::Continue);
        Ok(())
    }

    fn debug(&self, message: &str) -> Result<(), Error> {
        self.record(Action::Debug, message, Exit::Continue);
        Ok(())
    }

    fn error(&self, message: &str, exit: Exit) -> Result<(), Error> {
        self.record(Action::Error, message, exit);

        match exit.code() {
            Some(code) => Err(Error::new(
                ErrorKind::Exit(code),
                "host console requested process termination",
            )
            .with_context("message", message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let console = Recording::default();
        console.log("one").unwrap();
        console.debug("two").unwrap();
        console.warn("three").unwrap();
        console.error("four", Exit::Continue).unwrap();

        let actions = console
            .calls()
            .into_iter()
            .map(|call| call.action)
            .collect::<Vec<_>>();
        assert_eq!(
            actions,
            vec![Action::Log, Action::Debug, Action::Warn, Action::Error]
        );
        assert_eq!(console.messages(Action::Warn), vec!["three".to_string()]);
    }

    #[test]
    fn test_error_exit_codes() {
        let console = Recording::default();
        assert_eq!(
            console.error("a", Exit::Terminate).unwrap_err().kind(),
            ErrorKind::Exit(1)
        );
        assert_eq!(
            console.error("b", Exit::Code(7)).unwrap_err().kind(),
            ErrorKind::Exit(7)
        );
        assert!(console.error("c", Exit::Code(0)).is_ok());
        assert_eq!(console.calls().len(), 3);
    }

    #[test]
    fn test_clones_share_record() {
        let console = Recording::default();
        let shared = console.clone();
        shared.log("hello").unwrap();
        assert_eq!(console.messages(Action::Log), vec!["hello".to_string()]);

        console.clear();
        assert!(shared.calls().is_empty());
    }
}
