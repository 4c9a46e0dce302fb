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

//! Cliforth forwards structured log records to the console output of a host command-line tool.
//!
//! # Overview
//!
//! A [`CliAppend`](append::CliAppend) maps each record's severity [`Level`](record::Level) to one
//! of the host's output actions (`log`, `warn`, `error` or `debug`), optionally prefixes the
//! message with the level name, and asks the host to terminate the process for the most severe
//! levels. The mapping is a [`LevelActionMap`](mapping::LevelActionMap) that can be replaced and
//! validated. The host itself is a [`Console`]; [`Terminal`](console::Terminal) prints to the
//! standard streams and [`Recording`](console::Recording) captures calls in tests.
//!
//! # Examples
//!
//! ```
//! use cliforth::append::CliAppend;
//! use cliforth::console::Recording;
//! use cliforth::env::HostEnvironment;
//! use cliforth::mapping::Action;
//! use cliforth::record::Level;
//!
//! let env = HostEnvironment::new(true, false);
//! let console = Recording::default();
//!
//! let logger = cliforth::builder()
//!     .channel("deploy")
//!     .append(
//!         CliAppend::builder()
//!             .level(Level::INFO)
//!             .console(console.clone())
//!             .build(&env)
//!             .unwrap(),
//!     )
//!     .build();
//!
//! logger.info("Deploying").unwrap();
//! logger.warning("Disk almost full").unwrap();
//!
//! assert_eq!(console.messages(Action::Log), vec!["Deploying"]);
//! assert_eq!(console.messages(Action::Warn), vec!["(WARNING) Disk almost full"]);
//! ```
//!
//! Outside the host, the append refuses to be built:
//!
//! ```
//! use cliforth::ErrorKind;
//! use cliforth::append::CliAppend;
//! use cliforth::env::HostEnvironment;
//!
//! let err = CliAppend::new(&HostEnvironment::new(false, false)).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Environment);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod console;
pub mod env;
pub mod filter;
pub mod layout;
pub mod mapping;
pub mod record;

mod error;
mod logger;

pub use append::Append;
pub use console::Console;
pub use error::Error;
pub use error::ErrorKind;
pub use layout::Layout;
pub use logger::*;
