//! Mail Hopper
//!
//! Reconstructs the path an email took from the `Received` headers stamped
//! by every relaying mail server: hostnames, protocol, timestamp and the
//! delay between consecutive hops.
//!
//! This crate provides the core implementation for the `hopper` CLI tool.
//!
//! ## Getting Started
//!
//! ```
//! let raw = "Received: from a.example by b.example with ESMTP; Mon, 1 Feb 2016 00:00:09 +0000\r\n\
//!            Received: by a.example with HTTP; Mon, 1 Feb 2016 00:00:00 +0000\r\n";
//!
//! let message = mail_hopper::analyse(Some(raw)).unwrap().unwrap();
//! let trail = message.trail.unwrap();
//!
//! assert_eq!(trail[0].received_by, "a.example");
//! assert_eq!(trail[1].delay, 9);
//! assert_eq!(message.total_delay, 9);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{analyse, analyse_bytes};
pub use parser::{Hop, Message, Report, Trail};
pub use utils::AnalysisError;
