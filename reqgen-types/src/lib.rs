//! Wire-format types shared between the request generator and its consumers.
//!
//! A request file is a plain-text, newline-terminated sequence of lines of
//! the form `<cat>[,<cat>...];^<pattern>`. This crate provides the
//! [`Category`] and [`RequestLine`] types that enforce this format.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod category;
pub mod line;

pub use crate::category::{Category, CategoryError};
pub use crate::line::{RequestLine, RequestLineError};
