// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token claims and login state.

pub mod claims;
pub mod session;

pub use claims::{decode, Claims};
pub use session::{Session, SessionStatus};
