// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three panels of the story, top to bottom.

mod finale;
mod map;
mod table;

pub use finale::{FinalPanel, FinalState};
pub use map::{MapPanel, MapState};
pub use table::{TablePanel, TableState};
