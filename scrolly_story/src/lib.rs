// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_story --heading-base-level=0

//! Scrolly Story: a scroll-driven data story.
//!
//! A story is a stack of [`Panel`]s driven by an [`Orchestrator`]. The host
//! reports scroll, resize and pointer events with its own clock; each panel
//! turns the scroll offset into a named state with a threshold machine and
//! starts the animations that state change implies. At any time the host can
//! ask for a [`Frame`]: one [`Scene`](scrolly_scene::Scene) per panel, sampled
//! at the time it passes in, plus the marks of a scroll indicator.
//!
//! The [standard](Orchestrator::standard) story has three panels:
//!
//! - [`TablePanel`]: the raw rows, whose text fades and then the whole table.
//! - [`MapPanel`]: the selected row as a bar that splits into one segment per
//!   feature, morphs into a fitted choropleth, pins to the viewport while the
//!   reader explores it, then scrolls away.
//! - [`FinalPanel`]: an overlay shown at the end.
//!
//! Data comes from GeoJSON ([`parse_features`]) and a JSON array of rows
//! ([`parse_rows`]); scroll points and timings from a [`StoryConfig`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use scrolly_story::{
//!     Environment, HostEvent, Orchestrator, PanelTag, StoryConfig, StoryModel, parse_features,
//!     parse_rows,
//! };
//!
//! let features = parse_features(
//!     r#"{"features": [
//!         {"id": "a", "geometry": {"type": "Polygon",
//!             "coordinates": [[[-105, 40], [-100, 40], [-100, 35], [-105, 35], [-105, 40]]]}},
//!         {"id": "b", "geometry": {"type": "Polygon",
//!             "coordinates": [[[-95, 40], [-90, 40], [-90, 35], [-95, 35], [-95, 40]]]}}
//!     ]}"#,
//! )?;
//! let rows = parse_rows(r#"[{"ID": "r1", "currentRating": 4000, "percents": [0.3, 0.7]}]"#)?;
//!
//! let model = StoryModel::new(features, rows)?;
//! let mut story = Orchestrator::standard(model, &StoryConfig::default())?;
//! story.init(Environment::new(Size::new(1000.0, 500.0)), 0.0);
//! assert_eq!(story.state_of(PanelTag::TABLE), Some("on"));
//!
//! // One viewport down, the bar splits.
//! let report = story.handle_event(HostEvent::Scroll { y: 520.0 }, 16.0);
//! assert_eq!(report.transition_for(PanelTag::MAP).map(|t| t.to), Some("splitbar"));
//!
//! let frame = story.render(1_000.0);
//! assert_eq!(frame.scenes.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod data;
mod env;
mod error;
mod event;
mod model;
mod orchestrator;
mod panel;
pub mod panels;

pub use config::{MapTriggers, StoryConfig};
pub use data::{load_features, load_rows, parse_features, parse_rows};
pub use env::{ByOrientation, Dims, Environment, Orientation};
pub use error::{DataError, StoryError};
pub use event::{HostEvent, PanelTag, Trigger, UpdateParams};
pub use model::{DataRow, StoryModel};
pub use orchestrator::{Frame, Marker, Orchestrator, UpdateReport};
pub use panel::{Panel, PanelTransition, TopPoint};
pub use panels::{FinalPanel, MapPanel, TablePanel};
