//! # petting-zoo-view
//!
//! Sprite frame controller for a virtual petting zoo.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Describing animal sprite sheets (horizontal filmstrips)
//! - Selecting the current animal and frame with a small state machine
//! - Scrubbing frames by moving the pointer across the sprite
//! - Playing a short "pet" pulse of frame advances on click
//! - Computing the crop window for the current frame
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load catalogs and settings from TOML
//! - `web` - Enable web/WASM DOM binding support
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use petting_zoo_view::{
//!     Activation, ManualTimers, NavControl, SpriteCatalog, Zoo, ZooConfig,
//! };
//!
//! let timers = Rc::new(ManualTimers::new());
//! let zoo = Zoo::new(SpriteCatalog::default(), ZooConfig::default(), timers.clone()).unwrap();
//!
//! // Next animal
//! zoo.activate(NavControl::Next, Activation::Click);
//! assert_eq!(zoo.state().gif_index, 1);
//!
//! // Pet it
//! zoo.activate(NavControl::Pet, Activation::Click);
//! timers.advance(Duration::from_millis(150));
//! assert_eq!(zoo.state().frame_index, 3);
//!
//! // Frame 3 of a 320px wide sprite at 2x
//! assert_eq!(zoo.view().offset_x, 1920);
//! ```

mod config;
mod controller;
mod controls;
mod data;
mod pointer;
mod pulse;
pub mod render;
mod timer;
mod zoo;

#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, PointerConfig, PulseConfig, ZooConfig};
pub use controller::{reduce, ControllerState, FrameAction, FrameController, FramePolicy};
pub use controls::{Activation, Command, Key, NavControl, CONFIRM_KEY, CONFIRM_KEY_CODE};
pub use data::{CatalogError, SpriteCatalog, SpriteDescriptor, DEFAULT_SPRITES};
pub use pointer::{ContainerGeometry, FrameMapper, PointerSample};
pub use pulse::{PetPulse, PulseGeneration, PulseToken};
pub use render::SpriteView;
pub use timer::{ManualTimers, TimerCallback, TimerHost};
pub use zoo::Zoo;

#[cfg(feature = "web")]
pub use web::{mount, MountedZoo, WebError, WindowTimers};
