//! Conway's Game of Life on a toroidal grid, sized to fit a viewport.
//!
//! The crate holds the simulation core only: the B3/S23 rule, the wrapping
//! grid, the layout policy that turns viewport metrics into a column/row
//! count, the reflow that rebuilds the grid on resize, a pattern catalog,
//! and the Stopped/Running controller. Rendering and input belong to the
//! front-ends, which talk to a [`session::Driver`].

pub mod config;
pub mod controller;
pub mod dimension;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod reflow;
pub mod resolution;
pub mod rules;
pub mod schedule;
pub mod session;

pub use config::LifeConfig;
pub use controller::{SimulationController, SimulationState};
pub use dimension::{Bounds, DesiredResolution, DimensionPolicy, DimensionSpec, Viewport};
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use session::{Driver, Life, Tick};
