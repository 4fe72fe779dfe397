#![forbid(unsafe_code)]

//! Browser binding of the Kalaa fire effect.
//!
//! On load the module registers page lifecycle listeners: every time a page
//! becomes ready (`DOMContentLoaded`, and `astro:page-load` after client-side
//! navigation) a fresh engine is attached to the `<canvas id="fire-canvas">`
//! element, if the page has one, and driven by `requestAnimationFrame`. Window
//! resizes keep the canvas at the viewport size.
//!
//! [`FireAnimation`] is also exported for pages that want to drive a canvas
//! of their own.
//!
//! Browser types only exist on `wasm32`; the frame bookkeeping in
//! [`runner`] is plain Rust and tested natively.

pub mod runner;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FireAnimation;

pub use runner::{AnimationFrameScheduler, FrameRequests, seed_from_units, viewport_size};
