//! WASM bindings for cadence-playback
//!
//! This module provides WebAssembly bindings for the PlaybackManager,
//! so a browser page can drive the engine and render its state.

pub mod manager;
pub mod types;

pub use manager::WasmPlaybackManager;
pub use types::WasmSong;
