//! WASM bindings for plvylist-playback
//!
//! Browser media adapter plus a `wasm-bindgen` component that wraps the
//! session for JavaScript hosts.

pub mod adapter;
pub mod component;

pub use adapter::{Dispatch, HtmlMediaAdapter};
pub use component::WasmPlvylist;
