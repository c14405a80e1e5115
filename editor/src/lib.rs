//! # editor
//!
//! DOM-free controller core for the APK editor front end.
//!
//! This crate owns the client-side state (selected file, open project,
//! resource being edited, in-flight actions), the pure preview renderer for
//! string/layout resources, and the debounced edit pipeline. It contains no
//! DOM, no HTTP client, and no global state: a host shell (browser WASM or a
//! test) feeds [`dispatch::Event`]s into [`dispatch::handle`] and executes
//! the returned [`dispatch::Effect`]s.

pub mod debounce;
pub mod dispatch;
pub mod net;
pub mod preview;
pub mod select;
pub mod state;
