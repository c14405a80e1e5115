//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own storage and external-tool concerns so route handlers
//! can stay focused on protocol translation: `project` for on-disk project
//! state, `resources` for the editable resource tree, `apktool` and
//! `signer` for the external binaries, `ai` for the capability probe.

pub mod ai;
pub mod apktool;
pub mod project;
pub mod resources;
pub mod signer;
