//! Presentation adapter
//!
//! Reads engine snapshots and writes them to the host page. The pure parts
//! (text formatting, which menu is visible) live in `hud`; the DOM writes in
//! `dom` only exist on wasm.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod hud;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use hud::{HudText, MenuVisibility, format_timer};
