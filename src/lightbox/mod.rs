//! Modal image viewer.
//!
//! [`LightboxViewer`] owns the whole viewer state: the open session (image
//! list and position), the details panel, control auto-fade, the swipe
//! tracker and the focus trap. Input arrives as [`InputEvent`]s one at a time
//! and every call answers with the [`Effect`]s the page has to apply.

mod controller;
mod fade;
mod focus;
mod gesture;
mod types;

pub use controller::LightboxViewer;
pub use fade::ControlFade;
pub use focus::FocusTrap;
pub use gesture::{SwipeDirection, SwipeTracker};
pub use types::*;

#[cfg(test)]
mod tests;
