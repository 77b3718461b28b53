use crate::registry::DetailRow;
use serde::Serialize;

/// Interactive controls inside the dialog, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    Close,
    Previous,
    Next,
    DetailsToggle,
}

pub const FOCUS_ORDER: [Control; 4] = [
    Control::Close,
    Control::Previous,
    Control::Next,
    Control::DetailsToggle,
];

impl Control {
    pub fn class_name(&self) -> &'static str {
        match self {
            Control::Close => "lightbox-close",
            Control::Previous => "lightbox-arrow lightbox-arrow-left",
            Control::Next => "lightbox-arrow lightbox-arrow-right",
            Control::DetailsToggle => "lightbox-details-btn",
        }
    }

    pub fn aria_label(&self) -> &'static str {
        match self {
            Control::Close => "Close",
            Control::Previous => "Previous image",
            Control::Next => "Next image",
            Control::DetailsToggle => "Show image details",
        }
    }
}

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Control(Control),
    /// The outer lightbox element around the content.
    Backdrop,
    /// The dimmed overlay layer.
    Overlay,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Tab,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, shift: bool },
    Click(Target),
    PointerMove,
    Focus(Control),
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd,
    /// Timer wake-up, used to fade idle controls.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailsState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Open(DetailsState),
}

/// What the dialog shows for the current image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxView {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub details: Vec<DetailRow>,
    /// Zero-based position in the session list.
    pub index: usize,
    pub total: usize,
    pub details_expanded: bool,
}

impl LightboxView {
    /// `3 / 12`
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }
}

/// Changes the page has to apply after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render(LightboxView),
    /// Toggle the `details-open` state of the image and the panel.
    SetDetails { expanded: bool },
    FocusDialog,
    FocusControl(Control),
    LockScroll,
    UnlockScroll,
    ClearImage,
    ShowControls,
    HideControls,
    PreventDefault,
}
