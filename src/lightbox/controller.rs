use super::{
    Control, ControlFade, DetailsState, Effect, FocusTrap, InputEvent, Key, LightboxView,
    SwipeDirection, SwipeTracker, Target, ViewerState,
};
use crate::LightboxConfig;
use crate::registry::{MetadataRegistry, is_suffix_match};
use std::time::Instant;
use tracing::{debug, trace};

const DEFAULT_ALT: &str = "Large view";

#[derive(Debug, Clone)]
struct Session {
    images: Vec<String>,
    current_index: usize,
    details: DetailsState,
}

/// The page's single viewer instance.
#[derive(Debug)]
pub struct LightboxViewer {
    registry: MetadataRegistry,
    default_images: Vec<String>,
    session: Option<Session>,
    fade: ControlFade,
    swipe: SwipeTracker,
    focus: FocusTrap,
    focused: Option<Control>,
}

impl LightboxViewer {
    pub fn new(config: &LightboxConfig, registry: MetadataRegistry) -> Self {
        Self {
            registry,
            default_images: Vec::new(),
            session: None,
            fade: ControlFade::new(config.fade_delay()),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            focus: FocusTrap::default(),
            focused: None,
        }
    }

    /// List used when an open request carries no context of its own.
    pub fn with_default_images(mut self, images: Vec<String>) -> Self {
        self.default_images = images;
        self
    }

    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MetadataRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> ViewerState {
        match &self.session {
            Some(session) => ViewerState::Open(session.details),
            None => ViewerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current_index)
    }

    pub fn current_image(&self) -> Option<&str> {
        let session = self.session.as_ref()?;
        session.images.get(session.current_index).map(String::as_str)
    }

    pub fn images(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|s| s.images.as_slice())
            .unwrap_or_default()
    }

    pub fn details_expanded(&self) -> bool {
        matches!(
            self.session.as_ref().map(|s| s.details),
            Some(DetailsState::Expanded)
        )
    }

    pub fn controls_visible(&self) -> bool {
        self.fade.is_visible()
    }

    /// Opens the viewer on `reference` within `context`. An empty context
    /// falls back to the default list, then to `reference` alone. Without any
    /// image to show the viewer stays as it was and nothing is emitted.
    pub fn open(&mut self, reference: &str, context: &[String], now: Instant) -> Vec<Effect> {
        let Some(images) = self.resolve_images(reference, context) else {
            debug!("Nothing to show for {:?}", reference);
            return Vec::new();
        };

        let current_index = position_in(&images, reference);
        debug!(
            "Opening lightbox at {} of {} ({})",
            current_index + 1,
            images.len(),
            reference
        );

        self.session = Some(Session {
            images,
            current_index,
            details: DetailsState::Collapsed,
        });
        self.swipe.reset();
        self.focused = None;
        self.fade.show(now, false);

        let mut effects = Vec::with_capacity(4);
        effects.extend(self.render());
        effects.push(Effect::FocusDialog);
        effects.push(Effect::LockScroll);
        effects.push(Effect::ShowControls);
        effects
    }

    pub fn next(&mut self) -> Vec<Effect> {
        self.step(|index, len| (index + 1) % len)
    }

    pub fn previous(&mut self) -> Vec<Effect> {
        self.step(|index, len| (index + len - 1) % len)
    }

    /// Expanding pins the controls; collapsing restarts their idle timer.
    pub fn toggle_details(&mut self, now: Instant) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        session.details = match session.details {
            DetailsState::Collapsed => DetailsState::Expanded,
            DetailsState::Expanded => DetailsState::Collapsed,
        };
        let expanded = session.details == DetailsState::Expanded;
        self.fade.show(now, expanded);

        vec![Effect::SetDetails { expanded }, Effect::ShowControls]
    }

    pub fn close(&mut self) -> Vec<Effect> {
        if self.session.take().is_none() {
            return Vec::new();
        }

        debug!("Closing lightbox");
        self.swipe.reset();
        self.focused = None;
        self.fade.hide();
        vec![Effect::ClearImage, Effect::UnlockScroll, Effect::HideControls]
    }

    /// Feeds one input event. Everything is ignored while the viewer is closed.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        if !self.is_open() {
            return Vec::new();
        }
        trace!("Lightbox input: {:?}", event);

        match event {
            InputEvent::Key { key, shift } => match key {
                Key::Escape => self.close(),
                Key::ArrowLeft => prevented(self.previous()),
                Key::ArrowRight => prevented(self.next()),
                Key::Tab => {
                    let mut effects = vec![Effect::PreventDefault];
                    if let Some(control) = self.focus.next(self.focused, shift) {
                        self.focused = Some(control);
                        effects.push(Effect::FocusControl(control));
                        effects.extend(self.activity(now));
                    }
                    effects
                }
                Key::Other => Vec::new(),
            },
            InputEvent::Click(target) => match target {
                Target::Control(Control::Close) | Target::Backdrop | Target::Overlay => {
                    self.close()
                }
                Target::Control(Control::Previous) => self.previous(),
                Target::Control(Control::Next) => self.next(),
                Target::Control(Control::DetailsToggle) => self.toggle_details(now),
                Target::Image => Vec::new(),
            },
            InputEvent::PointerMove => self.activity(now),
            InputEvent::Focus(control) => {
                self.focused = Some(control);
                self.activity(now)
            }
            InputEvent::TouchStart { x, y } => {
                self.swipe.start(x, y);
                Vec::new()
            }
            InputEvent::TouchMove { x, y } => {
                self.swipe.update(x, y);
                Vec::new()
            }
            InputEvent::TouchEnd => match self.swipe.finish() {
                Some(SwipeDirection::Left) => self.next(),
                Some(SwipeDirection::Right) => self.previous(),
                None => Vec::new(),
            },
            InputEvent::Tick => {
                if self.fade.poll(now) {
                    vec![Effect::HideControls]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// The dialog contents for the current image.
    pub fn view(&self) -> Option<LightboxView> {
        let session = self.session.as_ref()?;
        let src = session.images.get(session.current_index)?;
        let metadata = self.registry.lookup(src);

        let alt = if metadata.title.is_empty() {
            DEFAULT_ALT.to_string()
        } else {
            metadata.title.clone()
        };

        Some(LightboxView {
            src: src.clone(),
            alt,
            details: metadata.detail_rows(),
            title: metadata.title,
            index: session.current_index,
            total: session.images.len(),
            details_expanded: session.details == DetailsState::Expanded,
        })
    }

    fn render(&self) -> Option<Effect> {
        self.view().map(Effect::Render)
    }

    fn step(&mut self, advance: impl Fn(usize, usize) -> usize) -> Vec<Effect> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let len = session.images.len();
        if len == 0 {
            return Vec::new();
        }

        session.current_index = advance(session.current_index, len);
        self.render().into_iter().collect()
    }

    fn activity(&mut self, now: Instant) -> Vec<Effect> {
        self.fade.show(now, self.details_expanded());
        vec![Effect::ShowControls]
    }

    fn resolve_images(&self, reference: &str, context: &[String]) -> Option<Vec<String>> {
        let images: Vec<String> = context.iter().filter(|r| !r.is_empty()).cloned().collect();
        if !images.is_empty() {
            return Some(images);
        }
        if !self.default_images.is_empty() {
            return Some(self.default_images.clone());
        }
        if !reference.is_empty() {
            return Some(vec![reference.to_string()]);
        }
        None
    }
}

fn prevented(mut effects: Vec<Effect>) -> Vec<Effect> {
    effects.insert(0, Effect::PreventDefault);
    effects
}

/// Exact match first, then a path-suffix match in either direction, else 0.
fn position_in(images: &[String], reference: &str) -> usize {
    if reference.is_empty() {
        return 0;
    }
    images
        .iter()
        .position(|image| image == reference)
        .or_else(|| {
            images.iter().position(|image| {
                is_suffix_match(image, reference) || is_suffix_match(reference, image)
            })
        })
        .unwrap_or(0)
}
