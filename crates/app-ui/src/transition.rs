//! Transition renderer
//!
//! Lays out the two screen layers involved in a navigation transition: the
//! current (top of stack) screen and, when there is one, the screen
//! underneath it. Both layers are positioned with a horizontal translation
//! derived from a single offset:
//!
//! - current layer at `offset`
//! - previous layer at `offset - width`, parked one viewport to the left
//!
//! At rest the offset is zero. A forward push slides it to `-width`, a
//! back transition to `+width`, and a live swipe tracks the resisted drag.

use serde::{Deserialize, Serialize};

use crate::navigation::{NavigationStack, StackEntry};
use crate::screens::ScreenId;
use crate::theme::{Color, Theme};
use crate::tokens::{duration, z_index};

/// Viewport metrics in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Viewport {
    /// Create viewport metrics
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // iPhone-class portrait viewport
        Self::new(390.0, 844.0)
    }
}

/// Offset and easing of the current screen layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionState {
    /// Horizontal offset of the current layer (px)
    pub offset: f32,
    /// Whether offset changes are eased
    pub animating: bool,
    /// Easing duration while animating (ms)
    pub duration_ms: u32,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::rest()
    }
}

impl TransitionState {
    /// No offset, no animation
    pub fn rest() -> Self {
        Self {
            offset: 0.0,
            animating: false,
            duration_ms: duration::INSTANT,
        }
    }

    /// Finger tracking: applied instantly
    pub fn tracking(offset: f32) -> Self {
        Self {
            offset,
            animating: false,
            duration_ms: duration::INSTANT,
        }
    }

    /// Programmatic move to `offset` over `duration_ms`
    pub fn eased(offset: f32, duration_ms: u32) -> Self {
        Self {
            offset,
            animating: true,
            duration_ms,
        }
    }

    /// Check if nothing is moving
    pub fn is_at_rest(&self) -> bool {
        !self.animating && self.offset == 0.0
    }

    /// Whether a back-swipe (or back animation) is revealing the previous screen
    pub fn reveals_previous(&self) -> bool {
        self.offset > 0.0
    }
}

/// Vertical scroll behavior of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPolicy {
    /// Scrolls when content is taller than the viewport
    Auto,
    /// Temporarily locked while a transition reveals it
    Locked,
    /// Never scrolls (home dashboard)
    Fixed,
}

impl ScrollPolicy {
    /// CSS `overflow-y` value
    pub fn overflow(&self) -> &'static str {
        match self {
            ScrollPolicy::Auto => "auto",
            ScrollPolicy::Locked | ScrollPolicy::Fixed => "hidden",
        }
    }
}

/// Offset and blur of the edge shadow
const EDGE_SHADOW_GEOMETRY: &str = "-4px 0 16px";

/// One positioned screen layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stable identity of the stack entry
    pub key: String,
    /// Screen shown in this layer
    pub screen: ScreenId,
    /// Horizontal translation (px)
    pub translate_x: f32,
    /// Scroll behavior
    pub scroll: ScrollPolicy,
    /// Scroll offset to restore
    pub scroll_top: f32,
    /// Eased transition, if any: (duration ms, easing curve)
    pub transition: Option<(u32, String)>,
    /// Stacking order
    pub z_index: i32,
    /// Opaque background
    pub background: Color,
    /// Left-edge shadow while the layer slides over the one underneath
    pub shadow: Option<Color>,
}

impl LayerStyle {
    /// Inline style string for a web view
    pub fn to_css(&self) -> String {
        let transition = match &self.transition {
            Some((ms, curve)) => format!("transform {}ms {}", ms, curve),
            None => "none".to_string(),
        };
        let mut css = format!(
            "transform: translateX({}px); transition: {}; \
             overflow-y: {}; z-index: {}; background: {};",
            self.translate_x,
            transition,
            self.scroll.overflow(),
            self.z_index,
            self.background
        );
        if let Some(shadow) = &self.shadow {
            css.push_str(&format!(" box-shadow: {EDGE_SHADOW_GEOMETRY} {shadow};"));
        }
        css
    }
}

/// Both layers of a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionFrame {
    /// Screen underneath, when the stack is deeper than one
    pub previous: Option<LayerStyle>,
    /// Top of stack
    pub current: LayerStyle,
}

/// Positions screen layers for a transition state
#[derive(Debug, Clone)]
pub struct TransitionRenderer {
    home: ScreenId,
    easing: String,
}

impl TransitionRenderer {
    /// Create a renderer; `home` is always laid out without scrolling
    pub fn new(home: ScreenId, easing: impl Into<String>) -> Self {
        Self {
            home,
            easing: easing.into(),
        }
    }

    /// Lay out the current frame
    pub fn render(
        &self,
        stack: &NavigationStack,
        state: &TransitionState,
        viewport: Viewport,
        theme: &Theme,
    ) -> TransitionFrame {
        let transition = state
            .animating
            .then(|| (state.duration_ms, self.easing.clone()));

        let mut current = self.layer(
            stack.current_entry(),
            state.offset,
            self.resting_scroll(stack.current()),
            transition.clone(),
            z_index::CURRENT_SCREEN,
            theme,
        );
        if state.reveals_previous() && stack.can_go_back() {
            current.shadow = Some(theme.colors.edge_shadow.clone());
        }

        let previous = stack.previous_entry().map(|entry| {
            let scroll = if state.reveals_previous() {
                ScrollPolicy::Locked
            } else {
                self.resting_scroll(&entry.id)
            };
            self.layer(
                entry,
                state.offset - viewport.width,
                scroll,
                transition,
                z_index::PREVIOUS_SCREEN,
                theme,
            )
        });

        TransitionFrame { previous, current }
    }

    fn resting_scroll(&self, screen: &ScreenId) -> ScrollPolicy {
        if *screen == self.home {
            ScrollPolicy::Fixed
        } else {
            ScrollPolicy::Auto
        }
    }

    fn layer(
        &self,
        entry: &StackEntry,
        translate_x: f32,
        scroll: ScrollPolicy,
        transition: Option<(u32, String)>,
        z_index: i32,
        theme: &Theme,
    ) -> LayerStyle {
        LayerStyle {
            key: entry.key.clone(),
            screen: entry.id.clone(),
            translate_x,
            scroll,
            scroll_top: entry.scroll_position,
            transition,
            z_index,
            background: theme.colors.background.clone(),
            shadow: None,
        }
    }
}
