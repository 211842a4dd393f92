//! Root application state
//!
//! Owns the screen registry, the theme and the navigation driver, and
//! answers "what is on screen right now".

use app_ui::{
    NavigationConfig, ScreenDescriptor, ScreenRegistry, ThemeName, ThemeState, TransitionFrame,
    Viewport,
};

use crate::driver::NavigationDriver;

/// Root application component
pub struct App {
    registry: ScreenRegistry,
    theme: ThemeState,
    navigation: NavigationDriver,
}

impl App {
    /// Create the app with the built-in screen table
    pub fn new(config: NavigationConfig, viewport: Viewport) -> Self {
        Self::with_registry(config, viewport, ScreenRegistry::new())
    }

    /// Create the app with a custom registry
    pub fn with_registry(
        config: NavigationConfig,
        viewport: Viewport,
        registry: ScreenRegistry,
    ) -> Self {
        Self {
            registry,
            theme: ThemeState::default(),
            navigation: NavigationDriver::new(config, viewport),
        }
    }

    /// Navigation commands and touch input
    pub fn navigation(&self) -> &NavigationDriver {
        &self.navigation
    }

    /// Screen registry
    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Theme provider state
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Switch color mode
    pub fn set_theme(&mut self, name: ThemeName) {
        tracing::info!(theme = %name, "theme changed");
        self.theme.set_theme(name);
    }

    /// Resolve the top of the stack
    pub fn current_screen(&self) -> ScreenDescriptor {
        self.registry.resolve(&self.navigation.current())
    }

    /// Resolve the screen underneath the top, if any
    pub fn previous_screen(&self) -> Option<ScreenDescriptor> {
        let previous = self
            .navigation
            .with_controller(|c| c.previous().cloned())?;
        Some(self.registry.resolve(&previous))
    }

    /// Lay out both screen layers with the active theme
    pub fn frame(&self) -> TransitionFrame {
        self.navigation.render(self.theme.current_theme())
    }
}
