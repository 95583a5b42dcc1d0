//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App is intentionally lean - it coordinates between components and the
//! theme/content services but does not render content itself.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_screen_layout, CompanyDialog, Header, HelpDialog, Palette, ProfilePage,
    ProfileSelector, QuitDialog, SplashComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{AppMode, PortfolioContent, Route, ThemePreference};
use crate::services::{
    load_or_bundled, ColorSchemeSignal, FileStore, MemoryStore, PreferenceStore, RenderRoot,
    TerminalColorScheme, ThemeController,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::rc::Rc;
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Page currently shown
    pub route: Route,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    config: Config,
    content: PortfolioContent,

    // ─────────────────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────────────────
    theme: ThemeController,
    color_scheme: Rc<TerminalColorScheme>,
    root: RenderRoot,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub selector: ProfileSelector,
    pub page: Option<ProfilePage>,
    pub company_dialog: Option<CompanyDialog>,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app from configuration, wiring the real environment
    pub fn new(config: Config) -> Result<App> {
        let content_path = config.content_path();
        let (content, warning) = load_or_bundled(content_path.as_deref())?;

        let store: Box<dyn PreferenceStore> = match FileStore::in_config_dir() {
            Some(store) => {
                debug!(path = %store.path().display(), "using preference file");
                Box::new(store)
            }
            None => {
                warn!("no home directory; theme preference will not persist");
                Box::new(MemoryStore::new())
            }
        };

        let mut app = Self::with_services(config, content, store, Rc::new(TerminalColorScheme::new()));
        app.status_message = warning;
        Ok(app)
    }

    /// Create the app around explicit services
    pub fn with_services(
        config: Config,
        content: PortfolioContent,
        store: Box<dyn PreferenceStore>,
        color_scheme: Rc<TerminalColorScheme>,
    ) -> App {
        let root = RenderRoot::new();
        let signal: Rc<dyn ColorSchemeSignal> = color_scheme.clone();
        let theme = ThemeController::new(store, signal, root.clone());

        let owner = content
            .profiles
            .first()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Portfolio".to_string());
        let selector = ProfileSelector::new(&content, config.reveal.clone());

        App {
            mode: AppMode::Splash,
            route: Route::Selector,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            config,
            content,
            theme,
            color_scheme,
            root,
            splash: SplashComponent::new(owner),
            selector,
            page: None,
            company_dialog: None,
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    #[cfg(test)]
    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn root(&self) -> &RenderRoot {
        &self.root
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Mount the page for `route`. The previous page is dropped, which
    /// releases its observations.
    fn navigate(&mut self, route: Route) {
        info!(from = %self.route, to = %route, "navigate");
        self.modals.clear();
        self.company_dialog = None;
        self.status_message = None;

        match route {
            Route::Selector => {
                self.page = None;
                self.selector = ProfileSelector::new(&self.content, self.config.reveal.clone());
            }
            Route::Profile(kind) => {
                self.page = Some(ProfilePage::new(
                    kind,
                    &self.content,
                    self.config.reveal.clone(),
                    Self::today(),
                ));
            }
        }
        self.route = route;
    }

    fn theme_status(&self) -> String {
        let preference = self.theme.preference();
        match (preference, self.root.appearance()) {
            (ThemePreference::System, Some(appearance)) => {
                format!("Theme: {} ({})", preference.label(), appearance)
            }
            _ => format!("Theme: {}", preference.label()),
        }
    }

    /// Route an action to whichever page is showing
    fn update_page(&mut self, action: Action) -> Result<Option<Action>> {
        match self.route {
            Route::Selector => self.selector.update(action),
            Route::Profile(_) => match self.page.as_mut() {
                Some(page) => page.update(action),
                None => Ok(None),
            },
        }
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    return self.handle_modal_key_event(&modal, key);
                }

                let global = match key.code {
                    KeyCode::Char('t') => Some(Action::CycleTheme),
                    KeyCode::Char('1') => Some(Action::SetTheme(ThemePreference::Light)),
                    KeyCode::Char('2') => Some(Action::SetTheme(ThemePreference::Dark)),
                    KeyCode::Char('3') => Some(Action::SetTheme(ThemePreference::System)),
                    KeyCode::Char('?') => Some(Action::OpenHelp),
                    KeyCode::Char('q') => Some(Action::OpenQuitDialog),
                    _ => None,
                };
                if global.is_some() {
                    return Ok(global);
                }

                match self.route {
                    Route::Selector => self.selector.handle_key_event(key),
                    Route::Profile(_) => match self.page.as_mut() {
                        Some(page) => page.handle_key_event(key),
                        None => Ok(None),
                    },
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.mode != AppMode::Running || !self.modals.is_empty() {
            return Ok(None);
        }
        match self.page.as_mut() {
            Some(page) => page.handle_mouse_event(mouse),
            None => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.color_scheme.poll();
                match self.mode {
                    AppMode::Splash => return self.splash.update(action),
                    AppMode::Running => return self.update_page(action),
                }
            }
            Action::SplashComplete => {
                if self.mode == AppMode::Splash {
                    self.mode = AppMode::Running;
                    self.selector.init()?;
                }
            }
            Action::ForceQuit => {
                info!("quit requested");
                self.theme.shutdown();
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation & Scrolling (delegate to the current page)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem
            | Action::PrevItem
            | Action::Select
            | Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::ScrollTop
            | Action::ScrollBottom => return self.update_page(action),
            Action::Navigate(route) => self.navigate(route),
            Action::Back => {
                if let Some(parent) = self.route.parent() {
                    self.navigate(parent);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Theme
            // ─────────────────────────────────────────────────────────────────
            Action::CycleTheme => {
                self.theme.cycle_preference();
                debug!(revision = self.root.revision(), "appearance applied");
                self.status_message = Some(self.theme_status());
            }
            Action::SetTheme(preference) => {
                self.theme.set_preference(preference);
                debug!(revision = self.root.revision(), "appearance applied");
                self.status_message = Some(self.theme_status());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                if self.modals.top() != Some(&Modal::QuitConfirm) {
                    self.modals.push(Modal::QuitConfirm);
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.toggle(Modal::Help);
            }
            Action::OpenCompany(index) => {
                let company = self.page.as_ref().and_then(|page| page.company(index)).cloned();
                if let Some(company) = company {
                    self.company_dialog = Some(CompanyDialog::new(company, Self::today()));
                    self.modals.push(Modal::Company { index });
                }
            }
            Action::CloseModal => {
                if let Some(Modal::Company { .. }) = self.modals.pop() {
                    self.company_dialog = None;
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area, palette)?,
            AppMode::Running => {
                let layout = calculate_screen_layout(area, self.status_message.is_some());

                let owner = self
                    .content
                    .profiles
                    .first()
                    .map(|p| p.name.as_str())
                    .unwrap_or("Portfolio");
                frame.render_widget(
                    Header {
                        owner,
                        route: self.route,
                        preference: self.theme.preference(),
                        appearance: self.root.appearance(),
                        palette,
                    },
                    layout.header,
                );

                match self.route {
                    Route::Selector => self.selector.draw(frame, layout.body, palette)?,
                    Route::Profile(_) => {
                        if let Some(page) = self.page.as_mut() {
                            page.draw(frame, layout.body, palette)?;
                        }
                    }
                }

                if let (Some(area), Some(message)) = (layout.status, &self.status_message) {
                    frame.render_widget(
                        Paragraph::new(Span::styled(format!(" {}", message), palette.muted()))
                            .style(palette.base()),
                        area,
                    );
                }

                frame.render_widget(
                    Paragraph::new(self.help_line(palette)).style(palette.base()),
                    layout.help,
                );

                // Draw modal overlay if active
                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal, palette)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::Company { .. } => match self.company_dialog.as_mut() {
                Some(dialog) => dialog.handle_key_event(key),
                None => Ok(Some(Action::CloseModal)),
            },
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal, palette: &Palette) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area, palette)?,
            Modal::Help => self.help_dialog.draw(frame, area, palette)?,
            Modal::Company { .. } => {
                if let Some(dialog) = self.company_dialog.as_mut() {
                    dialog.draw(frame, area, palette)?;
                }
            }
        }
        Ok(())
    }

    fn help_line(&self, palette: &Palette) -> Line<'static> {
        let hints: &[(&str, &str)] = match self.route {
            Route::Selector => &[("←/→", "choose"), ("Enter", "open")],
            Route::Profile(_) => &[
                ("j/k", "scroll"),
                ("Tab", "company"),
                ("Enter", "details"),
                ("Esc", "back"),
            ],
        };
        let common = [("t", "theme"), ("?", "help"), ("q", "quit")];

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints.iter().chain(common.iter()) {
            spans.push(Span::styled(key.to_string(), palette.title()));
            spans.push(Span::styled(format!(" {}  ", label), palette.muted()));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProfileKind, ResolvedAppearance};
    use crate::services::content::bundled_content;
    use crate::services::preference_store::THEME_KEY;
    use std::cell::Cell;

    struct Harness {
        app: App,
        store: MemoryStore,
        env_dark: Rc<Cell<Option<bool>>>,
        scheme: Rc<TerminalColorScheme>,
    }

    fn harness(stored: Option<&str>, env_dark: Option<bool>) -> Harness {
        let store = match stored {
            Some(value) => MemoryStore::with_value(THEME_KEY, value),
            None => MemoryStore::new(),
        };
        let env = Rc::new(Cell::new(env_dark));
        let source = env.clone();
        let scheme = Rc::new(TerminalColorScheme::with_source(Box::new(move || source.get())));
        let mut app = App::with_services(
            Config::default(),
            bundled_content().unwrap(),
            Box::new(store.clone()),
            scheme.clone(),
        );
        app.init().unwrap();
        app.update(Action::SplashComplete).unwrap();
        Harness {
            app,
            store,
            env_dark: env,
            scheme,
        }
    }

    /// Apply an action and every follow-up it produces
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            dispatch(app, action);
        }
    }

    #[test]
    fn test_starts_on_splash_then_selector() {
        let store = MemoryStore::new();
        let scheme = Rc::new(TerminalColorScheme::with_source(Box::new(|| None)));
        let mut app =
            App::with_services(Config::default(), bundled_content().unwrap(), Box::new(store), scheme);
        assert_eq!(app.mode, AppMode::Splash);

        dispatch(&mut app, Action::SplashComplete);
        assert_eq!(app.mode, AppMode::Running);
        assert_eq!(app.route, Route::Selector);
    }

    #[test]
    fn test_initial_appearance_follows_system() {
        let h = harness(None, Some(true));
        assert_eq!(h.app.root().appearance(), Some(ResolvedAppearance::Dark));
        assert!(h.app.theme().is_following_system());
        assert_eq!(h.scheme.subscriber_count(), 1);
    }

    #[test]
    fn test_cycle_key_persists_and_applies() {
        let mut h = harness(None, Some(true));
        press(&mut h.app, KeyCode::Char('t'));

        assert_eq!(h.app.theme().preference(), ThemePreference::Light);
        assert_eq!(h.app.root().appearance(), Some(ResolvedAppearance::Light));
        assert_eq!(h.store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(h.scheme.subscriber_count(), 0);
        assert_eq!(h.app.status_message.as_deref(), Some("Theme: Light"));
    }

    #[test]
    fn test_system_change_arrives_on_tick() {
        let mut h = harness(Some("system"), Some(false));
        assert_eq!(h.app.root().appearance(), Some(ResolvedAppearance::Light));

        h.env_dark.set(Some(true));
        dispatch(&mut h.app, Action::Tick);
        assert_eq!(h.app.root().appearance(), Some(ResolvedAppearance::Dark));

        // An explicit choice ignores later system changes
        press(&mut h.app, KeyCode::Char('1'));
        h.env_dark.set(Some(false));
        dispatch(&mut h.app, Action::Tick);
        h.env_dark.set(Some(true));
        dispatch(&mut h.app, Action::Tick);
        assert_eq!(h.app.root().appearance(), Some(ResolvedAppearance::Light));
    }

    #[test]
    fn test_select_profile_and_go_back() {
        let mut h = harness(Some("dark"), None);
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.route, Route::Profile(ProfileKind::Developer));
        assert!(h.app.page.is_some());

        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.route, Route::Selector);
        assert!(h.app.page.is_none());
    }

    #[test]
    fn test_company_dialog_opens_and_closes() {
        let mut h = harness(Some("dark"), None);
        dispatch(
            &mut h.app,
            Action::Navigate(Route::Profile(ProfileKind::MedicalRepresentative)),
        );
        press(&mut h.app, KeyCode::Tab);
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.modals.top(), Some(&Modal::Company { index: 0 }));
        assert!(h.app.company_dialog.is_some());

        // Global keys do not leak through an open modal
        press(&mut h.app, KeyCode::Char('t'));
        assert_eq!(h.app.theme().preference(), ThemePreference::Dark);

        press(&mut h.app, KeyCode::Esc);
        assert!(h.app.modals.is_empty());
        assert!(h.app.company_dialog.is_none());
    }

    #[test]
    fn test_open_company_out_of_range_is_ignored() {
        let mut h = harness(Some("dark"), None);
        dispatch(&mut h.app, Action::Navigate(Route::Profile(ProfileKind::Developer)));
        dispatch(&mut h.app, Action::OpenCompany(99));
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_help_toggles() {
        let mut h = harness(None, None);
        press(&mut h.app, KeyCode::Char('?'));
        assert_eq!(h.app.modals.top(), Some(&Modal::Help));
        press(&mut h.app, KeyCode::Char('?'));
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_quit_flow_releases_subscription() {
        let mut h = harness(Some("system"), Some(true));
        press(&mut h.app, KeyCode::Char('q'));
        assert_eq!(h.app.modals.top(), Some(&Modal::QuitConfirm));
        assert!(!h.app.should_quit);

        press(&mut h.app, KeyCode::Char('y'));
        assert!(h.app.should_quit);
        assert_eq!(h.scheme.subscriber_count(), 0);
    }

    #[test]
    fn test_ctrl_c_quits_from_splash() {
        let store = MemoryStore::new();
        let scheme = Rc::new(TerminalColorScheme::with_source(Box::new(|| None)));
        let mut app =
            App::with_services(Config::default(), bundled_content().unwrap(), Box::new(store), scheme);
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }
}
