//! The page controller: owns the document handle, the preference flags and
//! every behaviour's state, and reacts to the signals the browser glue
//! forwards to it.

use crate::config::PageConfig;
use crate::cursor::{self, CursorTrail};
use crate::dom::{Dom, Role};
use crate::effects::{self, Deferred, Rect, Tilt};
use crate::error::{PageError, PageResult};
use crate::frame::{FrameTask, LoopHandle};
use crate::nav::{self, Menu};
use crate::particles::{ParticleField, ParticleSystem, Surface};
use crate::prefs::{self, Language, PreferenceStore, Preferences, Theme};
use crate::scroll::{self, OnceObserver};
use crate::timeline::Timeline;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

pub struct PageController<D: Dom, S> {
    dom: D,
    config: PageConfig,
    prefs: Preferences,
    theme_toggle: bool,
    language_toggle: bool,
    menu: Option<Menu<D::Node>>,
    navbar: Option<D::Node>,
    hero_image: Option<D::Node>,
    reveal: OnceObserver<D::Node>,
    progress: OnceObserver<D::Node>,
    particles: Option<ParticleSystem<S>>,
    particles_loop: LoopHandle,
    cursor: Option<CursorTrail<D::Node>>,
    cursor_loop: LoopHandle,
    tilt: Tilt,
    timeline: Timeline<Deferred<D::Node>>,
    disabled: Vec<PageError>,
}

impl<D: Dom, S: Surface> PageController<D, S> {
    /// Wires every behaviour onto `dom`. A missing required control disables
    /// only its own feature; the reason is kept in [`Self::disabled`].
    pub fn init(
        mut dom: D,
        store: Box<dyn PreferenceStore>,
        config: PageConfig,
        viewport: Viewport,
        surface: Option<S>,
        now: f64,
    ) -> Self {
        let mut disabled = Vec::new();
        let mut require = |dom: &D, role: Role| -> bool {
            let found = dom.query(role).is_some();
            if !found {
                log::warn!("{role} not found; feature disabled");
                disabled.push(PageError::MissingElement(role));
            }
            found
        };
        let theme_toggle = require(&dom, Role::ThemeToggle);
        let language_toggle = require(&dom, Role::LanguageToggle);

        let prefs = Preferences::load(store);
        prefs.apply_theme(&mut dom);
        prefs::translate(&mut dom, prefs.language);

        let menu = match Menu::bind(&dom) {
            Ok(menu) => Some(menu),
            Err(err) => {
                log::warn!("navigation menu disabled: {err}");
                disabled.push(err);
                None
            }
        };

        let navbar = dom.query(Role::Navbar);
        let hero_image = dom.query(Role::HeroImage);
        let reveal = scroll::init_reveal(&mut dom);
        let mut progress = OnceObserver::new();
        for bar in dom.query_all(Role::ProgressFill) {
            progress.observe(bar);
        }

        let cursor = cursor::install(&mut dom)
            .map(|marker| CursorTrail::new(marker, config.cursor_ease, config.cursor_hover_scale));

        let particles = surface.map(|surface| {
            let field = ParticleField::new(
                viewport.width,
                viewport.height,
                config.particle_area,
                config.particle_rgb,
            );
            ParticleSystem::new(field, surface)
        });
        if particles.is_none() {
            log::warn!("{} not found; particle background disabled", Role::AnimatedBackground);
        }

        let mut timeline = Timeline::new();
        if let Some(task) = effects::hide_title(&mut dom) {
            timeline.schedule(now, config.title_reveal_delay_ms, task);
        }

        let tilt = Tilt {
            damping: config.tilt_damping,
            lift_px: config.tilt_lift_px,
            perspective_px: config.tilt_perspective_px,
        };

        log::info!(
            "page ready: theme={} language={} reveal={} bars={} particles={}",
            prefs.theme,
            prefs.language,
            reveal.len(),
            progress.len(),
            particles.as_ref().map_or(0, |p| p.field.particles().len()),
        );

        Self {
            dom,
            config,
            prefs,
            theme_toggle,
            language_toggle,
            menu,
            navbar,
            hero_image,
            reveal,
            progress,
            particles,
            particles_loop: LoopHandle::new(),
            cursor,
            cursor_loop: LoopHandle::new(),
            tilt,
            timeline,
            disabled,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn language(&self) -> Language {
        self.prefs.language
    }

    /// Features that were skipped at init, with the reason.
    pub fn disabled(&self) -> &[PageError] {
        &self.disabled
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.is_open())
    }

    pub fn reveal_targets(&self) -> &[D::Node] {
        self.reveal.watched()
    }

    pub fn progress_targets(&self) -> &[D::Node] {
        self.progress.watched()
    }

    pub fn particles(&self) -> Option<&ParticleSystem<S>> {
        self.particles.as_ref()
    }

    pub fn cursor(&self) -> Option<&CursorTrail<D::Node>> {
        self.cursor.as_ref()
    }

    pub fn particles_loop(&self) -> LoopHandle {
        self.particles_loop.clone()
    }

    pub fn cursor_loop(&self) -> LoopHandle {
        self.cursor_loop.clone()
    }

    pub fn on_theme_toggle(&mut self) -> PageResult<Theme> {
        if !self.theme_toggle {
            return Err(PageError::MissingElement(Role::ThemeToggle));
        }
        Ok(self.prefs.toggle_theme(&mut self.dom))
    }

    pub fn on_language_toggle(&mut self) -> PageResult<Language> {
        if !self.language_toggle {
            return Err(PageError::MissingElement(Role::LanguageToggle));
        }
        Ok(self.prefs.toggle_language(&mut self.dom))
    }

    pub fn on_menu_toggle(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.toggle(&mut self.dom);
        }
    }

    pub fn on_nav_link(&mut self, viewport_width: f64) {
        if let Some(menu) = self.menu.as_mut() {
            menu.on_link(&mut self.dom, viewport_width, self.config.narrow_breakpoint);
        }
    }

    /// Scroll target for an in-page anchor, if its element exists.
    pub fn on_anchor(&self, href: &str) -> Option<f64> {
        nav::anchor_target(&self.dom, href, self.config.anchor_offset_px)
    }

    pub fn on_scroll(&mut self, offset: f64) {
        if let Some(navbar) = &self.navbar {
            nav::apply_scrolled(&mut self.dom, navbar, offset, self.config.scroll_threshold);
        }
        if let Some(hero) = &self.hero_image {
            scroll::apply_parallax(&mut self.dom, hero, offset, self.config.parallax_speed);
        }
    }

    /// Reveals first-time intersections; returns the elements to unobserve.
    pub fn on_reveal_entries<I>(&mut self, entries: I) -> Vec<D::Node>
    where
        I: IntoIterator<Item = (D::Node, bool)>,
    {
        let fired = self.reveal.take_visible(entries);
        scroll::reveal(&mut self.dom, &fired);
        fired
    }

    /// Starts the fill animation for first-time visible bars; returns the
    /// elements to unobserve.
    pub fn on_progress_entries<I>(&mut self, entries: I, now: f64) -> Vec<D::Node>
    where
        I: IntoIterator<Item = (D::Node, bool)>,
    {
        let fired = self.progress.take_visible(entries);
        for bar in &fired {
            let task = effects::start_fill(&mut self.dom, bar);
            self.timeline
                .schedule(now, self.config.progress_fill_delay_ms, task);
        }
        fired
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.follower.on_mouse_move(x, y);
        }
    }

    pub fn on_interactive_hover(&mut self, hovering: bool) {
        if let Some(cursor) = &self.cursor {
            cursor.hover(&mut self.dom, hovering);
        }
    }

    pub fn on_card_move(&mut self, card: &D::Node, rect: Rect, x: f64, y: f64) {
        let transform = self.tilt.transform(rect, x, y);
        self.dom.set_style(card, "transform", &transform);
    }

    pub fn on_card_leave(&mut self, card: &D::Node) {
        let rest = self.tilt.rest();
        self.dom.set_style(card, "transform", &rest);
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        if let Some(particles) = self.particles.as_mut() {
            particles.resize(viewport.width, viewport.height);
        }
    }

    pub fn on_load(&mut self) {
        effects::mark_loaded(&mut self.dom);
    }

    /// One animation frame for every running frame task.
    pub fn frame(&mut self, now: f64) {
        if self.particles_loop.is_running() {
            if let Some(particles) = self.particles.as_mut() {
                particles.frame(now);
            }
        }
        if self.cursor_loop.is_running() {
            if let Some(cursor) = self.cursor.as_mut() {
                cursor.frame(now);
                cursor.paint(&mut self.dom);
            }
        }
    }

    pub fn animations_running(&self) -> bool {
        self.particles_loop.is_running() || self.cursor_loop.is_running()
    }

    pub fn stop_animations(&mut self) {
        self.particles_loop.stop();
        self.cursor_loop.stop();
        log::info!("animations stopped");
    }

    /// Applies every deferred task due at `now`.
    pub fn run_due(&mut self, now: f64) {
        for task in self.timeline.due(now) {
            task.apply(&mut self.dom);
        }
    }

    /// Timer delays the host must arm so `run_due` gets called.
    pub fn take_wakeups(&mut self) -> Vec<u32> {
        self.timeline.take_wakeups()
    }
}
