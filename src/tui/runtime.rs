//! # Runtime
//!
//! The input state machine that ties screens together. It owns the screen
//! registry, remembers where "back" goes, captures keys while searching,
//! runs leader-key chords and holds the optional detail overlay.
//!
//! ## Dispatch order
//!
//! Every key goes through these steps; the first that applies wins:
//!
//! ```text
//!  1. search capture     esc / enter / backspace / text, rest swallowed
//!  2. leader             chord toggles; next key tries the leader table
//!  3. exit key
//!  4. detail scroll      J / K while a detail is attached
//!  5. esc                nested → back, top → exit
//!  6. /                  start searching (searchable screens)
//!  7. ? / H              about / help (top tier)
//!  8. tab / shift+tab    cycle screens (slot.tab)
//!  9. down / up
//! 10. v                  toggle detail overlay
//! 11. enter
//! ```
//!
//! The runtime never touches the terminal. [`Runtime::handle_key`] and
//! [`Runtime::tick`] take the current `Instant` so tests can drive the
//! leader timeout without sleeping; [`Runtime::render`] returns composed
//! lines for whatever width the caller has.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use log::{debug, info};
use ratatui::text::Line;

use crate::core::config::ResolvedConfig;
use crate::core::error::{Error, Result};
use crate::core::{Intent, Primitive, Tier};
use crate::tui::keys::{self, KeyBinding};
use crate::tui::panel;
use crate::tui::theme::Theme;

pub type Screen<S> = Box<dyn Primitive<S>>;

/// What a handled key asks of the terminal loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    Ignored,
    /// State changed; redraw.
    Render,
    /// Leave the loop.
    Exit,
    /// Opaque action for the embedding application.
    Action(String),
    /// External link for the embedding application.
    Link(String),
}

/// What a leader shortcut does once matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderAction<S> {
    /// Same as pressing enter on the current screen.
    Enter,
    /// Same as toggling the detail view on.
    View,
    /// Route a fixed intent.
    Intent(Intent<S>),
}

/// One entry of a screen's leader table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderKey<S> {
    pub key: char,
    pub label: String,
    pub action: LeaderAction<S>,
}

impl<S> LeaderKey<S> {
    pub fn new(key: char, label: impl Into<String>, action: LeaderAction<S>) -> Self {
        Self {
            key,
            label: label.into(),
            action,
        }
    }
}

/// Cancellable leader deadline. Arming always replaces the previous one.
#[derive(Debug, Clone, Copy)]
pub struct LeaderTimer {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl LeaderTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.cancel();
        self.deadline = Some(now + self.timeout);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

/// Configurable chords and the leader timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    pub leader: KeyBinding,
    pub exit: Option<KeyBinding>,
    pub leader_timeout: Duration,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            leader: KeyBinding::ctrl('x'),
            exit: None,
            leader_timeout: Duration::from_millis(2000),
        }
    }
}

impl KeyMap {
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        Ok(Self {
            leader: config.leader_key.parse::<KeyBinding>()?,
            exit: config.exit_key.as_deref().map(str::parse::<KeyBinding>).transpose()?,
            leader_timeout: config.leader_timeout,
        })
    }
}

/// Everything a [`Runtime`] is wired from.
pub struct RuntimeConfig<S> {
    pub screens: HashMap<S, Screen<S>>,
    pub details: HashMap<String, Screen<S>>,
    pub cycle: Vec<S>,
    pub initial: S,
    pub about: S,
    pub help: S,
    pub leader: HashMap<S, Vec<LeaderKey<S>>>,
    pub keys: KeyMap,
    pub theme: Theme,
}

impl<S: Copy + Eq + Hash> RuntimeConfig<S> {
    pub fn new(initial: S, about: S, help: S) -> Self {
        Self {
            screens: HashMap::new(),
            details: HashMap::new(),
            cycle: Vec::new(),
            initial,
            about,
            help,
            leader: HashMap::new(),
            keys: KeyMap::default(),
            theme: Theme::default(),
        }
    }

    pub fn screen(mut self, id: S, primitive: impl Primitive<S> + 'static) -> Self {
        self.screens.insert(id, Box::new(primitive));
        self
    }

    pub fn detail(mut self, key: impl Into<String>, primitive: impl Primitive<S> + 'static) -> Self {
        self.details.insert(key.into(), Box::new(primitive));
        self
    }

    pub fn cycle(mut self, cycle: Vec<S>) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn leader(mut self, id: S, entries: Vec<LeaderKey<S>>) -> Self {
        self.leader.insert(id, entries);
        self
    }

    pub fn keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

pub struct Runtime<S> {
    screens: HashMap<S, Screen<S>>,
    details: HashMap<String, Screen<S>>,
    cycle: Vec<S>,
    about: S,
    help: S,
    leader_tables: HashMap<S, Vec<LeaderKey<S>>>,
    keys: KeyMap,
    theme: Theme,

    screen: S,
    prev: S,
    query: String,
    searching: bool,
    leader: LeaderTimer,
    detail: Option<String>,
}

impl<S: Copy + Eq + Hash + Debug> Runtime<S> {
    /// Fails if any screen the runtime may switch to on its own is missing
    /// from the registry.
    pub fn new(config: RuntimeConfig<S>) -> Result<Self> {
        let table_targets = config.leader.iter().flat_map(|(id, entries)| {
            std::iter::once(*id).chain(entries.iter().filter_map(|e| match e.action {
                LeaderAction::Intent(Intent::Screen(s)) => Some(s),
                _ => None,
            }))
        });
        let required = [config.initial, config.about, config.help]
            .into_iter()
            .chain(config.cycle.iter().copied())
            .chain(table_targets);
        for id in required {
            if !config.screens.contains_key(&id) {
                return Err(Error::UnknownScreen(format!("{id:?}")));
            }
        }

        let mut runtime = Self {
            screens: config.screens,
            details: config.details,
            cycle: config.cycle,
            about: config.about,
            help: config.help,
            leader_tables: config.leader,
            leader: LeaderTimer::new(config.keys.leader_timeout),
            keys: config.keys,
            theme: config.theme,
            screen: config.initial,
            prev: config.initial,
            query: String::new(),
            searching: false,
            detail: None,
        };
        runtime.set_screen(config.initial)?;
        info!("Runtime started on {:?}", config.initial);
        Ok(runtime)
    }

    pub fn screen(&self) -> S {
        self.screen
    }

    pub fn prev(&self) -> S {
        self.prev
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn searching(&self) -> bool {
        self.searching
    }

    pub fn leader_armed(&self) -> bool {
        self.leader.armed()
    }

    /// Key of the attached detail overlay.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn current(&self) -> Result<&Screen<S>> {
        self.screens
            .get(&self.screen)
            .ok_or_else(|| Error::UnknownScreen(format!("{:?}", self.screen)))
    }

    fn current_mut(&mut self) -> Result<&mut Screen<S>> {
        let screen = self.screen;
        self.screens
            .get_mut(&screen)
            .ok_or_else(|| Error::UnknownScreen(format!("{screen:?}")))
    }

    fn attached_mut(&mut self) -> Option<&mut Screen<S>> {
        let key = self.detail.as_ref()?;
        self.details.get_mut(key)
    }

    /// Disarm the leader if its deadline has passed. Returns true when
    /// that changed what should be drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.leader.expired(now) {
            self.leader.cancel();
            debug!("Leader timed out");
            return true;
        }
        false
    }

    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Result<Effect> {
        let timed_out = self.tick(now);

        if self.searching {
            return self.search_key(key);
        }

        if self.keys.leader.matches(key) {
            if self.leader.armed() {
                self.leader.cancel();
                debug!("Leader disarmed");
            } else {
                self.leader.arm(now);
                debug!("Leader armed");
            }
            return Ok(Effect::Render);
        }

        let mut disarmed = timed_out;
        if self.leader.armed() {
            self.leader.cancel();
            disarmed = true;
            if let Some(effect) = self.leader_key(key)? {
                return Ok(effect);
            }
        }

        let effect = self.dispatch(key)?;
        if disarmed && effect == Effect::Ignored {
            return Ok(Effect::Render);
        }
        Ok(effect)
    }

    fn search_key(&mut self, key: &KeyEvent) -> Result<Effect> {
        if keys::esc(key) {
            self.searching = false;
            self.query.clear();
            self.apply_query()?;
            debug!("Search cancelled");
        } else if keys::enter(key) {
            self.searching = false;
            debug!("Search kept: {:?}", self.query);
        } else if keys::back(key) {
            self.query.pop();
            self.apply_query()?;
        } else if let Some(c) = keys::text(key) {
            self.query.push(c);
            self.apply_query()?;
        } else {
            return Ok(Effect::Ignored);
        }
        Ok(Effect::Render)
    }

    /// Match an armed leader key against the current screen's table.
    /// `None` means no entry matched and dispatch continues.
    fn leader_key(&mut self, key: &KeyEvent) -> Result<Option<Effect>> {
        let Some(c) = keys::text(key) else {
            return Ok(None);
        };
        let action = self
            .leader_tables
            .get(&self.screen)
            .and_then(|table| table.iter().find(|e| e.key.eq_ignore_ascii_case(&c)))
            .map(|e| e.action.clone());
        let Some(action) = action else {
            debug!("Leader miss: {c:?}");
            return Ok(None);
        };
        debug!("Leader hit: {c:?}");
        let intent = match action {
            LeaderAction::Enter => self.current()?.enter(),
            LeaderAction::View => self.current()?.view(),
            LeaderAction::Intent(intent) => Some(intent),
        };
        let effect = match intent {
            Some(intent) => self.route(intent)?,
            None => Effect::Render,
        };
        Ok(Some(effect))
    }

    fn dispatch(&mut self, key: &KeyEvent) -> Result<Effect> {
        if self.keys.exit.is_some_and(|exit| exit.matches(key)) {
            info!("Exit key pressed");
            return Ok(Effect::Exit);
        }

        let step = keys::detail_scroll(key);
        if step != 0
            && let Some(detail) = self.attached_mut()
        {
            if step > 0 {
                detail.down();
            } else {
                detail.up();
            }
            return Ok(Effect::Render);
        }

        let slot = self.current()?.slot();

        if keys::esc(key) {
            return match slot.tier {
                Tier::Nested => {
                    debug!("Back to {:?}", self.prev);
                    self.set_screen(self.prev)?;
                    Ok(Effect::Render)
                }
                Tier::Top => {
                    info!("Closed from {:?}", self.screen);
                    Ok(Effect::Exit)
                }
            };
        }

        if keys::slash(key) && self.current()?.search() {
            self.searching = true;
            self.query.clear();
            self.apply_query()?;
            debug!("Search started on {:?}", self.screen);
            return Ok(Effect::Render);
        }

        if slot.tier == Tier::Top {
            let target = if keys::about(key) {
                Some(self.about)
            } else if keys::help(key) {
                Some(self.help)
            } else {
                None
            };
            if let Some(target) = target {
                self.prev = self.screen;
                self.set_screen(target)?;
                return Ok(Effect::Render);
            }
        }

        if slot.tab {
            if keys::tab(key) {
                return self.cycle_screen(true);
            }
            if keys::backtab(key) {
                return self.cycle_screen(false);
            }
        }

        if keys::down(key) {
            self.current_mut()?.down();
            return Ok(Effect::Render);
        }
        if keys::up(key) {
            self.current_mut()?.up();
            return Ok(Effect::Render);
        }

        if keys::view(key) {
            if self.detail.take().is_some() {
                debug!("Detail detached");
                return Ok(Effect::Render);
            }
            let current = self.current()?;
            if !current.has_view() {
                return Ok(Effect::Ignored);
            }
            let intent = current.view();
            return match intent {
                Some(intent) => self.route(intent),
                None => Ok(Effect::Render),
            };
        }

        if keys::enter(key) {
            let intent = self.current()?.enter();
            return match intent {
                Some(intent) => self.route(intent),
                None => Ok(Effect::Render),
            };
        }

        Ok(Effect::Ignored)
    }

    fn cycle_screen(&mut self, forward: bool) -> Result<Effect> {
        let len = self.cycle.len();
        if len == 0 {
            return Ok(Effect::Ignored);
        }
        let next = match self.cycle.iter().position(|s| *s == self.screen) {
            None => 0,
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
        };
        self.set_screen(self.cycle[next])?;
        Ok(Effect::Render)
    }

    /// Switch screens and drop any transient search state.
    fn set_screen(&mut self, screen: S) -> Result<()> {
        if !self.screens.contains_key(&screen) {
            return Err(Error::UnknownScreen(format!("{screen:?}")));
        }
        self.screen = screen;
        self.searching = false;
        self.query.clear();
        let next = self.current_mut()?;
        if next.search() {
            next.set("");
        }
        debug!("Screen is now {screen:?}");
        Ok(())
    }

    fn apply_query(&mut self) -> Result<()> {
        let query = self.query.clone();
        let current = self.current_mut()?;
        if current.search() {
            current.set(&query);
        }
        Ok(())
    }

    fn route(&mut self, intent: Intent<S>) -> Result<Effect> {
        match intent {
            Intent::Screen(screen) => {
                let from = self.screen;
                self.set_screen(screen)?;
                self.prev = from;
                Ok(Effect::Render)
            }
            Intent::Detail(key) => {
                if !self.details.contains_key(&key) {
                    return Err(Error::UnknownDetail(key));
                }
                debug!("Detail attached: {key}");
                self.detail = Some(key);
                Ok(Effect::Render)
            }
            Intent::Action(name) => {
                info!("Action requested: {name}");
                Ok(Effect::Action(name))
            }
            Intent::Link(url) => {
                info!("Link requested: {url}");
                Ok(Effect::Link(url))
            }
        }
    }

    /// Detail box (if attached), a blank line, then the base panel.
    pub fn render(&self, width: usize) -> Result<Vec<Line<'static>>> {
        let slot = self.current()?.slot();
        let table = self
            .leader_tables
            .get(&self.screen)
            .filter(|t| self.leader.armed() && !t.is_empty());
        let base = match table {
            Some(table) => {
                let hint = panel::leader_footer(&self.theme, table.iter().map(|e| (e.key, e.label.as_str())));
                panel::compose_with_footer(&slot, &self.theme, width, hint)
            }
            None => panel::compose(&slot, &self.theme, width),
        };

        let detail = self.detail.as_ref().and_then(|key| self.details.get(key));
        let Some(detail) = detail else {
            return Ok(base);
        };
        let mut out = panel::compose_detail(&detail.slot(), &self.theme, width, base.len());
        out.push(Line::default());
        out.extend(base);
        Ok(out)
    }
}
