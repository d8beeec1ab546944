//! The job board screen.
//!
//! [`App`] owns the filter state and hosts two [`Dropdown`]s (category and
//! region), a debounced keyword box and a paginated result list. It is
//! driven by [`Msg`]s and renders to a string, so the terminal loop and the
//! tests drive it the same way.
//!
//! The dropdowns are controlled: their `on_change` callbacks only post a
//! [`Change`] to the app, which updates its filter and writes the new value
//! back into the dropdown.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use droplist::debounce::Debouncer;
use droplist::dismiss::DismissHub;
use droplist::dropdown::Dropdown;
use droplist::key::{KeyMsg, KeyType};
use droplist::paginator::Paginator;
use droplist::pointer::{PointerButton, PointerMsg, Rect};
use droplist::recent::RecentStore;
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use crate::canvas::Canvas;
use crate::catalog::{Catalog, Job, Locale};
use crate::config::{Config, MAX_PER_PAGE};
use crate::filter::Filter;

const TITLE_ROW: usize = 0;
const LABEL_ROW: usize = 2;
const CONTROL_ROW: u16 = 3;
const RESULTS_LABEL_ROW: usize = 5;
const RESULTS_ROW: usize = 6;
const LEFT: u16 = 2;
const GAP: u16 = 3;
const KEYWORD_WIDTH: u16 = 22;
const DROPDOWN_MAX_WIDTH: u16 = 32;
const RECENT_SHOWN: usize = 3;
const PAGE_SIBLINGS: usize = 1;
const MIN_WIDTH: usize = 72;
const FOCUS_MARK: &str = "▸";

/// Input to [`App::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(KeyMsg),
    Pointer(PointerMsg),
    /// Periodic wake-up; releases a settled keyword.
    Tick,
}

/// Which control receives keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Focus {
    #[default]
    Category,
    Region,
    Keyword,
    Results,
}

impl Focus {
    /// The next control in Tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Category => Self::Region,
            Self::Region => Self::Keyword,
            Self::Keyword => Self::Results,
            Self::Results => Self::Category,
        }
    }

    /// The previous control in Tab order.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Category => Self::Results,
            Self::Region => Self::Category,
            Self::Keyword => Self::Region,
            Self::Results => Self::Keyword,
        }
    }
}

/// A value committed by one of the dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Category(String),
    Region(String),
}

struct Labels {
    title: &'static str,
    category: &'static str,
    region: &'static str,
    keyword: &'static str,
    results: &'static str,
    recent: &'static str,
    no_results: &'static str,
    help: &'static str,
}

static KA: Labels = Labels {
    title: "ვაკანსიები",
    category: "კატეგორია",
    region: "რეგიონი",
    keyword: "საძიებო სიტყვა",
    results: "შედეგები",
    recent: "ბოლო ძიებები",
    no_results: "ვაკანსია ვერ მოიძებნა",
    help: "tab ველი · enter არჩევა · [ ] გვერდი · q გასვლა",
};

static EN: Labels = Labels {
    title: "Job board",
    category: "Category",
    region: "Region",
    keyword: "Keyword",
    results: "Results",
    recent: "Recent searches",
    no_results: "No matching jobs",
    help: "tab focus · enter select · [ ] page · q quit",
};

const fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::Ka => &KA,
        Locale::En => &EN,
    }
}

/// Job board application state.
pub struct App {
    catalog: Catalog,
    locale: Locale,
    hub: DismissHub,
    category: Dropdown,
    region: Dropdown,
    changes: Receiver<Change>,
    keyword_input: String,
    keyword: Debouncer<String>,
    keyword_box: Rect,
    filter: Filter,
    paginator: Paginator,
    recent: RecentStore<Filter>,
    history: Option<PathBuf>,
    focus: Focus,
    quit: bool,
}

impl App {
    /// Builds the screen for `catalog`, restoring recent searches from the
    /// configured history file.
    ///
    /// An unreadable history file is logged and replaced by an empty one.
    #[must_use]
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let recent = match &config.history {
            Some(path) => RecentStore::load(path, config.history_size).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring unreadable recent searches");
                RecentStore::new(config.history_size)
            }),
            None => RecentStore::new(config.history_size),
        };

        let (tx, changes) = mpsc::channel();
        let hub = DismissHub::new();
        let locale = config.locale;

        let mut category = Dropdown::new()
            .options(catalog.category_options(locale))
            .value("")
            .placeholder(labels(locale).category)
            .max_width(DROPDOWN_MAX_WIDTH)
            .keymap(config.keymap.clone())
            .on_change(forward(&tx, Change::Category));
        let mut region = Dropdown::new()
            .options(catalog.region_options(locale))
            .value("")
            .placeholder(labels(locale).region)
            .max_width(DROPDOWN_MAX_WIDTH)
            .keymap(config.keymap.clone())
            .on_change(forward(&tx, Change::Region));
        category.mount(&hub);
        region.mount(&hub);

        let mut app = Self {
            catalog,
            locale,
            hub,
            category,
            region,
            changes,
            keyword_input: String::new(),
            keyword: Debouncer::new(config.debounce),
            keyword_box: Rect::default(),
            filter: Filter::default(),
            paginator: Paginator::new().per_page(config.per_page.clamp(1, MAX_PER_PAGE)),
            recent,
            history: config.history.clone(),
            focus: Focus::default(),
            quit: false,
        };
        app.layout();
        app.refresh_pages();
        info!(
            locale = %locale,
            jobs = app.catalog.jobs.len(),
            recent = app.recent.len(),
            "job board ready"
        );
        app
    }

    fn layout(&mut self) {
        self.category.layout(LEFT, CONTROL_ROW);
        let region_x = LEFT
            .saturating_add(self.category.resolved_width())
            .saturating_add(GAP);
        self.region.layout(region_x, CONTROL_ROW);
        let keyword_x = region_x
            .saturating_add(self.region.resolved_width())
            .saturating_add(GAP);
        self.keyword_box = Rect::new(keyword_x, CONTROL_ROW, KEYWORD_WIDTH, 1);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The applied filter.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Text in the keyword box, which may not be applied yet.
    #[must_use]
    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    /// The focused control.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// The category dropdown.
    #[must_use]
    pub const fn category(&self) -> &Dropdown {
        &self.category
    }

    /// The region dropdown.
    #[must_use]
    pub const fn region(&self) -> &Dropdown {
        &self.region
    }

    /// The dismissal hub shared by both dropdowns.
    #[must_use]
    pub const fn hub(&self) -> &DismissHub {
        &self.hub
    }

    /// The result paginator.
    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Recent searches, newest first.
    #[must_use]
    pub const fn recent(&self) -> &RecentStore<Filter> {
        &self.recent
    }

    /// All jobs matching the filter.
    #[must_use]
    pub fn results(&self) -> Vec<&Job> {
        self.filter.apply(&self.catalog)
    }

    /// Jobs on the current page.
    #[must_use]
    pub fn page_results(&self) -> Vec<&Job> {
        let results = self.results();
        let (start, end) = self.paginator.slice_bounds(results.len());
        results[start..end].to_vec()
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Applies one message. `now` drives the keyword debounce.
    pub fn update(&mut self, msg: Msg, now: Instant) {
        match msg {
            Msg::Key(key) => self.on_key(&key, now),
            Msg::Pointer(pointer) => self.on_pointer(&pointer),
            Msg::Tick => {}
        }
        self.drain_changes();
        if let Some(keyword) = self.keyword.poll(now) {
            self.apply_keyword(&keyword);
        }
    }

    fn on_key(&mut self, key: &KeyMsg, now: Instant) {
        if key.key_type == KeyType::CtrlC {
            self.quit = true;
            return;
        }

        let handled = match self.focus {
            Focus::Category => self.category.handle_key(key).consumed,
            Focus::Region => self.region.handle_key(key).consumed,
            Focus::Keyword => self.keyword_key(key, now),
            Focus::Results => self.results_key(key),
        };
        if handled {
            return;
        }

        match key.key_type {
            KeyType::Tab => self.set_focus(self.focus.next()),
            KeyType::ShiftTab => self.set_focus(self.focus.prev()),
            KeyType::PgUp => self.paginator.prev_page(),
            KeyType::PgDown => self.paginator.next_page(),
            _ => match key.printable() {
                Some('[') => self.paginator.prev_page(),
                Some(']') => self.paginator.next_page(),
                Some('q') => self.quit = true,
                _ => {}
            },
        }
    }

    fn keyword_key(&mut self, key: &KeyMsg, now: Instant) -> bool {
        match key.key_type {
            KeyType::Backspace => {
                self.keyword_input.pop();
            }
            KeyType::CtrlU => self.keyword_input.clear(),
            KeyType::Space => self.keyword_input.push(' '),
            KeyType::Esc => {
                self.keyword_input.clear();
                self.keyword.cancel();
                self.apply_keyword("");
                return true;
            }
            KeyType::Enter => {
                self.keyword.cancel();
                let keyword = self.keyword_input.clone();
                self.apply_keyword(&keyword);
                return true;
            }
            _ => match key.printable() {
                Some(c) => self.keyword_input.push(c),
                None => return false,
            },
        }
        self.keyword.push(self.keyword_input.clone(), now);
        true
    }

    fn results_key(&mut self, key: &KeyMsg) -> bool {
        match key.key_type {
            KeyType::Up | KeyType::Left => self.paginator.prev_page(),
            KeyType::Down | KeyType::Right => self.paginator.next_page(),
            KeyType::Home => self.paginator.set_page(0),
            KeyType::End => self
                .paginator
                .set_page(self.paginator.get_total_pages().saturating_sub(1)),
            _ => return false,
        }
        true
    }

    fn on_pointer(&mut self, pointer: &PointerMsg) {
        // Dismissal first, so a click elsewhere closes any open list.
        self.hub.dispatch(pointer);

        let (x, y) = (pointer.x, pointer.y);
        if self.category.boundary().contains(x, y) {
            if pointer.is_down() {
                self.set_focus(Focus::Category);
            }
            self.category.handle_pointer(pointer);
        } else if self.region.boundary().contains(x, y) {
            if pointer.is_down() {
                self.set_focus(Focus::Region);
            }
            self.region.handle_pointer(pointer);
        } else if pointer.is_down() && self.keyword_box.contains(x, y) {
            self.set_focus(Focus::Keyword);
        } else if usize::from(y) >= RESULTS_LABEL_ROW {
            match pointer.button {
                PointerButton::WheelUp => self.paginator.prev_page(),
                PointerButton::WheelDown => self.paginator.next_page(),
                _ if pointer.is_down() => self.set_focus(Focus::Results),
                _ => {}
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus != self.focus {
            self.category.close();
            self.region.close();
            debug!(from = ?self.focus, to = ?focus, "focus moved");
            self.focus = focus;
        }
    }

    fn drain_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            match change {
                Change::Category(value) => {
                    self.category.set_value(value.as_str());
                    self.filter.category = value;
                }
                Change::Region(value) => {
                    self.region.set_value(value.as_str());
                    self.filter.region = value;
                }
            }
            self.filter_changed();
        }
    }

    fn apply_keyword(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        if keyword == self.filter.keyword {
            return;
        }
        self.filter.keyword = keyword.to_string();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        info!(filter = ?self.filter, "filter changed");
        self.paginator.set_page(0);
        self.refresh_pages();
        if !self.filter.is_empty() {
            self.recent.push(self.filter.clone());
            self.save_recent();
        }
    }

    fn refresh_pages(&mut self) {
        let count = self.results().len();
        self.paginator.set_total_pages_from_items(count);
    }

    fn save_recent(&self) {
        let Some(path) = &self.history else {
            return;
        };
        if let Err(err) = self.recent.save(path) {
            warn!(path = %path.display(), %err, "failed to save recent searches");
        }
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Renders the whole screen.
    #[must_use]
    pub fn view(&self) -> String {
        let text = labels(self.locale);
        let per_page = self.paginator.get_per_page();
        let page_bar_row = RESULTS_ROW + per_page + 1;
        let recent_row = page_bar_row + 2;
        let help_row = recent_row + RECENT_SHOWN + 2;

        let keyword_x = usize::from(self.keyword_box.x);
        let width = (keyword_x + usize::from(KEYWORD_WIDTH) + 2).max(MIN_WIDTH);
        let mut canvas = Canvas::new(width, help_row + 1);

        canvas.put(usize::from(LEFT), TITLE_ROW, text.title);

        let category_x = usize::from(self.category.boundary().trigger.x);
        let region_x = usize::from(self.region.boundary().trigger.x);
        self.put_label(&mut canvas, Focus::Category, category_x, LABEL_ROW, text.category);
        self.put_label(&mut canvas, Focus::Region, region_x, LABEL_ROW, text.region);
        self.put_label(&mut canvas, Focus::Keyword, keyword_x, LABEL_ROW, text.keyword);
        canvas.put(keyword_x, usize::from(CONTROL_ROW), &self.keyword_view());

        let results = self.results();
        let results_label = format!("{} ({})", text.results, results.len());
        self.put_label(
            &mut canvas,
            Focus::Results,
            usize::from(LEFT),
            RESULTS_LABEL_ROW,
            &results_label,
        );

        let (start, end) = self.paginator.slice_bounds(results.len());
        if results.is_empty() {
            canvas.put(usize::from(LEFT) + 2, RESULTS_ROW, text.no_results);
        }
        for (i, job) in results[start..end].iter().enumerate() {
            canvas.put(usize::from(LEFT), RESULTS_ROW + i, &self.job_line(start + i + 1, job));
        }
        canvas.put(
            usize::from(LEFT),
            page_bar_row,
            &format!("‹ {} ›", self.paginator.view(PAGE_SIBLINGS)),
        );

        canvas.put(usize::from(LEFT), recent_row, text.recent);
        for (i, filter) in self.recent.items().iter().take(RECENT_SHOWN).enumerate() {
            let line = format!("{}. {}", i + 1, filter.describe(&self.catalog, self.locale));
            canvas.put(usize::from(LEFT) + 2, recent_row + 1 + i, &line);
        }

        canvas.put(usize::from(LEFT), help_row, text.help);

        // Dropdowns last: an open list covers the rows beneath it.
        let (first, second) = if self.region.is_open() {
            (&self.category, &self.region)
        } else {
            (&self.region, &self.category)
        };
        for dropdown in [first, second] {
            let trigger = dropdown.boundary().trigger;
            canvas.put(usize::from(trigger.x), usize::from(trigger.y), &dropdown.view());
        }

        canvas.render()
    }

    fn put_label(&self, canvas: &mut Canvas, focus: Focus, x: usize, y: usize, label: &str) {
        if self.focus == focus {
            canvas.put(x.saturating_sub(2), y, FOCUS_MARK);
        }
        canvas.put(x, y, label);
    }

    fn keyword_view(&self) -> String {
        let inner = usize::from(KEYWORD_WIDTH) - 2;
        let cursor = if self.focus == Focus::Keyword { "_" } else { "" };
        let budget = inner - cursor.len();

        // Keep the tail visible while typing past the box.
        let mut shown: Vec<char> = Vec::new();
        let mut used = 0;
        for c in self.keyword_input.chars().rev() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > budget {
                break;
            }
            shown.push(c);
            used += w;
        }
        let shown: String = shown.into_iter().rev().collect();
        let text = format!("{shown}{cursor}");
        let pad = inner.saturating_sub(text.width());
        format!("[{text}{}]", " ".repeat(pad))
    }

    fn job_line(&self, n: usize, job: &Job) -> String {
        let region = self
            .catalog
            .region_name(&job.region, self.locale)
            .unwrap_or(job.region.as_str());
        format!(
            "{n:>2}. {} — {} · {region}",
            job.title.get(self.locale),
            job.company
        )
    }
}

/// Builds an `on_change` callback that posts `wrap(value)` to the app.
fn forward(tx: &Sender<Change>, wrap: fn(String) -> Change) -> impl FnMut(&str) + Send + 'static {
    let tx = tx.clone();
    move |value| {
        // The receiver lives in the App, which owns the dropdown.
        let _ = tx.send(wrap(value.to_string()));
    }
}
