use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::kv::{FileKvStore, KvStore};
use crate::io::opener::{SystemOpener, UrlOpener};
use crate::io::remote::RemoteFetch;
use crate::model::link::{Category, Link, LinkDraft, MANUAL_DESCRIPTION, MANUAL_ICON, OTHER_CATEGORY};
use crate::model::{Config, ThemeName, UiConfig};
use crate::ops::filter::{CategoryFilter, filter_links};
use crate::ops::outbound::{ConfirmOutcome, OutboundGate};
use crate::ops::store::LinkStore;
use crate::util::url_input::prepare_url;

use super::input;
use super::render;
use super::theme::Theme;

/// Label of the pseudo-category that shows every link
pub const ALL_LABEL: &str = "全部";
/// Label of the fallback category in the add form
pub const OTHER_LABEL: &str = "其他";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type DashboardStore = LinkStore<Box<dyn KvStore>>;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    AddLink,
    ConfirmDelete,
    Outbound,
    Help,
}

/// Which add-form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Url,
    Category,
    AutoHttps,
}

impl AddField {
    pub fn next(self) -> AddField {
        match self {
            AddField::Title => AddField::Url,
            AddField::Url => AddField::Category,
            AddField::Category => AddField::AutoHttps,
            AddField::AutoHttps => AddField::Title,
        }
    }

    pub fn prev(self) -> AddField {
        match self {
            AddField::Title => AddField::AutoHttps,
            AddField::Url => AddField::Title,
            AddField::Category => AddField::Url,
            AddField::AutoHttps => AddField::Category,
        }
    }
}

/// State of the add-link dialog
#[derive(Debug, Clone)]
pub struct AddForm {
    pub title: String,
    pub url: String,
    /// Index into [`App::category_choices`]
    pub category_idx: usize,
    pub auto_https: bool,
    pub focus: AddField,
    pub error: Option<&'static str>,
}

impl AddForm {
    pub fn new(category_idx: usize, auto_https: bool) -> Self {
        AddForm {
            title: String::new(),
            url: String::new(),
            category_idx,
            auto_https,
            focus: AddField::Title,
            error: None,
        }
    }

    /// The text buffer behind the focused field, if it is a text field
    pub fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            AddField::Title => Some(&mut self.title),
            AddField::Url => Some(&mut self.url),
            AddField::Category | AddField::AutoHttps => None,
        }
    }
}

/// Main application state
pub struct App {
    pub store: DashboardStore,
    pub gate: OutboundGate,
    pub opener: Box<dyn UrlOpener>,
    /// Startup import; `None` once merged or when disabled
    pub remote: Option<RemoteFetch>,
    pub theme_name: ThemeName,
    pub theme: Theme,
    ui_config: UiConfig,
    pub mode: Mode,
    pub should_quit: bool,
    /// 0 is "all", n is `categories()[n - 1]`
    pub category_cursor: usize,
    pub search_input: String,
    /// Index into the visible links
    pub cursor: usize,
    /// Columns used by the last grid render
    pub grid_columns: usize,
    /// First card row shown by the grid
    pub scroll_row: usize,
    pub add_form: Option<AddForm>,
    /// Link id awaiting delete confirmation
    pub pending_delete: Option<String>,
    pub status_message: Option<String>,
    pub clock: DateTime<Local>,
}

impl App {
    pub fn new(
        store: DashboardStore,
        ui_config: &UiConfig,
        opener: Box<dyn UrlOpener>,
        remote: Option<RemoteFetch>,
    ) -> Self {
        App {
            store,
            gate: OutboundGate::new(),
            opener,
            remote,
            theme_name: ui_config.theme,
            theme: Theme::from_config(ui_config.theme, ui_config),
            ui_config: ui_config.clone(),
            mode: Mode::Navigate,
            should_quit: false,
            category_cursor: 0,
            search_input: String::new(),
            cursor: 0,
            grid_columns: 1,
            scroll_row: 0,
            add_form: None,
            pending_delete: None,
            status_message: None,
            clock: Local::now(),
        }
    }

    pub fn category_filter(&self) -> CategoryFilter {
        match self.category_cursor {
            0 => CategoryFilter::All,
            n => self
                .store
                .categories()
                .get(n - 1)
                .map(|c| CategoryFilter::Id(c.id.clone()))
                .unwrap_or_default(),
        }
    }

    pub fn visible_links(&self) -> Vec<&Link> {
        filter_links(
            self.store.links(),
            &self.category_filter(),
            &self.search_input,
        )
    }

    pub fn selected_link(&self) -> Option<&Link> {
        self.visible_links().get(self.cursor).copied()
    }

    /// Keep the cursor on a visible card after the list changed
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_links().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Move the category selection, wrapping through "all"
    pub fn shift_category(&mut self, delta: isize) {
        let count = self.store.categories().len() as isize + 1;
        let next = (self.category_cursor as isize + delta).rem_euclid(count);
        self.category_cursor = next as usize;
        self.cursor = 0;
        self.scroll_row = 0;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_links().len();
        if len == 0 {
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }

    pub fn cycle_theme(&mut self) {
        self.theme_name = self.theme_name.next();
        self.theme = Theme::from_config(self.theme_name, &self.ui_config);
        self.status_message = Some(format!("theme: {}", self.theme_name.label()));
    }

    /// Categories offered by the add form: every known category, then `other`
    pub fn category_choices(&self) -> Vec<Category> {
        let mut choices = self.store.categories().to_vec();
        if !choices.iter().any(|c| c.id == OTHER_CATEGORY) {
            choices.push(Category {
                id: OTHER_CATEGORY.to_string(),
                name: OTHER_LABEL.to_string(),
            });
        }
        choices
    }

    pub fn open_add_form(&mut self) {
        // Preselect the category being browsed
        let idx = self.category_cursor.saturating_sub(1);
        self.add_form = Some(AddForm::new(idx, self.ui_config.auto_https));
        self.mode = Mode::AddLink;
    }

    pub fn close_add_form(&mut self) {
        self.add_form = None;
        self.mode = Mode::Navigate;
    }

    /// Validate and store the add form. Invalid input keeps the form open.
    pub fn submit_add_form(&mut self) {
        let choices = self.category_choices();
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        let title = form.title.trim();
        if title.is_empty() {
            form.error = Some("请输入网站名称");
            form.focus = AddField::Title;
            return;
        }
        if form.url.trim().is_empty() {
            form.error = Some("请输入网址");
            form.focus = AddField::Url;
            return;
        }
        let url = prepare_url(&form.url, form.auto_https);
        let category = choices
            .get(form.category_idx)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| OTHER_CATEGORY.to_string());
        let draft = LinkDraft {
            title: title.to_string(),
            url,
            description: MANUAL_DESCRIPTION.to_string(),
            category,
            icon: Some(MANUAL_ICON.to_string()),
        };
        let title = self.store.add_manual_link(draft).title.clone();
        self.close_add_form();
        self.clamp_cursor();
        self.status_message = Some(format!("已添加 {title}"));
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_link().map(|l| l.id.clone()) {
            self.pending_delete = Some(id);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take()
            && let Some(link) = self.store.delete_link(&id)
        {
            self.status_message = Some(format!("已移除 {}", link.title));
        }
        self.mode = Mode::Navigate;
        self.clamp_cursor();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    /// Put the selected card behind the outbound gate
    pub fn stage_selected(&mut self, now: Instant) {
        let Some(link) = self.selected_link().cloned() else {
            return;
        };
        self.gate.stage(&link, now);
        self.mode = Mode::Outbound;
    }

    /// Follow the staged link if the countdown has finished
    pub fn confirm_outbound(&mut self) {
        match self.gate.confirm(&mut self.store, self.opener.as_ref()) {
            Ok(ConfirmOutcome::NotReady) => {}
            Ok(ConfirmOutcome::Opened { .. }) => {
                self.mode = Mode::Navigate;
            }
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(format!("无法打开: {e}"));
            }
        }
    }

    pub fn cancel_outbound(&mut self) {
        self.gate.cancel();
        self.mode = Mode::Navigate;
    }

    /// Timer work for one loop iteration. Returns true if anything visible changed.
    pub fn on_tick(&mut self, now: Instant, wall: DateTime<Local>) -> bool {
        let mut changed = self.gate.advance(now);

        if let Some(fetch) = self.remote.as_mut()
            && let Some(drafts) = fetch.poll()
        {
            let report = self.store.merge_remote(drafts);
            if report.added_links > 0 {
                self.status_message = Some(format!("导入了 {} 个推荐链接", report.added_links));
            }
            self.remote = None;
            self.clamp_cursor();
            changed = true;
        } else if self.remote.as_ref().is_some_and(RemoteFetch::is_done) {
            self.remote = None;
        }

        if wall.format("%H:%M").to_string() != self.clock.format("%H:%M").to_string() {
            changed = true;
        }
        self.clock = wall;
        changed
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config: &Config, data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let kv: Box<dyn KvStore> = Box::new(FileKvStore::open(data_dir)?);
    let store: DashboardStore = LinkStore::open(kv);
    let remote = config
        .remote
        .enabled
        .then(|| RemoteFetch::spawn(config.remote.clone()));
    let opener = Box::new(SystemOpener::new(config.ui.opener.clone()));

    let mut app = App::new(store, &config.ui, opener, remote);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        app.on_tick(Instant::now(), Local::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::io::kv::MemoryKvStore;
    use crate::io::opener::testing::RecordingOpener;
    use crate::ops::ids::SequentialIds;

    /// An app over the seed data with an in-memory store and no remote fetch
    pub fn seeded_app() -> App {
        app_with(None)
    }

    pub fn app_with(remote: Option<RemoteFetch>) -> App {
        let kv: Box<dyn KvStore> = Box::new(MemoryKvStore::new());
        let store = LinkStore::open_with_ids(kv, Box::new(SequentialIds::new("m")));
        App::new(
            store,
            &UiConfig::default(),
            Box::new(RecordingOpener::default()),
            remote,
        )
    }
}
