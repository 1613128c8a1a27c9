use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use farmhand_core::domain::Buyer;
use farmhand_core::filter::{
    matches, smart_group_counts, FilterState, QuickFilter, SmartGroup, SmartGroupCounts,
};
use farmhand_core::time::now_utc;

const LIST_EMPTY: &str = "No buyers. Import a CSV or add one with the CLI.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    SearchEditing,
}

pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub needs_reload: bool,
    pub search_input: String,
    pub quick: Vec<QuickFilter>,
    /// None selects the implicit "All Buyers" sidebar row.
    pub smart_group: Option<SmartGroup>,
    pub buyers: Vec<Buyer>,
    pub counts: SmartGroupCounts,
    pub visible: Vec<usize>,
    pub selected: usize,
    pub status: Option<String>,
    pub error: Option<String>,
    pub empty_hint: &'static str,
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::List,
            show_help: false,
            should_quit: false,
            needs_reload: true,
            search_input: String::new(),
            quick: Vec::new(),
            smart_group: None,
            buyers: Vec::new(),
            counts: SmartGroupCounts::default(),
            visible: Vec::new(),
            selected: 0,
            status: None,
            error: None,
            empty_hint: LIST_EMPTY,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Wholesale snapshot swap; sidebar counts come from the full
    /// collection, never the filtered view.
    pub fn apply_snapshot(&mut self, buyers: Vec<Buyer>) {
        self.buyers = buyers;
        self.counts = smart_group_counts(&self.buyers);
        self.refilter();
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.search_input.clone(),
            quick: self.quick.clone(),
            smart_group: self.smart_group,
            ..Default::default()
        }
    }

    pub fn refilter(&mut self) {
        let state = self.filter_state();
        let now = now_utc();
        self.visible = self
            .buyers
            .iter()
            .enumerate()
            .filter(|(_, buyer)| matches(buyer, &state, now))
            .map(|(index, _)| index)
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn selected_buyer(&self) -> Option<&Buyer> {
        self.visible
            .get(self.selected)
            .and_then(|index| self.buyers.get(*index))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::SearchEditing => self.handle_search_key(key),
            Mode::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_input.clear();
                self.mode = Mode::List;
                self.refilter();
            }
            KeyCode::Enter => {
                self.mode = Mode::List;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.refilter();
            }
            KeyCode::Char(ch) => {
                self.search_input.push(ch);
                self.refilter();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.mode = Mode::SearchEditing,
            KeyCode::Char('r') => self.needs_reload = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.visible.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Tab => {
                self.cycle_smart_group();
                self.refilter();
            }
            KeyCode::Char(ch @ '1'..='4') => {
                let index = ch as usize - '1' as usize;
                self.toggle_quick(QuickFilter::ALL[index]);
                self.refilter();
            }
            KeyCode::Char('x') | KeyCode::Esc => {
                self.search_input.clear();
                self.quick.clear();
                self.smart_group = None;
                self.refilter();
            }
            _ => {}
        }
    }

    fn toggle_quick(&mut self, quick: QuickFilter) {
        if let Some(position) = self.quick.iter().position(|entry| *entry == quick) {
            self.quick.remove(position);
        } else {
            self.quick.push(quick);
        }
    }

    fn cycle_smart_group(&mut self) {
        self.smart_group = match self.smart_group {
            None => Some(SmartGroup::ALL[0]),
            Some(current) => {
                let position = SmartGroup::ALL
                    .iter()
                    .position(|group| *group == current)
                    .unwrap_or(0);
                if position + 1 < SmartGroup::ALL.len() {
                    Some(SmartGroup::ALL[position + 1])
                } else {
                    None
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Mode};
    use crossterm::event::{KeyCode, KeyEvent};
    use farmhand_core::domain::{Buyer, BuyerId, BuyerStatus};
    use farmhand_core::filter::SmartGroup;

    fn buyer(name: &str, vip: bool) -> Buyer {
        Buyer {
            id: BuyerId::new(),
            fname: Some(name.to_string()),
            lname: None,
            full_name: None,
            email: None,
            phone: None,
            phone2: None,
            phone3: None,
            company: None,
            score: 0,
            notes: None,
            mailing_address: None,
            mailing_city: None,
            mailing_state: None,
            mailing_zip: None,
            locations: Vec::new(),
            tags: Vec::new(),
            vetted: false,
            vip,
            can_receive_sms: true,
            can_receive_email: true,
            property_type: Vec::new(),
            budget_min: None,
            budget_max: None,
            timeline: None,
            source: None,
            status: BuyerStatus::Lead,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn snapshot_refreshes_counts_and_view() {
        let mut app = App::new();
        app.apply_snapshot(vec![buyer("Ada", true), buyer("Grace", false)]);
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.counts.vip, 1);
    }

    #[test]
    fn typing_in_search_refilters_each_keystroke() {
        let mut app = App::new();
        app.apply_snapshot(vec![buyer("Ada", false), buyer("Grace", false)]);
        app.handle_key(KeyEvent::from(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::SearchEditing);
        app.handle_key(KeyEvent::from(KeyCode::Char('g')));
        assert_eq!(app.visible.len(), 1);
        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn smart_group_narrows_view_but_not_counts() {
        let mut app = App::new();
        app.apply_snapshot(vec![buyer("Ada", true), buyer("Grace", false)]);
        app.handle_key(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.smart_group, Some(SmartGroup::ALL[0]));
        assert_eq!(app.visible.len(), 1);
        assert_eq!(app.counts.vip, 1);

        app.handle_key(KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(app.visible.len(), 2);
    }
}
