//! The searchable, paged dropdown for picking the author to filter by.
//!
//! The whole user list is fetched once; searching and paging happen locally.

use crate::environment::model::UserProfile;
use crate::pagination::{paginate, total_pages, Page};

/// One row of the dropdown
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickerEntry {
    /// Clears the user filter
    AllUsers,
    User(UserProfile),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPicker {
    users: Vec<UserProfile>,
    query: String,
    page: Page,
    pub is_open: bool,
}

impl UserPicker {
    pub fn new(users_per_page: usize) -> Self {
        Self {
            users: Vec::new(),
            query: String::new(),
            page: Page::new(users_per_page),
            is_open: false,
        }
    }

    /// Keep the humans, sorted by username ignoring case
    pub fn set_users(&mut self, mut users: Vec<UserProfile>) {
        users.retain(|u| !u.is_bot);
        users.sort_by_cached_key(|u| u.username.to_lowercase());
        self.users = users;
        self.page = self.page.first().with_total(self.total_pages());
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.page = self.page.first().with_total(self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.page = self.page.next();
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.previous();
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Users whose name contains the query, ignoring case
    pub fn filtered(&self) -> Vec<&UserProfile> {
        if self.query.is_empty() {
            return self.users.iter().collect();
        }
        let query = self.query.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&query))
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page.size())
    }

    /// The rows of the current page. The "all users" entry leads the first
    /// page, but only while nothing is searched for.
    pub fn entries(&self) -> Vec<PickerEntry> {
        let filtered = self.filtered();
        let mut entries: Vec<PickerEntry> = paginate(&filtered, self.page)
            .iter()
            .map(|u| PickerEntry::User((*u).clone()))
            .collect();
        if self.page.is_first() && self.query.is_empty() {
            entries.insert(0, PickerEntry::AllUsers);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserProfile {
        UserProfile {
            id: format!("id-{name}"),
            username: name.to_string(),
            ..Default::default()
        }
    }

    fn picker(count: usize) -> UserPicker {
        let mut picker = UserPicker::new(50);
        picker.set_users((0..count).map(|i| user(&format!("user{i:03}"))).collect());
        picker
    }

    #[test]
    fn bots_are_dropped_and_names_sorted() {
        let mut picker = UserPicker::new(50);
        let mut bot = user("aaa-bot");
        bot.is_bot = true;
        picker.set_users(vec![user("Zed"), bot, user("adam"), user("Bob")]);
        let names: Vec<_> = picker.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["adam", "Bob", "Zed"]);
    }

    #[test]
    fn first_page_leads_with_all_users() {
        let picker = picker(120);
        assert_eq!(picker.total_pages(), 3);
        let entries = picker.entries();
        assert_eq!(entries.len(), 51);
        assert_eq!(entries[0], PickerEntry::AllUsers);
    }

    #[test]
    fn paging_stays_in_bounds() {
        let mut picker = picker(120);
        picker.previous_page();
        assert_eq!(picker.page().index(), 0);
        picker.next_page();
        picker.next_page();
        picker.next_page();
        assert_eq!(picker.page().index(), 2);
        let entries = picker.entries();
        assert_eq!(entries.len(), 20);
        assert!(!entries.contains(&PickerEntry::AllUsers));
    }

    #[test]
    fn searching_resets_the_page_and_hides_all_users() {
        let mut picker = picker(120);
        picker.next_page();
        picker.set_query("USER11".to_string());
        assert_eq!(picker.page().index(), 0);
        let entries = picker.entries();
        assert_eq!(entries.len(), 10);
        assert!(!entries.contains(&PickerEntry::AllUsers));
        picker.set_query("nobody".to_string());
        assert!(picker.entries().is_empty());
        assert_eq!(picker.total_pages(), 0);
    }

    #[test]
    fn dropdown_toggles() {
        let mut picker = picker(1);
        assert!(!picker.is_open);
        picker.toggle();
        assert!(picker.is_open);
        picker.close();
        assert!(!picker.is_open);
    }
}
