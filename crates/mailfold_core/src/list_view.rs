use mailfold_logging::{client_debug, client_warn};

/// Result of one list read, as reported by the IO side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLoad<T> {
    Loaded(Vec<T>),
    /// The server answered "not found"; shown as an empty list.
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailSummary {
    pub date: String,
    pub from: String,
    pub subject: String,
}

/// A server-backed collection. Every load replaces the items wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    name: &'static str,
    items: Vec<T>,
}

impl<T> ListView<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    pub fn apply(&mut self, load: ListLoad<T>) {
        match load {
            ListLoad::Loaded(items) => {
                client_debug!("{} list loaded: {} item(s)", self.name, items.len());
                self.items = items;
            }
            ListLoad::NotFound => {
                client_debug!("{} list not found; showing empty", self.name);
                self.items.clear();
            }
            ListLoad::Failed(reason) => {
                client_warn!("{} list failed to load: {}", self.name, reason);
                self.items.clear();
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_replaces_instead_of_merging() {
        let mut list = ListView::new("Projects");
        list.apply(ListLoad::Loaded(vec!["a".to_string(), "b".to_string()]));
        list.apply(ListLoad::Loaded(vec!["c".to_string()]));
        assert_eq!(list.items(), ["c".to_string()]);
    }

    #[test]
    fn not_found_and_failure_both_empty_the_list() {
        let mut list = ListView::new("Emails");
        list.apply(ListLoad::Loaded(vec![EmailSummary::default()]));
        list.apply(ListLoad::NotFound);
        assert!(list.is_empty());

        list.apply(ListLoad::Loaded(vec![EmailSummary::default()]));
        list.apply(ListLoad::Failed("boom".into()));
        assert!(list.is_empty());
    }
}
