use crate::domain::ports::Browser;
use std::cell::RefCell;

/// Browser stand-in for running the funnel outside a document: records
/// what the page asked for instead of doing it.
#[derive(Debug, Default)]
pub struct HeadlessBrowser {
    actions: RefCell<Vec<BrowserAction>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    ScrollToForm,
    ScrollToTop,
    Navigate(String),
}

impl HeadlessBrowser {
    pub fn actions(&self) -> Vec<BrowserAction> {
        self.actions.borrow().clone()
    }

    pub fn count(&self, action: &BrowserAction) -> usize {
        self.actions.borrow().iter().filter(|a| *a == action).count()
    }
}

impl Browser for HeadlessBrowser {
    fn scroll_to_form(&self) {
        tracing::debug!("scroll: form");
        self.actions.borrow_mut().push(BrowserAction::ScrollToForm);
    }

    fn scroll_to_top(&self) {
        tracing::debug!("scroll: top");
        self.actions.borrow_mut().push(BrowserAction::ScrollToTop);
    }

    fn navigate(&self, url: &str) {
        tracing::info!("navigate: {}", url);
        self.actions
            .borrow_mut()
            .push(BrowserAction::Navigate(url.to_string()));
    }
}
