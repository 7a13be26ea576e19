//! Page-level lifecycle for the enhancements.
//!
//! A [`PageChrome`] is built once the document is parsed and lives until the
//! page is unloaded. Each component installs on its own so one failing never
//! keeps the others from working.

use std::cell::RefCell;

use gloo::events::EventListener;
use sitechrome_core::ChromeConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, PageTransitionEvent, Window};

use crate::dom;
use crate::drawer::MobileDrawer;
use crate::footer;
use crate::nav::NavMenu;
use crate::theme::ThemeSwitcher;

thread_local! {
    static CURRENT: RefCell<Option<PageChrome>> = const { RefCell::new(None) };
}

/// Every installed controller for the current page.
pub struct PageChrome {
    pub nav: Option<NavMenu>,
    pub drawer: Option<MobileDrawer>,
    pub theme: Option<ThemeSwitcher>,
}

impl PageChrome {
    /// Install every component described by `config`.
    #[must_use]
    pub fn install(window: &Window, document: &Document, config: &ChromeConfig) -> Self {
        footer::set_year(document, &config.year_id);
        Self {
            nav: isolate("navigation menu", NavMenu::install(document, &config.menu)),
            drawer: isolate(
                "mobile drawer",
                MobileDrawer::install(window, document, &config.drawer),
            ),
            theme: isolate(
                "theme switcher",
                Ok(ThemeSwitcher::install(
                    window,
                    document,
                    &config.theme,
                    &config.storage,
                )),
            ),
        }
    }
}

fn isolate<T>(name: &str, result: anyhow::Result<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(component)) => Some(component),
        Ok(None) => {
            log::debug!("{name}: markup not found, feature disabled");
            None
        }
        Err(e) => {
            log::error!("{name}: failed to install: {e:#}");
            None
        }
    }
}

/// Read the page's configuration override block, falling back to defaults.
#[must_use]
pub fn load_config(document: &Document) -> ChromeConfig {
    let Some(text) = document
        .get_element_by_id(ChromeConfig::ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return ChromeConfig::default();
    };
    ChromeConfig::from_json(&text).unwrap_or_else(|e| {
        log::error!("Ignoring invalid #{} block: {e}", ChromeConfig::ELEMENT_ID);
        ChromeConfig::default()
    })
}

fn mount(window: &Window, document: &Document) {
    let config = load_config(document);
    let chrome = PageChrome::install(window, document, &config);
    CURRENT.with(|cell| *cell.borrow_mut() = Some(chrome));
}

/// Drop the current page's controllers, detaching their listeners.
pub fn unmount() {
    let chrome = CURRENT.with(RefCell::take);
    drop(chrome);
}

/// Install once the document is parsed and tear down when the page goes away.
pub fn boot() {
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        dom::console_error("sitechrome: no browser document; enhancements disabled");
        return;
    };

    if document.ready_state() == "loading" {
        let (win, doc) = (window.clone(), document.clone());
        EventListener::once(&document, "DOMContentLoaded", move |_| mount(&win, &doc)).forget();
    } else {
        mount(&window, &document);
    }

    // A persisted page goes into the back/forward cache and keeps its state.
    EventListener::new(&window, "pagehide", |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if !persisted {
            unmount();
        }
    })
    .forget();
}
