//! Theme switching and OS high-contrast sync.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use sitechrome_core::{
    ContrastIndicator, Preferences, StorageKeys, ThemeConfig, ThemeEffect, ThemeReconciler,
};
use web_sys::{Document, Element, HtmlElement, MediaQueryList, Window};

use crate::dom;
use crate::storage::WebPreferenceStore;

struct ThemeInner {
    window: Window,
    document: Document,
    root: Element,
    theme_button: Option<HtmlElement>,
    contrast_button: Option<HtmlElement>,
    config: ThemeConfig,
    reconciler: RefCell<ThemeReconciler<WebPreferenceStore>>,
}

impl ThemeInner {
    fn render_all(&self, effects: Vec<ThemeEffect>) {
        for effect in effects {
            self.render(effect);
        }
    }

    fn render(&self, effect: ThemeEffect) {
        match effect {
            ThemeEffect::Apply(theme) => {
                let _ = self
                    .root
                    .set_attribute(&self.config.attribute, theme.attribute());
            }
            ThemeEffect::SyncChromeColor => self.sync_chrome_color(),
            ThemeEffect::SetThemeLabel(theme) => {
                if let Some(button) = &self.theme_button {
                    button.set_text_content(Some(theme.label()));
                }
            }
            ThemeEffect::SetContrastIndicator(indicator) => self.set_indicator(indicator),
        }
    }

    fn set_os_forced(&self, active: bool) {
        let effects = self.reconciler.borrow_mut().set_os_forced(active);
        self.render_all(effects);
    }

    fn set_indicator(&self, indicator: ContrastIndicator) {
        let Some(button) = &self.contrast_button else {
            return;
        };
        button.set_text_content(Some(indicator.label()));
        let _ = button.set_attribute(
            "aria-pressed",
            if indicator.pressed() { "true" } else { "false" },
        );
    }

    /// Mirror the resolved background color into `<meta name="theme-color">`.
    ///
    /// Style recalculation is synchronous, so the value read here already
    /// reflects the attribute written just before.
    fn sync_chrome_color(&self) {
        let color = self
            .window
            .get_computed_style(&self.root)
            .ok()
            .flatten()
            .and_then(|style| {
                style
                    .get_property_value(&self.config.background_property)
                    .ok()
            })
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.config.fallback_color.clone());

        if let Some(meta) = theme_color_meta(&self.document) {
            let _ = meta.set_attribute("content", &color);
        }
    }
}

fn theme_color_meta(document: &Document) -> Option<Element> {
    if let Some(meta) = document
        .query_selector("meta[name=\"theme-color\"]")
        .ok()
        .flatten()
    {
        return Some(meta);
    }
    let meta = document.create_element("meta").ok()?;
    let _ = meta.set_attribute("name", "theme-color");
    document.head()?.append_child(&meta).ok()?;
    Some(meta)
}

/// Live forced-colors query, if the platform supports it.
fn forced_colors_query(window: &Window, query: &str) -> Option<MediaQueryList> {
    window.match_media(query).ok().flatten()
}

/// Installed theme controls. Dropping this detaches every listener.
pub struct ThemeSwitcher {
    inner: Rc<ThemeInner>,
    _listeners: Vec<EventListener>,
}

impl ThemeSwitcher {
    /// Restore the saved theme and wire the toggle buttons and OS signal.
    ///
    /// Returns `None` when the document has no root element.
    #[must_use]
    pub fn install(
        window: &Window,
        document: &Document,
        config: &ThemeConfig,
        keys: &StorageKeys,
    ) -> Option<Self> {
        let root = document.document_element()?;
        let media = forced_colors_query(window, &config.forced_colors_query);
        let os_forced = media.as_ref().is_some_and(MediaQueryList::matches);
        let prefs = Preferences::new(WebPreferenceStore::open(), keys.clone());

        let inner = Rc::new(ThemeInner {
            window: window.clone(),
            document: document.clone(),
            root,
            theme_button: dom::html_element_by_id(document, &config.theme_toggle_id),
            contrast_button: dom::html_element_by_id(document, &config.contrast_toggle_id),
            config: config.clone(),
            reconciler: RefCell::new(ThemeReconciler::new(prefs, os_forced)),
        });

        let initial = inner.reconciler.borrow().init();
        inner.render_all(initial);

        let mut listeners = Vec::new();
        if let Some(button) = &inner.theme_button {
            let inner = Rc::clone(&inner);
            listeners.push(EventListener::new(button, "click", move |_| {
                let effects = inner.reconciler.borrow_mut().cycle_base_theme();
                inner.render_all(effects);
            }));
        }
        if let Some(button) = &inner.contrast_button {
            let inner = Rc::clone(&inner);
            listeners.push(EventListener::new(button, "click", move |_| {
                let effects = inner.reconciler.borrow_mut().toggle_high_contrast();
                inner.render_all(effects);
            }));
        }
        if let Some(media) = media {
            let inner = Rc::clone(&inner);
            let query = media.clone();
            listeners.push(EventListener::new(&media, "change", move |_| {
                inner.set_os_forced(query.matches());
            }));
        } else {
            log::debug!("forced-colors query unsupported; OS high contrast will not be followed");
        }

        Some(Self {
            inner,
            _listeners: listeners,
        })
    }

    /// Stored manual high-contrast flag, including a flip staged while the
    /// OS forces contrast.
    #[must_use]
    pub fn manual_high_contrast(&self) -> bool {
        self.inner.reconciler.borrow().manual_high_contrast()
    }

    /// Re-derive the theme for a forced-colors state, the same path the
    /// media query's `change` listener takes.
    pub fn set_os_forced(&self, active: bool) {
        self.inner.set_os_forced(active);
    }
}
