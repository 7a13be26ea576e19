//! Dropdown submenus and current-page marking for the main menu.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use sitechrome_core::{GroupId, MenuConfig, MenuEffect, MenuEvent, MenuGroups, current_links};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;

struct Group {
    element: Element,
    toggle: Option<HtmlElement>,
}

struct NavInner {
    menu: Element,
    groups: Vec<Group>,
    open_class: String,
    state: RefCell<MenuGroups>,
}

impl NavInner {
    fn dispatch(&self, event: MenuEvent) {
        let effects = self.state.borrow_mut().handle(event);
        for effect in effects {
            self.render(effect);
        }
    }

    fn render(&self, effect: MenuEffect) {
        match effect {
            MenuEffect::SetOpen { group, open } => {
                if let Some(g) = self.groups.get(group.0) {
                    dom::set_class(&g.element, &self.open_class, open);
                    if let Some(toggle) = &g.toggle {
                        dom::set_expanded(toggle, open);
                    }
                }
            }
            MenuEffect::FocusToggle(group) => {
                if let Some(toggle) = self.groups.get(group.0).and_then(|g| g.toggle.as_ref()) {
                    let _ = toggle.focus();
                }
            }
        }
    }

    fn group_of(&self, element: &Element) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|g| g.element == *element)
            .map(GroupId)
    }
}

/// Installed menu enhancements. Dropping this detaches every listener.
pub struct NavMenu {
    inner: Rc<NavInner>,
    _listeners: Vec<EventListener>,
}

impl NavMenu {
    /// Wire up the menu found by `config.menu`.
    ///
    /// Returns `Ok(None)` when the page has no menu.
    ///
    /// # Errors
    /// Returns an error if the group query is rejected by the browser.
    pub fn install(document: &Document, config: &MenuConfig) -> anyhow::Result<Option<Self>> {
        let Some(menu) = document
            .query_selector(&config.menu)
            .map_err(|e| dom::js_error(&e))?
        else {
            return Ok(None);
        };

        let nodes = menu
            .query_selector_all(&config.group)
            .map_err(|e| dom::js_error(&e))?;
        let groups: Vec<Group> = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| {
                let toggle = element
                    .query_selector(&config.toggle)
                    .ok()
                    .flatten()
                    .and_then(|t| t.dyn_into::<HtmlElement>().ok());
                Group { element, toggle }
            })
            .collect();

        let inner = Rc::new(NavInner {
            menu: menu.clone(),
            state: RefCell::new(MenuGroups::new(groups.len())),
            groups,
            open_class: config.open_class.clone(),
        });

        inner.dispatch(MenuEvent::Reset);
        mark_current_page(document, &inner, config);

        let on_menu_click = {
            let inner = Rc::clone(&inner);
            let toggle_sel = config.toggle.clone();
            let group_sel = config.group.clone();
            EventListener::new(&menu, "click", move |event| {
                let Some(button) =
                    dom::event_element(event).and_then(|el| dom::closest(&el, &toggle_sel))
                else {
                    return;
                };
                if let Some(group) = dom::closest(&button, &group_sel)
                    .and_then(|group| inner.group_of(&group))
                {
                    inner.dispatch(MenuEvent::Toggle(group));
                }
            })
        };

        let on_document_click = {
            let inner = Rc::clone(&inner);
            EventListener::new(document, "click", move |event| {
                let inside =
                    dom::event_element(event).is_some_and(|el| dom::contains(&inner.menu, &el));
                if !inside {
                    inner.dispatch(MenuEvent::OutsideClick);
                }
            })
        };

        let on_keydown = {
            let inner = Rc::clone(&inner);
            EventListener::new(document, "keydown", move |event| {
                if event
                    .dyn_ref::<KeyboardEvent>()
                    .is_some_and(|e| e.key() == "Escape")
                {
                    inner.dispatch(MenuEvent::Escape);
                }
            })
        };

        Ok(Some(Self {
            inner,
            _listeners: vec![on_menu_click, on_document_click, on_keydown],
        }))
    }

    #[must_use]
    pub fn open_group(&self) -> Option<GroupId> {
        self.inner.state.borrow().open_group()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.inner.groups.len()
    }
}

/// Flag links to the current page and expand the first group holding one.
fn mark_current_page(document: &Document, inner: &NavInner, config: &MenuConfig) {
    let Some(location) = document.location() else {
        return;
    };
    let (Ok(current_path), Ok(base)) = (location.pathname(), location.href()) else {
        log::error!("Failed to read the current location; skipping active link marking");
        return;
    };
    let Ok(anchors) = inner.menu.query_selector_all("a[href]") else {
        return;
    };

    let mut links = Vec::new();
    for anchor in (0..anchors.length())
        .filter_map(|i| anchors.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
    {
        let href = anchor.get_attribute("href").unwrap_or_default();
        match web_sys::Url::new_with_base(&href, &base) {
            Ok(url) => links.push((anchor, url.pathname())),
            Err(e) => log::error!(
                "Failed to resolve navigation link {href:?}: {}",
                dom::js_error_message(&e)
            ),
        }
    }

    let mut expanded = false;
    for idx in current_links(&current_path, links.iter().map(|(_, path)| path.as_str())) {
        let anchor = &links[idx].0;
        let _ = anchor.set_attribute("aria-current", "page");
        if expanded {
            continue;
        }
        let group = dom::closest(anchor, &config.group).and_then(|g| inner.group_of(&g));
        if let Some(group) = group.filter(|g| inner.groups[g.0].toggle.is_some()) {
            inner.dispatch(MenuEvent::ForceOpen(group));
            expanded = true;
        }
    }
}
