//! Mobile navigation drawer behind the hamburger button.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use sitechrome_core::{Drawer, DrawerConfig, DrawerEffect, DrawerEvent};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Window};

use crate::{dom, scroll};

struct DrawerInner {
    window: Window,
    document: Document,
    body: HtmlElement,
    trigger: HtmlElement,
    drawer: Element,
    open_class: String,
    state: RefCell<Drawer>,
}

impl DrawerInner {
    fn dispatch(&self, event: DrawerEvent) {
        let effects = self
            .state
            .borrow_mut()
            .handle(event, || scroll::probe(&self.window, &self.document));
        for effect in effects {
            self.render(&effect);
        }
    }

    fn render(&self, effect: &DrawerEffect) {
        match effect {
            DrawerEffect::SetOpen(open) => {
                dom::set_class(&self.body, &self.open_class, *open);
                dom::set_expanded(&self.trigger, *open);
            }
            DrawerEffect::PinBody(pin) => scroll::pin(&self.body, pin),
            DrawerEffect::ReleaseBody { offset } => {
                scroll::release(&self.window, &self.body, *offset);
            }
            DrawerEffect::FocusTrigger => {
                let _ = self.trigger.focus();
            }
        }
    }
}

/// Installed drawer controller. Dropping this detaches every listener.
pub struct MobileDrawer {
    inner: Rc<DrawerInner>,
    _listeners: Vec<EventListener>,
}

impl MobileDrawer {
    /// Wire up the trigger and drawer named in `config`.
    ///
    /// Returns `Ok(None)` when either element is missing.
    ///
    /// # Errors
    /// Returns an error if the page has no `<body>` to lock.
    pub fn install(
        window: &Window,
        document: &Document,
        config: &DrawerConfig,
    ) -> anyhow::Result<Option<Self>> {
        let (Some(trigger), Some(drawer)) = (
            dom::html_element_by_id(document, &config.trigger_id),
            document.get_element_by_id(&config.drawer_id),
        ) else {
            return Ok(None);
        };
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no body"))?;

        let inner = Rc::new(DrawerInner {
            window: window.clone(),
            document: document.clone(),
            body,
            trigger: trigger.clone(),
            drawer: drawer.clone(),
            open_class: config.open_class.clone(),
            state: RefCell::new(Drawer::new()),
        });

        let on_trigger = {
            let inner = Rc::clone(&inner);
            EventListener::new(&trigger, "click", move |_| {
                inner.dispatch(DrawerEvent::TriggerActivated);
            })
        };

        let on_link = {
            let inner = Rc::clone(&inner);
            EventListener::new(&drawer, "click", move |event| {
                if dom::event_element(event)
                    .and_then(|el| dom::closest(&el, "a"))
                    .is_some()
                {
                    inner.dispatch(DrawerEvent::LinkActivated);
                }
            })
        };

        let on_document_click = {
            let inner = Rc::clone(&inner);
            EventListener::new(document, "click", move |event| {
                let inside = dom::event_element(event).is_some_and(|el| {
                    dom::contains(&inner.drawer, &el) || dom::contains(&inner.trigger, &el)
                });
                if !inside {
                    inner.dispatch(DrawerEvent::OutsideClick);
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
                    inner.dispatch(DrawerEvent::Escape);
                }
            })
        };

        Ok(Some(Self {
            inner,
            _listeners: vec![on_trigger, on_link, on_document_click, on_keydown],
        }))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open()
    }
}
