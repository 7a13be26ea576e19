//! Mobile navigation drawer.
//!
//! The drawer owns the [`ScrollLock`] so that lock engagement always follows
//! the drawer's open state.

use crate::scroll::{ScrollLock, ScrollPin, ScrollProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    /// The hamburger button was activated.
    TriggerActivated,
    /// A link inside the drawer was activated.
    LinkActivated,
    /// A click landed outside both the drawer and its trigger.
    OutsideClick,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawerEffect {
    /// Set the body's open class and the trigger's `aria-expanded` together.
    SetOpen(bool),
    /// Pin the body in place.
    PinBody(ScrollPin),
    /// Clear the pin and scroll back to `offset`.
    ReleaseBody { offset: f64 },
    FocusTrigger,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawer {
    open: bool,
    scroll: ScrollLock,
}

impl Drawer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: false,
            scroll: ScrollLock::new(),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn scroll_anchor(&self) -> f64 {
        self.scroll.anchor()
    }

    /// Apply an event and return the effects to render.
    ///
    /// `probe` is only called when the drawer opens.
    pub fn handle(
        &mut self,
        event: DrawerEvent,
        probe: impl FnOnce() -> ScrollProbe,
    ) -> Vec<DrawerEffect> {
        match event {
            DrawerEvent::TriggerActivated if self.open => self.close(),
            DrawerEvent::TriggerActivated => {
                self.open = true;
                let pin = self.scroll.lock(probe());
                vec![
                    DrawerEffect::SetOpen(true),
                    DrawerEffect::PinBody(pin),
                    DrawerEffect::FocusTrigger,
                ]
            }
            DrawerEvent::LinkActivated | DrawerEvent::OutsideClick | DrawerEvent::Escape => {
                self.close()
            }
        }
    }

    fn close(&mut self) -> Vec<DrawerEffect> {
        // Global listeners call this on every click and key press.
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        vec![
            DrawerEffect::SetOpen(false),
            DrawerEffect::ReleaseBody {
                offset: self.scroll.unlock(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: f64) -> impl FnOnce() -> ScrollProbe {
        move || ScrollProbe::new(Some(offset), None)
    }

    #[test]
    fn trigger_opens_locks_and_focuses() {
        let mut drawer = Drawer::new();
        let effects = drawer.handle(DrawerEvent::TriggerActivated, at(250.0));
        assert!(drawer.is_open());
        assert_eq!(
            effects,
            vec![
                DrawerEffect::SetOpen(true),
                DrawerEffect::PinBody(ScrollPin { offset: 250.0 }),
                DrawerEffect::FocusTrigger,
            ]
        );
    }

    #[test]
    fn second_trigger_closes_and_restores() {
        let mut drawer = Drawer::new();
        drawer.handle(DrawerEvent::TriggerActivated, at(90.0));
        let effects = drawer.handle(DrawerEvent::TriggerActivated, at(0.0));
        assert!(!drawer.is_open());
        assert_eq!(
            effects,
            vec![
                DrawerEffect::SetOpen(false),
                DrawerEffect::ReleaseBody { offset: 90.0 },
            ]
        );
    }

    #[test]
    fn dismissals_force_closed() {
        for event in [
            DrawerEvent::LinkActivated,
            DrawerEvent::OutsideClick,
            DrawerEvent::Escape,
        ] {
            let mut drawer = Drawer::new();
            drawer.handle(DrawerEvent::TriggerActivated, at(10.0));
            let effects = drawer.handle(event, at(0.0));
            assert!(!drawer.is_open());
            assert!(effects.contains(&DrawerEffect::ReleaseBody { offset: 10.0 }));
        }
    }

    #[test]
    fn closing_closed_drawer_is_a_no_op() {
        let mut drawer = Drawer::new();
        drawer.handle(DrawerEvent::TriggerActivated, at(64.0));
        drawer.handle(DrawerEvent::Escape, at(0.0));
        let anchor = drawer.scroll_anchor();

        for event in [
            DrawerEvent::Escape,
            DrawerEvent::OutsideClick,
            DrawerEvent::LinkActivated,
        ] {
            let effects = drawer.handle(event, || panic!("closed drawer must not probe scroll"));
            assert!(effects.is_empty());
        }
        assert_eq!(drawer.scroll_anchor(), anchor);
    }
}
