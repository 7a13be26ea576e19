//! Body scroll lock used while a full-screen overlay is open.
//!
//! The lock itself never touches the page. [`ScrollLock::lock`] hands back a
//! [`ScrollPin`] describing the body styles to apply and
//! [`ScrollLock::unlock`] hands back the offset to scroll back to.

/// Readings of the current vertical scroll position taken from the page.
///
/// Either source may be missing when the platform cannot report it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollProbe {
    /// `window.scrollY`
    pub window_offset: Option<f64>,
    /// `document.documentElement.scrollTop`
    pub root_offset: Option<f64>,
}

impl ScrollProbe {
    #[must_use]
    pub const fn new(window_offset: Option<f64>, root_offset: Option<f64>) -> Self {
        Self {
            window_offset,
            root_offset,
        }
    }

    /// Resolve the offset to anchor on.
    ///
    /// A zero or unusable reading falls through to the next source, ending at 0.
    /// Overscroll above the top (a negative reading) resolves to 0.
    #[must_use]
    pub fn offset(&self) -> f64 {
        [self.window_offset, self.root_offset]
            .into_iter()
            .flatten()
            .find(|v| v.is_finite() && *v != 0.0)
            .map_or(0.0, |v| v.max(0.0))
    }
}

/// Body styles pinning the page at a captured offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPin {
    pub offset: f64,
}

impl ScrollPin {
    /// Value for the body's `top` style, e.g. `-120px`.
    #[must_use]
    pub fn top(&self) -> String {
        format!("{}px", -self.offset)
    }

    /// Every `(property, value)` pair set on the body while pinned.
    #[must_use]
    pub fn styles(&self) -> [(&'static str, String); 5] {
        [
            ("position", "fixed".to_string()),
            ("top", self.top()),
            ("left", "0".to_string()),
            ("right", "0".to_string()),
            ("width", "100%".to_string()),
        ]
    }
}

/// Style properties cleared when the pin is released.
pub const PINNED_PROPERTIES: [&str; 5] = ["position", "top", "left", "right", "width"];

/// Holds the scroll anchor between a lock and its matching unlock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollLock {
    anchor: f64,
}

impl ScrollLock {
    #[must_use]
    pub const fn new() -> Self {
        Self { anchor: 0.0 }
    }

    /// Capture the current offset and return the pin to apply.
    ///
    /// A second `lock` before `unlock` overwrites the anchor.
    pub fn lock(&mut self, probe: ScrollProbe) -> ScrollPin {
        self.anchor = probe.offset();
        ScrollPin {
            offset: self.anchor,
        }
    }

    /// Offset to restore after clearing the pin.
    ///
    /// Without a prior `lock` this is 0.
    #[must_use]
    pub const fn unlock(&self) -> f64 {
        self.anchor
    }

    #[must_use]
    pub const fn anchor(&self) -> f64 {
        self.anchor
    }
}
