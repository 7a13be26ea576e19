//! Theme reconciliation.
//!
//! The applied theme is derived from three inputs: the stored base theme,
//! the stored manual high-contrast flag, and the live OS forced-colors
//! signal. High contrast from either source always wins.

use std::fmt;
use std::str::FromStr;

use crate::prefs::{PreferenceStore, Preferences};

/// Named palettes a user cycles through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BaseTheme {
    #[default]
    Indigo,
    Teal,
    Slate,
}

impl BaseTheme {
    /// Cycle order.
    pub const ALL: [Self; 3] = [Self::Indigo, Self::Teal, Self::Slate];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Teal => "teal",
            Self::Slate => "slate",
        }
    }

    /// Next theme in cycle order, wrapping at the end.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Indigo => Self::Teal,
            Self::Teal => Self::Slate,
            Self::Slate => Self::Indigo,
        }
    }

    /// Button text, e.g. `Theme: Indigo`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Indigo => "Theme: Indigo",
            Self::Teal => "Theme: Teal",
            Self::Slate => "Theme: Slate",
        }
    }
}

impl fmt::Display for BaseTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown base theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for BaseTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Theme actually applied to the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectiveTheme {
    Base(BaseTheme),
    HighContrast,
}

impl EffectiveTheme {
    /// Value of the root theme attribute.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Base(theme) => theme.as_str(),
            Self::HighContrast => "high-contrast",
        }
    }

    #[must_use]
    pub const fn is_high_contrast(self) -> bool {
        matches!(self, Self::HighContrast)
    }
}

/// State shown on the high-contrast toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContrastIndicator {
    Off,
    On,
    ForcedByOs,
}

impl ContrastIndicator {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "High contrast: Off",
            Self::On => "High contrast: On",
            Self::ForcedByOs => "High contrast: OS",
        }
    }

    /// Value for `aria-pressed`.
    #[must_use]
    pub const fn pressed(self) -> bool {
        !matches!(self, Self::Off)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeInputs {
    pub base: BaseTheme,
    pub manual_high_contrast: bool,
    pub os_forced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeView {
    pub theme: EffectiveTheme,
    pub contrast: ContrastIndicator,
}

/// Derive what to show from the three inputs. First match wins.
#[must_use]
pub const fn derive_view(inputs: ThemeInputs) -> ThemeView {
    if inputs.os_forced {
        ThemeView {
            theme: EffectiveTheme::HighContrast,
            contrast: ContrastIndicator::ForcedByOs,
        }
    } else if inputs.manual_high_contrast {
        ThemeView {
            theme: EffectiveTheme::HighContrast,
            contrast: ContrastIndicator::On,
        }
    } else {
        ThemeView {
            theme: EffectiveTheme::Base(inputs.base),
            contrast: ContrastIndicator::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEffect {
    /// Write the root theme attribute.
    Apply(EffectiveTheme),
    /// Copy the resolved background color into the browser chrome hint.
    /// Always follows an [`ThemeEffect::Apply`].
    SyncChromeColor,
    SetThemeLabel(BaseTheme),
    SetContrastIndicator(ContrastIndicator),
}

/// Owns the theme preferences and the last known OS signal.
#[derive(Debug)]
pub struct ThemeReconciler<S> {
    prefs: Preferences<S>,
    os_forced: bool,
}

impl<S: PreferenceStore> ThemeReconciler<S> {
    pub const fn new(prefs: Preferences<S>, os_forced: bool) -> Self {
        Self { prefs, os_forced }
    }

    pub fn inputs(&self) -> ThemeInputs {
        ThemeInputs {
            base: self.prefs.base_theme(),
            manual_high_contrast: self.prefs.manual_high_contrast(),
            os_forced: self.os_forced,
        }
    }

    pub fn view(&self) -> ThemeView {
        derive_view(self.inputs())
    }

    pub const fn os_forced(&self) -> bool {
        self.os_forced
    }

    /// Stored manual flag, including a flip staged while the OS forces contrast.
    pub fn manual_high_contrast(&self) -> bool {
        self.prefs.manual_high_contrast()
    }

    /// Page-load restore.
    pub fn init(&self) -> Vec<ThemeEffect> {
        let mut effects = vec![ThemeEffect::SetThemeLabel(self.prefs.base_theme())];
        effects.extend(self.reconcile());
        effects
    }

    /// Advance and persist the base theme.
    ///
    /// While high contrast is active the new theme is only stored and labelled.
    pub fn cycle_base_theme(&mut self) -> Vec<ThemeEffect> {
        let next = self.prefs.base_theme().next();
        self.prefs.set_base_theme(next);
        let mut effects = vec![ThemeEffect::SetThemeLabel(next)];
        let view = self.view();
        if !view.theme.is_high_contrast() {
            effects.push(ThemeEffect::Apply(view.theme));
            effects.push(ThemeEffect::SyncChromeColor);
        }
        effects
    }

    /// Flip and persist the manual high-contrast flag.
    pub fn toggle_high_contrast(&mut self) -> Vec<ThemeEffect> {
        let next = !self.prefs.manual_high_contrast();
        self.prefs.set_manual_high_contrast(next);
        if self.os_forced {
            log::debug!("High contrast forced by OS; manual preference staged as {next}");
        }
        self.reconcile()
    }

    /// OS forced-colors change notification.
    pub fn set_os_forced(&mut self, active: bool) -> Vec<ThemeEffect> {
        self.os_forced = active;
        self.reconcile()
    }

    /// Re-derive from current inputs and apply.
    pub fn reconcile(&self) -> Vec<ThemeEffect> {
        let view = self.view();
        vec![
            ThemeEffect::Apply(view.theme),
            ThemeEffect::SetContrastIndicator(view.contrast),
            ThemeEffect::SyncChromeColor,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKeys;
    use crate::prefs::MemoryStore;

    fn reconciler(store: &MemoryStore, os_forced: bool) -> ThemeReconciler<MemoryStore> {
        ThemeReconciler::new(
            Preferences::new(store.clone(), StorageKeys::default()),
            os_forced,
        )
    }

    fn applied(effects: &[ThemeEffect]) -> Option<EffectiveTheme> {
        effects.iter().rev().find_map(|e| match e {
            ThemeEffect::Apply(theme) => Some(*theme),
            _ => None,
        })
    }

    #[test]
    fn parses_known_identifiers_only() {
        assert_eq!("teal".parse::<BaseTheme>(), Ok(BaseTheme::Teal));
        assert!("Teal".parse::<BaseTheme>().is_err());
        assert!("high-contrast".parse::<BaseTheme>().is_err());
    }

    #[test]
    fn fresh_store_applies_indigo() {
        let store = MemoryStore::new();
        let effects = reconciler(&store, false).init();
        assert_eq!(
            effects,
            vec![
                ThemeEffect::SetThemeLabel(BaseTheme::Indigo),
                ThemeEffect::Apply(EffectiveTheme::Base(BaseTheme::Indigo)),
                ThemeEffect::SetContrastIndicator(ContrastIndicator::Off),
                ThemeEffect::SyncChromeColor,
            ]
        );
        assert_eq!(BaseTheme::Indigo.label(), "Theme: Indigo");
        assert_eq!(ContrastIndicator::Off.label(), "High contrast: Off");
    }

    #[test]
    fn cycle_applies_immediately_without_high_contrast() {
        let store = MemoryStore::new();
        let mut theme = reconciler(&store, false);
        let effects = theme.cycle_base_theme();
        assert_eq!(store.get("theme").as_deref(), Some("teal"));
        assert_eq!(
            applied(&effects),
            Some(EffectiveTheme::Base(BaseTheme::Teal))
        );
        assert_eq!(effects.last(), Some(&ThemeEffect::SyncChromeColor));
    }

    #[test]
    fn cycle_is_deferred_under_manual_high_contrast() {
        let store = MemoryStore::with_entries([("highContrast", "1")]);
        let mut theme = reconciler(&store, false);
        let effects = theme.cycle_base_theme();
        assert_eq!(effects, vec![ThemeEffect::SetThemeLabel(BaseTheme::Teal)]);

        let effects = theme.toggle_high_contrast();
        assert_eq!(
            applied(&effects),
            Some(EffectiveTheme::Base(BaseTheme::Teal))
        );
    }

    #[test]
    fn toggle_flips_manual_flag() {
        let store = MemoryStore::new();
        let mut theme = reconciler(&store, false);
        let effects = theme.toggle_high_contrast();
        assert_eq!(applied(&effects), Some(EffectiveTheme::HighContrast));
        assert!(effects.contains(&ThemeEffect::SetContrastIndicator(ContrastIndicator::On)));
        assert_eq!(store.get("highContrast").as_deref(), Some("1"));
    }

    #[test]
    fn os_forcing_stages_manual_toggle() {
        let store = MemoryStore::with_entries([("theme", "teal")]);
        let mut theme = reconciler(&store, true);
        assert_eq!(theme.view().theme, EffectiveTheme::HighContrast);
        assert_eq!(theme.view().contrast, ContrastIndicator::ForcedByOs);

        let effects = theme.toggle_high_contrast();
        assert_eq!(applied(&effects), Some(EffectiveTheme::HighContrast));
        assert!(
            effects.contains(&ThemeEffect::SetContrastIndicator(
                ContrastIndicator::ForcedByOs
            ))
        );
        assert!(theme.manual_high_contrast());

        let effects = theme.set_os_forced(false);
        assert_eq!(applied(&effects), Some(EffectiveTheme::HighContrast));
        assert!(effects.contains(&ThemeEffect::SetContrastIndicator(ContrastIndicator::On)));
    }

    #[test]
    fn os_signal_clearing_restores_base() {
        let store = MemoryStore::with_entries([("theme", "slate")]);
        let mut theme = reconciler(&store, true);
        let effects = theme.set_os_forced(false);
        assert_eq!(
            applied(&effects),
            Some(EffectiveTheme::Base(BaseTheme::Slate))
        );
        assert!(!theme.os_forced());
    }

    #[test]
    fn indicator_pressed_state() {
        assert!(!ContrastIndicator::Off.pressed());
        assert!(ContrastIndicator::On.pressed());
        assert!(ContrastIndicator::ForcedByOs.pressed());
    }
}
