//! Submenu state for a navigation menu.
//!
//! Groups are addressed by their position in document order. At most one
//! group is open at a time.

/// Index of a menu group in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The toggle button of a group was activated.
    Toggle(GroupId),
    /// A click landed outside the whole menu.
    OutsideClick,
    Escape,
    /// Page load: start with every group closed.
    Reset,
    /// Page load: open the group holding the current page's link.
    ForceOpen(GroupId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    /// Set the group's open class and its toggle's `aria-expanded` together.
    SetOpen { group: GroupId, open: bool },
    /// Move focus to the group's toggle button.
    FocusToggle(GroupId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroups {
    len: usize,
    open: Option<GroupId>,
}

impl MenuGroups {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn open_group(&self) -> Option<GroupId> {
        self.open
    }

    #[must_use]
    pub fn is_open(&self, group: GroupId) -> bool {
        self.open == Some(group)
    }

    const fn contains(&self, group: GroupId) -> bool {
        group.0 < self.len
    }

    /// Apply an event and return the effects to render.
    pub fn handle(&mut self, event: MenuEvent) -> Vec<MenuEffect> {
        match event {
            MenuEvent::Toggle(group) if self.contains(group) => {
                let will_open = !self.is_open(group);
                let mut effects = self.close_all();
                if will_open {
                    self.open = Some(group);
                    effects.push(MenuEffect::SetOpen { group, open: true });
                    effects.push(MenuEffect::FocusToggle(group));
                }
                effects
            }
            MenuEvent::ForceOpen(group) if self.contains(group) => {
                let mut effects = self.close_all();
                self.open = Some(group);
                effects.push(MenuEffect::SetOpen { group, open: true });
                effects
            }
            MenuEvent::Toggle(_) | MenuEvent::ForceOpen(_) => Vec::new(),
            MenuEvent::OutsideClick | MenuEvent::Escape | MenuEvent::Reset => self.close_all(),
        }
    }

    // Writes every group, which also clears stale server-rendered state.
    fn close_all(&mut self) -> Vec<MenuEffect> {
        self.open = None;
        (0..self.len)
            .map(|i| MenuEffect::SetOpen {
                group: GroupId(i),
                open: false,
            })
            .collect()
    }
}
