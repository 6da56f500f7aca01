use crossterm::event::{KeyCode, KeyEvent};

use crate::action::BrowseAction;

/// Built-in key binding profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BindingProfile {
    #[default]
    Default,
    Vim,
    Arrows,
}

/// Key bindings resolving crossterm events into [`BrowseAction`]s.
#[derive(Clone, Copy, Debug)]
pub struct BrowseKeyBindings {
    profile: BindingProfile,
}

impl Default for BrowseKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: BindingProfile::Default,
        }
    }

    pub const fn with_profile(profile: BindingProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> BindingProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: BindingProfile) {
        self.profile = profile;
    }

    pub fn resolve<C>(&self, key: KeyEvent) -> Option<BrowseAction<C>> {
        let nav_action = match self.profile {
            BindingProfile::Default => Self::resolve_default_nav(key),
            BindingProfile::Vim => Self::resolve_vim_nav(key),
            BindingProfile::Arrows => Self::resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        Self::resolve_common(key)
    }

    /// Resolves with a caller mapping tried first; hits become
    /// [`BrowseAction::Custom`].
    pub fn resolve_with<C, F>(&self, key: KeyEvent, custom: F) -> Option<BrowseAction<C>>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        if let Some(action) = custom(key) {
            return Some(BrowseAction::Custom(action));
        }

        self.resolve(key)
    }

    const fn resolve_default_nav<C>(key: KeyEvent) -> Option<BrowseAction<C>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(BrowseAction::CursorPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(BrowseAction::CursorNext),
            KeyCode::Left | KeyCode::Char('h') => Some(BrowseAction::CursorParent),
            KeyCode::Right | KeyCode::Char('l') => Some(BrowseAction::ToggleBranch),
            _ => None,
        }
    }

    const fn resolve_vim_nav<C>(key: KeyEvent) -> Option<BrowseAction<C>> {
        match key.code {
            KeyCode::Char('k') => Some(BrowseAction::CursorPrev),
            KeyCode::Char('j') => Some(BrowseAction::CursorNext),
            KeyCode::Char('h') => Some(BrowseAction::CursorParent),
            KeyCode::Char('l') => Some(BrowseAction::ToggleBranch),
            _ => None,
        }
    }

    const fn resolve_arrow_nav<C>(key: KeyEvent) -> Option<BrowseAction<C>> {
        match key.code {
            KeyCode::Up => Some(BrowseAction::CursorPrev),
            KeyCode::Down => Some(BrowseAction::CursorNext),
            KeyCode::Left => Some(BrowseAction::CursorParent),
            KeyCode::Right => Some(BrowseAction::ToggleBranch),
            _ => None,
        }
    }

    const fn resolve_common<C>(key: KeyEvent) -> Option<BrowseAction<C>> {
        match key.code {
            KeyCode::Enter => Some(BrowseAction::ToggleBranch),
            KeyCode::Char(' ') => Some(BrowseAction::ToggleSelect),
            KeyCode::Char('a') => Some(BrowseAction::SelectAllRecords),
            KeyCode::Char('x') => Some(BrowseAction::ClearSelection),
            KeyCode::Char('E') => Some(BrowseAction::ExpandAll),
            KeyCode::Char('C') => Some(BrowseAction::CollapseAll),
            KeyCode::Char('g') => Some(BrowseAction::ToggleGuides),
            KeyCode::Home => Some(BrowseAction::CursorFirst),
            KeyCode::End => Some(BrowseAction::CursorLast),
            _ => None,
        }
    }
}
