//! App-wide UI flags and the tab enums of tabbed screens.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
}

/// Tabs on the permissions screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionsTab {
    #[default]
    Permissions,
    Categories,
    Optimizations,
}

impl PermissionsTab {
    pub const ALL: [PermissionsTab; 3] = [Self::Permissions, Self::Categories, Self::Optimizations];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Permissions => "Permissions",
            Self::Categories => "Categories",
            Self::Optimizations => "Optimizations",
        }
    }
}

/// Tabs on the policies screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoliciesTab {
    #[default]
    Policies,
    Test,
    Conflicts,
}

impl PoliciesTab {
    pub const ALL: [PoliciesTab; 3] = [Self::Policies, Self::Test, Self::Conflicts];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Policies => "Policies",
            Self::Test => "Policy test",
            Self::Conflicts => "Conflicts",
        }
    }
}
