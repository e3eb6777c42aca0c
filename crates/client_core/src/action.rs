use std::fmt;

/// One button on the promotions admin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Update,
    Retrieve,
    Delete,
    Search,
    FindBest,
    Expire,
    Clear,
}

impl ActionKind {
    pub(crate) const COUNT: usize = 8;

    pub const ALL: [ActionKind; Self::COUNT] = [
        Self::Create,
        Self::Update,
        Self::Retrieve,
        Self::Delete,
        Self::Search,
        Self::FindBest,
        Self::Expire,
        Self::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Retrieve => "retrieve",
            Self::Delete => "delete",
            Self::Search => "search",
            Self::FindBest => "best",
            Self::Expire => "expire",
            Self::Clear => "clear",
        }
    }

    pub fn button_id(self) -> &'static str {
        match self {
            Self::Create => "create-btn",
            Self::Update => "update-btn",
            Self::Retrieve => "retrieve-btn",
            Self::Delete => "delete-btn",
            Self::Search => "search-btn",
            Self::FindBest => "best-btn",
            Self::Expire => "expire-btn",
            Self::Clear => "clear-btn",
        }
    }

    /// Accepts a button id (`create-btn`) or its bare name (`create`).
    pub fn from_button(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        let name = raw.strip_suffix("-btn").unwrap_or(&raw);
        match name {
            "find-best" | "find_best" => Some(Self::FindBest),
            _ => Self::ALL.into_iter().find(|kind| kind.name() == name),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_button_ids_and_names() {
        assert_eq!(ActionKind::from_button("create-btn"), Some(ActionKind::Create));
        assert_eq!(ActionKind::from_button("Search"), Some(ActionKind::Search));
        assert_eq!(ActionKind::from_button("best-btn"), Some(ActionKind::FindBest));
        assert_eq!(ActionKind::from_button("find-best"), Some(ActionKind::FindBest));
        assert_eq!(ActionKind::from_button("launch-btn"), None);
    }

    #[test]
    fn every_kind_round_trips_through_its_button_id() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_button(kind.button_id()), Some(kind));
            assert_eq!(
                Some(kind.index()),
                ActionKind::ALL.iter().position(|other| *other == kind)
            );
        }
    }
}
