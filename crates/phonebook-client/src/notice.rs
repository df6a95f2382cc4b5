use std::fmt;

/// User-facing message produced by a reconciler step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Added(String),
    Updated(String),
    Deleted(String),
    /// Same name and number are already cached; nothing was sent.
    AlreadyPresent(String),
    /// The server rejected a create because someone else added the name first.
    AddedElsewhere(String),
    /// An update found the entry already deleted on the server.
    AlreadyRemoved(String),
    ConfirmReplace(String),
    ConfirmDelete(String),
}

impl Notice {
    /// Whether the message reports a problem rather than a success or prompt.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::AddedElsewhere(_) | Self::AlreadyRemoved(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(name) => write!(f, "Added {name}"),
            Self::Updated(name) => write!(f, "Updated {name}"),
            Self::Deleted(name) => write!(f, "Deleted {name}"),
            Self::AlreadyPresent(name) => write!(f, "{name} is already added to phonebook"),
            Self::AddedElsewhere(name) => {
                write!(f, "{name} was added by someone else; submit again to update the number")
            }
            Self::AlreadyRemoved(name) => {
                write!(f, "Information of {name} has already been removed from server")
            }
            Self::ConfirmReplace(name) => write!(
                f,
                "{name} is already added to phonebook, replace the old number with a new one?"
            ),
            Self::ConfirmDelete(name) => write!(f, "Delete {name}?"),
        }
    }
}
