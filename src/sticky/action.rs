//! Global actions accepted by [`Sticker::dispatch`](super::Sticker::dispatch).

use std::fmt;
use std::str::FromStr;

use crate::error::StickyError;

/// Operations that apply to the whole sticker rather than one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Tear down every clone and stop monitoring.
    Destroy,
}

impl FromStr for Action {
    type Err = StickyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destroy" => Ok(Self::Destroy),
            other => Err(StickyError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroy => f.write_str("destroy"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_action() {
        assert_eq!("destroy".parse::<Action>().ok(), Some(Action::Destroy));
        assert_eq!(Action::Destroy.to_string(), "destroy");
    }

    #[test]
    fn test_parse_unknown_action() {
        for name in ["reset", "Destroy", ""] {
            match name.parse::<Action>() {
                Err(StickyError::UnknownAction(requested)) => assert_eq!(requested, name),
                other => panic!("expected UnknownAction for {name:?}, got {other:?}"),
            }
        }
    }
}
