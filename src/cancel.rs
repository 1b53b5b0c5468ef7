use std::cell::Cell;
use std::rc::Rc;

/// Tracks whether the issuer of a request still wants its result.
///
/// A view creates one when it mounts and calls [`Interest::withdraw`] when it
/// unmounts; responses that resolve afterwards come back as `ApiError::Cancelled`
/// instead of being applied to state the view no longer owns.
#[derive(Clone, Debug, Default)]
pub struct Interest {
    withdrawn: Rc<Cell<bool>>,
}

impl Interest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn withdraw(&self) {
        self.withdrawn.set(true);
    }

    pub fn is_live(&self) -> bool {
        !self.withdrawn.get()
    }
}

impl PartialEq for Interest {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.withdrawn, &other.withdrawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_liveness() {
        let interest = Interest::new();
        let held_by_request = interest.clone();
        assert!(held_by_request.is_live());

        interest.withdraw();
        assert!(!held_by_request.is_live());
        assert_eq!(interest, held_by_request);
        assert_ne!(interest, Interest::new());
    }
}
