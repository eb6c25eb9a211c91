use crate::error::Error;

/// State of one outstanding request.
///
/// `Deferred` carries the key the request was issued with. `update` only
/// applies a result whose key matches, so completions of superseded requests
/// fall on the floor.
#[derive(Clone, Debug, PartialEq)]
pub enum Promise<T, D = (), E = Error> {
    Empty,
    Deferred(D),
    Resolved(T),
    Rejected(E),
}

#[derive(Eq, PartialEq, Debug)]
pub enum PromiseState {
    Empty,
    Deferred,
    Resolved,
    Rejected,
}

impl<T, D, E> Promise<T, D, E> {
    pub fn state(&self) -> PromiseState {
        match self {
            Self::Empty => PromiseState::Empty,
            Self::Deferred(_) => PromiseState::Deferred,
            Self::Resolved(_) => PromiseState::Resolved,
            Self::Rejected(_) => PromiseState::Rejected,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_deferred(&self, def: &D) -> bool
    where
        D: PartialEq,
    {
        matches!(self, Self::Deferred(d) if d == def)
    }

    pub fn deferred(&self) -> Option<&D> {
        match self {
            Self::Deferred(def) => Some(def),
            _ => None,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    pub fn defer(&mut self, def: D) {
        *self = Self::Deferred(def);
    }

    pub fn resolve(&mut self, val: T) {
        *self = Self::Resolved(val);
    }

    pub fn reject(&mut self, err: E) {
        *self = Self::Rejected(err);
    }

    pub fn resolve_or_reject(&mut self, res: Result<T, E>) {
        *self = match res {
            Ok(ok) => Self::Resolved(ok),
            Err(err) => Self::Rejected(err),
        };
    }

    /// Applies `res` if the promise is still waiting on `def`.  Returns whether
    /// it did.
    pub fn update(&mut self, (def, res): (D, Result<T, E>)) -> bool
    where
        D: PartialEq,
    {
        if self.is_deferred(&def) {
            self.resolve_or_reject(res);
            true
        } else {
            false
        }
    }
}

impl<T, D, E> Default for Promise<T, D, E> {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_awaited_result_is_applied() {
        let mut promise: Promise<&str, u64> = Promise::Empty;
        promise.defer(1);
        promise.defer(2);

        assert!(!promise.update((1, Ok("stale"))));
        assert!(promise.is_deferred(&2));

        assert!(promise.update((2, Ok("fresh"))));
        assert_eq!(promise.resolved(), Some(&"fresh"));

        // Already resolved, a duplicate delivery changes nothing.
        assert!(!promise.update((2, Ok("again"))));
        assert_eq!(promise.resolved(), Some(&"fresh"));
    }

    #[test]
    fn cleared_promise_drops_late_results() {
        let mut promise: Promise<u32, u64> = Promise::default();
        promise.defer(7);
        promise.clear();
        assert!(!promise.update((7, Err(Error::UnexpectedResponse))));
        assert_eq!(promise.state(), PromiseState::Empty);
    }
}
