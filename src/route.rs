/// The single shared "current route" value, owned jointly by the link
/// interceptor and the history synchronizer. One accessor, one mutator:
/// both components must agree on the current route at every instant, and
/// funnelling every update through `advance` keeps that enforceable.
#[derive(Debug)]
pub struct RouteState {
    current: String,
}

impl RouteState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replace the current route, returning the departed one.
    pub fn advance(&mut self, next: impl Into<String>) -> String {
        std::mem::replace(&mut self.current, next.into())
    }
}
