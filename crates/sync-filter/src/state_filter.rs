//! The state filter trait and its combinators

use sync_model::{LocalResource, StateView};

/// Pure predicate over a single side's versioning state.
pub trait StateFilter {
    /// Whether the state alone qualifies the resource.
    fn accept(&self, view: StateView<'_>) -> bool;

    /// Whether callers that recurse should still visit the children of a
    /// container this filter did not accept.
    fn allows_recursion(&self, view: StateView<'_>) -> bool;

    fn accept_local(&self, local: &LocalResource) -> bool {
        self.accept(local.view())
    }
}

impl<F: StateFilter + ?Sized> StateFilter for &F {
    fn accept(&self, view: StateView<'_>) -> bool {
        (**self).accept(view)
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        (**self).allows_recursion(view)
    }
}

impl<F: StateFilter + ?Sized> StateFilter for Box<F> {
    fn accept(&self, view: StateView<'_>) -> bool {
        (**self).accept(view)
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        (**self).allows_recursion(view)
    }
}

/// Accepts when every operand accepts. An empty conjunction accepts.
pub struct AndFilter {
    filters: Vec<Box<dyn StateFilter>>,
}

impl AndFilter {
    pub fn new(filters: Vec<Box<dyn StateFilter>>) -> Self {
        Self { filters }
    }
}

impl StateFilter for AndFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        self.filters.iter().all(|f| f.accept(view))
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        self.filters.iter().all(|f| f.allows_recursion(view))
    }
}

/// Accepts when any operand accepts. An empty disjunction rejects.
pub struct OrFilter {
    filters: Vec<Box<dyn StateFilter>>,
}

impl OrFilter {
    pub fn new(filters: Vec<Box<dyn StateFilter>>) -> Self {
        Self { filters }
    }
}

impl StateFilter for OrFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        self.filters.iter().any(|f| f.accept(view))
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        self.filters.iter().any(|f| f.allows_recursion(view))
    }
}

/// Inverts acceptance; recursion is left to the operand.
pub struct NotFilter {
    inner: Box<dyn StateFilter>,
}

impl NotFilter {
    pub fn new(inner: Box<dyn StateFilter>) -> Self {
        Self { inner }
    }
}

impl StateFilter for NotFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        !self.inner.accept(view)
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        self.inner.allows_recursion(view)
    }
}

/// Ad hoc filter built from a closure. Recursion is always allowed.
pub struct FnFilter<F> {
    accept: F,
}

impl<F> StateFilter for FnFilter<F>
where
    F: Fn(StateView<'_>) -> bool,
{
    fn accept(&self, view: StateView<'_>) -> bool {
        (self.accept)(view)
    }

    fn allows_recursion(&self, _view: StateView<'_>) -> bool {
        true
    }
}

/// Build a filter from a closure.
pub fn filter_fn<F>(accept: F) -> FnFilter<F>
where
    F: Fn(StateView<'_>) -> bool,
{
    FnFilter { accept }
}

/// Combinator methods available on every sized filter.
pub trait StateFilterExt: StateFilter + Sized + 'static {
    fn and(self, other: impl StateFilter + 'static) -> AndFilter {
        AndFilter::new(vec![Box::new(self), Box::new(other)])
    }

    fn or(self, other: impl StateFilter + 'static) -> OrFilter {
        OrFilter::new(vec![Box::new(self), Box::new(other)])
    }

    fn not(self) -> NotFilter {
        NotFilter::new(Box::new(self))
    }

    fn boxed(self) -> Box<dyn StateFilter> {
        Box::new(self)
    }
}

impl<F: StateFilter + Sized + 'static> StateFilterExt for F {}
