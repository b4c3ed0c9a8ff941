//! Middleware chain primitives.

use std::marker::PhantomData;

/// One link in a chain of responsibility over a context `C`.
pub trait Middleware<C, E>: Sized {
    /// Process `ctx`, optionally delegating to the rest of the chain.
    fn handle(&self, ctx: C, next: Next<'_, Self, C, E>) -> Result<C, E>;
}

/// The remainder of a chain.
///
/// Running an empty remainder returns the context unchanged.
pub struct Next<'n, M, C, E> {
    rest: &'n [M],
    _marker: PhantomData<fn(C) -> Result<C, E>>,
}

impl<'n, M, C, E> Next<'n, M, C, E>
where
    M: Middleware<C, E>,
{
    /// A chain over `middlewares`, first element outermost.
    #[must_use]
    pub fn new(middlewares: &'n [M]) -> Self {
        Self {
            rest: middlewares,
            _marker: PhantomData,
        }
    }

    /// Hand the context to the rest of the chain.
    pub fn run(self, ctx: C) -> Result<C, E> {
        match self.rest.split_first() {
            Some((head, tail)) => head.handle(ctx, Next::new(tail)),
            None => Ok(ctx),
        }
    }

    /// Number of middlewares still to run.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }
}

impl<M, C, E> std::fmt::Debug for Next<'_, M, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.rest.len())
            .finish()
    }
}

type StepFn<C, E> = dyn for<'n> Fn(C, Next<'n, Step<C, E>, C, E>) -> Result<C, E> + Send + Sync;

/// A named closure middleware.
pub struct Step<C, E> {
    name: &'static str,
    handler: Box<StepFn<C, E>>,
}

impl<C, E> Step<C, E> {
    pub fn new<F>(name: &'static str, handler: F) -> Self
    where
        F: for<'n> Fn(C, Next<'n, Step<C, E>, C, E>) -> Result<C, E> + Send + Sync + 'static,
    {
        Self {
            name,
            handler: Box::new(handler),
        }
    }

    /// A step that runs `before` and then the rest of the chain.
    pub fn before<F>(name: &'static str, before: F) -> Self
    where
        F: Fn(C) -> Result<C, E> + Send + Sync + 'static,
    {
        Self::new(name, move |ctx, next| next.run(before(ctx)?))
    }

    /// A step that runs the rest of the chain and then `after`.
    pub fn after<F>(name: &'static str, after: F) -> Self
    where
        F: Fn(C) -> Result<C, E> + Send + Sync + 'static,
    {
        Self::new(name, move |ctx, next| after(next.run(ctx)?))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C, E> Middleware<C, E> for Step<C, E> {
    fn handle(&self, ctx: C, next: Next<'_, Self, C, E>) -> Result<C, E> {
        (self.handler)(ctx, next)
    }
}

impl<C, E> std::fmt::Debug for Step<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// An owned, ordered list of middlewares.
#[derive(Debug)]
pub struct Pipeline<M> {
    middlewares: Vec<M>,
}

impl<M> Pipeline<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Append a middleware; it runs inside every middleware added before it.
    pub fn push(&mut self, middleware: M) {
        self.middlewares.push(middleware);
    }

    /// Add a middleware (builder pattern).
    #[must_use]
    pub fn with(mut self, middleware: M) -> Self {
        self.push(middleware);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run `ctx` through every middleware, first added outermost.
    pub fn apply<C, E>(&self, ctx: C) -> Result<C, E>
    where
        M: Middleware<C, E>,
    {
        Next::new(&self.middlewares).run(ctx)
    }
}

impl<M> Default for Pipeline<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> FromIterator<M> for Pipeline<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            middlewares: iter.into_iter().collect(),
        }
    }
}
