//! Compile time dependency injection.
//!
//! A [`Provider`] owns the leaf dependencies (connections and configuration
//! values). Every other type implements [`Build`], usually via the derive
//! macro, and is assembled recursively from its fields. Built values are
//! cached in the provider, so each type is only constructed once.

#[cfg(test)]
extern crate self as intake_di;

pub use intake_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// The cache of already built values.
    fn cache(&mut self) -> &mut TypeMap;

    fn get<T: 'static + Clone>(&mut self) -> Option<T> {
        self.cache().get::<T>().cloned()
    }

    fn insert<T: 'static>(&mut self, value: T) {
        self.cache().insert(value);
    }
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
