use crate::error::Result;

pub trait Arrow: Sized {
    type Object;

    fn source(&self) -> Self::Object;
    fn target(&self) -> Self::Object;

    /// the identity morphism on `a`
    fn identity(a: Self::Object) -> Self;

    /// Compose morphisms in diagrammatic order: `self ; other`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ArityMismatch`] if `self.target() != other.source()`.
    fn compose(&self, other: &Self) -> Result<Self>;
}

pub trait Monoidal: Arrow {
    /// the monoidal unit
    fn unit() -> Self::Object;

    /// `f \otimes g` of two morphisms
    fn tensor(&self, other: &Self) -> Self;
}
