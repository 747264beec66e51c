pub(crate) mod migrate;

#[cfg(feature = "github")]
pub(crate) mod sync;
