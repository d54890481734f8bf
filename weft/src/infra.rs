#![doc(hidden)]

pub mod export;
pub mod ops;
pub mod testing;

#[cfg(feature = "proptest")]
pub mod proptest;
