//! Sample analysis engines for driving `bugmark` end to end.
//!
//! Both checks work line by line on Java-like text. They approximate the
//! real analyses closely enough to exercise marker verification against
//! realistic fixtures, nothing more.

pub mod ambiguous_method_reference;
pub mod bad_shift_amount;
pub mod java;

pub use ambiguous_method_reference::AmbiguousMethodReference;
pub use bad_shift_amount::BadShiftAmount;

use bugmark::{Checker, CheckerIdentity};

/// Every available checker.
pub fn all_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(AmbiguousMethodReference::new()),
        Box::new(BadShiftAmount::new()),
    ]
}

/// The checker registered under `identity`, if any.
pub fn checker_by_name(identity: &CheckerIdentity) -> Option<Box<dyn Checker>> {
    all_checkers()
        .into_iter()
        .find(|checker| checker.name() == identity.as_str())
}
