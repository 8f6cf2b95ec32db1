//! User confirmation seam for destructive actions

/// Asks the user before the catalog is reordered
///
/// The browser build answers with `window.confirm`; tests use the generated
/// `MockShuffleConfirmation`.
#[cfg_attr(test, mockall::automock)]
pub trait ShuffleConfirmation {
    /// Return `true` to go ahead with the shuffle
    fn confirm_shuffle(&mut self) -> bool;
}

/// Confirmation that always agrees
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ShuffleConfirmation for AlwaysConfirm {
    fn confirm_shuffle(&mut self) -> bool {
        true
    }
}

impl<F: FnMut() -> bool> ShuffleConfirmation for F {
    fn confirm_shuffle(&mut self) -> bool {
        self()
    }
}
