#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

/// Dialog roles bound on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Login,
    Signup,
    Product,
}

impl DialogKind {
    pub const ALL: [Self; 3] = [Self::Login, Self::Signup, Self::Product];

    const fn index(self) -> usize {
        match self {
            Self::Login => 0,
            Self::Signup => 1,
            Self::Product => 2,
        }
    }
}

/// Visibility of every bound dialog. All dialogs start hidden.
///
/// `open` only ever shows the targeted dialog; `close_all` hides every one.
/// There is no stacking or terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    visible: [bool; 3],
}

impl ModalState {
    pub fn open(&mut self, kind: DialogKind) {
        self.visible[kind.index()] = true;
    }

    pub fn close_all(&mut self) {
        self.visible = [false; 3];
    }

    #[must_use]
    pub fn is_visible(&self, kind: DialogKind) -> bool {
        self.visible[kind.index()]
    }

    /// Currently visible dialogs, in `DialogKind::ALL` order.
    #[must_use]
    pub fn visible(&self) -> Vec<DialogKind> {
        DialogKind::ALL
            .into_iter()
            .filter(|kind| self.is_visible(*kind))
            .collect()
    }
}
