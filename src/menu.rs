//! Menu operation flags.

use bitflags::bitflags;

bitflags! {
    /// How a menu was requested to be shown.
    ///
    /// The flags travel through `menu_show` untouched; the headless backend
    /// never pops up anything itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MenuFlags: u32 {
        /// The menu was triggered by a mouse click at the given position.
        const FOR_CLICK = 1 << 0;
        /// Return the keymaps of the selected items instead of running them.
        const KEYMAPS = 1 << 1;
        /// Keyboard navigation inside the menu is expected.
        const KBD_NAVIGATION = 1 << 2;
    }
}
