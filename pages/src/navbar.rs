//! Top navigation bar: role-dependent menu and basket badges.

use happyshop_core::selector;
use happyshop_core::{Route, Shell, Store};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: Route,
}

impl MenuEntry {
    fn new(label: &'static str, route: Route) -> Self {
        Self { label, route }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarView {
    /// First letter of the account name, shown in the avatar.
    pub avatar: Option<char>,
    pub menu: Vec<MenuEntry>,
    /// Shortcut button shown to admins only.
    pub admin_action: Option<MenuEntry>,
    pub cart_badge: usize,
    /// `None` for admins, who have no wishlist.
    pub wishlist_badge: Option<usize>,
    pub show_filter_toggle: bool,
    pub filters_open: bool,
}

pub fn menu_for(is_admin: bool) -> Vec<MenuEntry> {
    if is_admin {
        vec![
            MenuEntry::new("Home", Route::Home),
            MenuEntry::new("Profile", Route::AdminProfile),
            MenuEntry::new("Orders", Route::AdminOrders),
            MenuEntry::new("Logout", Route::Logout),
        ]
    } else {
        vec![
            MenuEntry::new("Home", Route::Home),
            MenuEntry::new("Profile", Route::Profile),
            MenuEntry::new("My Orders", Route::Orders),
            MenuEntry::new("Logout", Route::Logout),
        ]
    }
}

/// Build the bar for the current state. `on_product_list` is true on the
/// pages that show the filter panel.
pub fn view(store: &Store, on_product_list: bool) -> NavbarView {
    store.read(|state| {
        let is_admin = selector::select_is_admin(state);
        let entities = state.entities();
        NavbarView {
            avatar: selector::select_session(state).and_then(|u| u.name.chars().next()),
            menu: menu_for(is_admin),
            admin_action: is_admin.then(|| MenuEntry::new("Add Product", Route::AdminAddProduct)),
            cart_badge: entities.cart_count(),
            wishlist_badge: (!is_admin).then(|| entities.wishlist_count()),
            show_filter_toggle: on_product_list,
            filters_open: entities.filters_open(),
        }
    })
}

pub fn toggle_filters(store: &Store) {
    store.toggle_filters();
}

pub fn open(shell: &Shell, entry: &MenuEntry) {
    shell.navigate(&entry.route);
}
