use druid::Selector;

use crate::data::Nav;

// Navigation

pub const NAVIGATE: Selector<Nav> = Selector::new("app.navigates");
pub const NAVIGATE_BACK: Selector<usize> = Selector::new("app.navigate-back");
pub const NAVIGATE_REFRESH: Selector = Selector::new("app.navigate-refresh");

// Faults

pub const FAULT: Selector<String> = Selector::new("app.fault");

// External

pub const OPEN_LINK: Selector<String> = Selector::new("app.open-link");
