//! Screen implementations. Each screen is a top-level Component.

pub mod locator;
pub mod map;

use nearcare_config::MapDefaults;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(map_defaults: MapDefaults) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Locator,
            Box::new(locator::LocatorScreen::new()),
        ),
        (ScreenId::Map, Box::new(map::MapScreen::new(map_defaults))),
    ]
}
