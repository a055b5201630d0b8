//! Widgets shipped with trellis.

/// Push button.
mod button;
/// Two-state toggle.
mod checkbox;
/// Title strip and control hit regions owned by a menu.
mod chrome;
/// Static text.
mod label;
/// Draggable, resizable, collapsible container.
mod menu;
/// Tree root.
mod root;
/// Horizontal value picker.
mod slider;

pub use button::{Button, ButtonColors};
pub use checkbox::{Checkbox, CheckboxColors};
pub use chrome::{Chrome, ChromeKind};
pub use label::Label;
pub use menu::Menu;
pub use root::Root;
pub use slider::{Slider, SliderColors};
