pub mod drill;
pub mod filter;
pub mod style;
pub mod surface;
pub mod view;

pub use drill::{DrillDown, Timing};
pub use filter::BranchFilter;
pub use style::TextStyle;
pub use surface::{LabelPlacement, Viewport, Wedge};
pub use view::ViewState;
