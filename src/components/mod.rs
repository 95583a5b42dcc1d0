//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod companies;
pub mod education;
pub mod header;
pub mod help_dialog;
pub mod layout;
pub mod palette;
pub mod profile_page;
pub mod profile_selector;
pub mod quit_dialog;
pub mod reveal_frame;
pub mod section_title;
pub mod splash;
pub mod tech_stack;

pub use companies::CompanyDialog;
pub use header::Header;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_screen_layout, centered_popup};
pub use palette::Palette;
pub use profile_page::ProfilePage;
pub use profile_selector::ProfileSelector;
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
