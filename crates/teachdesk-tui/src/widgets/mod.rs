//! Custom widget components

mod confirm_dialog;
mod create_form;
mod header;
mod home;
mod key_prompt;
mod landing;
mod lessons_list;
mod match_form;
pub mod modal_overlay;
mod result_view;
mod share_menu;
mod status_bar;
mod text_field;

pub use confirm_dialog::ConfirmDialog;
pub use create_form::CreateFormView;
pub use header::MainHeader;
pub use home::Home;
pub use key_prompt::KeyPrompt;
pub use landing::Landing;
pub use lessons_list::LessonsList;
pub use match_form::MatchFormView;
pub use result_view::ResultView;
pub use share_menu::ShareMenu;
pub use status_bar::StatusBar;
pub use text_field::TextField;
