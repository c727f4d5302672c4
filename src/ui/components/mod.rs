pub mod auth_form;
pub mod chat_panel;
pub mod developer_card;
pub mod intro;
pub mod mode_menu;
pub mod result_panel;
pub mod typing_area;
