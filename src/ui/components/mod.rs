pub mod category_list;
pub mod glossary_list;
pub mod menu;
pub mod progress_bar;
pub mod quiz_card;
pub mod search_bar;
