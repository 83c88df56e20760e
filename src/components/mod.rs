pub mod navbar;
pub mod parameters_card;
pub mod predictions_table;
pub mod toast;
