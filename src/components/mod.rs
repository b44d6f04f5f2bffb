pub mod charts;
pub mod equipment_table;
pub mod history_list;
pub mod nav_bar;
pub mod summary_cards;
