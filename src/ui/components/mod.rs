pub mod masthead;
pub mod menu;
pub mod progress_bar;
pub mod puzzle_grid;
pub mod word_list;
