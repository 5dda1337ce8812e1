pub mod data_grid;
pub mod nav;
pub mod report_board;
pub mod report_card;
pub mod report_modal;
