pub mod auctions;
pub mod board_page;
pub mod home;
pub mod jockeys;
