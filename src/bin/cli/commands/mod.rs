pub mod add;
pub mod list;
pub mod preview;
pub mod review;
pub mod stats;
