pub mod catalog;
pub mod forms;
pub mod orders;
pub mod session;
pub mod status;
pub mod storage;
