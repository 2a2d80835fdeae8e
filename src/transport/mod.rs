pub mod ticker;
pub mod ws_session;
