pub mod review_session;
pub mod report_renderer;
pub mod review_server;
