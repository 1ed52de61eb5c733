pub mod chart_service;
pub mod feed_service;
pub mod overview_service;
pub mod trade_service;
pub mod widget_service;
