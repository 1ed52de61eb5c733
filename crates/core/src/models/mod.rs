pub mod chart;
pub mod feed;
pub mod stat;
pub mod trade;
pub mod widget;

mod de;
