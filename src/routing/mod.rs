//! Routing module
//!
//! Ordered prefix route table: the first matching entry wins, unmatched paths go
//! to the table's fallback target.

mod table;

pub use table::{RouteTable, RouteTarget, MUSIC_PROXY_PREFIX};
