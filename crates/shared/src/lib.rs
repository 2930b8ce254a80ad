//! Types shared by the dashboard core, the proxy server and the hosting driver.

pub mod domain;
pub mod error;
pub mod protocol;
