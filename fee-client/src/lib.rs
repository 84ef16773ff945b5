mod http;

pub use http::HttpFeeClient;
