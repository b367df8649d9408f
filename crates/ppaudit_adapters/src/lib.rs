pub mod admin_api;
pub mod configuration;
pub mod network;
pub mod oauth;
pub mod telemetry;
pub mod transport;

// Re-exports for convenience
pub use admin_api::PowerPlatformAdminApi;
pub use oauth::ClientCredentialsTokenProvider;
pub use transport::ReqwestTransport;
