mod error_location;
mod http_status;
mod shutdown_secret;
