pub mod gametime;
pub mod twilio;

// Re-export commonly used types
pub use gametime::GametimeClient;
pub use twilio::TwilioClient;

#[cfg(test)]
pub(crate) mod test_server;
