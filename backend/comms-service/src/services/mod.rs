pub mod grants;
pub mod twilio;
pub mod twiml;
