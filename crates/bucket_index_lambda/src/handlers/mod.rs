pub mod dispatcher;
pub mod recorder;
