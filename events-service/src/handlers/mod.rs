pub mod approved_events;

pub use approved_events::handle_approved_events;
