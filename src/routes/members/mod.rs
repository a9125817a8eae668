mod handler;

pub use handler::update_members;
