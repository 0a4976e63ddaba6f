mod server;
mod service_worker;

pub use server::serve;
pub use service_worker::print_service_worker;
