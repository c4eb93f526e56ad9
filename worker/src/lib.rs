pub mod protocol;
pub mod server;

pub use protocol::{ClientMessage, EditRange, ServerMessage};
pub use server::{spawn, AsmWorker, WorkerHandle};
