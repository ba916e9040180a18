//! Protocol Module
//!
//! The command surface of a session.
//!
//! ### Commands
//! | Command   | Input | Output                      |
//! |-----------|-------|-----------------------------|
//! | `init`    | path  | none                        |
//! | `step`    | none  | the appended value          |
//! | `getData` | none  | ordered sequence            |
//! | `reset`   | none  | ordered sequence (empty)    |
//!
//! Commands can be built directly or parsed from their text form, which is
//! what hosts talking to a [`SessionWorker`](crate::worker::SessionWorker)
//! over a pipe use.

mod codec;
mod command;
mod response;

pub use codec::{read_command, write_response};
pub use command::{Command, CommandType};
pub use response::Response;
