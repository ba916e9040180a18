//! Session Worker
//!
//! Runs a [`Session`] on a dedicated thread and feeds it commands from a
//! channel.
//!
//! ## Architecture
//! ```text
//!  WorkerHandle ──┐
//!  WorkerHandle ──┼──► crossbeam channel ──► worker thread ──► Session
//!  WorkerHandle ──┘        (FIFO)             (one command
//!        ▲                                     at a time)
//!        └──────────── per-request reply channel ◄──┘
//! ```
//!
//! The session itself stays synchronous. The worker only serializes access:
//! a command is not dequeued until the previous one, including its file I/O,
//! has finished.

use std::io::{BufRead, Write};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, SeqLogError};
use crate::protocol::{read_command, write_response, Command, Response};
use crate::session::Session;

/// Messages consumed by the worker thread
enum Message {
    Execute {
        command: Command,
        reply: Sender<Result<Response>>,
    },
    Shutdown,
}

/// Owns the worker thread
pub struct SessionWorker {
    handle: WorkerHandle,

    /// Join handle, taken on shutdown
    thread: Mutex<Option<JoinHandle<()>>>,
}

/// Cloneable sender side of a worker
#[derive(Clone)]
pub struct WorkerHandle {
    sender: Sender<Message>,
}

impl SessionWorker {
    /// Start a worker thread owning a fresh, uninitialized session
    pub fn spawn(config: Config) -> Result<Self> {
        let session = Session::new(config)?;
        let (sender, receiver) = channel::unbounded();

        let thread = thread::Builder::new()
            .name("seqlog-worker".to_string())
            .spawn(move || run(session, receiver))?;

        Ok(Self {
            handle: WorkerHandle { sender },
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Get a handle that can be moved to other threads
    pub fn handle(&self) -> WorkerHandle {
        self.handle.clone()
    }

    /// Execute a command on the worker and wait for its result
    pub fn execute(&self, command: Command) -> Result<Response> {
        self.handle.execute(command)
    }

    /// Stop the worker after the commands already queued
    ///
    /// Safe to call more than once.
    pub fn shutdown(&self) -> Result<()> {
        let thread = match self.thread.lock().take() {
            Some(thread) => thread,
            None => return Ok(()),
        };

        // The thread may already be gone; joining reports how it ended
        let _ = self.handle.sender.send(Message::Shutdown);
        thread
            .join()
            .map_err(|_| SeqLogError::WorkerUnavailable("worker thread panicked".to_string()))
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::error!("Session worker shutdown failed: {}", e);
        }
    }
}

impl WorkerHandle {
    /// Execute a command on the worker and wait for its result
    pub fn execute(&self, command: Command) -> Result<Response> {
        let (reply, result) = channel::bounded(1);

        self.sender
            .send(Message::Execute { command, reply })
            .map_err(|_| SeqLogError::WorkerUnavailable("worker has stopped".to_string()))?;

        result.recv().map_err(|_| {
            SeqLogError::WorkerUnavailable("worker stopped before replying".to_string())
        })?
    }

    /// Serve text commands from `reader`, writing one reply line per command
    ///
    /// Lines that fail to parse get an `ERR` reply and do not stop the loop.
    /// Returns when `reader` is exhausted.
    pub fn serve<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<()> {
        loop {
            let result = match read_command(reader) {
                Ok(Some(command)) => self.execute(command),
                Ok(None) => return Ok(()),
                Err(SeqLogError::Io(e)) => return Err(SeqLogError::Io(e)),
                Err(e) => Err(e),
            };

            write_response(writer, &result)?;
        }
    }
}

/// Worker thread body
fn run(mut session: Session, receiver: Receiver<Message>) {
    tracing::debug!("Session worker started");

    for message in receiver.iter() {
        match message {
            Message::Execute { command, reply } => {
                tracing::trace!("Executing command: {}", command);

                let result = session.execute(command);
                if let Err(ref e) = result {
                    tracing::warn!("Command failed: {}", e);
                }

                // The caller may have given up waiting
                let _ = reply.send(result);
            }
            Message::Shutdown => break,
        }
    }

    tracing::debug!("Session worker stopped");
}
