//! Threaded evaluation kernel
//!
//! The kernel runs one [`Interpreter`] on a worker thread and talks to it
//! through two [`MessageQueue`]s. Program text goes in, one reply per program
//! comes out, strictly in order.
//!
//! ## Example
//!
//! ```rust
//! use plotlisp::kernel::{Kernel, Message};
//! use plotlisp::Expression;
//!
//! let mut kernel = Kernel::default();
//! kernel.start().unwrap();
//!
//! let reply = kernel.request("(+ 1 2)").unwrap();
//! assert_eq!(reply, Message::Result(Expression::from(3.0)));
//!
//! kernel.stop().unwrap();
//! ```
//!
//! The control texts `%stop`, `%exit` and `%reset` end the worker loop and
//! produce no reply. `%reset` additionally clears the environment and
//! re-runs the startup program before the loop returns.

mod config;
mod message;
mod queue;

pub use config::{KernelConfig, STARTUP_PROGRAM};
pub use message::{Message, EXIT_COMMAND, RESET_COMMAND, STOP_COMMAND};
pub use queue::MessageQueue;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;

/// Owner of the worker thread and its queues
///
/// While the worker runs it owns the interpreter; it hands the interpreter
/// back through its join handle when the loop ends.
pub struct Kernel {
    config: KernelConfig,
    input: Arc<MessageQueue>,
    output: Arc<MessageQueue>,
    interpreter: Option<Interpreter>,
    worker: Option<JoinHandle<Interpreter>>,
}

impl Kernel {
    /// Creates a stopped kernel and runs the startup program
    pub fn new(config: KernelConfig) -> Self {
        let mut interpreter = Interpreter::new();
        seed(&mut interpreter, &config.startup_program);

        Kernel {
            config,
            input: Arc::new(MessageQueue::new()),
            output: Arc::new(MessageQueue::new()),
            interpreter: Some(interpreter),
            worker: None,
        }
    }

    /// Settings this kernel was built with
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// True while the worker thread is alive
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Spawns the worker loop; does nothing if it is already running
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.reclaim()?;

        let interpreter = match self.interpreter.take() {
            Some(interpreter) => interpreter,
            None => {
                let mut interpreter = Interpreter::new();
                seed(&mut interpreter, &self.config.startup_program);
                interpreter
            }
        };

        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);
        let startup = self.config.startup_program.clone();

        let handle = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || run_worker(interpreter, &input, &output, &startup))
            .map_err(|e| Error::ThreadError {
                message: e.to_string(),
            })?;

        info!(thread = %self.config.thread_name, "kernel started");
        self.worker = Some(handle);
        Ok(())
    }

    /// Stops the worker loop and waits for it; does nothing if not running
    pub fn stop(&mut self) -> Result<()> {
        if self.worker.is_none() {
            return Ok(());
        }
        self.shutdown(STOP_COMMAND)?;
        info!("kernel stopped");
        Ok(())
    }

    /// Clears the environment and re-runs the startup program
    ///
    /// A running worker is sent `%reset` and joined. The worker stays stopped
    /// afterwards unless [`KernelConfig::restart_after_reset`] is set.
    pub fn reset(&mut self) -> Result<()> {
        let reseeded = if self.is_running() {
            self.shutdown(RESET_COMMAND)?
        } else {
            self.reclaim()?;
            false
        };

        // The loop may have ended on a queued %stop before reaching %reset
        if !reseeded {
            let interpreter = self.interpreter.get_or_insert_with(Interpreter::new);
            seed(interpreter, &self.config.startup_program);
        }
        info!("kernel reset");

        if self.config.restart_after_reset {
            self.start()?;
        }
        Ok(())
    }

    /// Queues program text (or a control command) for the worker
    pub fn submit(&self, program: impl Into<String>) {
        self.input.push(Message::text(program));
    }

    /// Blocks until the next reply is available
    ///
    /// Blocks forever if nothing was submitted or the worker is stopped.
    pub fn recv(&self) -> Message {
        self.output.wait_and_pop()
    }

    /// Takes the next reply if one is ready
    pub fn try_recv(&self) -> Option<Message> {
        self.output.try_pop()
    }

    /// Submits a program and waits for its reply
    pub fn request(&self, program: impl Into<String>) -> Result<Message> {
        if !self.is_running() {
            return Err(Error::KernelNotRunning);
        }
        self.submit(program);
        Ok(self.recv())
    }

    /// The interpreter, available only while the worker is stopped
    pub fn interpreter(&self) -> Option<&Interpreter> {
        self.interpreter.as_ref()
    }

    /// Sends a control command to the worker and joins it
    ///
    /// Returns true if the worker consumed the command.
    fn shutdown(&mut self, command: &str) -> Result<bool> {
        let Some(handle) = self.worker.take() else {
            return Ok(false);
        };

        let control = Message::text(command);
        let pushed = !handle.is_finished();
        if pushed {
            self.input.push(control.clone());
        }
        let interpreter = handle.join().map_err(|_| Error::ThreadJoinFailed)?;
        self.interpreter = Some(interpreter);

        // The loop may have ended on an earlier command and never seen ours
        let unread = pushed && self.input.retract(&control);
        Ok(pushed && !unread)
    }

    /// Joins a worker whose loop has already ended
    fn reclaim(&mut self) -> Result<()> {
        if let Some(handle) = self.worker.take() {
            let interpreter = handle.join().map_err(|_| Error::ThreadJoinFailed)?;
            self.interpreter = Some(interpreter);
        }
        Ok(())
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "kernel did not shut down cleanly");
        }
    }
}

/// Clears the environment and evaluates the startup program into it
fn seed(interpreter: &mut Interpreter, startup: &str) {
    interpreter.reset();
    if startup.trim().is_empty() {
        return;
    }
    if let Err(e) = interpreter.startup(startup) {
        warn!(error = %e, "startup program failed");
    }
}

/// Worker loop: one reply per program until a control command arrives
fn run_worker(
    mut interpreter: Interpreter,
    input: &MessageQueue,
    output: &MessageQueue,
    startup: &str,
) -> Interpreter {
    loop {
        let program = match input.wait_and_pop() {
            Message::Text(text) => text,
            other => {
                warn!(?other, "kernel received a non-text message");
                output.push(Message::Error(
                    "Error: kernel expects program text".to_string(),
                ));
                continue;
            }
        };

        match program.as_str() {
            STOP_COMMAND | EXIT_COMMAND => return interpreter,
            RESET_COMMAND => {
                seed(&mut interpreter, startup);
                return interpreter;
            }
            _ => {
                debug!(bytes = program.len(), "evaluating request");
                output.push(interpreter.eval_text(&program));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{Atom, Expression};

    #[test]
    fn test_new_kernel_is_stopped() {
        let kernel = Kernel::new(KernelConfig::bare());
        assert!(!kernel.is_running());
        assert!(kernel.interpreter().is_some());
        assert_eq!(kernel.request("(+ 1 2)"), Err(Error::KernelNotRunning));
    }

    #[test]
    fn test_start_request_stop() {
        let mut kernel = Kernel::new(KernelConfig::bare());
        kernel.start().unwrap();
        assert!(kernel.is_running());
        assert!(kernel.interpreter().is_none());

        let reply = kernel.request("(+ 1 2)").unwrap();
        assert_eq!(reply, Message::Result(Expression::from(3.0)));

        kernel.stop().unwrap();
        assert!(!kernel.is_running());
        assert!(kernel.interpreter().is_some());
    }

    #[test]
    fn test_double_start_and_stop_are_noops() {
        let mut kernel = Kernel::new(KernelConfig::bare());
        kernel.start().unwrap();
        kernel.start().unwrap();
        assert!(kernel.is_running());

        kernel.stop().unwrap();
        kernel.stop().unwrap();
        assert!(!kernel.is_running());
    }

    #[test]
    fn test_definitions_survive_stop_and_start() {
        let mut kernel = Kernel::new(KernelConfig::bare());
        kernel.start().unwrap();
        kernel.request("(define a 5)").unwrap();
        kernel.stop().unwrap();

        kernel.start().unwrap();
        let reply = kernel.request("(* a 2)").unwrap();
        assert_eq!(reply, Message::Result(Expression::from(10.0)));
    }

    #[test]
    fn test_reset_while_stopped_reseeds() {
        let mut kernel = Kernel::default();
        kernel.start().unwrap();
        kernel.request("(define a 5)").unwrap();
        kernel.stop().unwrap();

        kernel.reset().unwrap();
        let env = kernel.interpreter().unwrap().environment();
        assert!(!env.is_known(&Atom::symbol("a")));
        assert!(env.is_anon_proc(&Atom::symbol("make-point")));
    }

    #[test]
    fn test_startup_program_is_loaded() {
        let kernel = Kernel::default();
        let env = kernel.interpreter().unwrap().environment();
        for name in ["make-point", "make-line", "make-text"] {
            assert!(env.is_anon_proc(&Atom::symbol(name)), "{} missing", name);
        }
    }

    #[test]
    fn test_bad_startup_program_does_not_prevent_start() {
        let config = KernelConfig {
            startup_program: "(begin (define x".to_string(),
            ..KernelConfig::default()
        };
        let mut kernel = Kernel::new(config);
        kernel.start().unwrap();
        assert!(kernel.request("(+ 1 1)").unwrap().is_result());
    }
}
