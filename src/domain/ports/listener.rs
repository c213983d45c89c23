//! Compile listener port
//!
//! Listeners are told when a compilation of a watched file starts and when it
//! finishes. A watched file owns its subscription list; listeners never own
//! the file.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives compile lifecycle notifications
pub trait CompileListener {
    /// A compilation is about to run
    fn on_compile_start(&mut self);

    /// A compilation finished. `error` is `None` on success.
    fn on_compile_finished(&mut self, error: Option<&str>);
}

/// Listener handle stored by watched files
pub type SharedListener = Rc<RefCell<dyn CompileListener>>;
