use std::cell::RefCell;

pub trait Log {
    fn log(&self, message: &str);
}

/// Keeps log lines in memory.
#[derive(Default)]
pub struct VecLog {
    pub lines: RefCell<Vec<String>>,
}

impl VecLog {
    pub fn lines(&self) -> Vec<String> {
        return self.lines.borrow().clone();
    }
}

impl Log for VecLog {
    fn log(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}
