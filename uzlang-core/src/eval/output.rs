use std::sync::{Arc, RwLock};

/// Sink for the lines produced by `chop`.
pub trait OutputEmitterIO {
    fn emit_line(&self, line: String);
}

#[derive(Debug, Clone, Copy)]
pub struct NullOutputEmitterIO;

impl OutputEmitterIO for NullOutputEmitterIO {
    fn emit_line(&self, _line: String) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorOutputEmitterIO {
    pub lines: Arc<RwLock<Vec<String>>>
}

impl VectorOutputEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        let mut lines = self.write_lock();
        std::mem::take(&mut *lines)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<String>> {
        self.lines.write().expect("Vector lock poisoned")
    }
}

impl OutputEmitterIO for VectorOutputEmitterIO {
    fn emit_line(&self, line: String) {
        let mut lines = self.write_lock();

        lines.push(line);
    }
}
