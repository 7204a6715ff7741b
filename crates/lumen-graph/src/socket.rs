/// A value socket with a `changed` flag.
///
/// Writes mark the socket changed; the owning component consumes the flag
/// during its update pass via [`take_changed`].
#[derive(Debug, Clone, Default)]
pub struct Property<T> {
    value: T,
    changed: bool,
}

impl<T> Property<T> {
    pub fn new(value: T) -> Self {
        Self { value, changed: false }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Overwrites the value and marks the socket changed.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changed = true;
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns whether the socket changed since the last call, clearing the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}

impl<T: PartialEq> Property<T> {
    /// Like [`set`] but only marks changed when the value actually differs.
    pub fn set_if_changed(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.changed = true;
        }
    }
}

/// A valueless event socket: `set` raises it, `take_changed` consumes it.
#[derive(Debug, Clone, Default)]
pub struct EventFlag {
    changed: bool,
}

impl EventFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the event.
    pub fn set(&mut self) {
        self.changed = true;
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns whether the event was raised since the last call, clearing it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }
}
