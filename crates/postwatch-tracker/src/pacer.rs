use std::time::Duration;

/// Waits `delay` before every call except the first.
pub(crate) struct Pacer {
    delay: Duration,
    primed: bool,
}

impl Pacer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            primed: false,
        }
    }

    pub(crate) async fn wait(&mut self) {
        if self.primed && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.primed = true;
    }
}
